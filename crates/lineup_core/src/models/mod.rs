// Core value types shared by the layout engine and the name synchronizer

pub mod formation;
pub mod mode;
pub mod side;
pub mod slot;

pub use formation::{FormationDescriptor, Line};
pub use mode::GameMode;
pub use side::Side;
pub use slot::PlayerSlot;
