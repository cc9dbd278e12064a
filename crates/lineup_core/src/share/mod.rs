//! Share links
//!
//! A share link carries both formation keys and every edited name. Codes are
//! self-checking: a truncated or tampered code fails to decode instead of
//! producing a partial state.

mod error;
mod format;
mod link;
mod state;

pub use error::ShareError;
pub use format::{decode_share_state, encode_share_state, CHECKSUM_LEN, MAX_SHARE_PAYLOAD};
pub use link::{build_share_url, extract_share_code, LEGACY_FRAGMENT_PREFIXES, SHARE_PARAM};
pub use state::ShareState;
