use std::borrow::Cow;

/// Built-in home names shown before any edit.
pub const DEFAULT_SEED_NAMES: [&str; 11] = [
    "MBAPPE",
    "HAALAND",
    "MESSI",
    "RONALDO",
    "PEDRI",
    "MODRIC",
    "YAMAL",
    "BELLINGHAM",
    "SALAH",
    "DE BRUYNE",
    "NEYMAR",
];

/// Seed list for the home side. Names are stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedNames {
    names: Vec<String>,
}

impl Default for SeedNames {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_NAMES.iter().map(|name| name.to_string()))
    }
}

impl SeedNames {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let names = names
            .into_iter()
            .map(|name| name.trim().to_uppercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Seed for a home index, wrapping around the list; "PLAYER N" when the
    /// list is empty.
    pub fn name_for(&self, index: usize) -> Cow<'_, str> {
        if self.names.is_empty() {
            return Cow::Owned(format!("PLAYER {}", index + 1));
        }
        Cow::Borrowed(self.names[index % self.names.len()].as_str())
    }
}
