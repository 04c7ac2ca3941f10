use serde::{Deserialize, Serialize};

/// Composite cart key: item class plus quantized captured weight
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartKey {
    pub item_name: String,
    pub weight: u32,
}

impl CartKey {
    pub fn new(item_name: impl Into<String>, weight: u32) -> Self {
        Self {
            item_name: item_name.into(),
            weight,
        }
    }
}

impl std::fmt::Display for CartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}g", self.item_name, self.weight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_name: String,
    /// Quantized weight in grams
    pub captured_weight: u32,
    pub count: u32,
}

impl CartLine {
    pub fn key(&self) -> CartKey {
        CartKey::new(self.item_name.clone(), self.captured_weight)
    }
}
