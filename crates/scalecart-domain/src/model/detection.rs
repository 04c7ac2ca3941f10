use serde::{Deserialize, Serialize};

/// A single classifier detection within one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label (matches catalog item names)
    pub label: String,
    #[serde(default)]
    pub confidence: Option<f32>,
    /// x1, y1, x2, y2 in pixels
    #[serde(default)]
    pub bbox: Option<[f32; 4]>,
}

impl Detection {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence: None,
            bbox: None,
        }
    }
}
