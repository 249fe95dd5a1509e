use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Detector class id to human readable label.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ClassMap(BTreeMap<i32, String>);

impl ClassMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, class: i32, label: impl Into<String>) -> Self {
        self.0.insert(class, label.into());
        self
    }

    #[inline]
    pub fn label(&self, class: i32) -> &str {
        self.0.get(&class).map(String::as_str).unwrap_or(UNKNOWN_LABEL)
    }

    #[inline]
    pub fn contains(&self, class: i32) -> bool {
        self.0.contains_key(&class)
    }

    #[inline]
    pub fn classes(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> + '_ {
        self.0.iter().map(|(c, l)| (*c, l.as_str()))
    }
}

impl Default for ClassMap {
    /// Warehouse categories of the COCO label set.
    fn default() -> Self {
        Self::new()
            .with(0, "Person")
            .with(7, "Forklift")
            .with(28, "Parcel")
    }
}
