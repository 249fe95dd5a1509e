use crate::classes::ClassMap;
use crate::error::Error;
use crate::tracker::TrackerConfig;

use serde_derive::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    /// Counting line position as a fraction of frame height, from the top.
    pub line_position: f32,
    pub classes: ClassMap,
}

impl Config {
    pub fn from_json(src: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(src)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tracker.validate()?;

        if !(0.0..=1.0).contains(&self.line_position) {
            return Err(Error::InvalidConfig(format!(
                "line_position must be within [0, 1], got {}",
                self.line_position
            )));
        }

        if let Some((class, _)) = self.classes.iter().find(|(_, l)| l.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "class {} has an empty label",
                class
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            line_position: 0.5,
            classes: ClassMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            Config::from_json(r#"{"tracker": {"max_age": 10}, "line_position": 0.25}"#).unwrap();

        assert_eq!(config.tracker.max_age, 10);
        assert_eq!(config.tracker.min_hits, 2);
        assert_eq!(config.line_position, 0.25);
        assert_eq!(config.classes, ClassMap::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Config::from_json(r#"{"line_position": 1.5}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"tracker": {"iou_threshold": 2.0}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"tracker": {"iou_threshold": 0.0}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"classes": {"1": " "}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"tracker": {"max_age": -1}}"#),
            Err(Error::Json(_))
        ));
    }
}
