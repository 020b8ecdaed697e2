use log::info;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::config::Configuration;
use crate::error::SnapshotError;

pub const CURRENT_VERSION: u32 = 1;

/// A saved configuration, tagged with the format version it was written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub version: u32,
    pub config: Configuration,
}

impl ConfigSnapshot {
    pub fn new(config: Configuration) -> Self {
        Self {
            version: CURRENT_VERSION,
            config,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(text)?;
        if snapshot.version != CURRENT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: CURRENT_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }

    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?)?;
        info!("saved configuration to {path}");
        Ok(())
    }

    pub fn load(path: &str) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AngleMode, Arrangement};
    use crate::test_utils::make_config;

    #[test]
    fn save_and_load_round_trip() {
        let cfg = make_config(|c| {
            c.arrangement = Arrangement::Triple;
            c.angle_mode = AngleMode::Manual;
            c.manual_angle_deg = 52.5;
            c.bezel_mm = 8.0;
            c.curved = true;
            c.curve_radius_mm = Some(1500.0);
        });
        let path = std::env::temp_dir()
            .join(format!("rigplan-{}-snapshot.json", std::process::id()))
            .to_string_lossy()
            .into_owned();

        ConfigSnapshot::new(cfg.clone()).save(&path).unwrap();
        let loaded = ConfigSnapshot::load(&path).unwrap();
        assert_eq!(loaded.version, CURRENT_VERSION);
        assert_eq!(loaded.config, cfg);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn other_versions_are_rejected() {
        let json = r#"{"version": 2, "config": {}}"#;
        assert!(matches!(
            ConfigSnapshot::from_json(json),
            Err(SnapshotError::VersionMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{"version": 1, "config": {"arrangement": "triple", "aspect_ratio": "21:9"}}"#;
        let snapshot = ConfigSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.config.arrangement, Arrangement::Triple);
        assert_eq!(snapshot.config.aspect_ratio.token(), "21:9");
        assert_eq!(snapshot.config.distance_mm, 700.0);
    }

    #[test]
    fn malformed_json_and_unknown_ratio_are_json_errors() {
        assert!(matches!(
            ConfigSnapshot::from_json("{ not json"),
            Err(SnapshotError::Json(_))
        ));
        let json = r#"{"version": 1, "config": {"aspect_ratio": "7:3"}}"#;
        assert!(matches!(
            ConfigSnapshot::from_json(json),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ConfigSnapshot::load("/definitely/not/here.json"),
            Err(SnapshotError::Io(_))
        ));
    }
}
