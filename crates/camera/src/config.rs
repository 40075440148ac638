use fpcam_input::KeyBindings;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};
use std::path::Path;

/// Errors from loading or validating a camera configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Head-bob shape. The bob is `sin(timer * frequency) * amplitude`; one
/// triggered step runs for `wavelength / frequency` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.25,
            frequency: 10.0,
            wavelength: PI,
        }
    }
}

impl HeadBobConfig {
    /// Length of one bob step in seconds.
    pub fn step(&self) -> f32 {
        self.wavelength / self.frequency
    }
}

/// Tuning for [`crate::CameraController`].
///
/// Every field has a default, so a config file only lists what it overrides:
/// ```yaml
/// move_speed: 6.0
/// bindings:
///   ArrowUp: forward
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Yaw radians per full viewport width of pointer travel.
    pub yaw_speed: f32,
    /// Pitch radians per full viewport height of pointer travel.
    pub pitch_speed: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
    /// Walking speed in units per second.
    pub move_speed: f32,
    /// Distance of the gaze point when nothing is hit.
    pub look_distance: f32,
    pub head_bob: HeadBobConfig,
    pub bindings: KeyBindings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw_speed: 8.0,
            pitch_speed: 5.0,
            pitch_limit: FRAC_PI_3,
            move_speed: 10.0,
            look_distance: 100.0,
            head_bob: HeadBobConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl CameraConfig {
    /// Load from a file. `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&data)?,
            _ => serde_yaml::from_str(&data)?,
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "camera config loaded");
        Ok(config)
    }

    /// Reject values that would corrupt integration state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("yaw_speed", self.yaw_speed),
            ("pitch_speed", self.pitch_speed),
            ("move_speed", self.move_speed),
            ("look_distance", self.look_distance),
            ("head_bob.frequency", self.head_bob.frequency),
            ("head_bob.wavelength", self.head_bob.wavelength),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.head_bob.amplitude.is_finite() || self.head_bob.amplitude < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "head_bob.amplitude must be finite and non-negative, got {}",
                self.head_bob.amplitude
            )));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit <= FRAC_PI_2) {
            return Err(ConfigError::Invalid(format!(
                "pitch_limit must be in (0, pi/2], got {}",
                self.pitch_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpcam_input::MoveKey;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CameraConfig::default();
        config.validate().unwrap();
        assert_eq!(config.yaw_speed, 8.0);
        assert_eq!(config.pitch_speed, 5.0);
        assert_eq!(config.move_speed, 10.0);
        assert!((config.head_bob.step() - PI / 10.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_pitch_limit() {
        let config = CameraConfig {
            pitch_limit: 2.0,
            ..CameraConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_nan_speed() {
        let config = CameraConfig {
            move_speed: f32::NAN,
            ..CameraConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_yaml_overrides_some_fields() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "move_speed: 4.0\nbindings:\n  ArrowUp: forward").unwrap();

        let config = CameraConfig::load(tmp.path()).unwrap();
        assert_eq!(config.move_speed, 4.0);
        assert_eq!(config.yaw_speed, 8.0);
        assert_eq!(config.bindings.resolve("ArrowUp"), Some(MoveKey::Forward));
        assert_eq!(config.bindings.resolve("KeyW"), None);
    }

    #[test]
    fn load_json() {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(tmp, r#"{{"head_bob": {{"amplitude": 0.1}}}}"#).unwrap();

        let config = CameraConfig::load(tmp.path()).unwrap();
        assert_eq!(config.head_bob.amplitude, 0.1);
        assert_eq!(config.head_bob.frequency, 10.0);
    }

    #[test]
    fn load_invalid_values_fails() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "look_distance: -1.0").unwrap();
        assert!(matches!(
            CameraConfig::load(tmp.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            CameraConfig::load("/nonexistent/fpcam.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
