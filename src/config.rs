use crate::error::{LoginError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const CONFIG_DIR: &str = "bahama-login";
const CONFIG_FILE: &str = "config.toml";

/// Upper bound for any configured time, one day.
const MAX_SECONDS: f64 = 86_400.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub sequence: SequenceConfig,
    pub entrance: EntranceConfig,
    pub clouds: CloudConfig,
    pub ui: UiConfig,
}

impl LoginConfig {
    /// Default location: `$XDG_CONFIG_HOME/bahama-login/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => {
                info!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: LoginConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sequence.messages.is_empty() {
            return Err(LoginError::Config(
                "sequence.messages must contain at least one message".to_string(),
            ));
        }

        let d = &self.sequence.durations;
        let e = &self.entrance;
        let seconds = [
            ("sequence.step_delay_secs", self.sequence.step_delay_secs),
            ("sequence.durations.submit", d.submit),
            ("sequence.durations.reveal", d.reveal),
            ("sequence.durations.slide_out", d.slide_out),
            ("sequence.durations.reset_banner", d.reset_banner),
            ("sequence.durations.reset_button", d.reset_button),
            ("entrance.duration", e.duration),
            ("entrance.heading_delay", e.heading_delay),
            ("entrance.username_delay", e.username_delay),
            ("entrance.password_delay", e.password_delay),
            ("entrance.button_delay", e.button_delay),
            ("entrance.cloud_fade", e.cloud_fade),
        ];
        for (name, value) in seconds {
            check_seconds(name, value)?;
        }

        let springs = [
            ("entrance.field_damping", e.field_damping),
            ("entrance.button_damping", e.button_damping),
            ("entrance.button_rise", e.button_rise),
        ];
        for (name, value) in springs {
            if !value.is_finite() {
                return Err(LoginError::Config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        let crossing = self.clouds.crossing_secs;
        if !(crossing > 0.0 && crossing <= MAX_SECONDS) {
            return Err(LoginError::Config(format!(
                "clouds.crossing_secs must be in (0, {}], got {}",
                MAX_SECONDS, crossing
            )));
        }

        for (i, cloud) in self.clouds.positions.iter().enumerate() {
            if !(0.0..=1.0).contains(&cloud.x) || !(0.0..=1.0).contains(&cloud.y) {
                return Err(LoginError::Config(format!(
                    "clouds.positions[{}] must lie within 0.0..=1.0",
                    i
                )));
            }
            check_seconds(&format!("clouds.positions[{}].fade_delay", i), cloud.fade_delay)?;
        }

        if self.ui.frame_ms == 0 {
            return Err(LoginError::Config("ui.frame_ms must be non-zero".to_string()));
        }

        Ok(())
    }
}

fn check_seconds(name: &str, value: f64) -> Result<()> {
    if (0.0..=MAX_SECONDS).contains(&value) {
        Ok(())
    } else {
        Err(LoginError::Config(format!(
            "{} must be between 0 and {} seconds, got {}",
            name, MAX_SECONDS, value
        )))
    }
}

/// Status message sequence played after the login action
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub messages: Vec<String>,
    /// How long each message stays on screen once revealed
    pub step_delay_secs: f64,
    pub durations: TransitionDurations,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            messages: vec![
                "Connecting...".to_string(),
                "Authorizing...".to_string(),
                "Sending credentials...".to_string(),
                "Failed".to_string(),
            ],
            step_delay_secs: 2.0,
            durations: TransitionDurations::default(),
        }
    }
}

impl SequenceConfig {
    pub fn timing(&self) -> SequenceTiming {
        let d = &self.durations;
        SequenceTiming {
            submit: Duration::from_secs_f64(d.submit),
            reveal: Duration::from_secs_f64(d.reveal),
            hold: Duration::from_secs_f64(self.step_delay_secs),
            slide_out: Duration::from_secs_f64(d.slide_out),
            reset_banner: Duration::from_secs_f64(d.reset_banner),
            reset_button: Duration::from_secs_f64(d.reset_button),
        }
    }
}

/// Per-step transition durations, in seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransitionDurations {
    pub submit: f64,
    pub reveal: f64,
    pub slide_out: f64,
    pub reset_banner: f64,
    pub reset_button: f64,
}

impl Default for TransitionDurations {
    fn default() -> Self {
        Self {
            submit: 0.33,
            reveal: 0.33,
            slide_out: 0.33,
            reset_banner: 0.2,
            reset_button: 0.33,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceTiming {
    pub submit: Duration,
    pub reveal: Duration,
    pub hold: Duration,
    pub slide_out: Duration,
    pub reset_banner: Duration,
    pub reset_button: Duration,
}

impl SequenceTiming {
    /// Both reset animations run together; the reset ends with the longer one.
    pub fn reset(&self) -> Duration {
        self.reset_banner.max(self.reset_button)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub duration: f64,
    pub heading_delay: f64,
    pub username_delay: f64,
    pub password_delay: f64,
    pub button_delay: f64,
    pub field_damping: f64,
    pub button_damping: f64,
    /// Rows the button starts below its resting place
    pub button_rise: f64,
    pub cloud_fade: f64,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            duration: 0.5,
            heading_delay: 0.0,
            username_delay: 0.3,
            password_delay: 0.4,
            button_delay: 0.5,
            field_damping: 0.6,
            button_damping: 0.5,
            button_rise: 3.0,
            cloud_fade: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Seconds a cloud needs to cross the full screen width
    pub crossing_secs: f64,
    pub positions: Vec<CloudPosition>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            crossing_secs: 60.0,
            positions: vec![
                CloudPosition { x: 0.05, y: 0.12, fade_delay: 0.5 },
                CloudPosition { x: 0.62, y: 0.22, fade_delay: 0.7 },
                CloudPosition { x: 0.28, y: 0.70, fade_delay: 0.9 },
                CloudPosition { x: 0.80, y: 0.84, fade_delay: 1.1 },
            ],
        }
    }
}

/// Starting place of a cloud as a fraction of the screen size
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CloudPosition {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub fade_delay: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval while idle
    pub frame_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { frame_ms: 33 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = LoginConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sequence.messages.len(), 4);
        assert_eq!(config.sequence.messages[3], "Failed");
        assert_eq!(config.clouds.positions.len(), 4);
    }

    #[test]
    fn test_timing_reset_uses_longer_animation() {
        let timing = SequenceConfig::default().timing();
        assert_eq!(timing.reset(), Duration::from_secs_f64(0.33));
        assert_eq!(timing.hold, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoginConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.sequence.step_delay_secs, 2.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[sequence]
messages = ["Dialing...", "Nope"]
step_delay_secs = 0.5

[sequence.durations]
reveal = 0.1
"#
        )
        .unwrap();

        let config = LoginConfig::load_from(file.path()).unwrap();
        assert_eq!(config.sequence.messages, vec!["Dialing...", "Nope"]);
        assert_eq!(config.sequence.step_delay_secs, 0.5);
        assert_eq!(config.sequence.durations.reveal, 0.1);
        assert_eq!(config.sequence.durations.submit, 0.33);
        assert_eq!(config.entrance.username_delay, 0.3);
    }

    #[test]
    fn test_empty_messages_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sequence]\nmessages = []").unwrap();

        let err = LoginConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, LoginError::Config(_)));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut config = LoginConfig::default();
        config.sequence.durations.slide_out = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("slide_out"));
    }

    #[test]
    fn test_huge_durations_rejected_not_panicking() {
        let mut config = LoginConfig::default();
        config.sequence.step_delay_secs = 1e20;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("step_delay_secs"));

        let mut config = LoginConfig::default();
        config.entrance.cloud_fade = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = LoginConfig::default();
        config.clouds.crossing_secs = 1e300;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("crossing_secs"));
    }

    #[test]
    fn test_largest_accepted_duration_converts() {
        let mut config = LoginConfig::default();
        config.sequence.step_delay_secs = MAX_SECONDS;
        config.clouds.crossing_secs = MAX_SECONDS;
        assert!(config.validate().is_ok());
        assert_eq!(config.sequence.timing().hold, Duration::from_secs(86_400));
    }

    #[test]
    fn test_nan_spring_settings_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[entrance]\nfield_damping = nan").unwrap();
        let err = LoginConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("field_damping"));

        let mut config = LoginConfig::default();
        config.entrance.button_rise = f64::NEG_INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cloud_outside_screen_rejected() {
        let mut config = LoginConfig::default();
        config.clouds.positions[2].x = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sequence\nmessages = ").unwrap();

        let err = LoginConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, LoginError::TomlParse(_)));
    }
}
