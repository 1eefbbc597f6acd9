//! User configuration: loaded once at startup, saved explicitly on change.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Persisted user configuration, stored as kebab-case YAML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Transition animation between images.
    pub transition: TransitionMode,
    /// How the current image is fitted to the screen.
    pub display: DisplayMode,
    /// UI color scheme.
    pub color: ColorMode,
    /// Auto-advance interval, in units of `refresh-unit`. Zero disables autoplay.
    pub refresh_duration: u64,
    pub refresh_unit: RefreshUnit,
    /// Whether first-run setup has completed; gates the whole flow.
    pub initialized: bool,
    /// Candidate API base addresses, highest priority first.
    pub endpoints: Vec<String>,
    /// Budget for each endpoint liveness probe at startup.
    #[serde(with = "humantime_serde")]
    pub probe_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionMode {
    Slide,
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Cover,
    Contain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    Day,
    Night,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshUnit {
    Second,
    Minute,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            transition: TransitionMode::Slide,
            display: DisplayMode::Contain,
            color: ColorMode::Night,
            refresh_duration: 5,
            refresh_unit: RefreshUnit::Minute,
            initialized: false,
            endpoints: Vec::new(),
            probe_timeout: Duration::from_secs(2),
        }
    }
}

impl Configuration {
    /// Auto-advance period. A zero duration means autoplay is disabled.
    #[must_use]
    pub fn refresh_period(&self) -> Duration {
        let factor = match self.refresh_unit {
            RefreshUnit::Second => 1,
            RefreshUnit::Minute => 60,
        };
        Duration::from_secs(self.refresh_duration * factor)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.probe_timeout.is_zero() {
            return Err(Error::BadConfig("probe-timeout must be positive".into()));
        }
        if self.endpoints.iter().any(|e| e.trim().is_empty()) {
            return Err(Error::BadConfig(
                "endpoints must not contain blank entries".into(),
            ));
        }
        Ok(())
    }
}

/// Partial settings change submitted by the setup/settings surface. Applying
/// an update always marks the configuration as initialized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SettingsUpdate {
    pub transition: Option<TransitionMode>,
    pub display: Option<DisplayMode>,
    pub color: Option<ColorMode>,
    pub refresh_duration: Option<u64>,
    pub refresh_unit: Option<RefreshUnit>,
}

impl SettingsUpdate {
    pub fn apply(self, cfg: &mut Configuration) {
        if let Some(transition) = self.transition {
            cfg.transition = transition;
        }
        if let Some(display) = self.display {
            cfg.display = display;
        }
        if let Some(color) = self.color {
            cfg.color = color;
        }
        if let Some(duration) = self.refresh_duration {
            cfg.refresh_duration = duration;
        }
        if let Some(unit) = self.refresh_unit {
            cfg.refresh_unit = unit;
        }
        cfg.initialized = true;
    }
}

pub fn from_yaml_file(path: &Path) -> Result<Configuration, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// A missing file means the app has never been configured: first-run defaults.
pub fn load_or_default(path: &Path) -> Result<Configuration, Error> {
    if path.exists() {
        from_yaml_file(path)
    } else {
        Ok(Configuration::default())
    }
}

pub fn save_yaml_file(cfg: &Configuration, path: &Path) -> Result<(), Error> {
    let text = serde_yaml::to_string(cfg)?;
    std::fs::write(path, text)?;
    Ok(())
}
