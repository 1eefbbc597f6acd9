use album_frame::config::{
    self, ColorMode, Configuration, DisplayMode, RefreshUnit, SettingsUpdate, TransitionMode,
};
use std::time::Duration;

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
transition: fade
display: cover
refresh-duration: 10
refresh-unit: second
initialized: true
endpoints:
  - "http://frame.local:3573"
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.transition, TransitionMode::Fade);
    assert_eq!(cfg.display, DisplayMode::Cover);
    assert_eq!(cfg.refresh_duration, 10);
    assert_eq!(cfg.refresh_unit, RefreshUnit::Second);
    assert!(cfg.initialized);
    assert_eq!(cfg.endpoints, vec!["http://frame.local:3573".to_string()]);
    // Untouched fields keep their defaults.
    assert_eq!(cfg.color, ColorMode::Night);
    assert_eq!(cfg.probe_timeout, Duration::from_secs(2));
}

#[test]
fn defaults_describe_first_run() {
    let cfg = Configuration::default();
    assert_eq!(cfg.transition, TransitionMode::Slide);
    assert_eq!(cfg.display, DisplayMode::Contain);
    assert_eq!(cfg.color, ColorMode::Night);
    assert_eq!(cfg.refresh_duration, 5);
    assert_eq!(cfg.refresh_unit, RefreshUnit::Minute);
    assert!(!cfg.initialized);
    assert!(cfg.endpoints.is_empty());
    cfg.validate().unwrap();
}

#[test]
fn parse_with_probe_timeout() {
    let yaml = "probe-timeout: 5s\n";
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.probe_timeout, Duration::from_secs(5));
}

#[test]
fn refresh_period_converts_units() {
    let mut cfg = Configuration::default();
    cfg.refresh_duration = 10;
    cfg.refresh_unit = RefreshUnit::Second;
    assert_eq!(cfg.refresh_period(), Duration::from_secs(10));

    cfg.refresh_unit = RefreshUnit::Minute;
    assert_eq!(cfg.refresh_period(), Duration::from_secs(600));

    // Zero duration means autoplay disabled, not invalid.
    cfg.refresh_duration = 0;
    assert_eq!(cfg.refresh_period(), Duration::ZERO);
    cfg.validate().unwrap();
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut cfg = Configuration::default();
    cfg.transition = TransitionMode::Fade;
    cfg.initialized = true;
    cfg.endpoints = vec!["http://192.168.1.20:3573".into()];
    cfg.probe_timeout = Duration::from_millis(1500);

    config::save_yaml_file(&cfg, &path).unwrap();
    let loaded = config::from_yaml_file(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn missing_file_yields_first_run_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-written.yaml");
    let cfg = config::load_or_default(&path).unwrap();
    assert_eq!(cfg, Configuration::default());
    assert!(!cfg.initialized);
}

#[test]
fn validate_rejects_blank_endpoint() {
    let mut cfg = Configuration::default();
    cfg.endpoints = vec!["http://a".into(), "  ".into()];
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_zero_probe_timeout() {
    let mut cfg = Configuration::default();
    cfg.probe_timeout = Duration::ZERO;
    assert!(cfg.validate().is_err());
}

#[test]
fn settings_update_marks_initialized() {
    let mut cfg = Configuration::default();
    let update = SettingsUpdate {
        transition: Some(TransitionMode::Fade),
        refresh_duration: Some(30),
        refresh_unit: Some(RefreshUnit::Second),
        ..Default::default()
    };
    update.apply(&mut cfg);
    assert!(cfg.initialized);
    assert_eq!(cfg.transition, TransitionMode::Fade);
    assert_eq!(cfg.refresh_period(), Duration::from_secs(30));
    // Fields absent from the update are untouched.
    assert_eq!(cfg.display, DisplayMode::Contain);
}
