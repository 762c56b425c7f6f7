use idle_reaper_domain::{Config, DEFAULT_INACTIVE_TIME_MINUTES};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.reaper.inactive_time, DEFAULT_INACTIVE_TIME_MINUTES);
    assert!(config.reaper.whitelist.is_empty());
    assert_eq!(config.jobs.stats_interval_secs, 300);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_partial_config_fills_defaults() {
    let config = Config::from_toml_str(
        r#"
[reaper]
inactive_time = 5
whitelist = ["mail.example.com"]
"#,
    )
    .unwrap();

    assert_eq!(config.reaper.inactive_time, 5);
    assert_eq!(config.reaper.whitelist, vec!["mail.example.com".to_string()]);
    assert_eq!(config.reaper.settings_path, "idle-reaper-settings.toml");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_parse_invalid_toml_is_error() {
    assert!(Config::from_toml_str("[reaper\ninactive_time = ").is_err());
}

#[test]
fn test_validate_rejects_zero_inactive_time() {
    let mut config = Config::default();
    config.reaper.inactive_time = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_whitelist_entry() {
    let mut config = Config::default();
    config.reaper.whitelist = vec!["".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn test_initial_settings_normalizes_whitelist() {
    let mut config = Config::default();
    config.reaper.inactive_time = 7;
    config.reaper.whitelist = vec![" Mail.Example.com ".to_string()];

    let stored = config.initial_settings();

    assert_eq!(stored.inactive_time, Some(7));
    assert_eq!(stored.whitelist, Some(vec!["mail.example.com".to_string()]));
}

#[test]
fn test_load_applies_cli_overrides() {
    let dir = std::env::temp_dir().join(format!("idle-reaper-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[reaper]\ninactive_time = 45\n").unwrap();

    let config = Config::load(
        Some(path.to_str().unwrap()),
        idle_reaper_domain::CliOverrides {
            inactive_time: Some(3),
            settings_path: None,
            log_level: Some("debug".to_string()),
        },
    )
    .unwrap();

    assert_eq!(config.reaper.inactive_time, 3);
    assert_eq!(config.logging.level, "debug");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_missing_explicit_file_is_error() {
    let result = Config::load(Some("/nonexistent/idle-reaper.toml"), Default::default());
    assert!(result.is_err());
}
