use pannypal_chat::config::settings::{InputKind, Settings, CONFIG_FILE_NAME};

#[test]
fn test_missing_config_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_with(Some(dir.path()), None).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.label_max_chars, 40);
    assert_eq!(settings.min_chart_points, 2);
}

#[test]
fn test_save_and_reload_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("custom.toml");
    let mut settings = Settings::default();
    settings.set_key("label-max-chars", "32").unwrap();
    settings.set_key("palette", "#111, #222").unwrap();
    settings.set_key("input-kind", "conversation").unwrap();
    settings.set_key("color", "false").unwrap();
    settings.save_with(None, Some(&path)).unwrap();

    let loaded = Settings::load_with(None, Some(&path)).unwrap();
    assert_eq!(loaded.label_max_chars, 32);
    assert_eq!(loaded.palette, vec!["#111", "#222"]);
    assert_eq!(loaded.default_input_kind, InputKind::Conversation);
    assert!(!loaded.color);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "min_chart_points = 0\n").unwrap();
    let settings = Settings::load_with(Some(dir.path()), None).unwrap();
    assert_eq!(settings.label_max_chars, 40);
    assert_eq!(settings.interpret_options().min_chart_points, 2);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "label_max_chars = \"many\"\n").unwrap();
    assert!(Settings::load_with(Some(dir.path()), None).is_err());
}

#[test]
fn test_init_scoped_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = Settings::init_scoped(false, Some(dir.path())).unwrap();
    assert!(path.exists());
    assert!(Settings::init_scoped(false, Some(dir.path())).is_err());
    assert!(Settings::init_scoped(true, Some(dir.path())).is_ok());
}

#[test]
fn test_set_key_rejects_bad_values() {
    let mut settings = Settings::default();
    assert!(settings.set_key("min-chart-points", "1").is_err());
    assert!(settings.set_key("label-max-chars", "0").is_err());
    assert!(settings.set_key("label-max-chars", "lots").is_err());
    assert!(settings.set_key("palette", " , ").is_err());
    assert!(settings.set_key("input-kind", "xml").is_err());
    assert!(settings.set_key("api-key", "x").is_err());
    assert_eq!(settings, Settings::default());
}
