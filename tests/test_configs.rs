// tests/test_configs.rs
use dirmark::configs::{ConfigManager, SETTINGS_FILENAME, Settings};
use dirmark::loggers::core::LogLevel;

#[test]
fn defaults_apply_without_a_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manager = ConfigManager::load(dir.path()).expect("load");

    let settings = manager.get();
    assert_eq!(settings.level, LogLevel::Warn);
    assert!(settings.color);
    assert!(!settings.stack);
    assert_eq!(settings.rotate_bytes, 100 << 20);
    assert_eq!(settings.filename, "dirmark.log");

    assert!(manager.source().contains(SETTINGS_FILENAME));
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(SETTINGS_FILENAME),
        r#"{"level":"debug","color":false,"rotate_bytes":4096}"#,
    )
    .expect("write settings");

    let settings = ConfigManager::load(dir.path()).expect("load").get();
    assert_eq!(settings.level, LogLevel::Debug);
    assert!(!settings.color);
    assert_eq!(settings.rotate_bytes, 4096);
    assert_eq!(
        settings.filename, "dirmark.log",
        "unset fields keep their defaults"
    );
}

#[test]
fn environment_overrides_the_file_layer() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(SETTINGS_FILENAME),
        r#"{"stack_depth":9}"#,
    )
    .expect("write settings");

    // stack_depth is not asserted by any parallel test, so the global env
    // var cannot cross-talk
    unsafe { std::env::set_var("DIRMARK_STACK_DEPTH", "3") };
    let result = ConfigManager::load(dir.path());
    unsafe { std::env::remove_var("DIRMARK_STACK_DEPTH") };

    let settings = result.expect("load").get();
    assert_eq!(settings.stack_depth, 3);
}

#[test]
fn default_settings_match_the_documented_knobs() {
    let settings = Settings::default();
    assert_eq!(settings.level, LogLevel::Warn);
    assert_eq!(settings.stack_depth, 6);
}
