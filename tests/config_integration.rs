//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use orrery::config::AppConfig;
use orrery_anim::Easing;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("ORRERY_SIMULATION__TIME_SCALE", "250.0");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.simulation.time_scale, 250.0);
    std::env::remove_var("ORRERY_SIMULATION__TIME_SCALE");
}

#[test]
#[serial]
fn test_env_override_easing() {
    std::env::set_var("ORRERY_VIEW__EASING", "cubic_out");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.view.easing, Easing::CubicOut);
    std::env::remove_var("ORRERY_VIEW__EASING");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("ORRERY_SIMULATION__TIME_SCALE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert!(config.simulation.gravitational_constant > 0.0);
    assert!(config.simulation.substep > 0.0);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.simulation.max_frame_dt, 1.0);
    assert_eq!(config.debug.log_level, "info");
}

#[test]
#[serial]
fn test_invalid_env_value_is_an_error() {
    std::env::set_var("ORRERY_VIEW__EASING", "bounce");
    let result = AppConfig::load_from("no/such/config/dir");
    std::env::remove_var("ORRERY_VIEW__EASING");
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
