//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use carousel::config::AppConfig;
use carousel::scene::{PrimitiveKind, SceneBuilder};
use serial_test::serial;

#[test]
#[serial]
fn test_default_file_matches_defaults() {
    std::env::remove_var("CAROUSEL_SCENE__OBJECT_SIZE");
    std::env::remove_var("CAROUSEL_CAMERAS__FOLLOW_FOV");

    let config = AppConfig::load().unwrap();
    assert_eq!(config.scene.object_size, 0.5);
    assert_eq!(config.scene.radius_factor, 5.0);
    assert_eq!(config.scene.primitives, PrimitiveKind::ALL.to_vec());
    assert_eq!(config.cameras.static_fov, 60.0);
    assert_eq!(config.fonts.families, vec!["Helvetica", "Chalkduster"]);
    assert!(config.output.scene_path.is_none());
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("CAROUSEL_SCENE__OBJECT_SIZE", "1.0");
    std::env::set_var("CAROUSEL_CAMERAS__FOLLOW_FOV", "20");
    let config = AppConfig::load();
    std::env::remove_var("CAROUSEL_SCENE__OBJECT_SIZE");
    std::env::remove_var("CAROUSEL_CAMERAS__FOLLOW_FOV");

    let config = config.unwrap();
    assert_eq!(config.scene.object_size, 1.0);
    assert_eq!(config.cameras.follow_fov, 20.0);
    assert_eq!(config.scene_params().carousel_radius(), 5.0);
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.scene.object_size, 0.5);
    assert_eq!(config.debug.log_level, "info");
}

#[test]
#[serial]
fn test_config_drives_builder() {
    std::env::remove_var("CAROUSEL_SCENE__OBJECT_SIZE");
    std::env::remove_var("CAROUSEL_CAMERAS__FOLLOW_FOV");

    let config = AppConfig::load().unwrap();
    let scene = SceneBuilder::new()
        .with_params(config.scene_params())
        .with_fonts(config.fonts.font_library().unwrap())
        .build()
        .unwrap();
    assert_eq!(scene.primitives.len(), 12);
}
