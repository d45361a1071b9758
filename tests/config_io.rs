use std::io::Write;
use strider::config::AppConfig;

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = AppConfig::load_or_default("/nonexistent/strider.json");
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.sim.fixed_hz, 60);
    assert!(!config.controls.invert_y);
}

#[test]
fn partial_file_fills_unset_fields_with_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "controls": {{ "move_speed": 6.5, "invert_y": true }}, "camera": {{ "orbit_radius": 7.0 }} }}"#
    )
    .unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.controls.move_speed, 6.5);
    assert!(config.controls.invert_y);
    assert_eq!(config.camera.orbit_radius, 7.0);
    // Untouched sections keep their defaults.
    assert_eq!(config.controls.jump_speed, 5.0);
    assert_eq!(config.camera.target_offset, 3.0);
    assert_eq!(config.window.height, 720);
}

#[test]
fn invalid_json_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json at all").unwrap();

    let config = AppConfig::load_or_default(file.path());
    assert_eq!(config.controls.move_speed, 10.0);
    assert!(AppConfig::load(file.path()).is_err());
}

#[test]
fn fixed_dt_derives_from_hz() {
    let config = AppConfig::default();
    assert!((config.sim.fixed_dt() - 1.0 / 60.0).abs() < 1e-7);
}
