use std::fs;

use plan_gantt::config::{HeaderMode, Settings};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = Settings::load_or_default(&dir.path().join("settings.json"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.layout.day_width, 32.0);
    assert_eq!(settings.layout.row_height, 41.0);
    assert_eq!(settings.layout.bar_gap, 4.0);
    assert_eq!(settings.header_mode, HeaderMode::Months);
}

#[test]
fn partial_file_fills_in_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "header_mode": "weeks", "layout": { "day_width": 24.0 } }"#)?;

    let settings = Settings::load_from(&path)?;
    assert_eq!(settings.header_mode, HeaderMode::Weeks);
    assert_eq!(settings.layout.day_width, 24.0);
    assert_eq!(settings.layout.row_height, 41.0);
    assert_eq!(settings.tail_days, 30);
    Ok(())
}

#[test]
fn broken_file_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json")?;

    assert!(Settings::load_from(&path).is_err());
    assert_eq!(Settings::load_or_default(&path), Settings::default());
    Ok(())
}

#[test]
fn save_then_load() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("settings.json");
    let mut settings = Settings::default();
    settings.header_mode = HeaderMode::Weeks;
    settings.layout.day_width = 40.0;
    settings.save_to(&path)?;

    assert_eq!(Settings::load_from(&path)?, settings);
    Ok(())
}

#[test]
fn non_positive_row_height_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    for body in [
        r#"{ "layout": { "row_height": 0.0 } }"#,
        r#"{ "layout": { "row_height": -41.0 } }"#,
        r#"{ "layout": { "bar_height": 0.0 } }"#,
        r#"{ "layout": { "header_row_height": -1.0 } }"#,
        r#"{ "layout": { "bar_gap": -4.0 } }"#,
    ] {
        fs::write(&path, body)?;
        assert!(Settings::load_from(&path).is_err(), "accepted {body}");
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
    Ok(())
}

#[test]
fn padding_days_out_of_range_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    for body in [
        r#"{ "lead_days": 9000000000000000 }"#,
        r#"{ "tail_days": -1 }"#,
        r#"{ "tail_days": 3651 }"#,
    ] {
        fs::write(&path, body)?;
        assert!(Settings::load_from(&path).is_err(), "accepted {body}");
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    fs::write(&path, r#"{ "lead_days": 0, "tail_days": 3650 }"#)?;
    let settings = Settings::load_from(&path)?;
    assert_eq!((settings.lead_days, settings.tail_days), (0, 3650));
    Ok(())
}

#[test]
fn day_width_is_clamped_to_zoom_limits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");

    fs::write(&path, r#"{ "layout": { "day_width": 500.0 } }"#)?;
    assert_eq!(Settings::load_from(&path)?.layout.day_width, 96.0);

    fs::write(&path, r#"{ "layout": { "day_width": 2.0 } }"#)?;
    assert_eq!(Settings::load_from(&path)?.layout.day_width, 8.0);

    fs::write(&path, r#"{ "layout": { "day_width": 0.0 } }"#)?;
    assert!(Settings::load_from(&path).is_err());
    Ok(())
}
