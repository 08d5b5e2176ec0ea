//! Integration tests for configuration loading and overrides

use mediacli::config::Settings;
use tempfile::tempdir;

#[test]
fn test_config_roundtrip_preserves_all_fields() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("nested").join("config.json");

    let mut settings = Settings::default();
    settings.cloud_name = "demo-cloud".to_string();
    settings.api_key = Some("key-123".to_string());
    settings.upload_preset = "my_preset".to_string();
    settings.folder = Some("uploads/videos".to_string());
    settings.max_upload_bytes = 10_485_760;
    settings.accepted_types = Some(vec![
        "video/mp4".to_string(),
        "video/webm".to_string(),
    ]);

    // Save creates parent directories as needed
    settings.save(&config_path)?;
    let loaded = Settings::load(&config_path)?;

    assert_eq!(loaded.cloud_name, settings.cloud_name);
    assert_eq!(loaded.api_key, settings.api_key);
    assert_eq!(loaded.upload_preset, settings.upload_preset);
    assert_eq!(loaded.folder, settings.folder);
    assert_eq!(loaded.max_upload_bytes, settings.max_upload_bytes);
    assert_eq!(loaded.accepted_types, settings.accepted_types);
    assert!(loaded.validate().is_ok());

    Ok(())
}

#[test]
fn test_partial_config_file_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{"cloud_name": "demo-cloud"}"#)?;

    let loaded = Settings::load(&config_path)?;
    assert_eq!(loaded.cloud_name, "demo-cloud");
    assert_eq!(loaded.upload_preset, "ml_default");
    assert_eq!(loaded.max_upload_bytes, 100 * 1024 * 1024);
    assert!(loaded.accepted_types.is_none());
    assert!(loaded.validate().is_ok());

    Ok(())
}

#[test]
fn test_malformed_config_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, "not json")?;

    assert!(Settings::load(&config_path).is_err());

    Ok(())
}
