//! Tests for configuration management module

#[cfg(test)]
mod tests {
    use super::super::*;

    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cloud_name, "");
        assert!(settings.api_key.is_none());
        assert_eq!(settings.upload_preset, "ml_default");
        assert!(settings.folder.is_none());
        assert_eq!(settings.max_upload_bytes, 100 * 1024 * 1024);
        assert!(settings.accepted_types.is_none());
    }

    #[test]
    fn test_settings_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.json");

        let mut settings = Settings::default();
        settings.cloud_name = "demo-cloud".to_string();
        settings.api_key = Some("test-api-key".to_string());
        settings.folder = Some("uploads".to_string());
        settings.max_upload_bytes = 10 * 1024 * 1024;

        settings.save(&config_path)?;

        assert!(config_path.exists());

        let loaded = Settings::load(&config_path)?;

        assert_eq!(loaded.cloud_name, "demo-cloud");
        assert_eq!(loaded.api_key, Some("test-api-key".to_string()));
        assert_eq!(loaded.folder, Some("uploads".to_string()));
        assert_eq!(loaded.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(loaded.upload_preset, "ml_default");

        Ok(())
    }

    #[test]
    fn test_load_missing_file_returns_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config_path = dir.path().join("does-not-exist.json");

        let loaded = Settings::load(&config_path)?;
        assert_eq!(loaded.cloud_name, "");
        assert_eq!(loaded.upload_preset, "ml_default");

        Ok(())
    }

    #[test]
    fn test_settings_validation() {
        let valid_settings = Settings {
            cloud_name: "demo-cloud".to_string(),
            api_key: None,
            upload_preset: "ml_default".to_string(),
            folder: None,
            max_upload_bytes: 1024,
            accepted_types: None,
        };
        assert!(valid_settings.validate().is_ok());

        let invalid_settings = Settings {
            cloud_name: "".to_string(),
            api_key: None,
            upload_preset: "ml_default".to_string(),
            folder: None,
            max_upload_bytes: 1024,
            accepted_types: None,
        };
        assert!(invalid_settings.validate().is_err());

        let zero_limit = Settings {
            cloud_name: "demo-cloud".to_string(),
            api_key: None,
            upload_preset: "ml_default".to_string(),
            folder: None,
            max_upload_bytes: 0,
            accepted_types: None,
        };
        assert!(zero_limit.validate().is_err());
    }

    #[test]
    fn test_default_path() {
        let path = Settings::default_path();
        assert!(path.to_str().unwrap().contains(".config/mediacli/config.json"));
    }
}
