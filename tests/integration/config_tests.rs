//! Configuration loading tests

#[cfg(test)]
mod tests {
    use examiner_gateway::config::{Config, LogFormat};
    use examiner_gateway::server::{ConfigSource, load_config};
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_example_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/gateway.yaml.example");
        let config = Config::from_file(&path).await.unwrap();

        assert_eq!(config.server().port, 8000);
        assert_eq!(config.speech().source_language, "vi");
        assert_eq!(config.logging().format, LogFormat::Pretty);
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let (config, source) = load_config(Path::new("/nonexistent/gateway.yaml"))
            .await
            .unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.audio_store().ttl, 3600);
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server:\n  port: 0\n").unwrap();

        let err = load_config(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    }

    #[tokio::test]
    async fn test_json_logging_and_bounds() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
logging:
  level: "examiner_gateway=debug,info"
  format: json
audio_store:
  ttl: 120
  max_bytes: 1048576
"#,
        )
        .unwrap();

        let (config, source) = load_config(file.path()).await.unwrap();
        assert_eq!(source, ConfigSource::File);
        assert_eq!(config.logging().format, LogFormat::Json);
        assert_eq!(config.audio_store().ttl, 120);
        assert_eq!(config.audio_store().max_bytes, 1_048_576);
        assert_eq!(config.audio_store().max_entries, 256);
    }
}
