#[cfg(test)]
mod tests {
    use shelter::libs::config::{Config, DocumentsConfig, QuarantineConfig, CONFIG_FILE_NAME, DEFAULT_QUARANTINE_DAYS};
    use shelter::libs::data_storage::DataStorage;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn config_path(&self) -> PathBuf {
            self.temp_dir.path().join("nested").join(CONFIG_FILE_NAME)
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.quarantine_days(), DEFAULT_QUARANTINE_DAYS);

        let storage = DataStorage::at(ctx.temp_dir.path());
        assert_eq!(config.docs_dir(&storage), ctx.temp_dir.path().join("docs"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            quarantine: Some(QuarantineConfig { days: 14 }),
            documents: Some(DocumentsConfig {
                dir: PathBuf::from("/srv/shelter/docs"),
            }),
        };
        config.save_to(&ctx.config_path()).unwrap();

        let loaded = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.quarantine_days(), 14);
        assert_eq!(
            loaded.docs_dir(&DataStorage::at(ctx.temp_dir.path())),
            PathBuf::from("/srv/shelter/docs")
        );
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_unset_modules_are_omitted(ctx: &mut ConfigTestContext) {
        let config = Config {
            quarantine: Some(QuarantineConfig::default()),
            documents: None,
        };
        config.save_to(&ctx.config_path()).unwrap();

        let text = fs::read_to_string(ctx.config_path()).unwrap();
        assert!(text.contains("\"quarantine\""));
        assert!(!text.contains("\"documents\""));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_and_broken_files(ctx: &mut ConfigTestContext) {
        let path = ctx.config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        fs::write(&path, r#"{ "quarantine": { "days": 21 } }"#).unwrap();
        let config = Config::read_from(&path).unwrap();
        assert_eq!(config.quarantine_days(), 21);
        assert!(config.documents.is_none());

        fs::write(&path, "not json").unwrap();
        assert!(Config::read_from(&path).is_err());
    }
}
