#[cfg(test)]
mod tests {
    use shelter::libs::config::{Config, DocumentsConfig};
    use shelter::libs::documents::DocumentStore;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct DocumentTestContext {
        temp_dir: TempDir,
        store: DocumentStore,
    }

    impl DocumentTestContext {
        fn source_file(&self, name: &str, content: &str) -> PathBuf {
            let dir = self.temp_dir.path().join("incoming");
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join(name);
            fs::write(&path, content).unwrap();
            path
        }
    }

    impl TestContext for DocumentTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                quarantine: None,
                documents: Some(DocumentsConfig {
                    dir: temp_dir.path().join("docs"),
                }),
            };
            let store = DocumentStore::from_config(&config);
            DocumentTestContext { temp_dir, store }
        }
    }

    #[test_context(DocumentTestContext)]
    #[test]
    fn test_import_copies_into_animal_folder(ctx: &mut DocumentTestContext) {
        let source = ctx.source_file("xray.png", "image");

        let name = ctx.store.import(7, &source).unwrap();
        assert_eq!(name, "xray.png");

        assert_eq!(ctx.store.root(), ctx.temp_dir.path().join("docs"));
        let stored = ctx.store.path_for(7, "xray.png");
        assert_eq!(stored, ctx.store.root().join("7").join("xray.png"));
        assert_eq!(fs::read_to_string(&stored).unwrap(), "image");
        // The original stays where it was
        assert!(source.exists());
    }

    #[test_context(DocumentTestContext)]
    #[test]
    fn test_import_existing_names(ctx: &mut DocumentTestContext) {
        let source = ctx.source_file("report.pdf", "first");
        ctx.store.import(7, &source).unwrap();

        // Re-importing the stored file itself is a no-op
        let stored = ctx.store.path_for(7, "report.pdf");
        assert_eq!(ctx.store.import(7, &stored).unwrap(), "report.pdf");

        // A different file with the same name is refused
        let other_dir = ctx.temp_dir.path().join("other");
        fs::create_dir_all(&other_dir).unwrap();
        let other = other_dir.join("report.pdf");
        fs::write(&other, "second").unwrap();
        assert!(ctx.store.import(7, &other).is_err());
        assert_eq!(fs::read_to_string(&stored).unwrap(), "first");

        // Other animals have their own folders
        assert!(ctx.store.import(8, &other).is_ok());
    }

    #[test_context(DocumentTestContext)]
    #[test]
    fn test_import_missing_source(ctx: &mut DocumentTestContext) {
        let missing = ctx.temp_dir.path().join("nope.pdf");
        assert!(ctx.store.import(7, &missing).is_err());
        assert!(ctx.store.import(7, ctx.temp_dir.path()).is_err());
    }

    #[test_context(DocumentTestContext)]
    #[test]
    fn test_list(ctx: &mut DocumentTestContext) {
        assert!(ctx.store.list(7).unwrap().is_empty());

        ctx.store.import(7, &ctx.source_file("a.txt", "a")).unwrap();
        ctx.store.import(7, &ctx.source_file("b.txt", "b")).unwrap();
        fs::create_dir_all(ctx.store.animal_dir(7).unwrap().join("subdir")).unwrap();

        let mut listed = ctx.store.list(7).unwrap();
        listed.sort();
        assert_eq!(listed, vec!["a.txt".to_string(), "b.txt".to_string()]);
        assert!(ctx.store.list(8).unwrap().is_empty());
    }

    #[test_context(DocumentTestContext)]
    #[test]
    fn test_open_missing_file(ctx: &mut DocumentTestContext) {
        assert!(DocumentStore::open(&ctx.store.path_for(7, "ghost.pdf")).is_err());
    }
}
