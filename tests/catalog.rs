#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use shelter::libs::catalog::{
        Catalog, FieldKind, FieldSpec, EVENTS_FILE_NAME, LEGACY_SPECIES_FILE_NAME, SPECIES_FILE_NAME,
    };
    use shelter::libs::validation::ValidationError;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CatalogTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for CatalogTestContext {
        fn setup() -> Self {
            CatalogTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test]
    fn test_parse_species() {
        let species = Catalog::parse_species(
            "# comment
stray line
[Dog]
Mixed
Labrador = retriever group
Labrador

[Cat]
; another comment
Siamese: short hair
[Dog]
Shepherd
",
        );

        assert_eq!(species.len(), 2);
        assert_eq!(species[0].name, "Dog");
        assert_eq!(species[0].breeds, vec!["Mixed", "Labrador", "Shepherd"]);
        assert_eq!(species[1].name, "Cat");
        assert_eq!(species[1].breeds, vec!["Siamese"]);
    }

    #[test]
    fn test_parse_event_types_with_continuations() {
        let types = Catalog::parse_event_types(
            "# type = field:kind
Vaccination = vaccine:text, batch:text,
              next_due:date   # when to repeat
Surgery =
    notes:textarea
Weighing = weight:float, broken
",
        );

        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Vaccination", "Surgery", "Weighing"]);

        assert_eq!(types[0].fields.len(), 3);
        assert_eq!(
            types[0].field("next_due"),
            Some(&FieldSpec {
                name: "next_due".to_string(),
                kind: FieldKind::Date
            })
        );
        assert_eq!(types[1].fields[0].kind, FieldKind::Textarea);
        // Specs without a kind are skipped
        assert_eq!(types[2].fields.len(), 1);
    }

    #[test]
    fn test_field_kind_coercion() {
        assert_eq!(FieldKind::parse("Integer"), FieldKind::Integer);
        assert_eq!(FieldKind::parse("checkbox"), FieldKind::Bool);
        assert_eq!(FieldKind::parse("colour"), FieldKind::Text);

        assert_eq!(FieldKind::Integer.coerce("visits", " 3 ").unwrap(), json!(3));
        assert_eq!(FieldKind::Float.coerce("weight", "12.5").unwrap(), json!(12.5));
        assert_eq!(FieldKind::Bool.coerce("healthy", "No").unwrap(), Value::Bool(false));
        assert_eq!(FieldKind::Date.coerce("next_due", "2025-01-01").unwrap(), json!("2025-01-01"));
        assert_eq!(FieldKind::Textarea.coerce("notes", "line").unwrap(), json!("line"));

        assert_eq!(
            FieldKind::Integer.coerce("visits", "2.5"),
            Err(ValidationError::InvalidResultValue {
                field: "visits".to_string(),
                kind: "int".to_string(),
                value: "2.5".to_string()
            })
        );
        assert!(FieldKind::Float.coerce("weight", "NaN").is_err());
        assert!(FieldKind::Bool.coerce("healthy", "maybe").is_err());
        assert!(FieldKind::Date.coerce("next_due", "01/01/2025").is_err());
    }

    #[test_context(CatalogTestContext)]
    #[test]
    fn test_load_missing_files(ctx: &mut CatalogTestContext) {
        let catalog = Catalog::load(ctx.temp_dir.path()).unwrap();
        assert_eq!(catalog, Catalog::default());
        assert!(catalog.check_species("Anything", Some("Goes")).is_ok());
    }

    #[test_context(CatalogTestContext)]
    #[test]
    fn test_load_legacy_species_file(ctx: &mut CatalogTestContext) {
        fs::write(ctx.temp_dir.path().join(LEGACY_SPECIES_FILE_NAME), "[Rabbit]\nDwarf\n").unwrap();

        let catalog = Catalog::load(ctx.temp_dir.path()).unwrap();
        assert_eq!(catalog.species_names(), vec!["Rabbit"]);
        assert_eq!(catalog.breeds_for("Rabbit"), ["Dwarf".to_string()]);
        assert!(catalog.breeds_for("Dog").is_empty());

        // Templates do not shadow an existing legacy species file
        let created = Catalog::write_templates(ctx.temp_dir.path()).unwrap();
        assert_eq!(created, vec![EVENTS_FILE_NAME]);
        assert!(!ctx.temp_dir.path().join(SPECIES_FILE_NAME).exists());
    }

    #[test_context(CatalogTestContext)]
    #[test]
    fn test_write_templates(ctx: &mut CatalogTestContext) {
        let dir = ctx.temp_dir.path().join("data");
        let created = Catalog::write_templates(&dir).unwrap();
        assert_eq!(created, vec![SPECIES_FILE_NAME, EVENTS_FILE_NAME]);
        assert!(Catalog::write_templates(&dir).unwrap().is_empty());

        let catalog = Catalog::load(&dir).unwrap();
        assert!(catalog.species_names().contains(&"Dog".to_string()));
        assert!(catalog.event_type("Vaccination").is_some());
        assert_eq!(catalog.event_type("Weighing").unwrap().fields[0].kind, FieldKind::Float);
        assert!(catalog.check_species("Dog", Some("Labrador")).is_ok());
        assert!(catalog.check_species("Dog", Some("Poodle")).is_err());
    }
}
