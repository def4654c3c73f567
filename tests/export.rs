#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;
    use shelter::db::{animals::Animals, events::Events};
    use shelter::libs::animal::{Adoption, NewAnimal};
    use shelter::libs::catalog::Catalog;
    use shelter::libs::event::NewEvent;
    use shelter::libs::export::{ExportData, ExportFormat, Exporter, ShelterSnapshot};
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        snapshot: ShelterSnapshot,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("shelter.db");
            let catalog = Catalog {
                species: Vec::new(),
                event_types: Catalog::parse_event_types("Weighing = weight:float"),
            };

            let mut animals = Animals::open(&db_path).unwrap();
            let rex = NewAnimal {
                name: "Rex".to_string(),
                species: "Dog".to_string(),
                birth_date: Some("2023-01-15".to_string()),
                cage_number: Some("К0000".to_string()),
                quarantine_until: Some("2024-05-30".to_string()),
                ..Default::default()
            };
            let rex = animals.insert(&rex.validate(today(), &[], &catalog).unwrap()).unwrap();

            let murka = NewAnimal {
                name: "Murka, the cat".to_string(),
                species: "Cat".to_string(),
                age_estimate_months: Some("8".to_string()),
                ..Default::default()
            };
            let murka = animals.insert(&murka.validate(today(), &[], &catalog).unwrap()).unwrap();
            animals
                .adopt(murka, &Adoption::new("Ann", "+100", "2024-05-18").unwrap())
                .unwrap();

            let mut events = Events::open(&db_path).unwrap();
            let weighing = NewEvent {
                animal_id: rex,
                event_type: "Weighing".to_string(),
                date_start: "2024-05-10".to_string(),
                results: vec![("weight".to_string(), "12.5".to_string())],
                ..Default::default()
            };
            let event_id = events.insert(&weighing.validate(&catalog).unwrap()).unwrap();
            events.add_doc(event_id, "scale.jpg").unwrap();

            let checkup = NewEvent {
                animal_id: murka,
                event_type: "Examination".to_string(),
                date_start: "2024-05-01".to_string(),
                conclusion: Some("healthy".to_string()),
                ..Default::default()
            };
            events.insert(&checkup.validate(&catalog).unwrap()).unwrap();

            let snapshot = ShelterSnapshot::gather(&mut animals, &mut events, today()).unwrap();
            ExportTestContext { temp_dir, snapshot }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_snapshot_contents(ctx: &mut ExportTestContext) {
        assert_eq!(ctx.snapshot.animals.len(), 1);
        assert_eq!(ctx.snapshot.animals[0].cage_number, "К0000");
        assert_eq!(ctx.snapshot.animals[0].age_months, "16");

        assert_eq!(ctx.snapshot.adopted.len(), 1);
        assert_eq!(ctx.snapshot.adopted[0].owner_name, "Ann");
        assert_eq!(ctx.snapshot.adopted[0].age_months, "~8");

        // Events of adopted animals are exported too
        assert_eq!(ctx.snapshot.events.len(), 2);
        assert_eq!(ctx.snapshot.events[0].animal_name, "Rex");
        assert_eq!(ctx.snapshot.events[0].documents, vec!["scale.jpg".to_string()]);
        assert_eq!(ctx.snapshot.events[1].conclusion, "healthy");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("animals.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(output_path.clone()));
        exporter.export(ExportData::Animals, &ctx.snapshot).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Name,Species,Birth date,Age (months),Arrival,Cage,Quarantine until")
        );
        assert_eq!(lines.next(), Some("1,Rex,Dog,2023-01-15,16,2024-05-20,К0000,2024-05-30"));
        assert_eq!(lines.next(), None);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_all_csv_sections(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("all.csv");
        Exporter::new(ExportFormat::Csv, Some(output_path.clone()))
            .export(ExportData::All, &ctx.snapshot)
            .unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.starts_with("ANIMALS\n"));
        assert!(content.contains("\nADOPTED\n"));
        assert!(content.contains("\nEVENTS\n"));
        // Values with commas are quoted
        assert!(content.contains("\"Murka, the cat\""));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("events.json");
        Exporter::new(ExportFormat::Json, Some(output_path.clone()))
            .export(ExportData::Events, &ctx.snapshot)
            .unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        let events = value.as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["results"]["weight"], Value::from(12.5));
        assert_eq!(events[0]["event_type"], "Weighing");

        let all_path = ctx.temp_dir.path().join("all.json");
        Exporter::new(ExportFormat::Json, Some(all_path.clone()))
            .export(ExportData::All, &ctx.snapshot)
            .unwrap();
        let all: Value = serde_json::from_str(&fs::read_to_string(&all_path).unwrap()).unwrap();
        assert!(all["export_date"].is_string());
        assert_eq!(all["animals"].as_array().unwrap().len(), 1);
        assert_eq!(all["adopted"][0]["owner_contact"], "+100");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_excel(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("all.xlsx");
        Exporter::new(ExportFormat::Excel, Some(output_path.clone()))
            .export(ExportData::All, &ctx.snapshot)
            .unwrap();

        let metadata = fs::metadata(&output_path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_default_output_name() {
        let exporter = Exporter::new(ExportFormat::Excel, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("shelter_export_"));
        assert!(name.ends_with(".xlsx"));
    }
}
