#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shelter::db::animals::Animals;
    use shelter::libs::animal::{Adoption, AnimalField, AnimalFilter, NewAnimal};
    use shelter::libs::catalog::Catalog;
    use shelter::libs::validation::ValidationError;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct AdoptionTestContext {
        animals: Animals,
        rex: i64,
        _temp_dir: TempDir,
    }

    impl TestContext for AdoptionTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut animals = Animals::open(temp_dir.path().join("shelter.db")).unwrap();

            let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
            let rex = NewAnimal {
                name: "Rex".to_string(),
                species: "Dog".to_string(),
                age_estimate_months: Some("24".to_string()),
                cage_number: Some("К0003".to_string()),
                quarantine_until: Some("2024-05-30".to_string()),
                ..Default::default()
            }
            .validate(today, &[], &Catalog::default())
            .unwrap();
            let rex = animals.insert(&rex).unwrap();

            AdoptionTestContext {
                animals,
                rex,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test]
    fn test_adoption_requires_owner() {
        assert_eq!(Adoption::new("", "+100", "2024-06-01"), Err(ValidationError::OwnerRequired));
        assert_eq!(Adoption::new("Ann", " ", "2024-06-01"), Err(ValidationError::OwnerRequired));
        assert!(matches!(Adoption::new("Ann", "+100", "01/06/2024"), Err(ValidationError::InvalidDate { .. })));

        let adoption = Adoption::new(" Ann ", "+100", "2024-06-01").unwrap();
        assert_eq!(adoption.owner_name, "Ann");
        assert_eq!(adoption.adoption_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test_context(AdoptionTestContext)]
    #[test]
    fn test_adopt_moves_animal_out_of_shelter(ctx: &mut AdoptionTestContext) {
        assert_eq!(ctx.animals.cage_numbers().unwrap(), vec!["К0003".to_string()]);

        let adoption = Adoption::new("Ann", "ann@example.com", "2024-06-01").unwrap();
        ctx.animals.adopt(ctx.rex, &adoption).unwrap();

        assert!(ctx.animals.fetch(AnimalFilter::InShelter).unwrap().is_empty());
        let adopted = ctx.animals.fetch(AnimalFilter::Adopted).unwrap();
        assert_eq!(adopted.len(), 1);
        assert_eq!(adopted[0].adoption.as_ref(), Some(&adoption));

        // The cage is free again but the record keeps it
        assert!(ctx.animals.cage_numbers().unwrap().is_empty());
        assert_eq!(adopted[0].cage_number.as_deref(), Some("К0003"));

        // Adopted animals still have a medical record
        assert_eq!(ctx.animals.medical_index().unwrap(), vec![(ctx.rex, "Rex".to_string())]);
    }

    #[test_context(AdoptionTestContext)]
    #[test]
    fn test_adopt_twice_fails(ctx: &mut AdoptionTestContext) {
        let adoption = Adoption::new("Ann", "+100", "2024-06-01").unwrap();
        ctx.animals.adopt(ctx.rex, &adoption).unwrap();

        let again = Adoption::new("Bob", "+200", "2024-06-02").unwrap();
        assert!(ctx.animals.adopt(ctx.rex, &again).is_err());

        let stored = ctx.animals.get_by_id(ctx.rex).unwrap().unwrap();
        assert_eq!(stored.adoption.unwrap().owner_name, "Ann");
    }

    #[test_context(AdoptionTestContext)]
    #[test]
    fn test_adopt_deleted_or_missing_fails(ctx: &mut AdoptionTestContext) {
        let adoption = Adoption::new("Ann", "+100", "2024-06-01").unwrap();
        assert!(ctx.animals.adopt(9999, &adoption).is_err());

        ctx.animals.delete(ctx.rex).unwrap();
        assert!(ctx.animals.adopt(ctx.rex, &adoption).is_err());
    }

    #[test_context(AdoptionTestContext)]
    #[test]
    fn test_edit_adopted_fields(ctx: &mut AdoptionTestContext) {
        // Owner fields are only editable after adoption
        assert!(ctx.animals.update_field(ctx.rex, AnimalField::OwnerContact, "+300").is_err());

        let adoption = Adoption::new("Ann", "+100", "2024-06-01").unwrap();
        ctx.animals.adopt(ctx.rex, &adoption).unwrap();

        ctx.animals.update_field(ctx.rex, AnimalField::OwnerContact, "+300").unwrap();
        ctx.animals.update_field(ctx.rex, AnimalField::AdoptionDate, "2024-06-03").unwrap();
        let stored = ctx.animals.get_by_id(ctx.rex).unwrap().unwrap().adoption.unwrap();
        assert_eq!(stored.owner_contact, "+300");
        assert_eq!(stored.adoption_date, NaiveDate::from_ymd_opt(2024, 6, 3));

        assert!(ctx.animals.update_field(ctx.rex, AnimalField::OwnerName, "").is_err());

        // Shelter fields are locked once the animal has left
        let err = ctx.animals.update_field(ctx.rex, AnimalField::Cage, "К0004").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::FieldNotEditable("cage_number".to_string()))
        );
    }
}
