#[cfg(test)]
mod tests {
    use rusqlite::params;
    use shelter::db::animals::Animals;
    use shelter::db::db::Db;
    use shelter::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use shelter::libs::animal::AnimalFilter;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("shelter.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    fn table_exists(conn: &rusqlite::Connection, table: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            > 0
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_automatically(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        assert_eq!(get_db_version(&db.conn).unwrap(), MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());

        for table in ["animals", "events", "event_docs", "migrations"] {
            assert!(table_exists(&db.conn, table), "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        assert!(needs_migration(&conn).unwrap());

        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert_eq!(history.len() as u32, manager.latest_version());
        for (i, (version, name, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
            assert!(!name.is_empty());
        }
        assert!(manager.is_migration_applied(&conn, 1).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let first = get_db_version(&conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), first);
        assert_eq!(manager.get_migration_history(&conn).unwrap().len() as u32, first);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_legacy_database_is_upgraded(ctx: &mut MigrationTestContext) {
        {
            let conn = rusqlite::Connection::open(&ctx.db_path).unwrap();
            conn.execute_batch(
                "CREATE TABLE animals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT,
                    species TEXT,
                    birth_date TEXT,
                    age_estimated INTEGER,
                    arrival_date TEXT,
                    cage_number TEXT,
                    quarantine_until TEXT
                );
                CREATE TABLE adoptions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    animal_id INTEGER,
                    owner_name TEXT,
                    owner_contact TEXT,
                    adoption_date TEXT
                );
                INSERT INTO animals (name, species, birth_date, age_estimated, arrival_date, cage_number)
                    VALUES ('Rex', 'Dog', '2022-01-10', NULL, '2024-01-05', 'К0001');
                INSERT INTO animals (name, species, birth_date, age_estimated, arrival_date, cage_number)
                    VALUES ('Murka', 'Cat', '~2023-02-01', 1, '2024-02-01', 'К0002');
                INSERT INTO adoptions (animal_id, owner_name, owner_contact, adoption_date)
                    VALUES (2, 'Ann', '+100', '2024-03-01');",
            )
            .unwrap();
        }

        let mut animals = Animals::open(&ctx.db_path).unwrap();

        let in_shelter = animals.fetch(AnimalFilter::InShelter).unwrap();
        assert_eq!(in_shelter.len(), 1);
        assert_eq!(in_shelter[0].name, "Rex");
        assert!(!in_shelter[0].age_estimated);

        let adopted = animals.fetch(AnimalFilter::Adopted).unwrap();
        assert_eq!(adopted.len(), 1);
        let adoption = adopted[0].adoption.as_ref().unwrap();
        assert_eq!(adoption.owner_name, "Ann");
        assert_eq!(adoption.owner_contact, "+100");

        // The adopted animal's cage is free again
        assert_eq!(animals.cage_numbers().unwrap(), vec!["К0001".to_string()]);
    }

    #[cfg(debug_assertions)]
    #[test_context(MigrationTestContext)]
    #[test]
    fn test_rollback_forgets_newer_versions(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();
        manager.run_migrations(&mut conn).unwrap();

        manager.rollback_to(&mut conn, 1).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 1);
        assert!(needs_migration(&conn).unwrap());

        // Re-applying over the existing schema succeeds
        manager.run_migrations(&mut conn).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), manager.latest_version());

        // Rolling forward is a no-op
        manager.rollback_to(&mut conn, 99).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), manager.latest_version());
    }
}
