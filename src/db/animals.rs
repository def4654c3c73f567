use super::db::Db;
use crate::libs::animal::{Adoption, Animal, AnimalField, AnimalFilter};
use crate::libs::cage;
use crate::libs::dates::{format_date, parse_stored_date};
use crate::libs::messages::Message;
use crate::libs::validation::ValidationError;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SELECT_ANIMALS: &str = "SELECT id, name, species, birth_date, age_estimated, arrival_date, cage_number,
    quarantine_until, deleted, adopted, adoption_date, owner_name, owner_contact FROM animals";
const WHERE_IN_SHELTER: &str = "WHERE deleted = 0 AND adopted = 0";
const WHERE_ADOPTED: &str = "WHERE deleted = 0 AND adopted = 1";
const WHERE_NOT_DELETED: &str = "WHERE deleted = 0";
const INSERT_ANIMAL: &str = "INSERT INTO animals
    (name, species, birth_date, age_estimated, arrival_date, cage_number, quarantine_until)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_OCCUPIED_CAGES: &str = "SELECT cage_number FROM animals
    WHERE cage_number IS NOT NULL AND TRIM(cage_number) != '' AND deleted = 0 AND adopted = 0";
const SOFT_DELETE_ANIMAL: &str = "UPDATE animals SET deleted = 1 WHERE id = ?1 AND deleted = 0";
const ADOPT_ANIMAL: &str = "UPDATE animals SET adopted = 1, owner_name = ?2, owner_contact = ?3, adoption_date = ?4
    WHERE id = ?1 AND deleted = 0 AND adopted = 0";
const CLEAR_AGE_ESTIMATE: &str = "UPDATE animals SET age_estimated = 0 WHERE id = ?1";
const SELECT_MEDICAL_INDEX: &str = "SELECT id, name FROM animals WHERE deleted = 0 ORDER BY id";

pub struct Animals {
    conn: Connection,
}

impl Animals {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Animal> {
        let adopted: bool = row.get(9)?;
        let adoption = if adopted {
            Some(Adoption {
                owner_name: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
                owner_contact: row.get::<_, Option<String>>(12)?.unwrap_or_default(),
                adoption_date: parse_stored_date(row.get(10)?),
            })
        } else {
            None
        };

        Ok(Animal {
            id: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            species: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            birth_date: parse_stored_date(row.get(3)?),
            age_estimated: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
            arrival_date: parse_stored_date(row.get(5)?),
            cage_number: row.get::<_, Option<String>>(6)?.filter(|c| !c.trim().is_empty()),
            quarantine_until: parse_stored_date(row.get(7)?),
            deleted: row.get(8)?,
            adoption,
        })
    }

    /// Stores a new animal and returns its id.
    pub fn insert(&mut self, animal: &Animal) -> Result<i64> {
        self.conn.execute(
            INSERT_ANIMAL,
            params![
                animal.name,
                animal.species,
                animal.birth_date.as_ref().map(format_date),
                animal.age_estimated,
                animal.arrival_date.as_ref().map(format_date),
                animal.cage_number,
                animal.quarantine_until.as_ref().map(format_date),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        msg_debug!(format!("Inserted animal {} with id {}", animal.name, id));
        Ok(id)
    }

    /// Returns the animal unless it does not exist or has been deleted.
    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Animal>> {
        let query = format!("{} WHERE id = ?1 AND deleted = 0", SELECT_ANIMALS);
        self.conn
            .query_row(&query, params![id], Self::from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn fetch(&mut self, filter: AnimalFilter) -> Result<Vec<Animal>> {
        let condition = match filter {
            AnimalFilter::InShelter => WHERE_IN_SHELTER,
            AnimalFilter::Adopted => WHERE_ADOPTED,
            AnimalFilter::All => WHERE_NOT_DELETED,
        };
        let query = format!("{} {} ORDER BY id", SELECT_ANIMALS, condition);

        let mut stmt = self.conn.prepare(&query)?;
        let animals = stmt.query_map([], Self::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(animals)
    }

    /// Cage numbers held by animals that are still in the shelter.
    pub fn cage_numbers(&mut self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_OCCUPIED_CAGES)?;
        let cages = stmt.query_map([], |row| row.get::<_, String>(0))?.collect::<Result<Vec<_>, _>>()?;
        Ok(cages)
    }

    /// `(id, name)` of every animal that has not been deleted, for picking
    /// a medical record.
    pub fn medical_index(&mut self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare(SELECT_MEDICAL_INDEX)?;
        let index = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(index)
    }

    /// Validates and writes a single column.
    ///
    /// Shelter-only fields (cage, quarantine) are rejected for adopted
    /// animals and owner fields for animals that were not adopted. A cage may
    /// not be taken by another animal.
    pub fn update_field(&mut self, id: i64, field: AnimalField, value: &str) -> Result<()> {
        let Some(animal) = self.get_by_id(id)? else {
            msg_bail_anyhow!(Message::AnimalNotFound(id));
        };

        if (field.is_adoption_field() && !animal.is_adopted()) || (field.is_shelter_field() && animal.is_adopted()) {
            return Err(ValidationError::FieldNotEditable(field.to_string()).into());
        }

        let value = field.validate(value)?;

        if let (AnimalField::Cage, Some(new_cage)) = (field, value.as_deref()) {
            let unchanged = animal.cage_number.as_deref().is_some_and(|old| cage::is_occupied(new_cage, &[old.to_string()]));
            if !unchanged && cage::is_occupied(new_cage, &self.cage_numbers()?) {
                return Err(ValidationError::CageOccupied(new_cage.to_string()).into());
            }
        }

        // The column name comes from a closed enum, never from input
        let query = format!("UPDATE animals SET {} = ?1 WHERE id = ?2", field.column());
        self.conn.execute(&query, params![value, id])?;

        // An exact birth date replaces an estimate
        if field == AnimalField::BirthDate {
            self.conn.execute(CLEAR_AGE_ESTIMATE, params![id])?;
        }
        Ok(())
    }

    /// Marks an animal as deleted. Deleted animals disappear from every list.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(SOFT_DELETE_ANIMAL, params![id])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::AnimalNotFound(id));
        }
        Ok(())
    }

    /// Records an adoption. The animal leaves the shelter and its cage is
    /// freed; the cage number itself is kept on the record.
    pub fn adopt(&mut self, id: i64, adoption: &Adoption) -> Result<()> {
        let Some(animal) = self.get_by_id(id)? else {
            msg_bail_anyhow!(Message::AnimalNotFound(id));
        };
        if animal.is_adopted() {
            msg_bail_anyhow!(Message::AnimalAlreadyAdopted(id));
        }

        self.conn.execute(
            ADOPT_ANIMAL,
            params![
                id,
                adoption.owner_name,
                adoption.owner_contact,
                adoption.adoption_date.as_ref().map(format_date),
            ],
        )?;
        Ok(())
    }
}
