use super::db::Db;
use crate::libs::catalog::Catalog;
use crate::libs::dates::{format_date, parse_stored_date};
use crate::libs::event::{check_range, coerce_result, EventField, EventRecord, MedicalEvent};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use std::path::Path;

const SELECT_EVENTS: &str = "SELECT id, animal_id, type, date_start, date_end, conclusion, results FROM events";
const INSERT_EVENT: &str = "INSERT INTO events (animal_id, type, date_start, date_end, conclusion, results)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_RESULTS: &str = "UPDATE events SET results = ?2 WHERE id = ?1 AND deleted = 0";
const SOFT_DELETE_EVENT: &str = "UPDATE events SET deleted = 1 WHERE id = ?1 AND deleted = 0";
const SELECT_DOCS: &str = "SELECT filename FROM event_docs WHERE event_id = ?1 ORDER BY id";
const INSERT_DOC: &str = "INSERT OR IGNORE INTO event_docs (event_id, filename) VALUES (?1, ?2)";
const DELETE_DOC: &str = "DELETE FROM event_docs WHERE event_id = ?1 AND filename = ?2";
const SELECT_LIVE_ANIMAL: &str = "SELECT COUNT(*) FROM animals WHERE id = ?1 AND deleted = 0";

pub struct Events {
    conn: Connection,
}

/// Decodes the stored results column. Anything that is not a JSON object
/// reads as empty.
fn parse_results(raw: Option<String>) -> Map<String, Value> {
    match raw.as_deref().map(serde_json::from_str::<Value>) {
        Some(Ok(Value::Object(map))) => map,
        Some(Ok(_)) | Some(Err(_)) => {
            msg_warning!(Message::EventResultsUnreadable);
            Map::new()
        }
        None => Map::new(),
    }
}

impl Events {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    fn from_row(row: &Row) -> rusqlite::Result<MedicalEvent> {
        Ok(MedicalEvent {
            id: row.get(0)?,
            animal_id: row.get(1)?,
            event_type: row.get(2)?,
            date_start: parse_stored_date(row.get(3)?),
            date_end: parse_stored_date(row.get(4)?),
            conclusion: row.get(5)?,
            results: parse_results(row.get(6)?),
            documents: Vec::new(),
        })
    }

    /// Stores a validated event for a live animal and returns its id.
    pub fn insert(&mut self, event: &EventRecord) -> Result<i64> {
        let live: i64 = self.conn.query_row(SELECT_LIVE_ANIMAL, params![event.animal_id], |row| row.get(0))?;
        if live == 0 {
            msg_bail_anyhow!(Message::AnimalNotFound(event.animal_id));
        }

        let results = if event.results.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&event.results)?)
        };

        self.conn.execute(
            INSERT_EVENT,
            params![
                event.animal_id,
                event.event_type,
                format_date(&event.date_start),
                event.date_end.as_ref().map(format_date),
                event.conclusion,
                results,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<MedicalEvent>> {
        let query = format!("{} WHERE id = ?1 AND deleted = 0", SELECT_EVENTS);
        let event = self.conn.query_row(&query, params![id], Self::from_row).optional()?;

        match event {
            Some(mut event) => {
                event.documents = self.docs(event.id)?;
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Live events of an animal, oldest first, with their documents.
    pub fn fetch_for_animal(&mut self, animal_id: i64) -> Result<Vec<MedicalEvent>> {
        let query = format!("{} WHERE animal_id = ?1 AND deleted = 0 ORDER BY date_start, id", SELECT_EVENTS);
        let mut events = {
            let mut stmt = self.conn.prepare(&query)?;
            let rows = stmt.query_map(params![animal_id], Self::from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        for event in events.iter_mut() {
            event.documents = self.docs(event.id)?;
        }
        Ok(events)
    }

    /// Validates and writes a single column, keeping the date range ordered.
    pub fn update_field(&mut self, id: i64, field: EventField, value: &str) -> Result<()> {
        let Some(event) = self.get_by_id(id)? else {
            msg_bail_anyhow!(Message::EventNotFound(id));
        };

        let value = field.validate(value)?;

        let parsed = value.clone().and_then(|v| parse_stored_date(Some(v)));
        match field {
            EventField::DateStart => {
                if let Some(start) = parsed {
                    check_range(start, event.date_end)?;
                }
            }
            EventField::DateEnd => {
                if let Some(start) = event.date_start {
                    check_range(start, parsed)?;
                }
            }
            EventField::Type | EventField::Conclusion => {}
        }

        // The column name comes from a closed enum, never from input
        let query = format!("UPDATE events SET {} = ?1 WHERE id = ?2", field.column());
        self.conn.execute(&query, params![value, id])?;
        Ok(())
    }

    /// Replaces the whole results object.
    pub fn update_results(&mut self, id: i64, results: &Map<String, Value>) -> Result<()> {
        let affected = self.conn.execute(UPDATE_RESULTS, params![id, serde_json::to_string(results)?])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::EventNotFound(id));
        }
        Ok(())
    }

    /// Sets one result value, coerced to the kind the catalog declares for
    /// the event's type. An empty value removes the entry.
    pub fn set_result(&mut self, id: i64, field: &str, raw: &str, catalog: &Catalog) -> Result<Map<String, Value>> {
        let Some(event) = self.get_by_id(id)? else {
            msg_bail_anyhow!(Message::EventNotFound(id));
        };

        let mut results = event.results;
        if raw.trim().is_empty() {
            results.remove(field.trim());
        } else {
            let value = coerce_result(catalog, &event.event_type, field, raw)?;
            results.insert(field.trim().to_string(), value);
        }

        self.update_results(id, &results)?;
        Ok(results)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(SOFT_DELETE_EVENT, params![id])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::EventNotFound(id));
        }
        Ok(())
    }

    /// Attaches a file name to an event. Attaching the same name twice is a
    /// no-op; returns whether a row was added.
    pub fn add_doc(&mut self, event_id: i64, filename: &str) -> Result<bool> {
        let affected = self.conn.execute(INSERT_DOC, params![event_id, filename])?;
        Ok(affected > 0)
    }

    /// Detaches a file name; returns whether it was attached.
    pub fn remove_doc(&mut self, event_id: i64, filename: &str) -> Result<bool> {
        let affected = self.conn.execute(DELETE_DOC, params![event_id, filename])?;
        Ok(affected > 0)
    }

    pub fn docs(&mut self, event_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_DOCS)?;
        let docs = stmt
            .query_map(params![event_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(docs)
    }
}
