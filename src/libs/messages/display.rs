//! Display implementation for shelter messages.
//!
//! All user-facing text lives here, so commands and library code refer to
//! messages by variant and never format prose themselves.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === ANIMAL MESSAGES ===
            Message::AnimalAdded(name, id) => format!("{} registered with ID {}", name, id),
            Message::AnimalUpdated(name) => format!("{} updated", name),
            Message::AnimalDeleted(name) => format!("{} deleted", name),
            Message::AnimalNotFound(id) => format!("Animal with ID {} not found", id),
            Message::AnimalsHeader => "Animals in the shelter:".to_string(),
            Message::NoAnimalsFound => "No animals found".to_string(),
            Message::MedicalCardHeader(name) => format!("Medical card: {}", name),
            Message::ConfirmDeleteAnimal(name) => format!("Delete {}?", name),
            Message::PromptAnimalName => "Name".to_string(),
            Message::PromptSpecies => "Species".to_string(),
            Message::PromptBreed => "Breed".to_string(),
            Message::PromptBirthDate => "Birth date (YYYY-MM-DD, empty if unknown)".to_string(),
            Message::PromptAgeMonths => "Estimated age in months".to_string(),
            Message::PromptCage => "Cage number".to_string(),
            Message::PromptQuarantineUntil => "Quarantine until (YYYY-MM-DD)".to_string(),
            Message::PromptNewValue(field, name) => format!("New {} for {}", field, name),

            // === ADOPTION MESSAGES ===
            Message::AnimalAdopted(name, owner) => format!("{} adopted by {}", name, owner),
            Message::AnimalAlreadyAdopted(id) => format!("Animal with ID {} is already adopted", id),
            Message::AnimalNotAdopted(id) => format!("Animal with ID {} has not been adopted", id),
            Message::AdoptedHeader => "Adopted animals:".to_string(),
            Message::NoAdoptedAnimals => "No adopted animals".to_string(),
            Message::PromptOwnerName => "Owner name".to_string(),
            Message::PromptOwnerContact => "Owner contact".to_string(),

            // === CAGE MESSAGES ===
            Message::NextFreeCage(cage) => format!("Next free quarantine cage: {}", cage),
            Message::CagesHeader => "Occupied cages:".to_string(),
            Message::NoOccupiedCages => "All cages are free".to_string(),
            Message::InvalidCageSkipped(cage) => format!("Skipping unreadable cage number '{}'", cage),

            // === MEDICAL EVENT MESSAGES ===
            Message::EventAdded(event_type, name, id) => format!("{} recorded for {} (event ID {})", event_type, name, id),
            Message::EventUpdated(id) => format!("Event {} updated", id),
            Message::EventDeleted(id) => format!("Event {} deleted", id),
            Message::EventNotFound(id) => format!("Event with ID {} not found", id),
            Message::EventsHeader(animal_id) => format!("Medical events of animal {}:", animal_id),
            Message::NoEventsFound => "No medical events recorded".to_string(),
            Message::EventResultsUnreadable => "Stored event results are not a JSON object and were ignored".to_string(),
            Message::ConfirmDeleteEvent(event_type, dates) => format!("Delete {} of {}?", event_type, dates),
            Message::PromptEventType => "Event type".to_string(),
            Message::PromptEventStart => "Start date (YYYY-MM-DD)".to_string(),
            Message::PromptEventEnd => "End date (YYYY-MM-DD, optional)".to_string(),
            Message::PromptConclusion => "Conclusion (optional)".to_string(),
            Message::PromptEventField(field) => format!("New value for {}", field),
            Message::PromptResultValue(field, kind) => format!("{} ({})", field, kind),

            // === DOCUMENT MESSAGES ===
            Message::DocumentAttached(name, event_id) => format!("{} attached to event {}", name, event_id),
            Message::DocumentAlreadyAttached(name) => format!("{} is already attached", name),
            Message::DocumentDetached(name, event_id) => format!("{} detached from event {}", name, event_id),
            Message::DocumentNotAttached(name, event_id) => format!("{} is not attached to event {}", name, event_id),
            Message::DocumentNotFound(path) => format!("File not found: {}", path),
            Message::DocumentSourceMissing(path) => format!("Not a readable file: {}", path),
            Message::DocumentNameTaken(name) => format!("A different file named {} is already stored for this animal", name),
            Message::DocumentsHeader(dir) => format!("Documents in {}:", dir),
            Message::NoDocumentsFound(animal_id) => format!("No documents stored for animal {}", animal_id),

            // === CATALOG MESSAGES ===
            Message::SpeciesHeader => "Species and breeds:".to_string(),
            Message::EventTypesHeader => "Medical event types:".to_string(),
            Message::CatalogEmpty => "Catalog is empty; run `shelter init` to create template files".to_string(),
            Message::CatalogTemplateWritten(path) => format!("Template written: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "No configuration file to delete".to_string(),
            Message::ConfigModuleQuarantine => "Quarantine settings".to_string(),
            Message::ConfigModuleDocuments => "Documents settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptQuarantineDays => "Quarantine length in days".to_string(),
            Message::PromptDocumentsDir => "Documents folder".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(data, format) => format!("Exporting {} as {}...", data, format),
            Message::ExportingAllData => "Exporting all data...".to_string(),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NothingToRollback => "Nothing to rollback".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rollback to v{} completed", version),
        };

        write!(f, "{}", text)
    }
}
