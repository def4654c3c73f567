#[derive(Debug, Clone)]
pub enum Message {
    // === ANIMAL MESSAGES ===
    AnimalAdded(String, i64), // name, id
    AnimalUpdated(String),
    AnimalDeleted(String),
    AnimalNotFound(i64),
    AnimalsHeader,
    NoAnimalsFound,
    MedicalCardHeader(String),
    ConfirmDeleteAnimal(String),
    PromptAnimalName,
    PromptSpecies,
    PromptBreed,
    PromptBirthDate,
    PromptAgeMonths,
    PromptCage,
    PromptQuarantineUntil,
    PromptNewValue(String, String), // field, animal name

    // === ADOPTION MESSAGES ===
    AnimalAdopted(String, String), // animal name, owner
    AnimalAlreadyAdopted(i64),
    AnimalNotAdopted(i64),
    AdoptedHeader,
    NoAdoptedAnimals,
    PromptOwnerName,
    PromptOwnerContact,

    // === CAGE MESSAGES ===
    NextFreeCage(String),
    CagesHeader,
    NoOccupiedCages,
    InvalidCageSkipped(String),

    // === MEDICAL EVENT MESSAGES ===
    EventAdded(String, String, i64), // type, animal name, id
    EventUpdated(i64),
    EventDeleted(i64),
    EventNotFound(i64),
    EventsHeader(i64),
    NoEventsFound,
    EventResultsUnreadable,
    ConfirmDeleteEvent(String, String), // type, dates
    PromptEventType,
    PromptEventStart,
    PromptEventEnd,
    PromptConclusion,
    PromptEventField(String),
    PromptResultValue(String, String), // field, kind

    // === DOCUMENT MESSAGES ===
    DocumentAttached(String, i64),
    DocumentAlreadyAttached(String),
    DocumentDetached(String, i64),
    DocumentNotAttached(String, i64),
    DocumentNotFound(String),
    DocumentSourceMissing(String),
    DocumentNameTaken(String),
    DocumentsHeader(String),
    NoDocumentsFound(i64),

    // === CATALOG MESSAGES ===
    SpeciesHeader,
    EventTypesHeader,
    CatalogEmpty,
    CatalogTemplateWritten(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleQuarantine,
    ConfigModuleDocuments,
    PromptSelectModules,
    PromptQuarantineDays,
    PromptDocumentsDir,

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // data, format
    ExportingAllData,
    ExportCompleted(String),

    // === GENERAL ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    NothingToRollback,
    RollingBack(u32, u32),
    RollbackCompleted(u32),
}
