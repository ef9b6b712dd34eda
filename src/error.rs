use thiserror::Error;

/// Spreadsheet access errors
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Worksheet {0} not found")]
    MissingWorksheet(String),
}

/// Errors while grouping schedule rows into cables
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("Device {0} referenced in schedule has no IO-list entry")]
    UnknownDevice(String),
    #[error("Device {tag} on row {row} appears before any cable")]
    OrphanDevice { row: u32, tag: String },
    #[error("Device tag {0:?} has no space between tag and number")]
    MalformedDeviceTag(String),
}

/// Errors reported by the drawing collaborator
#[derive(Error, Debug, PartialEq)]
pub enum CadError {
    #[error("{0} {1} not found")]
    NotFound(&'static str, String),
    #[error("Unsupported property code {0}")]
    Unsupported(i16),
    #[error("Invalid value {1:?} for property code {0}")]
    InvalidValue(i16, String),
    #[error("Unsupported entity {0}")]
    UnsupportedEntity(String),
    #[error("Unknown entity handle")]
    UnknownHandle,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    #[error("Label {0:?} has no terminal number to replace")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ReindexError {
    #[error("No junction termination in selection")]
    NoReference,
    #[error(transparent)]
    Cad(#[from] CadError),
    #[error(transparent)]
    Label(#[from] LabelError),
}

#[derive(Error, Debug)]
pub enum FlipError {
    #[error("No junction termination in selection")]
    NoReference,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config {0} could not be read")]
    Io(String, #[source] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors that terminate a user command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Excel file is not compatible: {0}")]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Flip(#[from] FlipError),
    #[error(transparent)]
    Cad(#[from] CadError),
    #[error(transparent)]
    Reindex(#[from] ReindexError),
}
