//! Module for the error management
use crate::enums::EntityType;
use crate::ids::AgencyAndId;
use thiserror::Error;

/// Specific line from a CSV file that could not be read
#[derive(Debug)]
pub struct LineError {
    /// Headers of the CSV file
    pub headers: Vec<String>,
    /// Values of the line that could not be parsed
    pub values: Vec<String>,
}

/// An error that can occur while loading a GTFS feed.
///
/// None of them is recovered by the loader: the first error aborts the whole run.
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory file is not present in the feed
    #[error("Could not find file {0}")]
    MissingFile(String),
    /// A required column has no value on a line
    #[error("missing required field '{column}' in {file_name}, line {line}")]
    MissingRequiredField {
        /// Table being read
        file_name: String,
        /// Column without a value
        column: String,
        /// Line of the table
        line: u64,
    },
    /// A value does not follow the grammar of its column
    #[error("invalid value '{value}' for '{column}' in {file_name}, line {line}: {reason}")]
    InvalidValue {
        /// Table being read
        file_name: String,
        /// Column of the value
        column: String,
        /// The raw value
        value: String,
        /// Line of the table
        line: u64,
        /// What was expected
        reason: String,
    },
    /// The local id is already claimed in the ledger of its entity type
    #[error("duplicate entity id: type={entity_type} id={id}")]
    DuplicateEntity {
        /// Type of the entity
        entity_type: EntityType,
        /// Identifier that was claimed twice
        id: AgencyAndId,
    },
    /// A file references an id that was never loaded (or not loaded yet)
    #[error("entity not found: type={entity_type} id={id}")]
    ReferenceNotFound {
        /// Type of the referenced entity
        entity_type: EntityType,
        /// The unknown id
        id: String,
    },
    /// The default agency id was needed but none is configured and no agency was loaded
    #[error("no default agency id: none configured and no agency loaded")]
    NoDefaultAgencyId,
    /// The entity type has no schema, or a configured type name is unknown
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),
    /// An internal lookup was called with an absent argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The given path to the GTFS is neither a file nor a directory
    #[error("Could not read GTFS: {0} is neither a file nor a directory")]
    NotFileNorDirectory(String),
    /// Generic Input/Output error while reading a file
    #[error("impossible to read file")]
    IO(#[from] std::io::Error),
    /// Impossible to read a file
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        /// The file name that could not be read
        file_name: String,
        /// The inital error that caused the unability to read the file
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Impossible to read a CSV file
    #[error("impossible to read csv file '{file_name}'")]
    CSVError {
        /// File name that could not be parsed as CSV
        file_name: String,
        /// The initial error by the csv library
        #[source]
        source: csv::Error,
        /// The line that could not be parsed by the csv library
        line_in_error: Option<LineError>,
    },
    /// Error when trying to unzip the GTFS archive
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}
