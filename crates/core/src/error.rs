//! Error type shared by every stage of the generator.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a generation run.
///
/// All variants are configuration errors in the sense that they are raised
/// before any output is written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A generated artifact could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document is not valid JSON or does not match the expected layout.
    #[error("Failed to parse JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML or not an OpenAPI document.
    #[error("Failed to parse OpenAPI document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A type-schema value has a shape the synthesizer cannot express.
    #[error("Invalid schema at '{location}': {reason}")]
    InvalidSchema {
        /// Dotted location of the value inside the document.
        location: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An OpenAPI operation has no `operationId` to name its accessor.
    #[error("Operation {method} {path} has no operationId")]
    MissingOperationId {
        /// URL path of the operation.
        path: String,
        /// HTTP verb of the operation.
        method: String,
    },

    /// Two operations in one document share a name.
    #[error("Duplicate operation name '{0}'. Each operation must have a unique name.")]
    DuplicateOperation(String),

    /// The fetcher reference is not of the form `module#symbol` or `module`.
    #[error("Invalid fetcher reference '{0}': expected '<module>#<symbol>' or '<module>'")]
    InvalidFetcher(String),

    /// A path expected to be a directory is something else.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The source file extension does not select any input variant.
    #[error("Unsupported schema file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// A schema directory entry could not be inspected.
    #[error("Failed to scan schema directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Two schema files of one directory generate the same module.
    #[error("{} and {} both generate {module}", first.display(), second.display())]
    OutputCollision {
        /// File name of the contested module.
        module: String,
        /// Schema file that keeps the module.
        first: PathBuf,
        /// Schema file that was skipped.
        second: PathBuf,
    },

    /// A failure attributed to one source file.
    #[error("{}: {source}", path.display())]
    InFile {
        /// Source file being generated.
        path: PathBuf,
        /// What went wrong.
        source: Box<Error>,
    },

    /// One or more files of a directory batch failed.
    #[error("{}", BatchFailures(.0))]
    Batch(Vec<Error>),
}

impl Error {
    /// Attribute this error to a source file, unless it already is.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::InFile { .. } => self,
            other => Self::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

struct BatchFailures<'a>(&'a [Error]);

impl fmt::Display for BatchFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} schema file(s) failed to generate", self.0.len())?;
        for err in self.0 {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}
