use std::fmt;

use thiserror::Error;

/// One failed decode/parse attempt for a single encoding candidate.
#[derive(Debug, Clone)]
pub struct DecodeAttempt {
    pub encoding: &'static str,
    pub message: String,
}

impl DecodeAttempt {
    pub fn new(encoding: &'static str, message: impl Into<String>) -> Self {
        Self {
            encoding,
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.encoding, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("source is not valid {encoding} text; earlier attempts: {attempts:?}")]
    Undecodable {
        encoding: &'static str,
        attempts: Vec<DecodeAttempt>,
    },

    #[error("{encoding} CSV error: {source}")]
    Csv {
        encoding: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("source table has no header row")]
    MissingHeader,

    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },
}
