pub mod encoding;
pub mod errors;
pub mod fields;
pub mod model;
pub mod schema;

pub use encoding::{encoding_candidates, read_table, read_table_with, EncodingCandidate};
pub use errors::{DecodeAttempt, ParserError};
pub use model::{RawRecord, RawTable};
pub use schema::{ColumnIndex, REQUIRED_COLUMNS};
