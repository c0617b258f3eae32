use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, EUC_KR, UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::errors::{DecodeAttempt, ParserError};
use crate::model::RawTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A text encoding tried while reading the source table.
#[derive(Debug, Clone, Copy)]
pub struct EncodingCandidate {
    pub label: &'static str,
    pub encoding: &'static Encoding,
    pub strip_bom: bool,
}

/// Ordered fallback list. encoding_rs implements EUC-KR as the windows-949 superset, so the
/// `cp949` and `euc-kr` entries decode identically; both are kept so attempt reports list
/// the same labels a user would expect.
pub fn encoding_candidates() -> [EncodingCandidate; 4] {
    [
        EncodingCandidate {
            label: "utf-8-sig",
            encoding: UTF_8,
            strip_bom: true,
        },
        EncodingCandidate {
            label: "cp949",
            encoding: EUC_KR,
            strip_bom: false,
        },
        EncodingCandidate {
            label: "euc-kr",
            encoding: EUC_KR,
            strip_bom: false,
        },
        EncodingCandidate {
            label: "iso-8859-1",
            encoding: WINDOWS_1252,
            strip_bom: false,
        },
    ]
}

fn default_candidate() -> EncodingCandidate {
    EncodingCandidate {
        label: "utf-8",
        encoding: UTF_8,
        strip_bom: false,
    }
}

/// Reads a delimited table, trying each candidate encoding in order. The first candidate
/// that both decodes strictly and yields a CSV header wins. When every candidate fails a
/// plain UTF-8 read is made and its error returned.
pub fn read_table(bytes: &[u8]) -> Result<RawTable, ParserError> {
    read_table_with(bytes, &encoding_candidates())
}

pub fn read_table_with(
    bytes: &[u8],
    candidates: &[EncodingCandidate],
) -> Result<RawTable, ParserError> {
    let mut attempts = Vec::new();

    for candidate in candidates {
        match read_with(bytes, candidate, &attempts) {
            Ok(table) => return Ok(table),
            Err(err) => {
                debug!(encoding = candidate.label, error = %err, "encoding candidate rejected");
                attempts.push(DecodeAttempt::new(candidate.label, err.to_string()));
            }
        }
    }

    read_with(bytes, &default_candidate(), &attempts)
}

fn read_with(
    bytes: &[u8],
    candidate: &EncodingCandidate,
    attempts: &[DecodeAttempt],
) -> Result<RawTable, ParserError> {
    let text = decode(bytes, candidate).ok_or_else(|| ParserError::Undecodable {
        encoding: candidate.label,
        attempts: attempts.to_vec(),
    })?;
    parse_csv(&text, candidate.label)
}

fn decode<'a>(bytes: &'a [u8], candidate: &EncodingCandidate) -> Option<Cow<'a, str>> {
    let body = if candidate.strip_bom {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };
    candidate
        .encoding
        .decode_without_bom_handling_and_without_replacement(body)
}

fn parse_csv(text: &str, encoding: &'static str) -> Result<RawTable, ParserError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let csv_err = |source: csv::Error| ParserError::Csv { encoding, source };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParserError::MissingHeader);
    }

    let rows = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(csv_err)?;

    Ok(RawTable {
        encoding,
        headers,
        rows,
    })
}
