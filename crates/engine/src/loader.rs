use std::io::Read;

use crate::error::JoinError;
use crate::model::{KeyedCollection, Record};

/// Read the header row of `reader`. An empty source has no header and cannot
/// take part in the join.
///
/// Column names must be UTF-8; they are matched across sources and shown in
/// diagnostics. Cell values are never decoded.
pub fn read_header<R: Read>(source: &str, reader: &mut csv::Reader<R>) -> Result<Vec<String>, JoinError> {
    let headers = reader
        .byte_headers()
        .map_err(|e| JoinError::from_csv(source, e))?;

    if headers.is_empty() {
        return Err(JoinError::NoHeader {
            source: source.to_string(),
        });
    }

    headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            String::from_utf8(name.to_vec()).map_err(|e| JoinError::Parse {
                source: source.to_string(),
                line: headers.position().map(|p| p.line()),
                message: format!("column {} name is not valid UTF-8: {e}", i + 1),
            })
        })
        .collect()
}

/// Join key of `record`: its values for `join_columns`, in that order,
/// separated by `separator`. A column the record lacks contributes nothing.
pub fn derive_key(record: &Record, join_columns: &[String], separator: &str) -> Vec<u8> {
    let mut key = Vec::new();
    for (i, col) in join_columns.iter().enumerate() {
        if i > 0 {
            key.extend_from_slice(separator.as_bytes());
        }
        key.extend_from_slice(record.get(col).unwrap_or_default());
    }
    key
}

/// Consume every remaining row of `reader` into a keyed collection.
///
/// The header must already have been read. Any malformed row, including one
/// whose field count differs from the header, aborts the load.
pub fn load_source<R: Read>(
    source: &str,
    reader: &mut csv::Reader<R>,
    header: &[String],
    join_columns: &[String],
    separator: &str,
) -> Result<KeyedCollection, JoinError> {
    let mut data = KeyedCollection::new(source);

    for row in reader.byte_records() {
        let row = row.map_err(|e| JoinError::from_csv(source, e))?;

        // A flexible reader lets ragged rows through; refuse them here.
        if row.len() != header.len() {
            return Err(JoinError::Parse {
                source: source.to_string(),
                line: row.position().map(|p| p.line()),
                message: format!("expected {} field(s), found {}", header.len(), row.len()),
            });
        }

        let record = Record::from_row(header, row.iter());
        let key = derive_key(&record, join_columns, separator);
        data.add(key, record);
    }

    log::debug!(
        "loaded {source}: {} row(s), {} distinct key(s)",
        data.row_count(),
        data.key_count()
    );

    Ok(data)
}
