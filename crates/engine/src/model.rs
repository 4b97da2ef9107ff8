use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One input row: column name → cell bytes, exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, Vec<u8>>,
}

impl Record {
    /// Zip a row against its header by position. A repeated column name keeps
    /// the later cell.
    pub fn from_row<'a>(
        header: &[String],
        values: impl IntoIterator<Item = &'a [u8]>,
    ) -> Self {
        let fields = header
            .iter()
            .zip(values)
            .map(|(name, value)| (name.clone(), value.to_vec()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&[u8]> {
        self.fields.get(column).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: AsRef<[u8]>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.as_ref().to_vec()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyed collection
// ---------------------------------------------------------------------------

/// All records of one source, grouped by join key in arrival order.
///
/// Keys are raw bytes: cells are never decoded, so two keys are equal only
/// when their bytes are.
#[derive(Debug, Clone, Default)]
pub struct KeyedCollection {
    pub source: String,
    groups: HashMap<Vec<u8>, Vec<Record>>,
    row_count: usize,
}

impl KeyedCollection {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            groups: HashMap::new(),
            row_count: 0,
        }
    }

    pub fn add(&mut self, key: Vec<u8>, record: Record) {
        self.groups.entry(key).or_default().push(record);
        self.row_count += 1;
    }

    /// Records sharing `key`; empty when the key never occurred.
    pub fn records_for(&self, key: &[u8]) -> &[Record] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct keys, unordered.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.groups.keys().map(Vec::as_slice)
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}
