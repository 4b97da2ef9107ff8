use serde::Deserialize;

use crate::error::JoinError;

/// Separator placed between join-column values when building a join key.
pub const DEFAULT_KEY_SEPARATOR: &str = "++";

/// Field delimiter for both input and output CSV.
pub const DEFAULT_DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Join settings. Every field has a default, so an empty TOML document is a
/// valid config.
///
/// ```toml
/// delimiter = ";"
/// key_separator = "||"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JoinConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_key_separator")]
    pub key_separator: String,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_key_separator() -> String {
    DEFAULT_KEY_SEPARATOR.to_string()
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl JoinConfig {
    pub fn from_toml(input: &str) -> Result<Self, JoinError> {
        let config: JoinConfig =
            toml::from_str(input).map_err(|e| JoinError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), JoinError> {
        self.delimiter_byte()?;

        if self.key_separator.is_empty() {
            return Err(JoinError::Config("key_separator must not be empty".into()));
        }

        Ok(())
    }

    /// The delimiter as the single byte the CSV reader/writer expects.
    pub fn delimiter_byte(&self) -> Result<u8, JoinError> {
        let c = self.delimiter;
        if !c.is_ascii() {
            return Err(JoinError::Config(format!(
                "delimiter must be a single ASCII character, got {c:?}"
            )));
        }
        if matches!(c, '"' | '\n' | '\r') {
            return Err(JoinError::Config(format!("delimiter cannot be {c:?}")));
        }
        Ok(c as u8)
    }

    pub(crate) fn reader_builder(&self) -> Result<csv::ReaderBuilder, JoinError> {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(true).delimiter(self.delimiter_byte()?);
        Ok(builder)
    }

    /// Build a CSV writer over `sink` using this config's delimiter.
    pub fn writer<W: std::io::Write>(&self, sink: W) -> Result<csv::Writer<W>, JoinError> {
        Ok(csv::WriterBuilder::new()
            .delimiter(self.delimiter_byte()?)
            .from_writer(sink))
    }

    /// Build a CSV reader over `source` using this config's delimiter.
    pub fn reader<R: std::io::Read>(&self, source: R) -> Result<csv::Reader<R>, JoinError> {
        Ok(self.reader_builder()?.from_reader(source))
    }
}
