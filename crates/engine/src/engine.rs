use std::io::{Read, Write};

use crate::columns::reconcile_headers;
use crate::config::JoinConfig;
use crate::error::JoinError;
use crate::expand::for_each_combination;
use crate::loader::{load_source, read_header};
use crate::model::KeyedCollection;
use crate::project::project_row;
use crate::universe::build_key_universe;

// ---------------------------------------------------------------------------
// Input + Summary
// ---------------------------------------------------------------------------

/// One named CSV source. The name only appears in diagnostics.
pub struct SourceInput<R> {
    pub name: String,
    pub reader: R,
}

impl<R> SourceInput<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSummary {
    pub sources: usize,
    pub join_columns: Vec<String>,
    pub output_columns: Vec<String>,
    pub keys: usize,
    pub rows_written: usize,
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Join every source and write the result to `sink`.
///
/// All sources are fully loaded before the first byte is written, so a
/// failure in any source leaves `sink` untouched.
pub fn run<R: Read, W: Write>(
    config: &JoinConfig,
    sources: Vec<SourceInput<R>>,
    sink: &mut csv::Writer<W>,
) -> Result<JoinSummary, JoinError> {
    config.validate()?;

    let mut readers = Vec::with_capacity(sources.len());
    for src in sources {
        readers.push((src.name, config.reader(src.reader)?));
    }

    let mut headers = Vec::with_capacity(readers.len());
    for (name, reader) in &mut readers {
        headers.push(read_header(name, reader)?);
    }

    let plan = reconcile_headers(&headers)?;
    log::info!(
        "joining {} source(s) on [{}]",
        readers.len(),
        plan.join_columns.join(", ")
    );

    let mut collections: Vec<KeyedCollection> = Vec::with_capacity(readers.len());
    for ((name, reader), header) in readers.iter_mut().zip(&headers) {
        collections.push(load_source(
            name,
            reader,
            header,
            &plan.join_columns,
            &config.key_separator,
        )?);
    }

    let keys = build_key_universe(&collections);
    log::info!("{} distinct key(s)", keys.len());

    sink.write_record(&plan.output_columns)
        .map_err(JoinError::from_write)?;

    let mut rows_written = 0;
    for key in &keys {
        for_each_combination(key, &collections, |combo| -> Result<(), JoinError> {
            let row = project_row(combo, &plan.output_columns);
            sink.write_record(&row).map_err(JoinError::from_write)?;
            rows_written += 1;
            Ok(())
        })?;
    }

    sink.flush().map_err(JoinError::from_write)?;

    Ok(JoinSummary {
        sources: collections.len(),
        join_columns: plan.join_columns,
        output_columns: plan.output_columns,
        keys: keys.len(),
        rows_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    fn join_bytes(
        config: &JoinConfig,
        inputs: &[(&str, &[u8])],
    ) -> Result<(Vec<u8>, JoinSummary), JoinError> {
        let sources = inputs
            .iter()
            .map(|(name, data)| SourceInput::new(*name, *data))
            .collect();
        let mut writer = config.writer(Vec::new())?;
        let summary = run(config, sources, &mut writer)?;
        let bytes = writer.into_inner().expect("flushed");
        Ok((bytes, summary))
    }

    fn join(config: &JoinConfig, inputs: &[(&str, &str)]) -> Result<(String, JoinSummary), JoinError> {
        let inputs: Vec<(&str, &[u8])> = inputs.iter().map(|(n, d)| (*n, d.as_bytes())).collect();
        let (bytes, summary) = join_bytes(config, &inputs)?;
        Ok((String::from_utf8(bytes).unwrap(), summary))
    }

    /// Sink that refuses every byte, like a full disk.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn one_to_many_with_unmatched_key() {
        let (out, summary) = join(
            &JoinConfig::default(),
            &[
                ("a.csv", "id,name\n1,alice\n2,bob\n"),
                ("b.csv", "id,age\n1,30\n1,31\n"),
            ],
        )
        .unwrap();
        assert_eq!(out, "id,name,age\n1,alice,30\n1,alice,31\n2,bob,\n");
        assert_eq!(summary.keys, 2);
        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.join_columns, vec!["id"]);
    }

    #[test]
    fn schema_error_writes_nothing() {
        let config = JoinConfig::default();
        let sources = vec![
            SourceInput::new("a.csv", "a,b\n1,2\n".as_bytes()),
            SourceInput::new("b.csv", "c,d\n3,4\n".as_bytes()),
        ];
        let mut writer = config.writer(Vec::new()).unwrap();
        let err = run(&config, sources, &mut writer).unwrap_err();
        assert!(matches!(err, JoinError::NoJoinColumns));
        assert!(writer.into_inner().unwrap().is_empty());
    }

    #[test]
    fn parse_error_in_late_source_writes_nothing() {
        let config = JoinConfig::default();
        let sources = vec![
            SourceInput::new("a.csv", "id,x\n1,2\n".as_bytes()),
            SourceInput::new("b.csv", "id,y\n1,2\n3\n".as_bytes()),
        ];
        let mut writer = config.writer(Vec::new()).unwrap();
        let err = run(&config, sources, &mut writer).unwrap_err();
        assert!(err.to_string().contains("b.csv"));
        assert!(writer.into_inner().unwrap().is_empty());
    }

    #[test]
    fn empty_source_is_named() {
        let err = join(
            &JoinConfig::default(),
            &[("a.csv", "id\n1\n"), ("empty.csv", "")],
        )
        .unwrap_err();
        assert!(matches!(err, JoinError::NoHeader { ref source } if source == "empty.csv"));
    }

    #[test]
    fn custom_delimiter_applies_to_input_and_output() {
        let config = JoinConfig {
            delimiter: ';',
            ..JoinConfig::default()
        };
        let (out, _) = join(
            &config,
            &[("a.csv", "id;name\n1;a,b\n"), ("b.csv", "id;age\n1;9\n")],
        )
        .unwrap();
        assert_eq!(out, "id;name;age\n1;a,b;9\n");
    }

    #[test]
    fn output_fields_are_quoted() {
        let (out, _) = join(
            &JoinConfig::default(),
            &[
                ("a.csv", "id,note\n1,\"x, y\"\n"),
                ("b.csv", "id,quote\n1,\"say \"\"hi\"\"\"\n"),
            ],
        )
        .unwrap();
        assert_eq!(out, "id,note,quote\n1,\"x, y\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn invalid_config_rejected_before_reading() {
        let config = JoinConfig {
            key_separator: String::new(),
            ..JoinConfig::default()
        };
        let err = join(&config, &[("a.csv", "id\n1\n"), ("b.csv", "id\n1\n")]).unwrap_err();
        assert!(matches!(err, JoinError::Config(_)));
    }

    #[test]
    fn latin1_cells_pass_through_unchanged() {
        let (out, summary) = join_bytes(
            &JoinConfig::default(),
            &[("a.csv", &b"id,name\n1,Jos\xe9\n"[..]), ("b.csv", &b"id,age\n1,30\n"[..])],
        )
        .unwrap();
        assert_eq!(out, b"id,name,age\n1,Jos\xe9,30\n");
        assert_eq!(summary.rows_written, 1);
    }

    #[test]
    fn non_utf8_keys_join_on_exact_bytes() {
        let (out, _) = join_bytes(
            &JoinConfig::default(),
            &[
                ("a.csv", &b"city,n\nS\xe8te,1\nS\xe9te,2\n"[..]),
                ("b.csv", &b"city,m\nS\xe9te,x\n"[..]),
            ],
        )
        .unwrap();
        assert_eq!(out, b"city,n,m\nS\xe8te,1,\nS\xe9te,2,x\n");
    }

    #[test]
    fn failing_sink_is_a_write_error() {
        let config = JoinConfig::default();
        let sources = vec![
            SourceInput::new("a.csv", "id,x\n1,a\n".as_bytes()),
            SourceInput::new("b.csv", "id,y\n1,b\n".as_bytes()),
        ];
        let mut writer = config.writer(FullDisk).unwrap();
        let err = run(&config, sources, &mut writer).unwrap_err();
        match &err {
            JoinError::Write(msg) => assert!(msg.contains("no space left"), "{msg}"),
            other => panic!("expected write error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("failed to write CSV output"));
    }
}
