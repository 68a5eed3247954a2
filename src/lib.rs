//! Field-projecting CSV to JSON conversion for navigation reference data.
//!
//! - Reads a CSV file with a header row (plain, gzip or zstd; UTF-8 by default).
//! - Keeps only an allowlist of named columns per row, values stay text.
//! - Writes the rows as a pretty-printed JSON array of objects, in input order.
//!
//! Data shape:
//! - `ConversionSummary { records, output, checksum }`
//! - Output objects: `ProjectedRecord` (requested field -> cell text)
//
mod codec;
pub mod datasets;
mod io;
mod json;
pub mod logging;
mod projection;

pub use crate::datasets::{convert_dataset, convert_dataset_in, run_enabled, Dataset};
pub use crate::io::{
    build_source_reader, reader_from_path, write_document, Compression, SourceMeta,
};
pub use crate::json::{render_document, JsonStyle};
pub use crate::projection::{project_csv_stream, FieldSelection, ProjectedDocument, ProjectedRecord};

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Outcome of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// data rows read, which is also the number of objects written
    pub records: usize,
    pub output: PathBuf,
    /// CRC32 of the bytes written
    pub checksum: u32,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully wrote {} records to {}",
            self.records,
            self.output.display()
        )
    }
}

/// Error type returned by this crate when not using `anyhow`.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open input {}: {source}", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input {} is not valid {charset} text: {detail}", .path.display())]
    Encoding {
        path: PathBuf,
        charset: &'static str,
        detail: String,
    },
    #[error("failed to read CSV from {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv_async::Error,
    },
    #[error("failed to write output {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render JSON for {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Sort a CSV reader failure into an encoding problem or a plain read error.
    fn from_csv(
        path: &Path,
        charset: &'static encoding_rs::Encoding,
        err: csv_async::Error,
    ) -> Self {
        let detail = match err.kind() {
            csv_async::ErrorKind::Utf8 { err, .. } => Some(err.to_string()),
            csv_async::ErrorKind::Io(io_err) => io_err
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<codec::MalformedInput>())
                .map(|malformed| malformed.to_string()),
            _ => None,
        };
        match detail {
            Some(detail) => Self::Encoding {
                path: path.to_path_buf(),
                charset: charset.name(),
                detail,
            },
            None => Self::Csv {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// The input file does not exist.
    #[must_use]
    pub fn is_input_missing(&self) -> bool {
        matches!(
            self,
            Self::InputOpen { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// The input was not valid text in the expected charset.
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }

    /// The output document could not be written.
    #[must_use]
    pub fn is_output_write(&self) -> bool {
        matches!(self, Self::OutputWrite { .. })
    }
}

/// Knobs for a conversion. The defaults reproduce the reference output.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Which character encoding the input is in
    pub charset: &'static encoding_rs::Encoding,
    pub json: JsonStyle,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            charset: encoding_rs::UTF_8,
            json: JsonStyle::default(),
        }
    }
}

/// Convert `input` to a JSON document at `output`, keeping only `fields`.
pub async fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    fields: &[&str],
) -> ConvertResult<ConversionSummary> {
    convert_with(input, output, fields, &ConvertOptions::default()).await
}

/// As [`convert`], with explicit options.
///
/// The whole input is read and rendered before the output is touched, so a
/// read or render failure leaves any existing output file as it was. An
/// existing output is overwritten in place.
pub async fn convert_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    fields: &[&str],
    options: &ConvertOptions,
) -> ConvertResult<ConversionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let (reader, meta) = reader_from_path(input, options.charset)
        .await
        .map_err(|source| ConvertError::InputOpen {
            path: input.to_path_buf(),
            source,
        })?;

    let document = project_csv_stream(reader, fields)
        .await
        .map_err(|err| ConvertError::from_csv(input, meta.charset, err))?;
    debug!(
        source = %meta.name_hint,
        rows = document.records.len(),
        columns = document.headers.len(),
        "projected source"
    );

    let bytes = render_document(&document.records, &options.json).map_err(|source| {
        ConvertError::Json {
            path: output.to_path_buf(),
            source,
        }
    })?;
    write_document(output, &bytes)
        .await
        .map_err(|source| ConvertError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;

    let summary = ConversionSummary {
        records: document.records.len(),
        output: output.to_path_buf(),
        checksum: crc32fast::hash(&bytes),
    };
    info!(
        records = summary.records,
        output = %summary.output.display(),
        checksum = summary.checksum,
        "wrote document"
    );
    Ok(summary)
}
