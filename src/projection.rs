//! Column projection over CSV records.
//!
//! A record is the mapping of header names to cell values for one row. The
//! projection keeps only the requested names that the record actually has,
//! in request order; everything else is dropped.

use csv_async::{AsyncReaderBuilder, StringRecord};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tokio::io::AsyncRead;
use tracing::debug;

/// One output object: requested field names mapped to their text values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedRecord {
    fields: Vec<(String, String)>,
}

impl ProjectedRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProjectedRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProjectedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ProjectedRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of text fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    fields.push(entry);
                }
                Ok(ProjectedRecord { fields })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Requested fields resolved against a header row.
#[derive(Debug, Clone)]
pub struct FieldSelection {
    /// (field name, header columns carrying it in ascending order), in request order
    columns: Vec<(String, Vec<usize>)>,
    absent: Vec<String>,
}

impl FieldSelection {
    /// Repeated requests collapse to the first one. A header that repeats a
    /// name keeps every column; see [`FieldSelection::project`].
    pub fn resolve(headers: &StringRecord, fields: &[&str]) -> Self {
        let mut columns: Vec<(String, Vec<usize>)> = Vec::with_capacity(fields.len());
        let mut absent: Vec<String> = Vec::new();

        for &field in fields {
            if columns.iter().any(|(name, _)| name == field) || absent.iter().any(|a| a == field)
            {
                continue;
            }
            let indices: Vec<usize> = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == field)
                .map(|(idx, _)| idx)
                .collect();
            if indices.is_empty() {
                absent.push(field.to_string());
            } else {
                columns.push((field.to_string(), indices));
            }
        }

        Self { columns, absent }
    }

    /// Requested names the header does not carry.
    pub fn absent(&self) -> &[String] {
        &self.absent
    }

    /// Zips header names to the row's cells: a repeated name takes the last
    /// of its columns the row reaches. Names whose columns all lie past the
    /// end of a short row are omitted, not nulled.
    pub fn project(&self, record: &StringRecord) -> ProjectedRecord {
        self.columns
            .iter()
            .filter_map(|(name, indices)| {
                indices
                    .iter()
                    .rev()
                    .find_map(|&idx| record.get(idx))
                    .map(|value| (name.as_str(), value))
            })
            .collect()
    }
}

/// Result of projecting a whole source.
#[derive(Debug, Clone, Default)]
pub struct ProjectedDocument {
    pub headers: Vec<String>,
    pub absent: Vec<String>,
    pub records: Vec<ProjectedRecord>,
}

/// Read a CSV stream with a header row and project every data row.
pub async fn project_csv_stream<R>(
    reader: R,
    fields: &[&str],
) -> Result<ProjectedDocument, csv_async::Error>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut rdr = AsyncReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .buffer_capacity(1 << 20) // 1 MiB
        .create_reader(reader);

    let headers = rdr.headers().await?.clone();
    let selection = FieldSelection::resolve(&headers, fields);
    if !selection.absent().is_empty() {
        debug!(absent = ?selection.absent(), "requested fields missing from header");
    }

    let mut records = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record).await? {
        records.push(selection.project(&record));
    }

    Ok(ProjectedDocument {
        headers: headers.iter().map(|s| s.to_string()).collect(),
        absent: selection.absent,
        records,
    })
}
