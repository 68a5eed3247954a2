//! The fixed conversions run by the `*2json` binaries.
//!
//! Each dataset is plain data: where its CSV lives, where its JSON goes and
//! which columns survive. Paths are relative to the directory the conversion
//! runs in.

use std::path::Path;
use tracing::info;

use crate::{convert, ConversionSummary, ConvertResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    pub name: &'static str,
    pub input: &'static str,
    pub output: &'static str,
    pub fields: &'static [&'static str],
    /// Disabled datasets are skipped by [`run_enabled`].
    pub enabled: bool,
}

pub const AIRPORTS: Dataset = Dataset {
    name: "airports",
    input: "csv/ids.apt.csv",
    output: "jsons/ids.apt.json",
    fields: &["ARPT_ID", "LAT_DECIMAL", "LONG_DECIMAL"],
    enabled: true,
};

pub const AIRWAYS: Dataset = Dataset {
    name: "airways",
    input: "csv/ids.awy.csv",
    output: "jsons/ids.awy.json",
    fields: &["AWY_ID", "AIRWAY_STRING"],
    enabled: true,
};

// fixes sit next to the working directory rather than under csv/ and jsons/
pub const FIXES: Dataset = Dataset {
    name: "fixes",
    input: "ids.fixes.csv",
    output: "ids.fixes.json",
    fields: &["FIX_ID", "LAT_DECIMAL", "LONG_DECIMAL"],
    enabled: true,
};

pub const STARS: Dataset = Dataset {
    name: "stars",
    input: "csv/ids.stars.csv",
    output: "jsons/ids.stars.json",
    fields: &["star_name", "served_arpt", "fixes"],
    enabled: true,
};

// not converted by `sidstar2json` until switched on
pub const SIDS: Dataset = Dataset {
    name: "sids",
    input: "csv/ids.sids.csv",
    output: "jsons/ids.sids.json",
    fields: &["sid_name", "served_arpt", "fixes"],
    enabled: false,
};

pub const ALL: [Dataset; 5] = [AIRPORTS, AIRWAYS, FIXES, STARS, SIDS];

impl Dataset {
    pub fn by_name(name: &str) -> Option<Dataset> {
        ALL.iter().copied().find(|ds| ds.name == name)
    }
}

/// Convert `dataset` with paths taken relative to the working directory.
pub async fn convert_dataset(dataset: &Dataset) -> ConvertResult<ConversionSummary> {
    convert(dataset.input, dataset.output, dataset.fields).await
}

/// Convert `dataset` with paths taken relative to `base`.
pub async fn convert_dataset_in(
    dataset: &Dataset,
    base: &Path,
) -> ConvertResult<ConversionSummary> {
    convert(
        base.join(dataset.input),
        base.join(dataset.output),
        dataset.fields,
    )
    .await
}

/// Convert every enabled dataset in order, stopping at the first failure.
pub async fn run_enabled(
    datasets: &[Dataset],
    base: &Path,
) -> ConvertResult<Vec<ConversionSummary>> {
    let mut summaries = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        if !dataset.enabled {
            info!(dataset = dataset.name, "skipping disabled dataset");
            continue;
        }
        summaries.push(convert_dataset_in(dataset, base).await?);
    }
    Ok(summaries)
}
