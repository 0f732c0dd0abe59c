//! Per-category load: fetch, filter, reproject.

use super::{CategoryLayer, FacilityRecord, LoadError, SourceDocument, SourceFetcher};
use crate::catalog::CategoryDefinition;
use crate::geo::{reproject_geometry, Crs, TransformError};

/// Loads one category's layer.
///
/// Never fails: categories without a source yield `NoDataAvailable`
/// without touching the fetcher, and any fetch, parse or transform error
/// is logged and turned into `LoadFailed`.
pub async fn load_category<F: SourceFetcher>(
    def: &CategoryDefinition,
    fetcher: &F,
) -> CategoryLayer {
    let Some(source) = def.source else {
        log::debug!("Category {} has no data source", def.id);
        return CategoryLayer::no_data(def.id);
    };

    match fetch_records(def, source, fetcher).await {
        Ok(records) => {
            log::info!("Loaded {} records for {}", records.len(), def.id);
            CategoryLayer::loaded(def.id, records)
        }
        Err(e) => {
            log::warn!("Failed to load {} from {}: {}", def.id, source, e);
            CategoryLayer::failed(def.id, e)
        }
    }
}

async fn fetch_records<F: SourceFetcher>(
    def: &CategoryDefinition,
    source: &str,
    fetcher: &F,
) -> Result<Vec<FacilityRecord>, LoadError> {
    let body = fetcher.fetch(source).await?;
    let document = SourceDocument::parse(&body)?;
    let crs = document.crs();
    if let Crs::Other(name) = &crs {
        return Err(TransformError::UnsupportedCrs(name.clone()).into());
    }

    // Filters see the record exactly as stored in the source.
    let mut records: Vec<FacilityRecord> = document
        .records
        .into_iter()
        .filter(|r| def.filter.matches(r))
        .collect();

    if crs != Crs::Geographic {
        for geometry in records.iter_mut().filter_map(|r| r.geometry.as_mut()) {
            reproject_geometry(geometry, &crs)?;
        }
    }

    Ok(records)
}
