use async_trait::async_trait;
use regionscan_core::error::{RegionscanError, Result};
use regionscan_core::models::{AssetRecord, BoundingBox, LocodeBoundary, LocodeMatch, SectorRecord};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::{store_error, PostgresStore};
use crate::pattern::LikePattern;
use crate::ports::AssetStore;

#[async_trait]
impl AssetStore for PostgresStore {
    async fn assets_in_box(&self, bbox: &BoundingBox) -> Result<Vec<AssetRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT lat::float8 AS lat, lon::float8 AS lon, filename, reference_number, locode
            FROM asset
            WHERE lat <= $1 AND lat >= $2 AND lon <= $3 AND lon >= $4
            "#,
        )
        .bind(bbox.north())
        .bind(bbox.south())
        .bind(bbox.east())
        .bind(bbox.west())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to query assets", e))?;

        rows.iter().map(asset_from_row).collect()
    }

    async fn locode_boundaries(&self, locode: &str) -> Result<Vec<LocodeBoundary>> {
        self.fetch_locode_boundaries(locode).await
    }

    async fn search_locodes(&self, name: &str) -> Result<Vec<LocodeMatch>> {
        let pattern = LikePattern::contains("name", name)?;
        self.fetch_locode_matches(&pattern).await
    }

    async fn sector_assets(&self, locode: &str, sector: &str) -> Result<Vec<SectorRecord>> {
        let pattern = LikePattern::prefix("sector", sector)?;

        let rows = sqlx::query(
            r#"
            SELECT DISTINCT locode, EXTRACT(YEAR FROM start_time)::int AS year, reference_number
            FROM asset
            WHERE locode = $1 AND reference_number ILIKE $2
            "#,
        )
        .bind(locode)
        .bind(pattern.to_sql())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to query sector assets", e))?;

        let mut records = rows.iter().map(sector_from_row).collect::<Result<Vec<_>>>()?;
        records.sort_by(|a, b| {
            a.reference_number
                .cmp(&b.reference_number)
                .then(a.year.cmp(&b.year))
                .then(a.locode.cmp(&b.locode))
        });
        Ok(records)
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}

fn asset_from_row(row: &PgRow) -> Result<AssetRecord> {
    Ok(AssetRecord {
        lat: decode(row, "lat")?,
        lon: decode(row, "lon")?,
        filename: decode::<Option<String>>(row, "filename")?.unwrap_or_default(),
        reference_number: decode(row, "reference_number")?,
        locode: decode(row, "locode")?,
    })
}

fn sector_from_row(row: &PgRow) -> Result<SectorRecord> {
    Ok(SectorRecord {
        locode: decode(row, "locode")?,
        year: decode(row, "year")?,
        // ILIKE never matches NULL
        reference_number: decode(row, "reference_number")?,
    })
}

/// Read a column, mapping decode failures to `StoreUnavailable`
pub(crate) fn decode<'r, T>(row: &'r PgRow, column: &str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| RegionscanError::StoreUnavailable {
        reason: format!("Failed to decode column '{}': {}", column, e),
    })
}
