//! Queries against the locode boundary table
//!
//! The table name comes from configuration and is validated as an
//! identifier before it is interpolated; all values are bound parameters.

use regionscan_core::error::Result;
use regionscan_core::models::{LocodeBoundary, LocodeMatch};
use sqlx::postgres::PgRow;

use super::assets::decode;
use super::{store_error, PostgresStore};
use crate::pattern::LikePattern;

impl PostgresStore {
    pub(crate) async fn fetch_locode_boundaries(&self, locode: &str) -> Result<Vec<LocodeBoundary>> {
        let sql = format!(
            r#"
            SELECT locode, geometry,
                   bbox_north::float8 AS bbox_north, bbox_south::float8 AS bbox_south,
                   bbox_east::float8 AS bbox_east, bbox_west::float8 AS bbox_west
            FROM {}
            WHERE locode = $1
            "#,
            self.config.locode_table
        );

        let rows = sqlx::query(&sql)
            .bind(locode)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to query locode boundary", e))?;

        rows.iter().map(boundary_from_row).collect()
    }

    pub(crate) async fn fetch_locode_matches(&self, pattern: &LikePattern) -> Result<Vec<LocodeMatch>> {
        let sql = format!(
            r#"
            SELECT locode, name, display_name
            FROM {}
            WHERE name ILIKE $1
            ORDER BY name, locode
            "#,
            self.config.locode_table
        );

        let rows = sqlx::query(&sql)
            .bind(pattern.to_sql())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to search locodes", e))?;

        rows.iter().map(match_from_row).collect()
    }
}

fn boundary_from_row(row: &PgRow) -> Result<LocodeBoundary> {
    let boundary = LocodeBoundary::new(
        decode::<String>(row, "locode")?,
        decode::<Option<String>>(row, "geometry")?.unwrap_or_default(),
    );

    Ok(boundary.with_stored_bbox(
        decode(row, "bbox_north")?,
        decode(row, "bbox_south")?,
        decode(row, "bbox_east")?,
        decode(row, "bbox_west")?,
    ))
}

fn match_from_row(row: &PgRow) -> Result<LocodeMatch> {
    Ok(LocodeMatch {
        locode: decode(row, "locode")?,
        name: decode(row, "name")?,
        display_name: decode(row, "display_name")?,
    })
}
