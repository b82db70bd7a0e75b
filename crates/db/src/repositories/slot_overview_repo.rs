//! Read-only access to the `parking.vw_slot_overview` view.

use sqlx::PgPool;

use crate::models::slot_overview::{decode_row, SlotRow};

/// The overview query. Rows come back by zone name, then slot number.
const OVERVIEW_QUERY: &str =
    "SELECT * FROM parking.vw_slot_overview ORDER BY zone_name, slot_number";

/// Provides the slot overview read.
pub struct SlotOverviewRepo;

impl SlotOverviewRepo {
    /// Return the full contents of the overview view.
    ///
    /// No filtering or limits: every row is returned on every call. An empty
    /// view yields an empty vector.
    pub async fn get_overview(pool: &PgPool) -> Result<Vec<SlotRow>, sqlx::Error> {
        let rows = sqlx::query(OVERVIEW_QUERY).fetch_all(pool).await?;
        tracing::debug!(rows = rows.len(), "Fetched slot overview");
        rows.iter().map(decode_row).collect()
    }
}
