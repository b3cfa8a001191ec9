//! SQLite persistence layer for the photo vault.
//!
//! Provides schema creation, seed/insert operations, token validation,
//! hierarchical asset queries, and driver-level trace/profile diagnostics
//! backed by SQLite (via rusqlite with bundled feature).

pub mod auth;
pub mod browse;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod trace;

pub use auth::{validate_token, Session};
pub use browse::{browse_day, browse_month, browse_year, browse_years, BrowseReport};
pub use operations::{
    insert_asset, insert_device, insert_token, insert_user, seed_demo, NewAsset, OperationError,
};
pub use queries::{
    assets_by_day, day_digest, days_map, distinct_days, distinct_years, vault_stats, AssetRow,
    DaysMap, VaultStats,
};
pub use schema::{open_database, open_memory};
