pub(crate) mod run;
pub(crate) mod seed;
pub(crate) mod stats;

use std::path::PathBuf;

pub(crate) fn default_db_path() -> PathBuf {
    PathBuf::from("vault.db")
}
