use std::path::Path;

use crate::CliError;

pub(crate) fn run_seed(db_path: &Path) -> Result<(), CliError> {
    if db_path.exists() {
        return Err(CliError::other(format!(
            "Refusing to overwrite existing database at {}",
            db_path.display()
        )));
    }

    let conn = photovault_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to create vault database: {}", e)))?;

    photovault_db::seed_demo(&conn)
        .map_err(|e| CliError::database(format!("Failed to seed demo data: {}", e)))?;

    let stats = photovault_db::vault_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query vault stats: {}", e)))?;

    log::info!(
        "Seeded demo vault at {} ({} users, {} assets)",
        db_path.display(),
        stats.users,
        stats.assets,
    );

    Ok(())
}
