use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No vault database found at {}", db_path.display());
        log::info!("Run 'photovault seed' to create one.");
        return Ok(());
    }

    let conn = photovault_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open vault database: {}", e)))?;

    let stats = photovault_db::vault_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query vault stats: {}", e)))?;

    log::info!(
        "{}",
        "Vault Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    log::info!("  Users:           {:>8}", stats.users);
    log::info!("  Devices:         {:>8}", stats.devices);
    log::info!("  Tokens:          {:>8}", stats.tokens);
    log::info!("  Assets:          {:>8}", stats.assets);
    log::info!("  Days w/ assets:  {:>8}", stats.days_with_assets);

    Ok(())
}
