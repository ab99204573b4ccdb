//! Configuration CLI commands

use clap::Subcommand;

use crate::config::paths::SpendPaths;
use crate::config::settings::Settings;
use crate::error::{SpendError, SpendResult};
use crate::models::Granularity;
use crate::storage::Storage;

/// Config subcommands; `config` alone prints the current configuration
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Change and save one or more settings
    Set {
        /// Name shown in report headers
        #[arg(long)]
        name: Option<String>,
        /// Currency symbol for amounts
        #[arg(long)]
        currency: Option<String>,
        /// strftime pattern for dates, e.g. "%d/%m/%Y"
        #[arg(long)]
        date_format: Option<String>,
        /// Default granularity for `stats`
        #[arg(long)]
        period: Option<Granularity>,
        /// Default number of top categories
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Handle the config command
pub fn handle_config_command(
    paths: &SpendPaths,
    settings: &mut Settings,
    storage: &Storage,
    cmd: Option<ConfigCommands>,
) -> SpendResult<()> {
    match cmd {
        None => print_config(paths, settings, storage),
        Some(ConfigCommands::Set {
            name,
            currency,
            date_format,
            period,
            top,
        }) => {
            if name.is_none()
                && currency.is_none()
                && date_format.is_none()
                && period.is_none()
                && top.is_none()
            {
                return Err(SpendError::Validation(
                    "Nothing to change; pass at least one setting".to_string(),
                ));
            }

            if let Some(name) = name {
                settings.display_name = name.trim().to_string();
            }
            if let Some(currency) = currency {
                settings.currency_symbol = currency.trim().to_string();
            }
            if let Some(pattern) = date_format {
                settings.set_date_format(&pattern)?;
            }
            if let Some(period) = period {
                settings.default_granularity = period;
            }
            if let Some(top) = top {
                if top == 0 {
                    return Err(SpendError::Validation(
                        "Top categories must be at least 1".to_string(),
                    ));
                }
                settings.top_categories = top;
            }

            settings.save(paths)?;
            println!("Saved settings to {}", paths.settings_file().display());
        }
    }

    Ok(())
}

fn print_config(paths: &SpendPaths, settings: &Settings, storage: &Storage) {
    println!("spendlog Configuration");
    println!("======================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Display name:        {}", settings.display_name);
    println!("  Currency symbol:     {}", settings.currency_symbol);
    println!("  Date format:         {}", settings.date_format);
    println!("  Default granularity: {}", settings.default_granularity);
    println!("  Top categories:      {}", settings.top_categories);
    println!();
    println!("Expenses: {}", storage.expenses.len());
    println!("Categories: {}", storage.categories.all().len());
    if storage.expenses.load_status().is_recovered()
        || storage.categories.load_status().is_recovered()
    {
        println!();
        println!("Warning: stored data could not be read and was reset on load.");
    }
}
