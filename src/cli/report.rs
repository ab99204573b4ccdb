//! Statistics CLI command

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::{SpendError, SpendResult};
use crate::models::Granularity;
use crate::reports::StatisticsReport;
use crate::storage::Storage;

use super::date_or_today;

/// Arguments for `stats`
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Bucket size: daily, weekly, monthly or yearly
    #[arg(short, long)]
    pub period: Option<Granularity>,

    /// Number of top categories to show
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub today: Option<String>,

    /// Also write the trend series as CSV to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the stats command
pub fn handle_stats_command(storage: &Storage, settings: &Settings, args: StatsArgs) -> SpendResult<()> {
    let granularity = args.period.unwrap_or(settings.default_granularity);
    let top_n = args.top.unwrap_or(settings.top_categories);
    let today = date_or_today(args.today.as_deref())?;

    let report = StatisticsReport::generate(storage, granularity, today, top_n);
    print!("{}", report.format_terminal(&settings.currency_symbol));

    if let Some(output) = args.output {
        let file = File::create(&output).map_err(|e| {
            SpendError::Export(format!("Failed to create file {}: {}", output.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("\nTrend exported to: {}", output.display());
    }

    Ok(())
}
