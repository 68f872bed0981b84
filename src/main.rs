use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod distance;
mod error;
mod extract;
mod filter;
mod model;
mod render;
mod split;
mod table;

use crate::{filter::Selection, model::TimeOfDay, table::Table};

#[derive(Debug, Parser)]
#[command(about = "Reshape GPS tracking CSV files and summarise filtered fixes")]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Copy a subset of columns into a new CSV file
    Extract {
        #[arg(default_value = "input.csv")]
        input: PathBuf,
        #[arg(default_value = "output.csv")]
        output: PathBuf,
        /// Column to keep, repeatable. Defaults to `extract.columns` from the config
        #[arg(long = "column")]
        columns: Vec<String>,
    },
    /// Split a `timestamp` column into `date` and `time`
    Split {
        #[arg(default_value = "input.csv")]
        input: PathBuf,
        #[arg(default_value = "output.csv")]
        output: PathBuf,
    },
    /// Print the values available for each filter as JSON
    Options { input: PathBuf },
    /// Print the total distance travelled by the selected fixes
    Distance {
        input: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Write the selected fixes as a GeoJSON feature collection
    Map {
        input: PathBuf,
        #[arg(default_value = "map.geojson")]
        output: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Dimensions left unset select every value present in the data.
#[derive(Debug, Args)]
struct FilterArgs {
    /// JSON selection file, used instead of the per-dimension flags
    #[arg(long, conflicts_with_all = ["month", "year", "day", "time_of_day"])]
    selection: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    month: Option<Vec<u32>>,
    #[arg(long, value_delimiter = ',')]
    year: Option<Vec<i32>>,
    #[arg(long, value_delimiter = ',')]
    day: Option<Vec<u32>>,
    #[arg(long, value_delimiter = ',')]
    time_of_day: Option<Vec<TimeOfDay>>,
}

impl FilterArgs {
    fn selection(self, table: &Table) -> Result<Selection> {
        if let Some(path) = self.selection {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read selection {}", path.display()))?;
            let selection = serde_json::from_str(&data).context("Failed to parse selection")?;
            return Ok(selection);
        }

        let mut selection = Selection::all(&table.options());
        if let Some(x) = self.month {
            selection.months = x.into_iter().collect();
        }
        if let Some(x) = self.year {
            selection.years = x.into_iter().collect();
        }
        if let Some(x) = self.day {
            selection.days = x.into_iter().collect();
        }
        if let Some(x) = self.time_of_day {
            selection.time_of_day = x.into_iter().collect();
        }
        Ok(selection)
    }
}

fn write_map(table: &Table, selection: &Selection, output: &Path) -> Result<usize> {
    let collection = render::map(table, selection);
    let data = serde_json::to_string(&collection)?;
    fs::write(output, data).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(collection.features.len())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = config::load_or_default(cli.config.as_deref(), Path::new("config.toml"))?;

    match cli.command {
        Command::Extract {
            input,
            output,
            columns,
        } => {
            let columns = if columns.is_empty() {
                config.extract.columns
            } else {
                columns
            };
            extract::run(&input, &output, &columns)?;
        }
        Command::Split { input, output } => split::run(&input, &output)?,
        Command::Options { input } => {
            let table = Table::load(&input, &config.formats)?;
            println!("{}", serde_json::to_string_pretty(&table.options())?);
        }
        Command::Distance {
            input,
            filters,
            json,
        } => {
            let table = Table::load(&input, &config.formats)?;
            let selection = filters.selection(&table)?;
            let summary = render::distance(&table, &selection);
            if json {
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                println!("{summary}");
            }
        }
        Command::Map {
            input,
            output,
            filters,
        } => {
            let table = Table::load(&input, &config.formats)?;
            let selection = filters.selection(&table)?;
            let count = write_map(&table, &selection, &output)?;
            info!(fixes = count, "wrote {}", output.display());
        }
    };

    Ok(())
}
