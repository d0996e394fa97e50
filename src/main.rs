//! gridfit - Entry Point

use clap::Parser;
use gridfit::config::KeyBindings;
use gridfit::model::AppError;
use gridfit::sizing::{AutoColumnSize, MonospaceMeasurer, PassOutcome, ViewportMode};
use gridfit::view::constants::DEFAULT_PRINT_WIDTH_CELLS;
use gridfit::view::TableHost;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// gridfit - view a JSON dataset as a table with auto-sized columns
#[derive(Parser, Debug)]
#[command(name = "gridfit")]
#[command(version)]
#[command(about = "Terminal table viewer with automatic column widths")]
pub struct Args {
    /// Dataset file: a JSON array of objects (.json) or JSONL
    pub file: PathBuf,

    /// Viewport mode: Independent, FitColsToViewport or FitViewportToCols
    #[arg(short, long)]
    pub mode: Option<ViewportMode>,

    /// Viewport width in terminal cells (defaults to the terminal width)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Print the resolved widths and exit instead of starting the viewer
    #[arg(long)]
    pub print: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = gridfit::config::load_config_with_precedence(args.config.clone())?;
        let merged = gridfit::config::merge_config(config_file);
        let with_env = gridfit::config::apply_env_overrides(merged);
        gridfit::config::apply_cli_overrides(with_env, args.mode, args.width)
    };

    gridfit::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let loaded = gridfit::source::load_dataset(&args.file)?;
    info!(
        rows = loaded.rows.len(),
        fields = loaded.fields.len(),
        "Dataset loaded"
    );

    let mut columns = loaded.columns();
    config.configure_columns(&mut columns);

    let mut plugin = AutoColumnSize::new(config.plugin.clone(), MonospaceMeasurer::terminal_cells());

    if args.print {
        let width = config
            .viewport_width_cells
            .unwrap_or(DEFAULT_PRINT_WIDTH_CELLS);
        let mut host = TableHost::new(columns, loaded.rows, width);
        if let PassOutcome::Skipped(reason) = plugin.resize_all_columns(&mut host) {
            warn!(reason = ?reason, "Resize pass skipped, printing current widths");
        }
        std::io::stdout().write_all(host.width_listing().as_bytes())?;
        return Ok(());
    }

    let host = TableHost::new(
        columns,
        loaded.rows,
        config.viewport_width_cells.unwrap_or(0),
    );
    gridfit::view::run_with_host(
        host,
        plugin,
        KeyBindings::default(),
        config.viewport_width_cells.is_some(),
    )?;

    Ok(())
}
