use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use festplan::config::Config;
use festplan::error::PlanResult;
use std::process;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/performances.csv")]
    catalog: String,

    /// JSON planner config; flags typed on the command line still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Plan(cmd::plan::PlanArgs),
    Combos(cmd::combos::ComboArgs),
    Stats(cmd::stats::StatsArgs),
}

fn resolve_config(
    path: Option<&str>,
    cli_config: &Config,
    sub_matches: Option<&ArgMatches>,
) -> PlanResult<Config> {
    let Some(path) = path else {
        cli_config.validate()?;
        return Ok(cli_config.clone());
    };

    info!("⚖️  Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(cli_config, m);
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    // stdout is reserved for tables and --json output
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing festplan...");

    let result = match &cli.command {
        Commands::Plan(args) => resolve_config(
            cli.config.as_deref(),
            &args.config,
            matches.subcommand_matches("plan"),
        )
        .and_then(|config| cmd::plan::run(args, &config, &cli.catalog)),
        Commands::Combos(args) => cmd::combos::run(args, &cli.catalog),
        Commands::Stats(args) => cmd::stats::run(args, &cli.catalog),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
