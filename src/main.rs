use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fm_scout::config::Config;
use fm_scout::pipeline::ScoringSetup;
use fm_scout::registry::Position;
use fm_scout::scoring::{ScoreKey, ScoredRecord};
use fm_scout::table::InputError;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the sortable HTML report
    Report {
        /// HTML export with the players table
        input: PathBuf,

        /// Where to write the report
        #[arg(short, long, default_value = "scouting.html")]
        output: PathBuf,

        /// Open the report in the default browser once written
        #[arg(long)]
        open: bool,
    },
    /// Print players ranked by one score
    List {
        /// HTML export with the players table
        input: PathBuf,

        /// Position code (e.g. BPD, CF) or "current"
        #[arg(long, default_value = "BPD")]
        by: ScoreKey,

        /// Only show the first N players
        #[arg(long)]
        top: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show how a player's scores are made up
    Explain {
        /// HTML export with the players table
        input: PathBuf,

        /// Player name (exact match, otherwise substring; case-insensitive)
        name: String,

        /// Only explain this position
        #[arg(long)]
        position: Option<Position>,
    },
    /// Write the built-in attributes and weights to an editable config file
    Init {
        /// Config path (defaults to ~/.config/fm-scout/config.yaml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fm-scout")]
#[command(about = "Score scouted players for every position", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fm-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Score Current_Score with this position's table only
    #[arg(long, global = true)]
    general_weighting: Option<Position>,

    /// Fail when a weight table names an attribute the catalog lacks
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

fn input_exit_code(err: &InputError) -> i32 {
    match err {
        InputError::Io { .. } => EXIT_IO,
        _ => EXIT_INPUT,
    }
}

/// Load the config and validate scoring, exiting on any problem.
fn prepare(cli: &Cli) -> (Config, ScoringSetup) {
    let config = match fm_scout::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    match fm_scout::pipeline::setup_scoring(&effective_scoring, cli.general_weighting, cli.strict) {
        Ok(setup) => (config, setup),
        Err(errors) => {
            eprintln!("Scoring config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn load_players(input: &Path, setup: &ScoringSetup) -> Vec<ScoredRecord> {
    match fm_scout::pipeline::load_and_score(input, setup) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Input error: {}", e);
            std::process::exit(input_exit_code(&e));
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    if let Err(e) = fm_scout::logging::init_tracing(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    match &cli.command {
        Commands::Init { path, force } => {
            match fm_scout::config::init::run_init(path.clone(), *force) {
                Ok(Some(written)) => println!("Wrote config to {}", written.display()),
                Ok(None) => println!("Left existing config unchanged."),
                Err(e) => {
                    eprintln!("Failed to write config: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
        Commands::Report {
            input,
            output,
            open,
        } => {
            let (config, setup) = prepare(&cli);
            let rows = load_players(input, &setup);
            let count = rows.len();
            let document = fm_scout::report::assemble(rows, config.title());

            if let Err(e) = fm_scout::report::write_report(output, &document) {
                eprintln!("{:#}", e);
                std::process::exit(EXIT_IO);
            }
            println!("Wrote report for {} players to {}", count, output.display());

            if *open {
                if let Err(e) = fm_scout::browser::open_report(output) {
                    eprintln!("Failed to open browser: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
        Commands::List {
            input,
            by,
            top,
            format,
        } => {
            let (_, setup) = prepare(&cli);
            let mut rows = load_players(input, &setup);
            fm_scout::scoring::sort_descending(&mut rows, *by);
            let limit = top.unwrap_or(rows.len());
            let ranked: Vec<&ScoredRecord> = rows.iter().take(limit).collect();

            let output = match format {
                OutputFormat::Table => fm_scout::output::format_ranked_table(
                    &ranked,
                    *by,
                    fm_scout::output::should_use_colors(),
                ),
                OutputFormat::Tsv => fm_scout::output::format_tsv(&ranked, *by),
                OutputFormat::Json => fm_scout::output::format_json(&ranked),
            };
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Explain {
            input,
            name,
            position,
        } => {
            let (_, setup) = prepare(&cli);
            let rows = load_players(input, &setup);
            let matches = fm_scout::pipeline::find_players(&rows, name);
            if matches.is_empty() {
                eprintln!("No player matching '{}'", name);
                std::process::exit(EXIT_INPUT);
            }

            let use_colors = fm_scout::output::should_use_colors();
            let positions: Vec<Position> = match position {
                Some(p) => vec![*p],
                None => Position::ALL.to_vec(),
            };
            for scored in matches {
                for p in &positions {
                    let explained =
                        fm_scout::scoring::explain_position(&scored.record, *p, &setup.registry);
                    println!(
                        "{}",
                        fm_scout::output::format_breakdown(
                            scored.record.name(),
                            &explained,
                            use_colors
                        )
                    );
                }
                println!(
                    "{} Current_Score: {} ({})",
                    scored.record.name(),
                    fm_scout::output::format_score(scored.value(ScoreKey::Current)),
                    setup.weighting
                );
                println!();
            }
        }
    }

    tracing::debug!("done in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
