mod config;

use config::Config;

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use colored::{control::set_override, Colorize};
use datespeak_core::{DateNormalizer, NormalizerConfig, OutputMode, Processor};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LONG_ABOUT: &str = r##"
Datespeak shows how a written date is tagged and spoken.

Give it a date span and it prints the words a speech synthesizer should say.
Use --tag to see the structured record in between, or --verbalize to render a
record you wrote by hand.

SUPPORTED INPUTS:
  Month first:   jan. 5, 2012   January 5   jan-5-2012   01/05/2012
  Day first:     5 january 2012   the 3rd march   13.05.12
  Year first:    2012-01-05   2012/01/05   2012.01.05
  Years:         1984   2005   1920s   '70s   123 A.D.   4200 B.C.
  Periods:       1H23   3Q22
  Month/day:     05/06 (multi mode only)

EXAMPLES:
  datespeak "jan. 5, 2012"             january fifth twenty twelve
  datespeak --tag 2012-01-05           date { month: "january" ... }
  datespeak --multi 2005               every reading, one per line
  datespeak --verbalize 'date { day: "five" month: "may" }'
  cat dates.txt | datespeak --json     one JSON object per line

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting   | CLI flag        | Env var             | Default
  ----------|-----------------|---------------------|---------
  mode      | -m, --multi     | DATESPEAK_MODE      | single
  tables    | --tables        | DATESPEAK_TABLES    | built-in
  no_color  | -C, --no-color  | DATESPEAK_NO_COLOR  | false

  Config file location: datespeak --config-path
  Generate default config: datespeak --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "datespeak")]
#[command(version)]
#[command(about = "Turn written dates into the words a speaker would say")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The date span to normalize (reads lines from stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Print tagged records instead of spoken text
    #[arg(long, short = 't', conflicts_with = "verbalize")]
    tag: bool,

    /// Treat the input as a `date { ... }` record and render it
    #[arg(long)]
    verbalize: bool,

    /// Produce every valid reading instead of the single canonical one
    #[arg(long, short = 'm')]
    multi: bool,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Load table files from this directory instead of the built-in tables
    #[arg(long, value_name = "DIR")]
    tables: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Describe the normalizer and list example inputs
    #[arg(long)]
    info: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why something was or wasn't matched.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

fn print_info(normalizer: &DateNormalizer) {
    let info = normalizer.info();
    println!("{} {}", info.name.bold().underline(), format!("({})", info.id).dimmed());
    println!("  {}", info.description);
    println!("  mode: {}", normalizer.mode().to_string().yellow());
    println!();
    for example in info.examples {
        let spoken = normalizer.normalize_one(example).unwrap_or_default();
        println!("  {} {} {}", example.green(), "→".cyan(), spoken);
    }
}

/// Process one input line. Returns whether anything was produced.
fn process(normalizer: &DateNormalizer, cli: &Cli, input: &str, show_input: bool) -> bool {
    if cli.verbalize {
        return match normalizer.verbalize_str(input) {
            Ok(spoken) => {
                if cli.json {
                    let value = serde_json::json!({ "input": input, "spoken": spoken });
                    println!("{}", value);
                } else {
                    print_spoken(input, &spoken, show_input);
                }
                !spoken.is_empty()
            }
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                false
            }
        };
    }

    let result = normalizer.analyze(input);
    tracing::debug!(
        "{:?}: {} record(s), {} rendering(s)",
        input,
        result.records.len(),
        result.spoken.len()
    );

    if cli.json {
        match serde_json::to_string(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
        }
    } else if cli.tag {
        if show_input {
            println!("{}", input.bold());
        }
        for record in &result.records {
            println!("{}", record.to_string().cyan());
        }
    } else {
        print_spoken(input, &result.spoken, show_input);
    }

    if cli.tag {
        !result.records.is_empty()
    } else {
        !result.spoken.is_empty()
    }
}

fn print_spoken(input: &str, spoken: &[String], show_input: bool) {
    if show_input {
        match spoken.first() {
            Some(best) => println!("{} {} {}", input.bold(), "→".cyan(), best),
            None => println!("{} {} {}", input.bold(), "→".cyan(), "(not a date)".dimmed()),
        }
        for alternative in spoken.iter().skip(1) {
            println!("  {} {}", "≈".dimmed(), alternative);
        }
        return;
    }
    for (i, text) in spoken.iter().enumerate() {
        if i == 0 {
            println!("{}", text);
        } else {
            println!("{}", text.dimmed());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        return match Config::path() {
            Some(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            None => {
                eprintln!(
                    "{}: Cannot determine config directory",
                    "error".red().bold()
                );
                ExitCode::FAILURE
            }
        };
    }

    // Handle --config-init
    if cli.config_init {
        return match config::init_config() {
            Ok(path) => {
                println!("Created config file: {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                ExitCode::FAILURE
            }
        };
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let mode = if cli.multi {
        tracing::debug!("mode = multi (from CLI)");
        OutputMode::Multi
    } else {
        let m = file_config.mode();
        let source = if std::env::var("DATESPEAK_MODE").is_ok() {
            "env DATESPEAK_MODE"
        } else if file_config.mode.is_some() {
            "config file"
        } else {
            "default"
        };
        tracing::debug!("mode = {} (from {})", m, source);
        m
    };

    let tables_dir = cli.tables.clone().or_else(|| file_config.tables());
    if let Some(dir) = &tables_dir {
        tracing::debug!("tables = {}", dir.display());
    }

    if cli.no_color || file_config.no_color() {
        set_override(false);
    }

    let normalizer = match DateNormalizer::with_config(&NormalizerConfig { mode, tables_dir }) {
        Ok(normalizer) => normalizer,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    if cli.info {
        print_info(&normalizer);
        return ExitCode::SUCCESS;
    }

    let mut produced = false;
    match &cli.input {
        Some(input) => {
            produced = process(&normalizer, &cli, input.trim(), false);
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!(
                    "{}: no input given (pass a date or pipe lines on stdin, see --help)",
                    "error".red().bold()
                );
                return ExitCode::FAILURE;
            }
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        eprintln!("{}: {}", "error".red().bold(), e);
                        return ExitCode::FAILURE;
                    }
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                produced |= process(&normalizer, &cli, line, true);
            }
        }
    }

    if produced {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
