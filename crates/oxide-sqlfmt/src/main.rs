//! oxide-sqlfmt CLI
//!
//! Command-line tool for pretty-printing SQL SELECT statements.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use oxide_sqlfmt::{read_input, run, Config, OutputMode};
use oxide_sqlfmt_core::{FormatOptions, KeywordCase};

/// Aligned pretty-printer for SQL SELECT statements.
#[derive(Parser)]
#[command(name = "oxide-sqlfmt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to format (stdin if absent or `-`).
    input: Option<PathBuf>,

    /// Print keywords in upper case.
    #[arg(short, long, env = "SQLFMT_UPPERCASE")]
    uppercase: bool,

    /// Width at which GROUP BY and ORDER BY lists wrap.
    #[arg(short, long, env = "SQLFMT_WIDTH", default_value_t = 80)]
    width: usize,

    /// Print the parsed statement as JSON instead of SQL.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let keyword_case = if self.uppercase {
            KeywordCase::Upper
        } else {
            KeywordCase::Lower
        };
        Config {
            options: FormatOptions::new()
                .keyword_case(keyword_case)
                .max_line_width(self.width),
            output: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = read_input(cli.input.as_deref())?;
    let output = run(&sql, &cli.config())?;
    println!("{output}");

    Ok(())
}
