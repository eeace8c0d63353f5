use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use jsonql::query::executor::engine::{execute, ExecutionEngine};
use jsonql::query::executor::result::QueryResultSet;
use jsonql::query::parser::parse;

#[derive(Parser)]
#[command(author, version, about = "jql - run SELECT queries against a JSON dataset")]
struct Cli {
    /// Path to a JSON file holding an array of objects
    data_path: PathBuf,

    /// Output format for query results
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Shell history file
    #[arg(long, default_value = ".jql_history")]
    history_file: PathBuf,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Execute a single query and print the result
    Query {
        /// SQL query to execute
        query: String,
    },

    /// Show dataset information
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

/// Writes log records to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(level_for(verbose));
    Ok(())
}

fn render(result: &QueryResultSet, format: Format) -> Result<String> {
    match format {
        Format::Table => Ok(result.to_string_table()),
        Format::Json => Ok(result.to_json()?),
    }
}

/// Parse and run one shell query, reporting each phase's timing
fn run_timed(engine: &ExecutionEngine, sql: &str, format: Format) {
    let start = Instant::now();
    let query = match parse(sql) {
        Ok(query) => query,
        Err(err) => {
            println!("Failed to parse query: {}", err);
            return;
        }
    };
    println!("Query parsed in {:.3} seconds...", start.elapsed().as_secs_f64());

    let start = Instant::now();
    let rows = match execute(engine.rows(), &query) {
        Ok(rows) => rows,
        Err(err) => {
            println!("Failed to execute query: {}", err);
            return;
        }
    };
    println!("Query executed in {:.3} seconds...", start.elapsed().as_secs_f64());

    let result = QueryResultSet::from_rows(&query.projection, rows);
    match render(&result, format) {
        Ok(output) => println!("{}", output),
        Err(err) => println!("Failed to display result: {}", err),
    }
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "0" | "exit" | "quit")
}

fn run_shell(engine: &ExecutionEngine, format: Format, history_file: &Path) -> Result<()> {
    println!("Table of size {} created.", engine.row_count());
    println!("Enter the SQL query or 0 to exit.");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if history_file.exists() {
        if let Err(err) = rl.load_history(history_file) {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        match rl.readline("jql> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if is_exit_command(line) {
                    println!("Goodbye!");
                    break;
                }
                run_timed(engine, line, format);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(history_file) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_info(engine: &ExecutionEngine, cli: &Cli) {
    let mut columns: Vec<&String> = Vec::new();
    for row in engine.rows() {
        for column in row.columns() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    println!("Dataset Information:");
    println!("  File: {}", cli.data_path.display());
    println!("  Rows: {}", engine.row_count());
    println!(
        "  Columns: {}",
        columns.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let engine = ExecutionEngine::from_json_file(&cli.data_path)
        .with_context(|| format!("Failed to load dataset from {}", cli.data_path.display()))?;

    match &cli.command {
        Some(Commands::Query { query }) => {
            let result = engine
                .execute_query(query)
                .with_context(|| format!("Failed to run query: {}", query))?;
            println!("{}", render(&result, cli.format)?);
        }
        Some(Commands::Info) => print_info(&engine, &cli),
        Some(Commands::Shell) | None => run_shell(&engine, cli.format, &cli.history_file)?,
    }

    Ok(())
}
