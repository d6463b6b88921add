//! Terminal front-end for the daily wisdom reader.
//!
//! # Responsibility
//! - Show today's article and navigate by article number.
//! - Print schedule status and run the offline page importer.
//!
//! Article numbers on the command line are 1-based.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daily_wisdom_core::config::parse_date;
use daily_wisdom_core::import::{default_page_order, import_directory, read_manifest};
use daily_wisdom_core::{
    init_stderr_logging, Clock, FixedClock, ReaderConfig, ReaderService, ReaderView, SystemClock,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "daily-wisdom", version, about = "One curated article per weekday")]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long, global = true, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,
    /// Override the schedule start date (YYYY-MM-DD).
    #[arg(long, global = true, value_parser = parse_date_arg)]
    start_date: Option<NaiveDate>,
    /// Bypass the unlock schedule.
    #[arg(long, global = true)]
    dev: bool,
    /// Catalog JSON document to read instead of the built-in one.
    #[arg(long, global = true)]
    articles: Option<PathBuf>,
    /// Print rendered HTML instead of markdown.
    #[arg(long, global = true)]
    html: bool,
    /// Log level for stderr diagnostics.
    #[arg(long, global = true, env = "DAILY_WISDOM_LOG_LEVEL", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the newest unlocked article (default).
    Today,
    /// Show article number N.
    Show { number: usize },
    /// Show the article after number N.
    Next { number: usize },
    /// Show the article before number N.
    Prev { number: usize },
    /// Print schedule status.
    Status,
    /// Convert saved article pages into a catalog document.
    Import {
        /// Directory containing .htm/.html pages.
        dir: PathBuf,
        /// Output JSON path.
        out: PathBuf,
        /// File listing page names in unlock order; defaults to the curated order.
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_stderr_logging(&cli.log_level)?;

    if let Some(Command::Import { dir, out, manifest }) = &cli.command {
        let names = match manifest {
            Some(path) => read_manifest(path)?,
            None => default_page_order(dir)?,
        };
        let catalog = import_directory(dir, names.as_slice())?;
        std::fs::write(out, catalog.to_json_string()?)?;
        println!("imported {} article(s) into {}", catalog.len(), out.display());
        return Ok(());
    }

    let mut config = ReaderConfig::from_env()?;
    if let Some(start_date) = cli.start_date {
        config.start_date = start_date;
    }
    if cli.dev {
        config.developer_mode = true;
    }
    if let Some(path) = &cli.articles {
        config.articles_path = Some(path.clone());
    }

    let clock: Box<dyn Clock> = match cli.date {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };
    let reader = ReaderService::from_config(&config, clock)?;

    let view = match cli.command.unwrap_or(Command::Today) {
        Command::Today => reader.open()?,
        Command::Show { number } => reader.view(to_index(number))?,
        Command::Next { number } => reader.next(to_index(number))?,
        Command::Prev { number } => reader.previous(to_index(number))?,
        Command::Status => {
            let status = reader.status();
            println!("today:      {}", status.today);
            println!("start date: {}", status.start_date);
            println!("unlocked:   {}/{}", status.available_count, status.total_count);
            match status.next_unlock_date {
                Some(date) => println!("next:       {date}"),
                None => println!("next:       all articles unlocked"),
            }
            if status.developer_mode {
                println!("developer mode: schedule bypassed");
            }
            return Ok(());
        }
        Command::Import { .. } => return Ok(()),
    };

    print_view(&view, cli.html);
    Ok(())
}

fn print_view(view: &ReaderView, html: bool) {
    println!(
        "[{}/{}] {}",
        view.index() + 1,
        view.total_count,
        view.article.title
    );
    println!("by {}", view.article.author);
    println!();
    if html {
        print!("{}", view.html);
    } else {
        println!("{}", view.article.content);
    }
    println!();

    let mut nav = Vec::new();
    if view.can_go_previous {
        nav.push(format!("prev: {}", view.index()));
    }
    if view.can_go_next {
        nav.push(format!("next: {}", view.index() + 2));
    }
    if !nav.is_empty() {
        println!("{}", nav.join("  "));
    }
    if let Some(message) = view.blocked_message() {
        println!("{message}");
    }
}

/// Converts a 1-based article number to an index; 0 is treated as 1.
fn to_index(number: usize) -> usize {
    number.saturating_sub(1)
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|_| format!("expected YYYY-MM-DD, got `{raw}`"))
}
