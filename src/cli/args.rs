//! Command line argument parsing for the Prashna CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::search::request::DEFAULT_PAGE_SIZE;
use crate::search::suggest::DEFAULT_SUGGESTION_LIMIT;

/// Prashna - hybrid search over exam question banks
#[derive(Parser, Debug, Clone)]
#[command(name = "prashna")]
#[command(about = "Hybrid semantic + lexical search over exam question banks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PrashnaArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Question bank file (JSON array of question drafts)
    #[arg(short, long, global = true, env = "PRASHNA_DATA")]
    pub data: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PrashnaArgs {
    /// Effective verbosity: 0 quiet, 1 normal, 2 info, 3+ debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose + 1 }
    }
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate and import a question file, reporting counts
    Import(ImportArgs),

    /// Search the question bank
    Search(SearchArgs),

    /// Autocomplete suggestions for a partial query
    Suggest(SuggestArgs),

    /// Show available filter options
    Filters,

    /// Show question bank statistics
    Stats,
}

/// Arguments for importing questions
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// Question file (JSON array of question drafts)
    #[arg(value_name = "QUESTION_FILE")]
    pub question_file: PathBuf,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Search query (omit for browse mode)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Filter by exam year
    #[arg(long)]
    pub year: Option<i32>,

    /// Filter by multiple years (comma-separated, e.g. "2008,2015")
    #[arg(long)]
    pub years: Option<String>,

    /// Filter by subject (case-insensitive substring)
    #[arg(long)]
    pub subject: Option<String>,

    /// Filter by question type (MCQ or NAT)
    #[arg(long = "type")]
    pub question_type: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Results per page (1-100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

/// Arguments for suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Partial query (at least 2 characters)
    #[arg(value_name = "PARTIAL_QUERY")]
    pub partial_query: String,

    /// Maximum suggestions (1-20)
    #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity() {
        let args = PrashnaArgs::parse_from(["prashna", "stats"]);
        assert_eq!(args.verbosity(), 1);

        let args = PrashnaArgs::parse_from(["prashna", "-vv", "stats"]);
        assert_eq!(args.verbosity(), 3);

        let args = PrashnaArgs::parse_from(["prashna", "--quiet", "-v", "stats"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_search_args_parsing() {
        let args = PrashnaArgs::parse_from([
            "prashna",
            "search",
            "lift coefficient",
            "--year",
            "2008",
            "--page-size",
            "10",
        ]);

        match args.command {
            Command::Search(search) => {
                assert_eq!(search.query, "lift coefficient");
                assert_eq!(search.year, Some(2008));
                assert_eq!(search.page, 1);
                assert_eq!(search.page_size, 10);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_browse_mode_default_query() {
        let args = PrashnaArgs::parse_from(["prashna", "search"]);
        match args.command {
            Command::Search(search) => assert!(search.query.is_empty()),
            _ => panic!("expected search command"),
        }
    }
}
