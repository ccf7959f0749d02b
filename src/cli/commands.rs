//! Command implementations for the Prashna CLI.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::cli::args::{Command, OutputFormat, PrashnaArgs, SearchArgs, SuggestArgs};
use crate::embedding::HashingEmbedder;
use crate::engine::QuestionBankEngine;
use crate::error::{PrashnaError, Result};
use crate::question::QuestionDraft;
use crate::search::request::{SearchFilters, SearchRequest, parse_years_param};
use crate::store::MemoryQuestionStore;

/// Execute a CLI command.
pub async fn execute_command(args: PrashnaArgs) -> Result<()> {
    match &args.command {
        Command::Import(import_args) => {
            let engine = build_engine()?;
            let drafts = load_drafts(&import_args.question_file)?;
            let report = engine.bulk_import(drafts).await?;
            output_result(&report, &args, |report| {
                format!(
                    "Imported {} questions ({} skipped), {} total",
                    report.imported, report.skipped, report.total_in_store
                )
            })
        }
        Command::Search(search_args) => {
            let engine = load_engine(&args).await?;
            let request = build_search_request(search_args);
            let page = engine.search(request).await?;
            output_result(&page, &args, |page| {
                let mut lines = vec![format!(
                    "{} results (page {} of {})",
                    page.total,
                    page.page,
                    page.total.div_ceil(page.page_size).max(1)
                )];
                for question in &page.questions {
                    lines.push(format!(
                        "  [{}] {} {} ({}): {}",
                        question.external_id,
                        question.year,
                        question.question_type,
                        question.difficulty_level,
                        question.question_text
                    ));
                }
                lines.join("\n")
            })
        }
        Command::Suggest(suggest_args) => {
            let engine = load_engine(&args).await?;
            let SuggestArgs {
                partial_query,
                limit,
            } = suggest_args;
            let suggestions = engine.suggest(partial_query, *limit);
            output_result(&suggestions, &args, |suggestions| {
                if suggestions.is_empty() {
                    "No suggestions".to_string()
                } else {
                    suggestions.join("\n")
                }
            })
        }
        Command::Filters => {
            let engine = load_engine(&args).await?;
            let options = engine.filter_options();
            output_result(&options, &args, |options| {
                format!(
                    "Years: {:?}\nSubjects: {:?}\nQuestion types: {:?}",
                    options.years, options.subjects, options.question_types
                )
            })
        }
        Command::Stats => {
            let engine = load_engine(&args).await?;
            let stats = Stats {
                total_questions: engine.count(),
                year_counts: engine.year_counts(),
            };
            output_result(&stats, &args, |stats| {
                let mut lines = vec![format!("{} questions", stats.total_questions)];
                for entry in &stats.year_counts {
                    lines.push(format!("  {}: {}", entry.year, entry.count));
                }
                lines.join("\n")
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct Stats {
    total_questions: usize,
    year_counts: Vec<crate::search::facets::YearCount>,
}

/// Load question drafts from a JSON file (an array of drafts).
pub fn load_drafts(path: &Path) -> Result<Vec<QuestionDraft>> {
    let file = File::open(path)?;
    let drafts: Vec<QuestionDraft> = serde_json::from_reader(BufReader::new(file))?;
    Ok(drafts)
}

/// Build an engine with the deterministic offline embedder.
fn build_engine() -> Result<QuestionBankEngine> {
    QuestionBankEngine::new(
        Arc::new(MemoryQuestionStore::new()),
        Arc::new(HashingEmbedder::new()),
    )
}

/// Build an engine and ingest the question bank named by `--data`.
async fn load_engine(args: &PrashnaArgs) -> Result<QuestionBankEngine> {
    let data = args.data.as_ref().ok_or_else(|| {
        PrashnaError::query("no question bank given; pass --data <questions.json>")
    })?;
    let engine = build_engine()?;
    engine.bulk_import(load_drafts(data)?).await?;
    Ok(engine)
}

fn build_search_request(args: &SearchArgs) -> SearchRequest {
    let filters = SearchFilters {
        year: args.year,
        years: args.years.as_deref().and_then(parse_years_param),
        subject: args.subject.clone(),
        question_type: args.question_type.clone(),
        ..Default::default()
    };

    SearchRequest::new()
        .with_query(args.query.clone())
        .with_filters(filters)
        .page(args.page)
        .page_size(args.page_size)
}

fn output_result<T, F>(value: &T, args: &PrashnaArgs, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match args.output_format {
        OutputFormat::Json => {
            let rendered = if args.pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{rendered}");
        }
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{}", human(value));
            }
        }
    }
    Ok(())
}
