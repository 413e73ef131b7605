use anyhow::{bail, Context, Result};
use clap::Parser;
use engine::{paginate, DocId, DocumentStatus, RequestQueue, SearchEngine, SearchHit};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use unicode_normalization::UnicodeNormalization;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct DocRecord {
    id: DocId,
    text: String,
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Query an in-memory TF-IDF document index", long_about = None)]
struct Args {
    /// JSONL corpus, one document per line: {"id", "text", "status", "ratings"}
    #[arg(long)]
    documents: Option<PathBuf>,
    /// Space-separated words excluded from indexing and queries
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Status plain-line searches filter on
    #[arg(long, default_value = "actual")]
    status: String,
    /// Results per printed page; 0 disables paging
    #[arg(long, default_value_t = 5)]
    page_size: usize,
    /// Print search results as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let status = parse_status(&args.status)?;
    let stop_words: String = args.stop_words.nfc().collect();

    let mut engine = SearchEngine::new(&stop_words)?;
    if let Some(path) = &args.documents {
        let loaded = load_documents(&mut engine, path)?;
        tracing::info!(documents = loaded, "corpus indexed");
    }

    let mut queue = RequestQueue::new(&engine);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line: String = line?.nfc().collect();
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == ":quit" {
            break;
        }
        if let Err(err) = handle_line(line, &engine, &mut queue, status, &args) {
            eprintln!("error: {err}");
        }
    }
    Ok(())
}

fn handle_line(
    line: &str,
    engine: &SearchEngine,
    queue: &mut RequestQueue,
    status: DocumentStatus,
    args: &Args,
) -> Result<()> {
    if line == ":count" {
        println!("{}", engine.document_count());
        return Ok(());
    }
    if line == ":queue" {
        println!("empty-result requests in window: {}", queue.no_result_requests());
        for query in queue.recent_empty_queries() {
            println!("  {query}");
        }
        return Ok(());
    }
    if let Some(rest) = line.strip_prefix(":match ") {
        let (id_text, query) = rest
            .split_once(' ')
            .context("usage: :match <id> <query>")?;
        let id: DocId = id_text.parse().context("document id must be an integer")?;
        let (words, doc_status) = engine.match_document(query, id)?;
        println!(
            "{{ document_id = {id}, status = {doc_status:?}, words = [{}] }}",
            words.join(", ")
        );
        return Ok(());
    }
    if line.starts_with(':') {
        bail!("unknown command {line:?}");
    }
    let hits = queue.add_find_request_by_status(line, status)?;
    print_hits(&hits, args.page_size, args.json)
}

fn print_hits(hits: &[SearchHit], page_size: usize, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("no matching documents");
        return Ok(());
    }
    if page_size == 0 {
        for hit in hits {
            println!("{hit}");
        }
        return Ok(());
    }
    for (page_no, page) in paginate(hits, page_size).iter().enumerate() {
        if page_no > 0 {
            println!("-- page break --");
        }
        for hit in *page {
            println!("{hit}");
        }
    }
    Ok(())
}

fn load_documents(engine: &mut SearchEngine, path: &Path) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut loaded = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: DocRecord = serde_json::from_str(&line)
            .with_context(|| format!("malformed document record: {line}"))?;
        let text: String = record.text.nfc().collect();
        engine.add_document(record.id, &text, record.status, &record.ratings)?;
        loaded += 1;
    }
    Ok(loaded)
}

fn parse_status(name: &str) -> Result<DocumentStatus> {
    match name {
        "actual" => Ok(DocumentStatus::Actual),
        "irrelevant" => Ok(DocumentStatus::Irrelevant),
        "banned" => Ok(DocumentStatus::Banned),
        "removed" => Ok(DocumentStatus::Removed),
        other => bail!("unknown status {other:?}"),
    }
}
