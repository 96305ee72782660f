//! Content density analysis of extracted markdown

use crate::report::ContentReport;
use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s").expect("heading regex is valid"));

static HEADING_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s.*$").expect("heading line regex is valid"));

static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s").expect("list regex is valid"));

/// Chunks in this word range are the right size for retrieval
const SWEET_SPOT: std::ops::RangeInclusive<usize> = 50..=150;

/// Splits markdown on heading lines and measures the sections
///
/// Returns `(chunk_count, avg_chunk_words, chunks_in_sweet_spot)`.
fn analyze_chunks(markdown: &str) -> (usize, usize, usize) {
    let chunk_words: Vec<usize> = HEADING_LINE_RE
        .split(markdown)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| chunk.split_whitespace().count())
        .collect();

    if chunk_words.is_empty() {
        return (0, 0, 0);
    }

    let avg = chunk_words.iter().sum::<usize>() / chunk_words.len();
    let sweet = chunk_words.iter().filter(|w| SWEET_SPOT.contains(w)).count();
    (chunk_words.len(), avg, sweet)
}

/// Analyzes markdown content density
pub fn analyze_content(markdown: &str) -> ContentReport {
    if markdown.is_empty() {
        return ContentReport::with_detail("No content extracted");
    }

    let word_count = markdown.split_whitespace().count();
    let has_headings = HEADING_RE.is_match(markdown);
    let has_lists = LIST_RE.is_match(markdown);
    let has_code_blocks = markdown.contains("```");
    let (chunk_count, avg_chunk_words, chunks_in_sweet_spot) = analyze_chunks(markdown);

    let mut detail = format!("{} words", word_count);
    if has_headings {
        detail.push_str(", has headings");
    }
    if has_lists {
        detail.push_str(", has lists");
    }
    if has_code_blocks {
        detail.push_str(", has code blocks");
    }

    ContentReport {
        word_count,
        char_count: markdown.chars().count(),
        has_headings,
        has_lists,
        has_code_blocks,
        chunk_count,
        avg_chunk_words,
        chunks_in_sweet_spot,
        detail,
        ..ContentReport::default()
    }
}
