//! Keyword-overlap retrieval for the chat endpoint.
//!
//! Deliberately naive: tokenize the latest user message, count token
//! occurrences in each paper's text, keep the best five. Good enough for a
//! showcase corpus of a few hundred papers; a production system would swap
//! in embeddings behind the same functions.

use citelens_common::models::{ChatFilters, Paper};

/// Papers rendered into the prompt context.
pub const MAX_CONTEXT_PAPERS: usize = 5;
/// Conversation turns forwarded to the completion API.
pub const MAX_HISTORY_TURNS: usize = 5;

/// Reply used when no completion credential is configured.
pub const DEMO_MODE_MESSAGE: &str =
    "I'm currently in demo mode. The chat assistant will be fully functional once the \
     completion API credentials are configured. However, I can still help you explore \
     the research papers through the other features of this site!";

/// Apply the optional year / venue / topic filters.
pub fn apply_filters(papers: Vec<Paper>, filters: Option<&ChatFilters>) -> Vec<Paper> {
    let Some(filters) = filters else {
        return papers;
    };

    papers
        .into_iter()
        .filter(|p| {
            if let Some([min, max]) = filters.year_range {
                if p.year < min || p.year > max {
                    return false;
                }
            }
            if let Some(venues) = &filters.venues {
                if !venues.is_empty() && !venues.contains(&p.venue) {
                    return false;
                }
            }
            if let Some(topics) = &filters.topics {
                if !topics.is_empty() && !topics.iter().any(|t| p.tags.contains(t)) {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn score(tokens: &[String], paper: &Paper) -> usize {
    let text = format!(
        "{} {} {}",
        paper.title,
        paper.abstract_text.as_deref().unwrap_or(""),
        paper.tags.join(" ")
    )
    .to_lowercase();
    tokens.iter().filter(|t| text.contains(t.as_str())).count()
}

/// Select the top-scoring papers for a query; papers scoring 0 never make
/// it into the context.
pub fn select_context(query: &str, papers: &[Paper]) -> Vec<Paper> {
    let tokens: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut scored: Vec<(usize, &Paper)> =
        papers.iter().map(|p| (score(&tokens, p), p)).collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_CONTEXT_PAPERS)
        .filter(|(s, _)| *s > 0)
        .map(|(_, p)| p.clone())
        .collect()
}

/// Render the selected papers into the textual context block.
pub fn render_context(papers: &[Paper]) -> String {
    if papers.is_empty() {
        return "No specific papers match the query, but I can provide general information \
                about the group's research."
            .to_string();
    }

    let entries: Vec<String> = papers
        .iter()
        .map(|p| {
            let abstract_line = p
                .abstract_text
                .as_deref()
                .map(|a| format!("  Abstract: {a}\n"))
                .unwrap_or_default();
            format!(
                "- \"{}\" ({}, {})\n  Authors: {}\n{}  Citations: {}\n  Keywords: {}",
                p.title,
                p.year,
                p.venue,
                p.authors.join(", "),
                abstract_line,
                p.citation_count,
                p.tags.join(", ")
            )
        })
        .collect();

    format!("Here are some relevant research papers:\n\n{}", entries.join("\n\n"))
}

/// Fixed system instruction with the retrieval context spliced in.
pub fn system_prompt(context: &str) -> String {
    format!(
        "You are a helpful research assistant for a research group specializing in \
         federated learning, decentralized AI, and privacy-preserving machine learning.\n\n\
         {context}\n\n\
         Use the above papers as context when answering questions. Be concise, accurate, \
         and cite specific papers when relevant. If you don't have enough information, say so."
    )
}
