//! Keyword extraction — fixed-vocabulary topical tags for papers.
//!
//! Two variants: a trigger-group extraction over titles (used by the
//! transformer) and a broader flat-vocabulary extraction over
//! title + abstract. Both are deterministic, deduplicate in insertion
//! order and never fail.

use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_TITLE_TAGS: usize = 8;
pub const MAX_TEXT_TAGS: usize = 10;

/// Ordered trigger groups for title-only extraction: any listed substring
/// (matched against the lowercased title) yields the group's tag once.
const TITLE_TRIGGERS: &[(&[&str], &str)] = &[
    (&["federated", "federation"], "federated learning"),
    (&["blockchain"], "blockchain"),
    (&["privacy", "private"], "privacy"),
    (&["security", "secure"], "security"),
    (&["decentral"], "decentralized"),
    (&["attack", "poison", "malicious"], "adversarial"),
    (&["incentive", "game"], "incentive design"),
    (&["zero-knowledge", "zk"], "zero-knowledge proof"),
    (&["neural", "network"], "neural networks"),
    (&["aggregation", "aggregate"], "aggregation"),
    (&["gradient"], "gradient"),
    (&["ai", "artificial intelligence"], "artificial intelligence"),
    (&["llm", "language model"], "language models"),
    (&["vision", "image", "visual"], "computer vision"),
    (&["healthcare", "medical", "health"], "healthcare"),
    (&["survey", "review"], "survey"),
    (&["bittensor"], "Bittensor"),
];

/// Flat vocabulary for title+abstract extraction. Tags keep their curated
/// casing ("AI", "GAN", "NLP") even though matching is lowercased.
const TEXT_VOCABULARY: &[&str] = &[
    "federated learning",
    "decentralized",
    "blockchain",
    "privacy",
    "security",
    "machine learning",
    "deep learning",
    "artificial intelligence",
    "AI",
    "zero-knowledge",
    "proof",
    "differential privacy",
    "secure aggregation",
    "encryption",
    "privacy-preserving",
    "gradient",
    "aggregation",
    "poisoning",
    "malicious",
    "byzantine",
    "attack",
    "defense",
    "smart contract",
    "consensus",
    "distributed ledger",
    "neural network",
    "model",
    "training",
    "inference",
    "optimization",
    "convergence",
    "attention",
    "transformer",
    "recurrent",
    "graph",
    "GAN",
    "reinforcement learning",
    "healthcare",
    "medical",
    "image",
    "vision",
    "NLP",
    "language model",
    "LLM",
    "text-to-video",
    "multi-modal",
    "edge computing",
    "IoT",
    "heterogeneous",
    "asynchronous",
    "incentive",
    "mechanism design",
    "game theory",
    "supervised",
    "unsupervised",
    "semi-supervised",
    "transfer learning",
    "Bittensor",
    "cryptocurrency",
    "token",
];

lazy_static! {
    static ref TITLE_YEAR_RE: Regex = Regex::new(r"20\d{2}").unwrap();
}

fn push_unique(tags: &mut Vec<String>, tag: impl Into<String>) {
    let tag = tag.into();
    if !tags.iter().any(|t| *t == tag) {
        tags.push(tag);
    }
}

/// Extract up to [`MAX_TITLE_TAGS`] tags from a title alone.
///
/// Falls back to significant words (> 5 chars, leading uppercase) when no
/// trigger fires, so every paper gets at least a best-effort tag set.
pub fn extract_from_title(title: &str) -> Vec<String> {
    let lower = title.to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for (triggers, tag) in TITLE_TRIGGERS {
        if triggers.iter().any(|t| lower.contains(t)) {
            push_unique(&mut tags, *tag);
        }
    }

    if tags.is_empty() {
        for word in title.split_whitespace() {
            if word.len() > 5 && word.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                push_unique(&mut tags, word.to_lowercase());
            }
        }
    }

    tags.truncate(MAX_TITLE_TAGS);
    tags
}

/// Extract up to [`MAX_TEXT_TAGS`] tags from a title plus optional abstract.
pub fn extract_from_text(title: &str, abstract_text: Option<&str>) -> Vec<String> {
    let text = format!("{} {}", title, abstract_text.unwrap_or("")).to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for keyword in TEXT_VOCABULARY {
        if text.contains(&keyword.to_lowercase()) {
            push_unique(&mut tags, *keyword);
        }
    }

    // Venue acronyms mentioned anywhere in the text become conference tags.
    if text.contains("neurips") || text.contains("nips") {
        push_unique(&mut tags, "conference: NeurIPS");
    }
    if text.contains("icml") {
        push_unique(&mut tags, "conference: ICML");
    }
    if text.contains("iclr") {
        push_unique(&mut tags, "conference: ICLR");
    }
    if text.contains("cvpr") {
        push_unique(&mut tags, "conference: CVPR");
    }

    if let Some(m) = TITLE_YEAR_RE.find(title) {
        push_unique(&mut tags, format!("year: {}", m.as_str()));
    }

    if tags.is_empty() {
        if text.contains("learning") {
            push_unique(&mut tags, "machine learning");
        }
        if text.contains("network") {
            push_unique(&mut tags, "neural network");
        }
        if text.contains("model") {
            push_unique(&mut tags, "model");
        }
    }

    tags.truncate(MAX_TEXT_TAGS);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_federated_learning_always_tagged() {
        let tags = extract_from_title("Towards Federated Learning at Scale");
        assert!(tags.contains(&"federated learning".to_string()));
    }

    #[test]
    fn test_title_tags_bounded_and_unique() {
        let busy = "Secure Private Federated Blockchain Gradient Aggregation Attack \
                    Incentive Zero-Knowledge Neural Healthcare Vision Survey AI LLM";
        let tags = extract_from_title(busy);
        assert!(tags.len() <= MAX_TITLE_TAGS);
        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), tags.len(), "tags must be unique: {tags:?}");
    }

    #[test]
    fn test_title_fallback_uses_capitalized_words() {
        let tags = extract_from_title("Quantum Entanglement Experiments");
        assert_eq!(tags, vec!["quantum", "entanglement", "experiments"]);
    }

    #[test]
    fn test_text_tags_bounded_and_unique() {
        let title = "Federated Learning with Differential Privacy at NeurIPS 2023";
        let abstract_text = "We study secure aggregation, gradient attacks, byzantine \
                             defense, blockchain consensus, transformer models and more.";
        let tags = extract_from_text(title, Some(abstract_text));
        assert!(tags.len() <= MAX_TEXT_TAGS);
        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), tags.len());
    }

    #[test]
    fn test_text_extraction_derives_conference_and_year_tags() {
        let tags = extract_from_text("Poster session at ICLR 2024", None);
        assert!(tags.contains(&"conference: ICLR".to_string()));
        assert!(tags.contains(&"year: 2024".to_string()));
    }

    #[test]
    fn test_text_generic_fallback() {
        let tags = extract_from_text("On learning from few examples", None);
        assert_eq!(tags, vec!["machine learning"]);
    }

    #[test]
    fn test_deterministic() {
        let a = extract_from_title("Private Blockchain Incentives");
        let b = extract_from_title("Private Blockchain Incentives");
        assert_eq!(a, b);
    }
}
