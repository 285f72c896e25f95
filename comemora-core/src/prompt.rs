//! Prompt construction for the relevance-ranking request.
//!
//! Pure serialization: candidates become fixed-format text blocks embedded in
//! the user message; the system instruction pins the output shape. No side
//! effects here.

use crate::date::{CandidateDate, DATE_FORMAT};

/// Fixed system instruction constraining the model to strict JSON output.
pub const SYSTEM_INSTRUCTION: &str = "You are a marketing planner for small businesses. \
Given commemorative dates and the business niches they were filtered for, judge how \
relevant each date is for a marketing campaign in those niches. \
Respond with JSON only: an object {\"dates\": [...]} where each item is \
{\"date\": \"YYYY-MM-DD\", \"relevance\": \"high\"|\"medium\"|\"low\", \"reason\": \"...\"}. \
No prose outside the JSON.";

/// Serialize one candidate into its fixed-format text block.
pub fn candidate_block(candidate: &CandidateDate) -> String {
    format!(
        "Date: {}\nDescription: {}\nType: {}\nNiches: {}",
        candidate.date.format(DATE_FORMAT),
        candidate.description,
        candidate.kind.as_deref().unwrap_or("commemorative"),
        candidate.niches.join(", ")
    )
}

/// Serialize the filtered candidate list, blocks joined by blank lines.
pub fn candidate_blocks(candidates: &[CandidateDate]) -> String {
    candidates
        .iter()
        .map(candidate_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// User message for the first ranking attempt.
pub fn user_ranking(labels: &[String], blocks: &str) -> String {
    format!(
        r#"Rank the commemorative dates below by how relevant they are for marketing campaigns in these niches: {niches}.

DATES:
{blocks}

Return every date you consider worth a campaign, most relevant first."#,
        niches = labels.join(", "),
        blocks = blocks
    )
}

/// Augmented user message for retries after a structurally invalid response.
///
/// Spells out the schema again and names what was wrong with the previous
/// attempt.
pub fn user_ranking_strict(labels: &[String], blocks: &str, rejection: &str) -> String {
    format!(
        r#"Your previous answer was rejected: {rejection}.

Rank the commemorative dates below for marketing campaigns in these niches: {niches}.

DATES:
{blocks}

Respond with EXACTLY this JSON shape and nothing else:
{{"dates": [{{"date": "YYYY-MM-DD", "relevance": "high", "reason": "short justification"}}]}}

Rules:
- "date" must be one of the dates listed above, formatted YYYY-MM-DD.
- "relevance" must be exactly one of "high", "medium", "low".
- Include at least one item. No markdown, no commentary."#,
        rejection = rejection,
        niches = labels.join(", "),
        blocks = blocks
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_candidate() -> CandidateDate {
        CandidateDate {
            date: NaiveDate::from_ymd_opt(2025, 5, 11).unwrap(),
            description: "Dia das Mães".to_string(),
            kind: Some("holiday".to_string()),
            niches: vec!["moda".to_string(), "beleza".to_string()],
        }
    }

    #[test]
    fn block_contains_all_fields() {
        let block = candidate_block(&make_candidate());
        assert!(block.contains("Date: 2025-05-11"));
        assert!(block.contains("Description: Dia das Mães"));
        assert!(block.contains("Type: holiday"));
        assert!(block.contains("Niches: moda, beleza"));
    }

    #[test]
    fn block_defaults_missing_type() {
        let mut candidate = make_candidate();
        candidate.kind = None;
        assert!(candidate_block(&candidate).contains("Type: commemorative"));
    }

    #[test]
    fn blocks_joined_by_blank_line() {
        let candidates = vec![make_candidate(), make_candidate()];
        let blocks = candidate_blocks(&candidates);
        assert_eq!(blocks.matches("\n\n").count(), 1);
    }

    #[test]
    fn strict_prompt_names_the_rejection() {
        let strict = user_ranking_strict(&["moda".to_string()], "DATES", "the array was empty");
        assert!(strict.contains("the array was empty"));
        assert!(strict.contains(r#""relevance": "high""#));
    }
}
