//! Niche vocabulary translation and candidate filtering.
//!
//! The UI works with English niche codes; the stored date table is tagged
//! with the Portuguese labels the records were seeded with. Translation maps
//! between the two, filtering narrows the candidate table to one selection.

use crate::date::CandidateDate;

/// UI niche codes mapped to the vocabulary used in stored date records.
const NICHE_LABELS: &[(&str, &str)] = &[
    ("fashion", "moda"),
    ("healthcare", "saúde"),
    ("beauty", "beleza"),
    ("food", "gastronomia"),
    ("education", "educação"),
    ("technology", "tecnologia"),
    ("finance", "finanças"),
    ("travel", "turismo"),
    ("sports", "esporte"),
    ("pets", "pets"),
    ("kids", "infantil"),
    ("home-decor", "decoração"),
];

/// Translate a UI niche code into the label used in stored records.
///
/// Falls back to lower-casing the code itself when no mapping exists, so the
/// function is total: any input produces a usable label.
pub fn translate(code: &str) -> String {
    let lowered = code.trim().to_lowercase();
    NICHE_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == lowered)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or(lowered)
}

/// Translate a whole selection, preserving order.
pub fn translate_all(codes: &[String]) -> Vec<String> {
    codes.iter().map(|code| translate(code)).collect()
}

/// Whether any of the candidate's niche tags contains one of the labels.
///
/// Substring containment rather than equality: "moda" matches "modas" and
/// "moda praia". This tolerates plural and compound tag forms at the cost of
/// occasional false positives for compound labels.
pub fn matches_any(candidate: &CandidateDate, labels: &[String]) -> bool {
    candidate.niches.iter().any(|tag| {
        let tag = tag.to_lowercase();
        labels.iter().any(|label| tag.contains(label.as_str()))
    })
}

/// Narrow the candidate list to dates tagged with one of the labels.
pub fn filter(candidates: &[CandidateDate], labels: &[String]) -> Vec<CandidateDate> {
    candidates
        .iter()
        .filter(|candidate| matches_any(candidate, labels))
        .cloned()
        .collect()
}
