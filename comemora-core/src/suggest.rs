//! The date-relevance pipeline.
//!
//! Candidate table → niche translation and filtering → prompt → model
//! ranking → reconciliation. Every stage is awaited sequentially; there is no
//! fan-out and no partial result; a stage failure fails the invocation.

use tracing::{debug, info};

use crate::date::FormattedDate;
use crate::error::{ComemoraError, ComemoraResult};
use crate::llm::LlmClient;
use crate::niche;
use crate::prompt;
use crate::reconcile;
use crate::store::Store;

/// Suggest commemorative dates relevant to the selected niches.
pub async fn suggest_dates(
    store: &Store,
    llm: &LlmClient,
    niche_codes: &[String],
) -> ComemoraResult<Vec<FormattedDate>> {
    if niche_codes.is_empty() {
        return Err(ComemoraError::InvalidRequest("no niches selected".to_string()));
    }

    let candidates = store.candidate_dates()?;
    debug!(candidates = candidates.len(), "loaded candidate date table");

    let labels = niche::translate_all(niche_codes);
    let filtered = niche::filter(&candidates, &labels);
    info!(labels = ?labels, matched = filtered.len(), "filtered candidates by niche");

    // Nothing to rank: skip the completion call entirely.
    if filtered.is_empty() {
        return Ok(Vec::new());
    }

    let blocks = prompt::candidate_blocks(&filtered);
    let ranked = llm.rank_dates(&labels, &blocks).await?;

    let dates = reconcile::reconcile(&ranked, &filtered, &labels);
    info!(suggested = dates.len(), "pipeline produced reconciled dates");
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;

    fn make_client() -> LlmClient {
        LlmClient::new(LlmConfig {
            api_key: "test-key".to_string(),
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn empty_selection_is_a_precondition_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());

        let result = suggest_dates(&store, &make_client(), &[]).await;
        assert!(matches!(result, Err(ComemoraError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn empty_filter_result_skips_the_completion_call() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dates.json"),
            r#"[{"date": "2025-05-11", "description": "Dia das Mães", "niche1": "moda"}]"#,
        )
        .unwrap();
        let store = Store::at(dir.path());

        // No candidate matches "technology"; the pipeline returns empty
        // without ever reaching the network.
        let dates = suggest_dates(&store, &make_client(), &["technology".to_string()])
            .await
            .unwrap();
        assert!(dates.is_empty());
    }
}
