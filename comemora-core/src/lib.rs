//! Core types and the date-relevance pipeline for the comemora ecosystem.
//!
//! This crate provides everything shared by comemora-server and comemora-cli:
//! - `date`, `relevance` and `campaign` types
//! - the suggestion pipeline (`niche` → `prompt` → `llm` → `reconcile`)
//! - the local data-directory store (candidate date table, campaign files)
//! - CSV and PDF export of a calendar's campaigns

pub mod campaign;
pub mod config;
pub mod date;
pub mod error;
pub mod export;
pub mod llm;
pub mod niche;
pub mod prompt;
pub mod reconcile;
pub mod relevance;
pub mod store;
pub mod suggest;

pub use campaign::{Campaign, DateSelection};
pub use date::{CandidateDate, DateCategory, FormattedDate};
pub use error::{ComemoraError, ComemoraResult};
pub use relevance::{RankedDate, Relevance};
