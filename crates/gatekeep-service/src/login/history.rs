//! Paginated login history for the account owner.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatekeep_auth::AttemptLedger;
use gatekeep_core::result::AppResult;
use gatekeep_core::types::pagination::PageRequest;
use gatekeep_entity::attempt::AttemptRecord;

use crate::context::RequestContext;

/// One row of the login history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Record sequence number.
    pub id: i64,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// When the attempt happened.
    pub time: DateTime<Utc>,
}

impl From<AttemptRecord> for HistoryEntry {
    fn from(record: AttemptRecord) -> Self {
        Self {
            id: record.seq,
            success: !record.is_failure(),
            time: record.attempted_at,
        }
    }
}

/// A page of history plus the total page count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPage {
    /// Entries on this page, newest first.
    pub history: Vec<HistoryEntry>,
    /// Total number of pages.
    pub count: u64,
}

/// Reads an account's login history.
#[derive(Debug, Clone)]
pub struct HistoryService {
    ledger: Arc<AttemptLedger>,
    page_size: u64,
}

impl HistoryService {
    /// Creates a history service with a fixed page size.
    pub fn new(ledger: Arc<AttemptLedger>, page_size: u64) -> Self {
        Self { ledger, page_size }
    }

    /// Returns page `page` (1-based) of the caller's history.
    pub async fn login_history(&self, ctx: &RequestContext, page: u64) -> AppResult<HistoryPage> {
        let page = self
            .ledger
            .history(ctx.account_id, PageRequest::new(page, self.page_size))
            .await?;

        Ok(HistoryPage {
            count: page.total_pages,
            history: page.items.into_iter().map(HistoryEntry::from).collect(),
        })
    }
}
