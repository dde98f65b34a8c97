//! One page of listing results as reported by the backend.

use crate::domain::job::JobRecord;
use serde::{Deserialize, Serialize};

/// Default page length used by the listing view.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Jobs on the requested page plus the total page count under the current filter.
///
/// Recomputed on every fetch and replaced wholesale, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagedResult {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub pages: u32,
    /// Total matching jobs, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Page number echoed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
}

/// Number of pages needed for `total` items.
#[must_use]
pub fn page_count(total: usize, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let per_page = per_page as usize;
    u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX)
}

/// Clamps a requested page into `[1, max(pages, 1)]`.
#[must_use]
pub fn clamp_page(page: u32, pages: u32) -> u32 {
    page.clamp(1, pages.max(1))
}
