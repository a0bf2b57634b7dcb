//! Recent activity feed with page-based navigation.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::inventory::ActivityLogEntry;
use crate::models::time::DateFormatter;
use crate::routes::activity::{ActivityAction, ActivityItem, ActivityPage};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Number of page buttons in the pagination control.
pub const PAGE_WINDOW_SIZE: u32 = 5;

impl ActivityAction {
    /// Map a stored action code onto an action kind.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "criar" => ActivityAction::Create,
            "editar" => ActivityAction::Edit,
            "excluir" => ActivityAction::Delete,
            "associar" => ActivityAction::Associate,
            "entrega" => ActivityAction::Delivery,
            "retorno" => ActivityAction::Return,
            _ => ActivityAction::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagingError {
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),
    #[error("per_page must be between 1 and {max}, got {got}")]
    InvalidPerPage { got: u32, max: u32 },
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Result<Self, PagingError> {
        if page < 1 {
            return Err(PagingError::InvalidPage(page));
        }
        if per_page < 1 || per_page > MAX_PER_PAGE {
            return Err(PagingError::InvalidPerPage {
                got: per_page,
                max: MAX_PER_PAGE,
            });
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Index of the last record on this page (inclusive).
    pub fn range_end(&self) -> u64 {
        self.offset() + self.per_page as u64 - 1
    }
}

/// `ceil(total / per_page)`
pub fn total_pages(total_records: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total_records.div_ceil(per_page as u64).min(u32::MAX as u64) as u32
}

/// Page numbers shown by the pagination control.
///
/// Up to five pages: the first five near the start, the last five near the
/// end, otherwise the current page with two neighbours on each side.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    let len = PAGE_WINDOW_SIZE.min(total_pages);
    let first = if total_pages <= PAGE_WINDOW_SIZE || current <= 3 {
        1
    } else if current >= total_pages - 2 {
        total_pages - (PAGE_WINDOW_SIZE - 1)
    } else {
        current - 2
    };
    (first..first + len).collect()
}

fn to_item(entry: ActivityLogEntry, formatter: &DateFormatter, now: DateTime<Utc>) -> ActivityItem {
    let title = entry
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("{} {}", entry.entity, entry.action));
    let description = entry
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("{}: {}", entry.module, entry.action));

    ActivityItem {
        log_id: entry.log_id,
        action: ActivityAction::from_code(&entry.action),
        title,
        description,
        time_ago: formatter.format_relative_time(entry.logged_at, now),
        logged_at: entry.logged_at,
    }
}

/// Assemble one page of the activity feed.
pub fn build_activity_page(
    entries: Vec<ActivityLogEntry>,
    total_records: u64,
    request: PageRequest,
    formatter: &DateFormatter,
    now: DateTime<Utc>,
) -> ActivityPage {
    let pages = total_pages(total_records, request.per_page());
    ActivityPage {
        items: entries
            .into_iter()
            .map(|entry| to_item(entry, formatter, now))
            .collect(),
        page: request.page(),
        per_page: request.per_page(),
        total_records,
        total_pages: pages,
        page_window: page_window(request.page(), pages),
    }
}

/// The page returned when the activity log cannot be read.
pub fn empty_page(request: PageRequest) -> ActivityPage {
    ActivityPage {
        items: Vec::new(),
        page: request.page(),
        per_page: request.per_page(),
        total_records: 0,
        total_pages: 0,
        page_window: Vec::new(),
    }
}
