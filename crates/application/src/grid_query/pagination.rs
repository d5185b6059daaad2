use gridgate_domain::{GridRowRequest, coerce_row_index};

/// 1-indexed page window for the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number, always >= 1.
    pub page: u64,
    /// Rows per page, always >= 1.
    pub page_size: u64,
}

/// Maps a `[startRow, endRow)` grid window onto page-based pagination.
///
/// A missing or non-positive window falls back to `default_page_size`.
/// The remote API has no arbitrary-offset semantics, so a start row that is
/// not a multiple of the page size silently shifts which rows land in view;
/// that precision loss is inherent to the page-indexed protocol.
#[must_use]
pub fn compute_pagination(request: &GridRowRequest, default_page_size: u64) -> Pagination {
    let start_row = coerce_row_index(request.start_row.as_ref())
        .unwrap_or(0)
        .max(0) as u64;
    let end_row = coerce_row_index(request.end_row.as_ref());

    let page_size = match end_row {
        Some(end) if end > start_row as i64 => (end as u64 - start_row).max(1),
        _ => default_page_size.max(1),
    };

    Pagination {
        page: start_row / page_size + 1,
        page_size,
    }
}
