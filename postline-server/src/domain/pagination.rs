pub(crate) const DEFAULT_PAGE: u32 = 1;
pub(crate) const DEFAULT_LIMIT: u32 = 9;

/// The half-open row range `[start, end)` selected for one page, plus the
/// totals a listing response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub(crate) start: u64,
    pub(crate) end: u64,
    pub(crate) total_pages: u64,
    pub(crate) show_pagination: bool,
}

/// Computes the page window over a pre-counted, filtered result set.
/// Pages past the end produce an empty window, not an error.
pub(crate) fn paginate(total_count: i64, page: u32, limit: u32) -> PageWindow {
    let total = total_count.max(0) as u64;
    let limit = u64::from(limit.max(1));
    let total_pages = total.div_ceil(limit);
    let start = u64::from(page.max(1) - 1) * limit;

    PageWindow {
        start,
        end: start + limit,
        total_pages,
        show_pagination: total_pages > 1,
    }
}
