//! Pagination for recipe listings

/// Page size constant for all recipe listings
pub const PAGE_SIZE: i64 = 10;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Arguments
/// * `total_results` - Total number of rows in result set
/// * `requested_page` - Page number requested by user (may be out of bounds)
///
/// # Returns
/// Pagination metadata with sanitized page number and calculated offset
///
/// # Examples
/// ```
/// use mealprep_web::pagination::calculate_pagination;
///
/// // 25 total results = 3 pages (10 + 10 + 5)
/// let p = calculate_pagination(25, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 10);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(25, 99);
/// assert_eq!(p.page, 3);  // Clamped to last page
/// assert_eq!(p.offset, 20);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}
