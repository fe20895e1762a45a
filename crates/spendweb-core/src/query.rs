//! Search and pagination over a session's expense records
//!
//! Everything here is a pure derivation: the visible page is recomputed from
//! the records, the search text and the requested page on every request.

use serde::Serialize;
use spendweb_provider::ExpenseRecord;

/// Rows per table page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Case-insensitive substring match against subject, employee, category,
/// description and status. An empty query matches every record.
pub fn matches(record: &ExpenseRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    [
        record.approval_subject.as_str(),
        record.employee_name.as_str(),
        record.category.as_str(),
        record.description.as_str(),
        record.status.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

/// Records matching `query`, in collection order
pub fn filter<'a>(records: &'a [ExpenseRecord], query: &str) -> Vec<&'a ExpenseRecord> {
    records.iter().filter(|r| matches(r, query)).collect()
}

/// Number of pages needed for `total` rows
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Clamp a 1-based page number into `[1, max(page_count, 1)]`
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.max(1).min(page_count.max(1))
}

/// One rendered page of the expenses table
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub rows: Vec<&'a ExpenseRecord>,
    /// Active page (1-based, already clamped)
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// Records matching the query
    pub filtered_count: usize,
    /// Records in the session
    pub total_count: usize,
    pub query: String,
    /// Whether the previous/next controls are enabled
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'a> Page<'a> {
    /// Page numbers for the pagination control, one per page
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.page_count
    }

    /// Pagination is only shown with more than one page
    pub fn shows_pagination(&self) -> bool {
        self.page_count > 1
    }
}

/// Filter, clamp and slice in one step
pub fn paginate<'a>(
    records: &'a [ExpenseRecord],
    query: &str,
    page: usize,
    page_size: usize,
) -> Page<'a> {
    let filtered = filter(records, query);
    let filtered_count = filtered.len();
    let page_count = page_count(filtered_count, page_size);
    let page = clamp_page(page, page_count);
    let rows = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        rows,
        page,
        page_count,
        page_size,
        filtered_count,
        total_count: records.len(),
        query: query.to_string(),
        has_previous: page > 1,
        has_next: page < page_count,
    }
}

/// Search text and active page of a session's expenses table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    query: String,
    page: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

impl TableView {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the search text. A different text always resets to page 1.
    /// Returns whether the text changed.
    pub fn set_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.page = 1;
        true
    }

    /// Move to `page`, clamped to the available pages
    pub fn go_to(&mut self, page: usize, page_count: usize) {
        self.page = clamp_page(page, page_count);
    }

    pub fn previous(&mut self, page_count: usize) {
        self.go_to(self.page.saturating_sub(1), page_count);
    }

    pub fn next(&mut self, page_count: usize) {
        self.go_to(self.page + 1, page_count);
    }
}
