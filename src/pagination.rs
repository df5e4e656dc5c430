//! Offset/limit page arithmetic for the board listing

/// The slice of a listing to fetch for one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of records to skip
    pub offset: i64,
    /// Maximum number of records to return
    pub limit: i64,
    /// Number of pages the listing spans
    pub total_pages: i64,
}

/// Rejects page parameters below 1
pub fn validate_page_params(count_per_page: i64, page_no: i64) -> Result<(), String> {
    if count_per_page < 1 {
        return Err(format!("countPerPage must be at least 1, got {}", count_per_page));
    }
    if page_no < 1 {
        return Err(format!("pageNo must be at least 1, got {}", page_no));
    }
    Ok(())
}

impl PageWindow {
    /// Computes the window for page `page_no` of `count_per_page` records over
    /// `total_count` records
    ///
    /// A page past the end falls back to the last full page, so a non-empty
    /// listing never yields an empty page. Both parameters must be at least 1.
    pub fn compute(total_count: i64, count_per_page: i64, page_no: i64) -> Self {
        let total_count = total_count.max(0);
        let total_pages =
            total_count / count_per_page + i64::from(total_count % count_per_page != 0);

        let mut offset = (page_no - 1).saturating_mul(count_per_page);
        if offset >= total_count {
            offset = (total_count - count_per_page).max(0);
        }

        Self {
            offset,
            limit: count_per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let window = PageWindow::compute(25, 10, 1);
        assert_eq!(window, PageWindow { offset: 0, limit: 10, total_pages: 3 });
    }

    #[test]
    fn test_last_partial_page() {
        let window = PageWindow::compute(25, 10, 3);
        assert_eq!(window.offset, 20);
        assert_eq!(window.total_pages, 3);
    }

    #[test]
    fn test_out_of_range_page_falls_back_to_last_full_page() {
        let window = PageWindow::compute(25, 10, 7);
        assert_eq!(window.offset, 15);
    }

    #[test]
    fn test_out_of_range_page_smaller_than_one_page() {
        let window = PageWindow::compute(4, 10, 2);
        assert_eq!(window.offset, 0);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn test_empty_listing() {
        let window = PageWindow::compute(0, 10, 1);
        assert_eq!(window, PageWindow { offset: 0, limit: 10, total_pages: 0 });
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let window = PageWindow::compute(30, 10, i64::MAX);
        assert_eq!(window.offset, 20);
    }

    #[test]
    fn test_validate_page_params() {
        assert!(validate_page_params(10, 1).is_ok());
        assert!(validate_page_params(0, 1).is_err());
        assert!(validate_page_params(10, 0).unwrap_err().contains("pageNo"));
    }
}
