//! Page requests and paged results.

use crate::{
    model::api::{PaginatedDto, PaginationDto},
    server::error::AppError,
};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Validates raw query values.
    ///
    /// # Arguments
    /// - `page` - 1-based page number, defaults to 1
    /// - `page_size` - Items per page, defaults to 10, at most 100
    ///
    /// # Returns
    /// - `Ok(PageRequest)` - Values in range
    /// - `Err(AppError::BadRequest)` - Page 0, page size 0 or above the maximum
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }

        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self { page, page_size })
    }

    /// Zero-based page index as used by SeaORM paginators.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_items,
            request,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.request.page_size)
    }

    /// Converts every item, failing on the first conversion error.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;

        Ok(Page {
            items,
            total_items: self.total_items,
            request: self.request,
        })
    }

    pub fn into_dto<U>(self, f: impl FnMut(T) -> U) -> PaginatedDto<U> {
        let pagination = PaginationDto {
            total_items: self.total_items,
            page_size: self.request.page_size,
            current_page: self.request.page,
            total_pages: self.total_pages(),
        };

        PaginatedDto {
            items: self.items.into_iter().map(f).collect(),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let request = PageRequest::new(None, None).unwrap();

        assert_eq!(request, PageRequest { page: 1, page_size: 10 });
        assert_eq!(request.index(), 0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(PageRequest::new(Some(0), None), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::new(None, Some(0)), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::new(None, Some(101)), Err(AppError::BadRequest(_))));
        assert!(PageRequest::new(Some(3), Some(100)).is_ok());
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::new(Some(1), Some(10)).unwrap();

        for (total, expected) in [(0, 0), (1, 1), (10, 1), (11, 2), (95, 10)] {
            let page: Page<()> = Page::new(Vec::new(), total, request);
            assert_eq!(page.total_pages(), expected, "total {}", total);
        }
    }

    #[test]
    fn into_dto_reports_pagination() {
        let request = PageRequest::new(Some(2), Some(2)).unwrap();
        let page = Page::new(vec![3, 4], 5, request);

        let dto = page.into_dto(|n| n * 10);

        assert_eq!(dto.items, vec![30, 40]);
        assert_eq!(dto.pagination.total_items, 5);
        assert_eq!(dto.pagination.current_page, 2);
        assert_eq!(dto.pagination.page_size, 2);
        assert_eq!(dto.pagination.total_pages, 3);
    }
}
