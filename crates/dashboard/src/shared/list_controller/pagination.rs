use std::ops::Range;

/// 1-based page over a filtered view with a constant page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(len / page_size))`
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Clamp the request into `[1, total_pages]`
    pub fn set_page(&mut self, requested: usize, len: usize) -> usize {
        self.page = requested.clamp(1, self.total_pages(len));
        self.page
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Keep the current page valid after the view shrank
    pub fn clamp(&mut self, len: usize) {
        self.set_page(self.page, len);
    }

    /// Index range of the current page within the view
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    /// "{first}-{last}" of the current page, 1-based; `None` for an empty view
    pub fn summary(&self, len: usize) -> Option<(usize, usize)> {
        let bounds = self.bounds(len);
        if bounds.is_empty() {
            None
        } else {
            Some((bounds.start + 1, bounds.end))
        }
    }
}
