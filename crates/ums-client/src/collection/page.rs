use ums_model::{PER_PAGE, UserPage};

/// One step through the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Previous,
    Next,
}

/// Result of [`paginate`](super::UserCollectionManager::paginate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Already at the boundary; nothing was fetched
    Unchanged,
    /// The given page was fetched and is now current
    Loaded(u32),
}

/// Where the active set sits in the server-side listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    /// 1-based, always within `1..=total_pages`
    pub current: u32,
    /// Never below 1
    pub total_pages: u32,
    pub per_page: u32,
    pub total: u32,
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self {
            current: 1,
            total_pages: 1,
            per_page: PER_PAGE,
            total: 0,
        }
    }
}

impl PageDescriptor {
    pub(crate) fn from_response(page: u32, response: &UserPage) -> Self {
        Self {
            current: page,
            total_pages: normalized_total_pages(response.total_pages),
            per_page: response.per_page,
            total: response.total,
        }
    }

    /// Page a step leads to, clamped to the known range
    pub fn step_target(&self, step: PageStep) -> u32 {
        let target = match step {
            PageStep::Previous => self.current.saturating_sub(1),
            PageStep::Next => self.current.saturating_add(1),
        };
        target.clamp(1, self.total_pages.max(1))
    }
}

/// An empty listing still has one (empty) page
pub(crate) fn normalized_total_pages(total_pages: u32) -> u32 {
    total_pages.max(1)
}
