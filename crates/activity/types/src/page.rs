//! Paged activity results

use crate::ActivityRecord;
use serde::{Deserialize, Serialize};

/// One page of activity results plus pagination bookkeeping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityPage {
    /// The records on this page, in server order
    pub items: Vec<ActivityRecord>,
    /// Total records matching the filter set across all pages
    pub total_count: u64,
    /// Total number of pages at this page size
    pub page_count: u32,
    /// The requested page size
    pub page_size: u32,
    /// The requested page number (1-based)
    pub page_number: u32,
}

impl ActivityPage {
    /// Build a page, deriving `page_count` from the total and page size
    pub fn new(items: Vec<ActivityRecord>, total_count: u64, page_size: u32, page_number: u32) -> Self {
        let page_count = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size as u64) as u32
        };
        Self {
            items,
            total_count,
            page_count,
            page_size,
            page_number,
        }
    }

    /// An empty page for a filter set that matched nothing
    pub fn empty(page_size: u32, page_number: u32) -> Self {
        Self::new(Vec::new(), 0, page_size, page_number)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
