use crate::consts::RECORDS_PER_PAGE;
use std::ops::Range;

/// Pages needed for `count` records. An empty journal still shows one empty page.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(RECORDS_PER_PAGE).max(1)
}

pub fn last_page(count: usize) -> usize {
    total_pages(count) - 1
}

pub fn clamp_page(index: usize, count: usize) -> usize {
    index.min(last_page(count))
}

/// Record positions shown on page `index`. Empty past the end.
pub fn page_range(index: usize, count: usize) -> Range<usize> {
    let start = index.saturating_mul(RECORDS_PER_PAGE).min(count);
    let end = (start + RECORDS_PER_PAGE).min(count);
    start..end
}

/// Page that shows the record at `position`.
pub fn page_of(position: usize) -> usize {
    position / RECORDS_PER_PAGE
}
