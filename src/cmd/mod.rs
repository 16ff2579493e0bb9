pub mod delete;
pub mod edit;
pub mod import;
pub mod journal;
pub mod play;
pub mod score;
pub mod seed;

use mindstamps::journal::{paging, JournalController};
use mindstamps::model::MemoryId;
use mindstamps::store::MemoryStore;

/// Turns to the page holding `id`, or to the 1-based `page` when one is given.
pub(crate) fn turn_to<S: MemoryStore>(
    journal: &mut JournalController<S>,
    id: &MemoryId,
    page: Option<usize>,
) {
    let target = page.map(|p| p.saturating_sub(1)).or_else(|| {
        journal
            .records()
            .iter()
            .position(|r| &r.id == id)
            .map(paging::page_of)
    });
    if let Some(index) = target {
        journal.go_to_page(index);
    }
}
