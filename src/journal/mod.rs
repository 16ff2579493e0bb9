//! Paginated journal view with inline editing.
//!
//! The controller owns the ordered records, the current page and at most one open
//! edit. Every mutation ends in [`JournalController::enforce_invariants`], which keeps
//! the page index in range and drops an edit whose record is no longer on screen.

pub mod edit;
pub mod nav;
pub mod paging;

pub use self::edit::EditBuffer;
pub use self::nav::NavInput;

use self::nav::NavTarget;
use crate::config::JournalParams;
use crate::error::{JournalError, StoreError};
use crate::model::{MemoryId, MemoryRecord, MemoryUpdate, NewMemory, SortOrder};
use crate::store::MemoryStore;
use chrono::Utc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

/// What changed, sent to every observer after the state has settled.
#[derive(Debug, Clone, PartialEq)]
pub enum JournalChange {
    Loaded { count: usize },
    LoadFailed,
    PageChanged { from: usize, to: usize },
    SortChanged(SortOrder),
    EditStarted(MemoryId),
    EditSaved(MemoryId),
    EditDiscarded(MemoryId),
    RecordCreated(MemoryId),
    RecordDeleted(MemoryId),
}

pub trait JournalObserver: Send {
    fn on_change(&self, change: &JournalChange);
}

impl<F: Fn(&JournalChange) + Send> JournalObserver for F {
    fn on_change(&self, change: &JournalChange) {
        self(change)
    }
}

/// The two slots of the current spread.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub index: usize,
    pub total_pages: usize,
    pub records: &'a [MemoryRecord],
    pub editing: Option<&'a EditBuffer>,
}

impl<'a> PageView<'a> {
    pub fn left(&self) -> Option<&'a MemoryRecord> {
        self.records.first()
    }

    pub fn right(&self) -> Option<&'a MemoryRecord> {
        self.records.get(1)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total_pages
    }
}

pub struct JournalController<S> {
    store: S,
    owner: String,
    records: Vec<MemoryRecord>,
    page: usize,
    editing: Option<EditBuffer>,
    sort: SortOrder,
    swipe_threshold_px: f32,
    status: LoadStatus,
    observers: Vec<Box<dyn JournalObserver>>,
}

impl<S: MemoryStore> JournalController<S> {
    pub fn new(store: S, owner: impl Into<String>, params: &JournalParams) -> Self {
        Self {
            store,
            owner: owner.into(),
            records: Vec::new(),
            page: 0,
            editing: None,
            sort: params.sort,
            swipe_threshold_px: params.swipe_threshold_px,
            status: LoadStatus::Loading,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl JournalObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // --- Read side ---

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn records(&self) -> &[MemoryRecord] {
        &self.records
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        paging::total_pages(self.records.len())
    }

    pub fn page_records(&self) -> &[MemoryRecord] {
        &self.records[paging::page_range(self.page, self.records.len())]
    }

    pub fn page_view(&self) -> PageView<'_> {
        PageView {
            index: self.page,
            total_pages: self.total_pages(),
            records: self.page_records(),
            editing: self.editing.as_ref(),
        }
    }

    pub fn editing_id(&self) -> Option<&MemoryId> {
        self.editing.as_ref().map(EditBuffer::record_id)
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    /// Field setters for the open edit. `None` when nothing is being edited.
    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editing.as_mut()
    }

    pub fn is_on_current_page(&self, id: &MemoryId) -> bool {
        self.page_records().iter().any(|r| &r.id == id)
    }

    // --- Record set ---

    /// Replaces the record set. Any open edit is discarded; a page index that no
    /// longer exists goes back to the first page.
    pub fn load(&mut self, mut records: Vec<MemoryRecord>) {
        self.sort.sort(&mut records);
        self.records = records;
        self.status = LoadStatus::Ready;
        self.discard_edit();

        if self.page > paging::last_page(self.records.len()) {
            self.set_page(0);
        }
        self.enforce_invariants();

        debug!("Journal: loaded {} records", self.records.len());
        self.notify(JournalChange::Loaded {
            count: self.records.len(),
        });
    }

    /// Fetches the owner's records from the store. On failure the journal is emptied
    /// and marked [`LoadStatus::Failed`] rather than left showing stale pages.
    pub async fn reload(&mut self) -> Result<(), JournalError> {
        self.status = LoadStatus::Loading;
        match self.store.list_by_owner(&self.owner).await {
            Ok(records) => {
                info!("Journal: {} memories for '{}'", records.len(), self.owner);
                self.load(records);
                Ok(())
            }
            Err(e) => {
                warn!("Journal: load failed for '{}': {}", self.owner, e);
                self.records.clear();
                self.status = LoadStatus::Failed;
                self.discard_edit();
                self.set_page(0);
                self.enforce_invariants();
                self.notify(JournalChange::LoadFailed);
                Err(e.into())
            }
        }
    }

    /// Persists a new memory, then refreshes from the store.
    ///
    /// Once the store has the record this returns it. A failed refresh keeps the
    /// current records plus the new one and is reported as [`JournalChange::LoadFailed`].
    pub async fn create(&mut self, memory: NewMemory) -> Result<MemoryRecord, JournalError> {
        memory
            .validate()
            .map_err(|e| JournalError::Validation(validation_message(e)))?;

        let record = self.store.create(&self.owner, memory).await?;
        info!("Journal: created '{}' ({})", record.title, record.id);
        self.notify(JournalChange::RecordCreated(record.id.clone()));

        match self.store.list_by_owner(&self.owner).await {
            Ok(records) => self.load(records),
            Err(e) => {
                warn!("Journal: refresh after create failed for '{}': {}", self.owner, e);
                self.records.retain(|r| r.id != record.id);
                self.records.push(record.clone());
                self.sort.sort(&mut self.records);
                self.enforce_invariants();
                self.notify(JournalChange::LoadFailed);
            }
        }
        Ok(record)
    }

    /// Reorders the journal and returns to the first page.
    pub fn set_sort(&mut self, order: SortOrder) {
        self.sort = order;
        self.sort.sort(&mut self.records);
        self.discard_edit();
        self.set_page(0);
        self.enforce_invariants();
        self.notify(JournalChange::SortChanged(order));
    }

    // --- Navigation ---

    /// Moves to `index`, clamped into range. Always closes an open edit, even when
    /// the page does not change.
    pub fn go_to_page(&mut self, index: usize) -> usize {
        self.discard_edit();
        self.set_page(paging::clamp_page(index, self.records.len()));
        self.enforce_invariants();
        self.page
    }

    pub fn next(&mut self) -> usize {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Applies a key press, swipe or dot click. Returns false for a swipe too short to
    /// count, which leaves everything (including an open edit) untouched.
    pub fn handle_input(&mut self, input: NavInput) -> bool {
        match input.target(self.swipe_threshold_px) {
            NavTarget::Prev => self.prev(),
            NavTarget::Next => self.next(),
            NavTarget::Page(i) => self.go_to_page(i),
            NavTarget::Last => self.go_to_page(usize::MAX),
            NavTarget::Ignore => return false,
        };
        true
    }

    // --- Editing ---

    /// Opens `id` for editing. Only a record visible on the current page can be
    /// opened; anything else is refused and the state stays as it was.
    pub fn start_edit(&mut self, id: &MemoryId) -> Result<&EditBuffer, JournalError> {
        let Some(record) = self.page_records().iter().find(|r| &r.id == id) else {
            warn!("Journal: refused edit of '{}' (not on page {})", id, self.page);
            return Err(JournalError::EditRejected(id.clone()));
        };
        let buffer = EditBuffer::seed(record);

        // Re-opening the record already in edit keeps what has been typed.
        if self.editing_id() != Some(id) {
            self.discard_edit();
            debug!("Journal: editing '{}'", id);
            self.notify(JournalChange::EditStarted(id.clone()));
        }

        Ok(&*self.editing.get_or_insert(buffer))
    }

    /// Saves `update` for the record being edited. The local copy only changes after
    /// the store confirms; on a store failure the edit stays open for a retry.
    pub async fn save_edit(&mut self, id: &MemoryId, update: MemoryUpdate) -> Result<(), JournalError> {
        self.require_editing(id)?;
        update
            .validate()
            .map_err(|e| JournalError::Validation(validation_message(e)))?;

        if let Err(e) = self.store.update(id, &update).await {
            warn!("Journal: save of '{}' failed: {}", id, e);
            return Err(e.into());
        }

        let now = Utc::now();
        if let Some(record) = self.records.iter_mut().find(|r| &r.id == id) {
            record.apply(&update, now);
        }
        self.editing = None;
        info!("Journal: saved '{}'", id);

        self.enforce_invariants();
        self.notify(JournalChange::EditSaved(id.clone()));
        Ok(())
    }

    /// Saves whatever the edit buffer holds.
    pub async fn save_buffer(&mut self) -> Result<(), JournalError> {
        let Some(buffer) = self.editing.as_ref() else {
            return Err(JournalError::Validation(
                "Nothing is being edited".to_string(),
            ));
        };
        let id = buffer.record_id().clone();
        let update = buffer.to_update();
        self.save_edit(&id, update).await
    }

    /// Closes the edit without saving. Returns false (and logs) when nothing was open.
    pub fn cancel_edit(&mut self) -> bool {
        if self.editing.is_none() {
            warn!("Journal: cancel requested with no edit open");
            return false;
        }
        self.discard_edit();
        true
    }

    /// Deletes the record being edited. The caller owns the confirm step; this only
    /// runs once the user has confirmed.
    pub async fn delete_record(&mut self, id: &MemoryId) -> Result<(), JournalError> {
        self.require_editing(id)?;

        if let Err(e) = self.store.delete(id).await {
            warn!("Journal: delete of '{}' failed: {}", id, e);
            return Err(e.into());
        }

        self.records.retain(|r| &r.id != id);
        self.editing = None;
        info!("Journal: deleted '{}'", id);

        self.enforce_invariants();
        self.notify(JournalChange::RecordDeleted(id.clone()));
        Ok(())
    }

    // --- Internals ---

    fn require_editing(&self, id: &MemoryId) -> Result<(), JournalError> {
        if self.editing_id() == Some(id) {
            return Ok(());
        }
        warn!(
            "Journal: '{}' is not the open edit ({:?})",
            id,
            self.editing_id().map(MemoryId::as_str)
        );
        Err(JournalError::EditMismatch {
            editing: self.editing_id().cloned(),
            requested: id.clone(),
        })
    }

    /// Single place the page/edit invariant is restored:
    /// the page index lies in `[0, totalPages - 1]`, and an open edit refers to a
    /// record in one of the current page's slots.
    fn enforce_invariants(&mut self) {
        let last = paging::last_page(self.records.len());
        if self.page > last {
            self.set_page(last);
        }

        let stale = self
            .editing_id()
            .is_some_and(|id| !self.is_on_current_page(id));
        if stale {
            debug!("Journal: open edit no longer on page {}, closing", self.page);
            self.discard_edit();
        }
    }

    fn set_page(&mut self, to: usize) {
        let from = self.page;
        if from != to {
            self.page = to;
            debug!("Journal: page {} -> {}", from, to);
            self.notify(JournalChange::PageChanged { from, to });
        }
    }

    fn discard_edit(&mut self) {
        if let Some(buffer) = self.editing.take() {
            debug!("Journal: discarded edit of '{}'", buffer.record_id());
            self.notify(JournalChange::EditDiscarded(buffer.record_id().clone()));
        }
    }

    fn notify(&self, change: JournalChange) {
        for observer in &self.observers {
            observer.on_change(&change);
        }
    }
}

fn validation_message(e: StoreError) -> String {
    match e {
        StoreError::Validation(msg) => msg,
        other => other.to_string(),
    }
}
