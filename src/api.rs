use crate::config::Config;
use crate::error::MsResult;
use crate::game::{GameController, Phase};
use crate::journal::JournalController;
use crate::store::MemoryStore;
use tracing::{info, warn};

/// Builds a journal for `owner` and performs the first load.
pub async fn open_journal<S: MemoryStore>(
    store: S,
    owner: &str,
    config: &Config,
) -> MsResult<JournalController<S>> {
    let mut journal = JournalController::new(store, owner, &config.journal);
    journal.reload().await?;
    info!(
        "API: journal for '{}' ready ({} pages)",
        owner,
        journal.total_pages()
    );
    Ok(journal)
}

/// Fetches `owner`'s memories and starts (or restarts) `game` with them.
///
/// A store failure leaves the game in [`Phase::LoadFailed`] and is returned.
pub async fn start_game<S: MemoryStore>(
    store: &S,
    owner: &str,
    game: &mut GameController,
) -> MsResult<()> {
    let records = match store.list_by_owner(owner).await {
        Ok(records) => records,
        Err(e) => {
            warn!("API: could not load memories for '{}': {}", owner, e);
            game.mark_load_failed();
            return Err(e.into());
        }
    };

    match game.phase() {
        Phase::Loading => game.start(records)?,
        _ => game.restart(records)?,
    }
    Ok(())
}
