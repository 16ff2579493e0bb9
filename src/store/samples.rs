use super::MemoryStore;
use crate::consts::SAMPLE_SPREAD_DAYS;
use crate::error::{MsResult, StoreError};
use crate::geo::Location;
use crate::model::NewMemory;
use chrono::{Duration, Utc};
use tracing::info;

struct Sample {
    title: &'static str,
    story: &'static str,
    lat: f64,
    lng: f64,
    place: &'static str,
}

const SAMPLES: [Sample; 4] = [
    Sample {
        title: "Building the Perfect Sandcastle",
        story: "We spent the whole afternoon at the beach building the most magnificent \
                sandcastle ever, with towers, a moat and seashell windows. When the tide \
                came in we cheered as the waves took it back.",
        lat: 33.7701,
        lng: -118.4109,
        place: "Sunset Beach, California",
    },
    Sample {
        title: "First Day of School Pancakes",
        story: "Every first day of school starts with mouse-shaped pancakes and far too \
                much syrup. This year it was Emma's first day of kindergarten, sparkly \
                shoes and a backpack almost as big as she was.",
        lat: 40.7589,
        lng: -73.9851,
        place: "Central Park West, New York, NY",
    },
    Sample {
        title: "Grandpa's Secret Cookie Recipe",
        story: "Grandpa finally shared his chocolate chip cookie recipe: a pinch of sea \
                salt and an extra egg yolk. Flour everywhere, and stories about baking \
                with his own grandmother.",
        lat: 41.8781,
        lng: -87.6298,
        place: "Lincoln Park, Chicago, IL",
    },
    Sample {
        title: "The Great Backyard Camping Adventure",
        story: "We pitched the tent in the backyard and declared it the wilderness. Ghost \
                stories, s'mores and star counting, until the 2 AM rain sent the \
                explorers back to the house.",
        lat: 30.2672,
        lng: -97.7431,
        place: "Austin, Texas",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReport {
    pub deleted: usize,
    pub added: usize,
}

/// The built-in memories, back-dated across the last few weeks so that sorting by
/// date shows something. `seed` fixes the spread.
pub fn sample_memories(seed: Option<u64>) -> MsResult<Vec<NewMemory>> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let now = Utc::now();
    let window_secs = SAMPLE_SPREAD_DAYS * 24 * 60 * 60;

    SAMPLES
        .iter()
        .map(|s| {
            let mut memory = NewMemory::new(s.title, s.story, Location::new(s.lat, s.lng, s.place)?);
            memory.created_at = Some(now - Duration::seconds(rng.i64(0..window_secs)));
            Ok(memory)
        })
        .collect()
}

pub async fn load_samples<S: MemoryStore>(store: &S, owner: &str, seed: Option<u64>) -> MsResult<usize> {
    let memories = sample_memories(seed)?;
    let count = memories.len();
    for memory in memories {
        store.create(owner, memory).await?;
    }
    info!("Added {} sample memories for '{}'", count, owner);
    Ok(count)
}

/// Deletes every memory `owner` has. Returns how many went.
pub async fn clear_owner<S: MemoryStore>(store: &S, owner: &str) -> Result<usize, StoreError> {
    let existing = store.list_by_owner(owner).await?;
    for record in &existing {
        store.delete(&record.id).await?;
    }
    info!("Deleted {} existing memories for '{}'", existing.len(), owner);
    Ok(existing.len())
}

pub async fn replace_with_samples<S: MemoryStore>(
    store: &S,
    owner: &str,
    seed: Option<u64>,
) -> MsResult<SampleReport> {
    let deleted = clear_owner(store, owner).await?;
    let added = load_samples(store, owner, seed).await?;
    Ok(SampleReport { deleted, added })
}
