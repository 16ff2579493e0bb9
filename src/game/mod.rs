//! "Where was this?" rounds played against the player's own memories.

pub mod types;

pub use self::types::{GameSummary, Phase, RoundResult};

use crate::config::Config;
use crate::error::{GameError, MsResult};
use crate::geo::{Coordinate, Location};
use crate::model::MemoryRecord;
use crate::scorer::Scorer;
use tracing::{debug, info, warn};

struct Round {
    record: MemoryRecord,
    location: Location,
}

pub struct GameController {
    scorer: Scorer,
    rng: fastrand::Rng,
    rounds: Vec<Round>,
    index: usize,
    score: u32,
    guess: Option<Coordinate>,
    phase: Phase,
    results: Vec<RoundResult>,
}

impl GameController {
    /// `seed` fixes the shuffle order; `None` shuffles differently every session.
    pub fn new(scorer: Scorer, seed: Option<u64>) -> Self {
        Self {
            scorer,
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
            rounds: Vec::new(),
            index: 0,
            score: 0,
            guess: None,
            phase: Phase::Loading,
            results: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> MsResult<Self> {
        Ok(Self::new(Scorer::new(&config.scoring)?, config.game.seed))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn guess(&self) -> Option<Coordinate> {
        self.guess
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// The memory on screen, while a round is being played or revealed.
    pub fn current_record(&self) -> Option<&MemoryRecord> {
        match self.phase {
            Phase::Playing | Phase::Result => self.rounds.get(self.index).map(|r| &r.record),
            _ => None,
        }
    }

    /// Distance and points of the round just scored. Only set in [`Phase::Result`].
    pub fn last_result(&self) -> Option<&RoundResult> {
        match self.phase {
            Phase::Result => self.results.last(),
            _ => None,
        }
    }

    /// `(round, of)` with a 1-based round number; `(0, 0)` when no session is running.
    pub fn progress(&self) -> (usize, usize) {
        if self.rounds.is_empty() {
            (0, 0)
        } else {
            ((self.index + 1).min(self.rounds.len()), self.rounds.len())
        }
    }

    pub fn summary(&self) -> Option<GameSummary> {
        if self.phase != Phase::Finished {
            return None;
        }
        let rounds = self.rounds.len();
        let average_score = if rounds == 0 {
            0
        } else {
            (f64::from(self.score) / rounds as f64).round() as u32
        };
        Some(GameSummary {
            rounds,
            total_score: self.score,
            average_score,
            results: self.results.clone(),
        })
    }

    /// Begins a session over the records that have a location, in shuffled order.
    /// With none eligible the game lands in [`Phase::NoEligibleRecords`].
    pub fn start(&mut self, records: Vec<MemoryRecord>) -> Result<(), GameError> {
        let total = records.len();
        let mut rounds: Vec<Round> = records
            .into_iter()
            .filter_map(|record| {
                let location = record.location.clone()?;
                Some(Round { record, location })
            })
            .collect();

        self.index = 0;
        self.score = 0;
        self.guess = None;
        self.results.clear();

        if rounds.is_empty() {
            warn!("Game: none of {} memories has a location", total);
            self.rounds.clear();
            self.phase = Phase::NoEligibleRecords;
            return Err(GameError::NoEligibleRecords);
        }

        self.rng.shuffle(&mut rounds);
        self.rounds = rounds;
        self.phase = Phase::Playing;
        info!("Game: {} rounds ({} memories skipped)", self.rounds.len(), total - self.rounds.len());
        Ok(())
    }

    /// Places or moves the map pin for the current round.
    pub fn register_guess(&mut self, guess: Coordinate) -> Result<(), GameError> {
        self.require_phase("register_guess", Phase::Playing)?;
        debug!("Game: guess {}", guess);
        self.guess = Some(guess);
        Ok(())
    }

    /// Scores the registered guess and reveals the answer.
    pub fn submit_guess(&mut self) -> Result<RoundResult, GameError> {
        self.require_phase("submit_guess", Phase::Playing)?;
        let guess = self.guess.ok_or(GameError::NoGuess)?;
        let round = self
            .rounds
            .get(self.index)
            .ok_or(GameError::NoEligibleRecords)?;

        let scored = self.scorer.score_guess(guess, round.location.point);
        let result = RoundResult {
            record_id: round.record.id.clone(),
            guess,
            actual: round.location.point,
            place: round.location.name.clone(),
            distance_km: scored.distance_km,
            points: scored.points,
        };
        debug!(
            "Game: round {} scored {} pts at {:.1} km",
            self.index + 1,
            result.points,
            result.distance_km
        );

        self.score += result.points;
        self.phase = Phase::Result;
        self.results.push(result.clone());
        Ok(result)
    }

    /// Leaves the reveal for the next round, or finishes after the last one.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        self.require_phase("advance", Phase::Result)?;
        self.guess = None;
        if self.index + 1 >= self.rounds.len() {
            self.phase = Phase::Finished;
            info!("Game: finished with {} points", self.score);
        } else {
            self.index += 1;
            self.phase = Phase::Playing;
        }
        Ok(self.phase)
    }

    /// Starts over with freshly fetched records. Only from a terminal phase.
    pub fn restart(&mut self, records: Vec<MemoryRecord>) -> Result<(), GameError> {
        match self.phase {
            Phase::Finished | Phase::NoEligibleRecords | Phase::LoadFailed => self.start(records),
            phase => {
                warn!("Game: restart refused while {}", phase);
                Err(GameError::WrongPhase {
                    operation: "restart",
                    phase,
                })
            }
        }
    }

    /// Records that fetching the player's memories failed.
    pub fn mark_load_failed(&mut self) {
        self.rounds.clear();
        self.results.clear();
        self.index = 0;
        self.score = 0;
        self.guess = None;
        self.phase = Phase::LoadFailed;
    }

    fn require_phase(&self, operation: &'static str, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            warn!("Game: {} refused while {}", operation, self.phase);
            Err(GameError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }
}
