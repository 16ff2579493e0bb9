use crate::reports;
use clap::Args;
use mindstamps::api;
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::game::{GameController, Phase};
use mindstamps::geo::Coordinate;
use mindstamps::store::MemoryStore;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: Config,

    /// One "lat,lng" per round, separated by ';'.
    #[arg(long, allow_hyphen_values = true)]
    pub guesses: String,
}

fn parse_guesses(s: &str) -> MsResult<Vec<Coordinate>> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::parse)
        .collect()
}

pub async fn run<S: MemoryStore>(args: &PlayArgs, store: &S, user: &str, config: &Config) -> MsResult<()> {
    let guesses = parse_guesses(&args.guesses)?;
    let mut game = GameController::from_config(config)?;
    api::start_game(store, user, &mut game).await?;

    let mut guesses = guesses.into_iter();
    let mut played = Vec::new();

    while game.phase() == Phase::Playing {
        let Some(guess) = guesses.next() else {
            let (round, of) = game.progress();
            warn!("Out of guesses at round {} of {}", round, of);
            break;
        };
        game.register_guess(guess)?;
        played.push(game.submit_guess()?);
        game.advance()?;
    }

    reports::print_rounds(&played);
    if let Some(summary) = game.summary() {
        reports::print_summary(&summary);
    }
    Ok(())
}
