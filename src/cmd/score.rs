use crate::reports;
use clap::Args;
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::geo::Coordinate;
use mindstamps::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Guessed point as "lat,lng".
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Coordinate,

    /// True point as "lat,lng".
    #[arg(long, allow_hyphen_values = true)]
    pub actual: Coordinate,
}

pub fn run(args: &ScoreArgs, config: &Config) -> MsResult<()> {
    let scorer = Scorer::new(&config.scoring)?;
    let scored = scorer.score_guess(args.guess, args.actual);
    reports::print_guess(args.guess, args.actual, &scored, &scorer);
    Ok(())
}
