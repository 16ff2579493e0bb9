use clap::Args;
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::store::{samples, MemoryStore};

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    #[command(flatten)]
    pub config: Config,

    /// Delete the user's existing memories first.
    #[arg(long, default_value_t = false)]
    pub replace: bool,
}

pub async fn run<S: MemoryStore>(args: &SeedArgs, store: &S, user: &str, config: &Config) -> MsResult<()> {
    let seed = config.game.seed;
    if args.replace {
        let report = samples::replace_with_samples(store, user, seed).await?;
        println!(
            "Replaced {} memories with {} samples for '{}'",
            report.deleted, report.added, user
        );
    } else {
        let added = samples::load_samples(store, user, seed).await?;
        println!("Added {} sample memories for '{}'", added, user);
    }
    Ok(())
}
