use clap::Args;
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::store::{import, MemoryStore};
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub config: Config,

    /// CSV with a `title,story,lat,lng,place` header.
    #[arg(long)]
    pub csv: PathBuf,
}

pub async fn run<S: MemoryStore>(args: &ImportArgs, store: &S, user: &str) -> MsResult<()> {
    info!("📂 Importing from: {}", args.csv.display());
    let report = import::read_memories(File::open(&args.csv)?)?;

    let mut imported = 0;
    for memory in report.memories {
        store.create(user, memory).await?;
        imported += 1;
    }

    println!("Imported {} memories ({} skipped)", imported, report.skipped);
    Ok(())
}
