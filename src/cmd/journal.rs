use crate::reports;
use clap::Args;
use mindstamps::api;
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::store::MemoryStore;

#[derive(Args, Debug, Clone)]
pub struct JournalArgs {
    #[command(flatten)]
    pub config: Config,

    /// 1-based page; out-of-range pages show the last one.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub async fn run<S: MemoryStore>(args: &JournalArgs, store: S, user: &str, config: &Config) -> MsResult<()> {
    let mut journal = api::open_journal(store, user, config).await?;
    journal.go_to_page(args.page.saturating_sub(1));
    reports::print_journal_page(&journal.page_view(), journal.records().len());
    Ok(())
}
