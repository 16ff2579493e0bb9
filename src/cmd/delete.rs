use crate::reports;
use clap::Args;
use mindstamps::api;
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::model::MemoryId;
use mindstamps::store::MemoryStore;

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long)]
    pub id: String,

    /// Page the memory is on; found automatically when left out.
    #[arg(long)]
    pub page: Option<usize>,
}

pub async fn run<S: MemoryStore>(args: &DeleteArgs, store: S, user: &str, config: &Config) -> MsResult<()> {
    let id = MemoryId::new(args.id.as_str());
    let mut journal = api::open_journal(store, user, config).await?;
    super::turn_to(&mut journal, &id, args.page);

    // Running the command is the confirmation.
    journal.start_edit(&id)?;
    journal.delete_record(&id).await?;

    println!("Deleted '{}'", id);
    reports::print_journal_page(&journal.page_view(), journal.records().len());
    Ok(())
}
