use crate::reports;
use clap::Args;
use mindstamps::api;
use mindstamps::config::Config;
use mindstamps::error::{MindstampsError, MsResult};
use mindstamps::model::MemoryId;
use mindstamps::store::MemoryStore;

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long)]
    pub id: String,

    /// Page the memory is on; found automatically when left out.
    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub story: Option<String>,
}

pub async fn run<S: MemoryStore>(args: &EditArgs, store: S, user: &str, config: &Config) -> MsResult<()> {
    if args.title.is_none() && args.story.is_none() {
        return Err(MindstampsError::Validation(
            "Give --title and/or --story to change".to_string(),
        ));
    }

    let id = MemoryId::new(args.id.as_str());
    let mut journal = api::open_journal(store, user, config).await?;
    super::turn_to(&mut journal, &id, args.page);

    journal.start_edit(&id)?;
    if let Some(buffer) = journal.edit_buffer_mut() {
        if let Some(title) = &args.title {
            buffer.set_title(title.as_str());
        }
        if let Some(story) = &args.story {
            buffer.set_story(story.as_str());
        }
    }
    journal.save_buffer().await?;

    println!("Saved '{}'", id);
    reports::print_journal_page(&journal.page_view(), journal.records().len());
    Ok(())
}
