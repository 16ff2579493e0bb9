use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use mindstamps::config::Config;
use mindstamps::error::MsResult;
use mindstamps::store::JsonFileStore;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/memories.json")]
    store: String,

    #[arg(global = true, short, long, default_value = "local")]
    user: String,

    /// JSON settings file; flags typed on the command line win over it.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Distance and points for one guess.
    Score(cmd::score::ScoreArgs),
    /// Add the built-in sample memories.
    Seed(cmd::seed::SeedArgs),
    /// Import memories from a CSV file.
    Import(cmd::import::ImportArgs),
    /// Show one journal page.
    Journal(cmd::journal::JournalArgs),
    /// Change the title or story of a memory.
    Edit(cmd::edit::EditArgs),
    /// Delete a memory.
    Delete(cmd::delete::DeleteArgs),
    /// Play the guessing game with scripted guesses.
    Play(cmd::play::PlayArgs),
}

impl Commands {
    fn config(&self) -> &Config {
        match self {
            Commands::Score(a) => &a.config,
            Commands::Seed(a) => &a.config,
            Commands::Import(a) => &a.config,
            Commands::Journal(a) => &a.config,
            Commands::Edit(a) => &a.config,
            Commands::Delete(a) => &a.config,
            Commands::Play(a) => &a.config,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    // Subcommand flags live in the subcommand's matches, not the root.
    let sub_matches = matches.subcommand().map_or(&matches, |(_, m)| m);

    let config = match resolve_config(&cli, sub_matches) {
        Ok(c) => c,
        Err(e) => {
            error!("❌ {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(cli, config).await {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn resolve_config(cli: &Cli, sub_matches: &clap::ArgMatches) -> MsResult<Config> {
    let cli_config = cli.command.config();
    let config = match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli, config: Config) -> MsResult<()> {
    let store = JsonFileStore::new(&cli.store);
    let user = cli.user.as_str();

    match cli.command {
        Commands::Score(args) => cmd::score::run(&args, &config),
        Commands::Seed(args) => cmd::seed::run(&args, &store, user, &config).await,
        Commands::Import(args) => cmd::import::run(&args, &store, user).await,
        Commands::Journal(args) => cmd::journal::run(&args, store, user, &config).await,
        Commands::Edit(args) => cmd::edit::run(&args, store, user, &config).await,
        Commands::Delete(args) => cmd::delete::run(&args, store, user, &config).await,
        Commands::Play(args) => cmd::play::run(&args, &store, user, &config).await,
    }
}
