//! Hacker Stories CLI
//!
//! One-shot searches and an interactive line-based session.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hacker_stories::{
    error::{AppError, Result},
    models::{Config, Story, StoryId},
    services::{AlgoliaClient, SearchController},
    session::{Event, Session, StoriesView},
    storage::{FileStore, MemoryStore, PersistedPreference, PreferenceStore},
    stories::{Phase, SortKey, SortState, filter_by_term, sum_comments},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Hacker Stories - search the Hacker News story index
#[derive(Parser, Debug)]
#[command(name = "hacker-stories", version, about = "Search Hacker News stories")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "hacker-stories.toml", global = true)]
    config: PathBuf,

    /// Directory holding the preferences file
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Do not read or write the remembered search term
    #[arg(long, global = true)]
    no_persist: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search once and print the result list
    Search {
        /// Search term
        term: String,

        /// Column to order by: none, title, author, comments, points
        #[arg(long, default_value = "none")]
        sort: SortKey,

        /// Reverse the column order
        #[arg(long)]
        reverse: bool,

        /// Only keep stories whose title contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Interactive session: type to edit the search, `:help` for commands
    Interactive,

    /// Validate the configuration file
    Validate,

    /// Show configuration and the remembered search term
    Info,
}

/// Line typed into the interactive session.
#[derive(Debug)]
enum ReplCommand {
    Event(Event),
    Record(serde_json::Value),
    Show,
    Help,
    Quit,
}

/// What the interactive loop does after a command.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Render,
    Notice(String),
    Help,
    Quit,
}

const EMPTY_TERM: &str = "Search term is empty, type something to search for.";

const HELP: &str = "\
Type text to edit the search term. Commands:
  :submit            search for the current term
  :clear             clear the search term
  :sort <column>     title | author | comments | points (again to reverse), none to reset
  :remove <id>       dismiss a story
  :dispatch <json>   apply a raw {\"type\": ..., \"payload\": ...} action
  :show              redraw the list
  :quit              exit";

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn open_store(cli: &Cli, config: &Config) -> Arc<dyn PreferenceStore> {
    if cli.no_persist {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(
            cli.data_dir.join(&config.storage.preferences_file),
        ))
    }
}

async fn load_term(cli: &Cli, config: &Config) -> PersistedPreference {
    PersistedPreference::load(
        open_store(cli, config),
        &config.search.preference_key,
        &config.search.default_term,
    )
    .await
}

async fn build_session(cli: &Cli, config: &Config) -> Result<Session> {
    let controller = SearchController::from_config(config, load_term(cli, config).await)?;
    let source = Arc::new(AlgoliaClient::new(&config.api)?);
    Ok(Session::new(source, controller))
}

fn parse_line(line: &str) -> Result<ReplCommand> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Event(Event::Input(line.to_string())));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    let parsed = match name {
        "submit" | "s" => ReplCommand::Event(Event::Submit),
        "clear" => ReplCommand::Event(Event::Input(String::new())),
        "sort" => ReplCommand::Event(Event::Sort(arg.parse()?)),
        "remove" | "dismiss" if !arg.is_empty() => {
            ReplCommand::Event(Event::Remove(StoryId::new(arg)))
        }
        "dispatch" => ReplCommand::Record(serde_json::from_str(arg)?),
        "show" => ReplCommand::Show,
        "help" | "h" => ReplCommand::Help,
        "quit" | "q" => ReplCommand::Quit,
        _ => {
            return Err(AppError::validation(format!(
                "unrecognized command ':{command}', try :help"
            )));
        }
    };
    Ok(parsed)
}

/// Apply one interactive command to the session.
async fn handle_command(session: &mut Session, command: ReplCommand) -> Result<Outcome> {
    let outcome = match command {
        ReplCommand::Event(Event::Submit) if !session.controller().can_submit() => {
            Outcome::Notice(EMPTY_TERM.to_string())
        }
        ReplCommand::Event(event) => {
            session.handle(event).await;
            Outcome::Render
        }
        ReplCommand::Record(record) => {
            session.dispatch_record(&record)?;
            Outcome::Render
        }
        ReplCommand::Show => Outcome::Render,
        ReplCommand::Help => Outcome::Help,
        ReplCommand::Quit => Outcome::Quit,
    };
    Ok(outcome)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn print_stories(stories: &[Story]) {
    println!(
        "{:<40} {:<30} {:>10} {:>10}  {}",
        "Title", "Author", "Comments", "Points", "ID"
    );
    for story in stories {
        println!(
            "{:<40} {:<30} {:>10} {:>10}  {}",
            truncate(&story.title, 40),
            truncate(&story.author, 30),
            story.num_comments,
            story.points,
            story.object_id
        );
    }
}

fn render(view: &StoriesView) {
    println!();
    println!("Search: {}  (showing: {})", view.draft, view.committed_term);
    match view.phase {
        Phase::Loading => println!("Loading ..."),
        Phase::Failure => println!("Something went wrong ..."),
        Phase::Idle => println!("No search results yet."),
        Phase::Success => {}
    }
    let direction = if view.sort.is_reverse { " (reversed)" } else { "" };
    println!("Sorted by: {}{}", view.sort.key, direction);
    print_stories(&view.stories);
    println!("{} stories, {} comments", view.stories.len(), view.comment_total);
}

/// Search once and return the stories in display order, or `None` when
/// the term is empty and nothing was searched.
async fn search_once(
    session: &mut Session,
    term: &str,
    sort: SortState,
    filter: Option<&str>,
) -> Result<Option<Vec<Story>>> {
    session.handle(Event::Input(term.to_string())).await;
    if !session.controller().can_submit() {
        return Ok(None);
    }
    session.handle(Event::Submit).await;
    session.settle().await;
    session.set_sort(sort);

    let view = session.view();
    if view.is_error {
        return Err(AppError::fetch(term, "search request failed"));
    }

    let stories = match filter {
        Some(text) => filter_by_term(&view.stories, text),
        None => view.stories,
    };
    Ok(Some(stories))
}

async fn run_search(
    mut session: Session,
    term: String,
    sort: SortKey,
    reverse: bool,
    filter: Option<String>,
) -> Result<()> {
    let sort = SortState::new(sort, reverse);
    let stories = match search_once(&mut session, &term, sort, filter.as_deref()).await {
        Ok(Some(stories)) => stories,
        Ok(None) => {
            println!("{EMPTY_TERM}");
            return Ok(());
        }
        Err(e) => {
            println!("Something went wrong ...");
            return Err(e);
        }
    };

    print_stories(&stories);
    println!("{} stories, {} comments", stories.len(), sum_comments(&stories));
    Ok(())
}

async fn run_interactive(mut session: Session) -> Result<()> {
    println!("{HELP}");
    session.start();
    render(&session.view());

    let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = stdin.next_line().await {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let command = match parse_line(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match handle_command(&mut session, command).await? {
                    Outcome::Render => render(&session.view()),
                    Outcome::Notice(text) => println!("{text}"),
                    Outcome::Help => println!("{HELP}"),
                    Outcome::Quit => break,
                }
            }
            _ = session.step() => render(&session.view()),
        }
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match &cli.command {
        Command::Search {
            term,
            sort,
            reverse,
            filter,
        } => {
            let session = build_session(&cli, &config).await?;
            run_search(session, term.clone(), *sort, *reverse, filter.clone()).await?;
        }

        Command::Interactive => {
            let session = build_session(&cli, &config).await?;
            run_interactive(session).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            println!("Config file: {}", cli.config.display());
            println!("Endpoint: {}", config.api.base_url);
            if cli.no_persist {
                println!("Preferences: disabled");
            } else {
                println!(
                    "Preferences: {}",
                    cli.data_dir.join(&config.storage.preferences_file).display()
                );
            }
            let term = load_term(&cli, &config).await;
            println!("Search term ({}): {}", term.key(), term.value());
        }
    }

    Ok(())
}
