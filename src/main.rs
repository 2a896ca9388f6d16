//! Terminal front end for cinesearch.
//!
//! A line-oriented shim that drives the library the way a UI would: one
//! command per line on stdin, plain text on stdout. Logs go to the rotating
//! file in the data directory, never to the terminal.
//!
//! # Commands
//!
//! - `search <text>`: run a fresh search
//! - `more`: load the next page of the current results
//! - `details <n|id>`: show the full record of result `n` (1-based) or an id
//! - `fav <n|id>`: toggle a favorite
//! - `favs`: list favorites
//! - `help`: list commands
//! - `quit`: exit
//!
//! # Usage
//!
//! ```text
//! cinesearch [CONFIG_FILE]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use cinesearch::app::{load_details, SkipReason};
use cinesearch::{initialize, App, Config, FetchOutcome, MovieSummary};

const HELP: &str = "\
commands:
  search <text>    search the catalog
  more             load the next page
  details <n|id>   show a title
  fav <n|id>       toggle a favorite
  favs             list favorites
  help             show this list
  quit             exit";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    More,
    Details(String),
    Favorite(String),
    Favorites,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        match head {
            "" => Self::Empty,
            "search" | "s" => Self::Search(rest.to_string()),
            "more" | "m" => Self::More,
            "details" | "d" if !rest.is_empty() => Self::Details(rest.to_string()),
            "fav" | "f" if !rest.is_empty() => Self::Favorite(rest.to_string()),
            "favs" => Self::Favorites,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cinesearch: {e}");
            return ExitCode::FAILURE;
        }
    };

    cinesearch::observability::init_tracing(&config);

    let mut app = match initialize(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("cinesearch: {e}");
            return ExitCode::FAILURE;
        }
    };

    let loaded = app.favorites.load().await;
    tracing::info!(favorites = loaded, "cinesearch started");

    println!("cinesearch: {loaded} favorite(s). Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if let Err(e) = write_prompt(&mut stdout).await {
            tracing::error!(error = %e, "failed to write to stdout");
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        };

        match Command::parse(&line) {
            Command::Quit => break,
            command => run_command(&mut app, command).await,
        }
    }

    tracing::info!("cinesearch exiting");
    ExitCode::SUCCESS
}

async fn write_prompt<W: AsyncWrite + Unpin>(out: &mut W) -> std::io::Result<()> {
    out.write_all(b"> ").await?;
    out.flush().await
}

async fn run_command(app: &mut App, command: Command) {
    match command {
        Command::Search(text) => {
            app.search.set_query(text);
            let outcome = app.search.run_search().await;
            report(app, &outcome, true);
        }
        Command::More => {
            let before = app.search.len();
            let outcome = app.search.load_next_page().await;
            report(app, &outcome, false);
            print_results(app, before);
        }
        Command::Details(target) => {
            let Some(id) = resolve(app, &target).map(|movie| movie.id) else {
                println!("no such result: {target}");
                return;
            };
            match load_details(app.search.catalog(), &id).await {
                Some(detail) => {
                    println!("{}", detail.title());
                    println!("  {}", detail.meta_line());
                    if !detail.genre.is_empty() {
                        println!("  {}", detail.genre);
                    }
                    println!();
                    println!("  {}", detail.plot);
                    for rating in &detail.ratings {
                        println!("  {}: {}", rating.source, rating.value);
                    }
                    if app.favorites.is_favorite(detail.id()) {
                        println!("  [favorite]");
                    }
                }
                None => println!("could not load details for {id}"),
            }
        }
        Command::Favorite(target) => {
            let Some(movie) = resolve(app, &target) else {
                println!("no such result: {target}");
                return;
            };
            match app.favorites.toggle(&movie).await {
                Ok(true) => println!("added {} to favorites", movie.title),
                Ok(false) => println!("removed {} from favorites", movie.title),
                Err(e) => println!("favorite changed but not saved: {e}"),
            }
        }
        Command::Favorites => {
            if app.favorites.is_empty() {
                println!("no favorites yet");
            }
            for movie in app.favorites.favorites() {
                println!("  {} ({}) {}", movie.title, movie.year, movie.id);
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Empty | Command::Quit => {}
        Command::Unknown(line) => println!("unknown command: {line} (try `help`)"),
    }
}

/// Resolves a 1-based result number, or an id from results or favorites.
fn resolve(app: &App, target: &str) -> Option<MovieSummary> {
    if let Ok(n) = target.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| app.search.item(i));
    }

    app.search
        .items()
        .into_iter()
        .find(|m| m.id == target)
        .or_else(|| {
            app.favorites
                .favorites()
                .iter()
                .find(|m| m.id == target)
                .cloned()
        })
}

fn report(app: &App, outcome: &FetchOutcome, fresh: bool) {
    match outcome {
        FetchOutcome::Applied { .. } if fresh => print_results(app, 0),
        FetchOutcome::Applied { .. } | FetchOutcome::Stale => {}
        FetchOutcome::NoResults if fresh => {
            println!("no results for \"{}\"", app.search.query().trim());
        }
        FetchOutcome::NoResults => println!("no more results"),
        FetchOutcome::Failed(message) => println!("search failed: {message}"),
        FetchOutcome::Skipped(SkipReason::BlankQuery) => println!("enter something to search for"),
        FetchOutcome::Skipped(SkipReason::Busy) => println!("a search is already running"),
        FetchOutcome::Skipped(SkipReason::Exhausted) => println!("no more results"),
    }
}

/// Prints results from index `from` onward plus a paging footer.
fn print_results(app: &App, from: usize) {
    let items = app.search.items();
    for (i, movie) in items.iter().enumerate().skip(from) {
        let star = if app.favorites.is_favorite(&movie.id) { "*" } else { " " };
        println!("{star}{:>3}. {} ({})", i + 1, movie.title, movie.year);
    }
    if from < items.len() {
        println!(
            "  showing {} of {}{}",
            items.len(),
            app.search.total_available(),
            if app.search.has_more() { ", `more` for next page" } else { "" }
        );
    }
}
