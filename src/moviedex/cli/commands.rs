//! # CLI Layer
//!
//! The interactive menu is **one possible UI client** for moviedex. All
//! behavior lives behind `MovieApi`; this layer only:
//! - Parses arguments and loads configuration (`.env`, environment, flags)
//! - Picks the storage backend for the data file
//! - Runs the menu loop, prompting for per-action input
//! - Formats `CmdResult`s for the terminal
//!
//! ## Error Handling
//!
//! Failing to open the data file at startup is fatal and reaches `main`,
//! which prints it and exits 1. Once the loop is running, a failed action
//! is printed and the menu comes back.

use super::menu::{Action, Prompter};
use super::print::{
    list_line, print_error, print_messages, print_movies, print_paths, print_stats, ranked_line,
    short_line,
};
use super::setup::{Cli, StorageFormat};
use clap::Parser;
use moviedex::api::{CmdResult, MovieApi};
use moviedex::config::MovieConfig;
use moviedex::error::Result;
use moviedex::fetch::OmdbSource;
use moviedex::store::csv::CsvStore;
use moviedex::store::json::JsonStore;
use moviedex::store::MovieStore;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.storage_format();
    let config = MovieConfig::from_env()?.with_template_path(cli.template);
    let source = Box::new(OmdbSource::new(&config)?);
    tracing::debug!(file = %cli.file.display(), ?format, "starting session");

    match format {
        StorageFormat::Json => {
            let store = JsonStore::new(cli.file, source);
            session(MovieApi::new(store).with_template(config.template_path))
        }
        StorageFormat::Csv => {
            let store = CsvStore::new(cli.file, source);
            session(MovieApi::new(store).with_template(config.template_path))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "moviedex=debug" } else { "moviedex=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn session<S: MovieStore>(mut api: MovieApi<S>) -> Result<()> {
    let count = api.open()?;
    tracing::info!(count, file = %api.data_file().display(), "collection loaded");

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    loop {
        let action = prompter.choose()?;
        if action == Action::Exit {
            println!("bye!");
            return Ok(());
        }

        if let Err(e) = dispatch(&mut api, &mut prompter, action) {
            print_error(&e);
        }

        if prompter.at_eof() {
            println!("bye!");
            return Ok(());
        }
    }
}

fn dispatch<S, R, W>(
    api: &mut MovieApi<S>,
    prompter: &mut Prompter<R, W>,
    action: Action,
) -> Result<()>
where
    S: MovieStore,
    R: BufRead,
    W: Write,
{
    match action {
        Action::Exit => Ok(()),
        Action::List => {
            let result = api.list_movies()?;
            print_messages(&result.messages);
            print_movies(&result.listed_movies, list_line);
            Ok(())
        }
        Action::Add => {
            let title = prompter.prompt("Enter new movie name: ")?;
            report(&api.add_movie(&title)?);
            Ok(())
        }
        Action::Delete => {
            let title = prompter.prompt("Enter movie name to delete: ")?;
            report(&api.delete_movie(&title)?);
            Ok(())
        }
        Action::Update => {
            let title = prompter.prompt("Enter movie name: ")?;
            let notes = prompter.prompt("Please write notes: ")?;
            report(&api.update_movie(&title, &notes)?);
            Ok(())
        }
        Action::Stats => {
            let result = api.stats()?;
            if let Some(stats) = &result.stats {
                print_stats(stats);
            }
            Ok(())
        }
        Action::Random => {
            let result = api.random_movie()?;
            for movie in &result.listed_movies {
                println!("Your movie for tonight: {}", short_line(movie));
            }
            Ok(())
        }
        Action::Search => {
            let term = prompter.prompt("Enter part of movie name: ")?;
            let result = api.search_movies(&term)?;
            print_movies(&result.listed_movies, short_line);
            print_messages(&result.messages);
            Ok(())
        }
        Action::SortByRating => {
            let result = api.movies_by_rating()?;
            print_movies(&result.listed_movies, ranked_line);
            Ok(())
        }
        Action::Histogram => {
            let name = prompter.prompt("Save histogram under what file name: ")?;
            report(&api.rating_histogram(&name)?);
            Ok(())
        }
        Action::Website => {
            let result = api.generate_website()?;
            report(&result);
            print_paths(&result.output_paths);
            Ok(())
        }
    }
}

fn report(result: &CmdResult) {
    print_messages(&result.messages);
    for movie in &result.affected_movies {
        tracing::debug!(title = %movie.title, year = movie.release_year, "affected");
    }
}
