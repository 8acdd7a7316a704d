use colored::Colorize;
use moviedex::api::{CmdMessage, MessageLevel, RatingStats};
use moviedex::model::Movie;
use std::path::PathBuf;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(err: &impl std::fmt::Display) {
    println!("{}", err.to_string().red());
}

/// `Title (year): rating`, with notes appended when present.
pub(super) fn list_line(movie: &Movie) -> String {
    let mut line = format!("{} ({}): {}", movie.title, movie.release_year, movie.rating);
    if movie.has_notes() {
        line.push_str(&format!(" (notes: {})", movie.notes));
    }
    line
}

pub(super) fn short_line(movie: &Movie) -> String {
    format!("{}, {}", movie.title, movie.rating)
}

pub(super) fn ranked_line(movie: &Movie) -> String {
    format!("{} ({}) - {}", movie.title, movie.release_year, movie.rating)
}

pub(super) fn print_movies(movies: &[Movie], line: fn(&Movie) -> String) {
    for movie in movies {
        println!("{}", line(movie));
    }
}

pub(super) fn stats_lines(stats: &RatingStats) -> Vec<String> {
    vec![
        format!("Average rating: {:.2}", stats.mean),
        format!("Median rating: {:.2}", stats.median),
        format!("Best movie: {}", short_line(&stats.best)),
        format!("Worst movie: {}", short_line(&stats.worst)),
    ]
}

pub(super) fn print_stats(stats: &RatingStats) {
    for line in stats_lines(stats) {
        println!("{}", line);
    }
}

pub(super) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display().to_string().dimmed());
    }
}
