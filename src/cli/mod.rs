//! CLI module - Command-line interface for cinefind
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// cinefind - Movie discovery from the terminal
/// Search TMDB, follow trending searches and keep a list of favorites
#[derive(Parser)]
#[command(name = "cinefind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List popular movies
    #[command(alias = "p")]
    Popular,

    /// Show the most searched terms
    #[command(alias = "t")]
    Trending,

    /// Show the detail page of a movie
    #[command(alias = "i")]
    Info {
        /// Movie ID
        id: String,
    },

    /// Manage favorites
    #[command(alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: Option<FavoritesCommands>,
    },

    /// Interactive search; each line of input is a new search term
    #[command(alias = "b")]
    Browse,

    /// Start the JSON API server
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List favorite movies
    #[command(alias = "ls")]
    List,
    /// Add a movie to favorites
    Add {
        /// Movie ID
        id: String,
    },
    /// Remove a movie from favorites
    #[command(alias = "rm")]
    Remove {
        /// Movie ID
        id: String,
    },
    /// Add the movie if it is not a favorite, remove it otherwise
    Toggle {
        /// Movie ID
        id: String,
    },
}

pub use commands::*;
