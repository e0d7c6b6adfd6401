use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quotes", version)]
#[command(about = "Random, filtered and rated quotes from a JSON collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $QUOTES_HOME, then the platform data dir)
    #[arg(short, long, global = true, env = "QUOTES_HOME")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Id,
    Author,
    Rating,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a random quote
    #[command(alias = "r")]
    Random {
        /// Only pick from this category (exact, case-sensitive)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List quotes a page at a time
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Quotes per page (1-50, defaults to the configured per-page)
        #[arg(long, allow_negative_numbers = true)]
        per_page: Option<i64>,

        /// Only list this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort key
        #[arg(short, long, value_enum, default_value_t = SortArg::Id)]
        sort: SortArg,

        /// Sort order
        #[arg(short, long, value_enum, default_value_t = OrderArg::Asc)]
        order: OrderArg,
    },

    /// Add a quote
    #[command(alias = "n")]
    Add {
        /// Quote text (at most 500 characters)
        text: String,

        /// Author (at most 100 characters)
        author: String,

        /// Category
        category: String,
    },

    /// Query quotes as JSON
    #[command(alias = "q")]
    Query {
        /// Category (exact, case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Author substring (case-insensitive)
        #[arg(short, long)]
        author: Option<String>,

        /// Return a single random match
        #[arg(short, long)]
        random: bool,

        /// Maximum number of quotes
        #[arg(short, long)]
        limit: Option<usize>,

        /// Quotes to skip
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },

    /// Rate a quote from 1 to 5 by its position in the collection
    Rate {
        /// Position of the quote (as shown by `quotes list`)
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// Rating, 1-5
        #[arg(allow_negative_numbers = true)]
        rating: i64,
    },

    /// List categories
    #[command(alias = "cats")]
    Categories,

    /// Get or set configuration
    Config {
        /// Configuration key (store-file, write-mode, serialize-writes, per-page)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
