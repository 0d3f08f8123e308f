//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default user for data commands; matches the server's `--no-auth` identity
pub const DEFAULT_USER: &str = "local-dev";

/// InvestIQ - Track income, expenses and budgets
#[derive(Parser)]
#[command(name = "investiq")]
#[command(about = "Personal finance tracking backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "investiq.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set INVESTIQ_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// Every request runs as the "local-dev" user.
        #[arg(long)]
        no_auth: bool,
    },

    /// Mint a development bearer token signed with INVESTIQ_JWT_SECRET
    Token {
        /// User id to put in the token subject
        #[arg(short, long)]
        user: String,

        /// Optional email claim
        #[arg(long)]
        email: Option<String>,

        /// Lifetime in seconds
        #[arg(long, default_value = "3600")]
        ttl: u64,
    },

    /// Manage transactions (list, add, delete)
    Transactions {
        /// User the transactions belong to
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,

        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage budgets (list, add, delete)
    Budgets {
        /// User the budgets belong to
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,

        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Generate reports
    Report {
        /// User to report on
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,

        /// Print the report as JSON (same shape as the API)
        #[arg(long)]
        json: bool,

        #[command(subcommand)]
        report: ReportType,
    },

    /// Ask the assistant a question about your finances
    Ask {
        /// User whose data the answer is based on
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,

        /// The question, e.g. "how is my budget?"
        #[arg(required = true, trailing_var_arg = true)]
        prompt: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a transaction
    Add {
        /// Amount (non-negative; the type gives the direction)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Category name
        #[arg(short, long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List,

    /// Create a budget
    Add {
        /// Category the budget applies to (matched exactly)
        #[arg(short, long)]
        category: String,

        /// Budgeted amount per month
        #[arg(short, long)]
        amount: String,

        /// Free-text period label, e.g. "monthly"
        #[arg(long)]
        period: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expenses and category breakdown for one month
    Summary {
        /// Month (1-12), defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Expenses per month, oldest first
    Trends {
        /// Number of months including the current one
        #[arg(short, long, default_value = "6")]
        months: u32,
    },

    /// Each budget against this month's spending
    Budget,
}
