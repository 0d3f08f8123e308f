//! InvestIQ CLI - Personal finance tracking backend
//!
//! Usage:
//!   investiq init                          Initialize database
//!   investiq serve --port 5000             Start the REST API
//!   investiq transactions add ...          Record a transaction
//!   investiq report summary                Monthly summary for the current month
//!   investiq ask "How is my budget?"       Canned financial advice

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
        Commands::Token { user, email, ttl } => {
            commands::cmd_token(&user, email.as_deref(), ttl)
        }
        Commands::Transactions { user, action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, &user, 20),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, &user, limit)
                }
                Some(TransactionsAction::Add {
                    amount,
                    kind,
                    category,
                    date,
                    description,
                }) => commands::cmd_transactions_add(
                    &db,
                    &user,
                    &amount,
                    &kind,
                    category,
                    date,
                    description,
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, &user, id)
                }
            }
        }
        Commands::Budgets { user, action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&db, &user),
                Some(BudgetsAction::Add {
                    category,
                    amount,
                    period,
                    start,
                    end,
                }) => commands::cmd_budgets_add(&db, &user, &category, &amount, period, start, end),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, &user, id),
            }
        }
        Commands::Report { user, json, report } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match report {
                ReportType::Summary { month, year } => {
                    commands::cmd_report_summary(&db, &user, month, year, json)
                }
                ReportType::Trends { months } => {
                    commands::cmd_report_trends(&db, &user, months, json)
                }
                ReportType::Budget => commands::cmd_report_budget(&db, &user, json),
            }
        }
        Commands::Ask { user, prompt } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_ask(&db, &user, &prompt.join(" "))
        }
    }
}
