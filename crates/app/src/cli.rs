use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Budgets, categories, savings goals and transactions on the hosted record service"
)]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the record service URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the project id (the public key is never read from CLI).
    #[arg(long, global = true)]
    pub project_id: Option<String>,
    /// Override the log level.
    #[arg(long, global = true)]
    pub level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Budgets {
        #[command(subcommand)]
        action: Action,
    },
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    SavingsGoals {
        #[command(subcommand)]
        action: Action,
    },
    Transactions {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Up to 100 records in their usual order.
    List,
    Get {
        id: String,
    },
    Create {
        /// JSON object with the new values, or `-` to read it from stdin.
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        /// JSON object with the new values, or `-` to read it from stdin.
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryAction {
    #[command(flatten)]
    Common(Action),
    /// Categories of one type, e.g. `income` or `expense`.
    ByType { kind: String },
}
