//! Customer management CLI - Database migrations and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! cms-cli migrate
//!
//! # Print every customer (passwords omitted)
//! cms-cli customers list
//!
//! # Print one customer
//! cms-cli customers show ada@example.com
//! ```
//!
//! Both commands read the same database settings as the server
//! (`DATABASE_URL`, or the `DB_*` parts).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cms-cli")]
#[command(author, version, about = "Customer management CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect stored customers
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },
}

#[derive(Subcommand)]
enum CustomersAction {
    /// List all customers ordered by id
    List,
    /// Show the customer with this email
    Show {
        /// Customer email address
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Customers { action } => match action {
            CustomersAction::List => commands::customers::list().await?,
            CustomersAction::Show { email } => commands::customers::show(&email).await?,
        },
    }
    Ok(())
}
