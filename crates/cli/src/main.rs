//! IQ GeoSpatial CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! iqgs-cli migrate
//!
//! # Create a user (profile provisioned automatically)
//! iqgs-cli user create -e admin@iqgeospatial.com -p 'a-strong-password' -r admin
//!
//! # Change a user's role
//! iqgs-cli user set-role -e someone@example.com -r superuser
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create a user with a role
//! - `user set-role` - Update an existing user's role

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "iqgs-cli")]
#[command(author, version, about = "IQ GeoSpatial CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`user`, `admin`, `superuser`)
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// Update an existing user's role
    SetRole {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`user`, `admin`, `superuser`)
        #[arg(short, long)]
        role: String,
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
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                role,
            } => {
                commands::user::create(&email, &password, &role).await?;
            }
            UserAction::SetRole { email, role } => {
                commands::user::set_role(&email, &role).await?;
            }
        },
    }
    Ok(())
}
