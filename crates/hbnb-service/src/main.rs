//! HBnB operator CLI
//!
//! Thin caller of the facade for administration and inspection.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use hbnb_service::models::NewAdmin;
use hbnb_service::{build_facade, telemetry, token_issuer, Config, Facade};

#[derive(Parser)]
#[command(name = "hbnb")]
#[command(about = "HBnB - property rental backend administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a token's signature and expiry
    VerifyToken {
        token: String,
    },

    #[command(flatten)]
    Storage(StorageCommand),
}

/// Commands that read or write the configured storage
#[derive(Subcommand)]
enum StorageCommand {
    /// Create the administrator account (promotes an existing email)
    CreateAdmin {
        #[arg(long, default_value = "Admin")]
        first_name: String,
        #[arg(long, default_value = "HBnB")]
        last_name: String,
        #[arg(long, env = "HBNB_ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "HBNB_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Exchange credentials for an access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HBNB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List users (test accounts excluded)
    Users,

    /// List amenities
    Amenities,

    /// List places
    Places {
        /// Only places owned by this user
        #[arg(long)]
        owner: Option<String>,
    },

    /// Show one place with owner, amenities and reviews
    Place {
        id: String,
    },

    /// List reviews
    Reviews {
        /// Only reviews of this place
        #[arg(long, conflicts_with = "user")]
        place: Option<String>,
        /// Only reviews written by this user
        #[arg(long)]
        user: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Invalid configuration")?;
    telemetry::init(&config.log_filter);
    tracing::debug!("Loaded {:?}", config);

    let command = match cli.command {
        Commands::VerifyToken { token } => return cmd_verify_token(&config, &token),
        Commands::Storage(command) => command,
    };

    let facade = build_facade(&config)
        .await
        .with_context(|| format!("Failed to open storage at {}", config.database_url))?;

    run(&facade, command).await
}

async fn run(facade: &Facade, command: StorageCommand) -> Result<()> {
    match command {
        StorageCommand::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => {
            let admin = facade
                .provision_admin(NewAdmin {
                    first_name,
                    last_name,
                    email,
                    password,
                })
                .await?;
            print_json(&admin)
        }
        StorageCommand::Login { email, password } => match facade.authenticate(&email, &password).await? {
            Some(token) => print_json(&token),
            None => bail!("Invalid credentials"),
        },
        StorageCommand::Users => print_json(&facade.get_users().await?),
        StorageCommand::Amenities => print_json(&facade.get_all_amenities().await?),
        StorageCommand::Places { owner: None } => print_json(&facade.get_all_places().await?),
        StorageCommand::Places { owner: Some(owner) } => match facade.get_places_by_owner(&owner).await? {
            Some(places) => print_json(&places),
            None => bail!("User {} not found", owner),
        },
        StorageCommand::Place { id } => match facade.get_place_details(&id).await? {
            Some(details) => print_json(&details),
            None => bail!("Place {} not found", id),
        },
        StorageCommand::Reviews { place: Some(place), .. } => {
            match facade.get_reviews_by_place(&place).await? {
                Some(reviews) => print_json(&reviews),
                None => bail!("Place {} not found", place),
            }
        }
        StorageCommand::Reviews { user: Some(user), .. } => match facade.get_reviews_by_user(&user).await? {
            Some(reviews) => print_json(&reviews),
            None => bail!("User {} not found", user),
        },
        StorageCommand::Reviews { .. } => print_json(&facade.get_all_reviews().await?),
    }
}

fn cmd_verify_token(config: &Config, token: &str) -> Result<()> {
    let claims = token_issuer(config)
        .verify(token)
        .context("Token rejected")?;
    print_json(&claims)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
