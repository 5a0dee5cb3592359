//! Bistro CLI - Cart and menu tools.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product to the file-backed cart
//! bistro-cli cart add --id burger --name "Classic Burger" --price 9.50
//!
//! # Adjust or remove a line
//! bistro-cli cart qty burger -1
//! bistro-cli cart remove burger
//!
//! # Inspect the cart
//! bistro-cli cart show
//! bistro-cli cart fields
//!
//! # Validate a menu file before deploying it
//! bistro-cli menu check crates/storefront/content/menu.yaml
//! ```
//!
//! # Commands
//!
//! - `cart` - Drive a cart stored in a JSON file (same format as the session slot)
//! - `menu check` - Validate a menu YAML file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "bistro-cli")]
#[command(author, version, about = "Bistro CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage a file-backed cart
    Cart {
        /// File holding the serialized cart
        #[arg(long, env = "BISTRO_CART_FILE", default_value = ".bistro-cart.json")]
        cart_file: PathBuf,

        #[command(subcommand)]
        action: CartAction,
    },
    /// Work with menu files
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. `9.50`
        #[arg(long)]
        price: String,

        /// Image reference
        #[arg(long)]
        img: Option<String>,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Adjust a line's quantity by a signed delta
    Qty {
        /// Product id
        id: String,

        /// Quantity change, e.g. `1` or `-1`
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Print the summary, item count, and total
    Show,
    /// Print the hidden order form fields as JSON
    Fields,
}

#[derive(Subcommand)]
enum MenuAction {
    /// Validate a menu YAML file
    Check {
        /// Path to the menu file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bistro_cli=info,bistro_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { cart_file, action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                img,
            } => commands::cart::add(&cart_file, &id, &name, &price, img)?,
            CartAction::Remove { id } => commands::cart::remove(&cart_file, &id)?,
            CartAction::Qty { id, delta } => commands::cart::qty(&cart_file, &id, delta)?,
            CartAction::Show => commands::cart::show(&cart_file),
            CartAction::Fields => commands::cart::fields(&cart_file)?,
        },
        Commands::Menu { action } => match action {
            MenuAction::Check { file } => commands::menu::check(&file).await?,
        },
    }
    Ok(())
}
