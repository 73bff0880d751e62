//! Hexcart CLI - the shop page from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! hexcart products
//!
//! # Add a product and show the cart
//! hexcart add <product-id>
//!
//! # Step a cart line up or down
//! hexcart inc <item-id>
//! hexcart dec <item-id>
//!
//! # Submit an order
//! hexcart order --name Ada --tel 0912345678 --email ada@example.com \
//!     --address Taipei --payment ATM
//! ```
//!
//! # Environment Variables
//!
//! - `HEXCART_API_PATH` - Shop identifier in the API path (required)
//! - `HEXCART_API_BASE` - API base URL (optional)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use hexcart_core::OrderUser;
use hexcart_storefront::config::DEFAULT_API_BASE;

mod commands;

use commands::shop::{self, ShopCommand};

#[derive(Parser)]
#[command(name = "hexcart")]
#[command(author, version, about = "Hexcart shop from the terminal")]
struct Cli {
    /// Shop identifier in the API path
    #[arg(long, env = "HEXCART_API_PATH")]
    api_path: String,

    /// Base URL of the cart service
    #[arg(long, env = "HEXCART_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show the cart
    Cart,
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        product_id: String,
    },
    /// Increase a cart line by one
    Inc {
        /// Cart item ID
        id: String,
    },
    /// Decrease a cart line by one (never below one)
    Dec {
        /// Cart item ID
        id: String,
    },
    /// Remove a cart line
    Delete {
        /// Cart item ID
        id: String,
    },
    /// Remove every cart line
    Clear,
    /// Submit an order for the current cart
    Order {
        #[arg(long)]
        name: String,
        #[arg(long)]
        tel: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
        /// Payment method (ATM, Credit card, Convenience store)
        #[arg(long, default_value = "ATM")]
        payment: String,
    },
}

impl From<Commands> for ShopCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Products { category } => Self::Products { category },
            Commands::Cart => Self::Cart,
            Commands::Add { product_id } => Self::Add { product_id },
            Commands::Inc { id } => Self::Increment { id },
            Commands::Dec { id } => Self::Decrement { id },
            Commands::Delete { id } => Self::Delete { id },
            Commands::Clear => Self::Clear,
            Commands::Order {
                name,
                tel,
                email,
                address,
                payment,
            } => Self::Order {
                user: OrderUser {
                    name,
                    tel,
                    email,
                    address,
                    payment,
                },
            },
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexcart_cli=info,hexcart_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = shop::run(&cli.api_base, &cli.api_path, cli.command.into()).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
