//! Sellerdesk CLI - operator tools against the marketplace admin API.
//!
//! # Usage
//!
//! ```bash
//! # Verify credentials and show the seller's approval state
//! sd-cli login -e seller@example.com
//!
//! # List the seller's orders
//! sd-cli orders list -e seller@example.com
//!
//! # Transition a line item (runs the shipping sync too)
//! sd-cli orders set-status -e seller@example.com \
//!     --order-id 9 --line-item-id 55 --buyer-id 2 --status Shipped
//!
//! # Show the shipping record for an order
//! sd-cli shipping show -e seller@example.com --order-id 9
//!
//! # Package purchase history
//! sd-cli packages -e seller@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `SELLERDESK_UPSTREAM_URL` - Base URL of the marketplace admin API
//! - `SELLERDESK_PASSWORD` - Seller password (alternative to `--password`)

#![cfg_attr(not(test), forbid(unsafe_code))]
// Operator-facing output goes to stdout/stderr by design
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Args, Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "Sellerdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Credentials shared by every command.
#[derive(Args)]
struct Credentials {
    /// Seller email address
    #[arg(short, long)]
    email: String,

    /// Seller password (falls back to `SELLERDESK_PASSWORD`)
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials and show the seller's approval state
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Inspect and transition orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Inspect shipping records
    Shipping {
        #[command(subcommand)]
        action: ShippingAction,
    },
    /// Show the seller's package purchase history
    Packages {
        #[command(flatten)]
        credentials: Credentials,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List the seller's orders
    List {
        #[command(flatten)]
        credentials: Credentials,

        /// Only show orders with this effective status
        #[arg(long)]
        status: Option<String>,
    },
    /// Transition one line item to a new status
    SetStatus {
        #[command(flatten)]
        credentials: Credentials,

        /// Parent order id
        #[arg(long)]
        order_id: i64,

        /// Line item id
        #[arg(long)]
        line_item_id: i64,

        /// Buyer id (needed for the shipping sync)
        #[arg(long)]
        buyer_id: i64,

        /// Target status (New, Pending, Confirmed, Shipped, Delivered,
        /// Cancelled, Returned)
        #[arg(long)]
        status: String,
    },
}

#[derive(Subcommand)]
enum ShippingAction {
    /// Show the shipping record for an order
    Show {
        #[command(flatten)]
        credentials: Credentials,

        /// Order id
        #[arg(long)]
        order_id: i64,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sellerdesk_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { credentials } => {
            commands::session::login(&credentials.email, credentials.password.as_deref()).await
        }
        Commands::Orders { action } => match action {
            OrdersAction::List {
                credentials,
                status,
            } => {
                commands::orders::list(
                    &credentials.email,
                    credentials.password.as_deref(),
                    status.as_deref(),
                )
                .await
            }
            OrdersAction::SetStatus {
                credentials,
                order_id,
                line_item_id,
                buyer_id,
                status,
            } => {
                commands::orders::set_status(
                    &credentials.email,
                    credentials.password.as_deref(),
                    order_id,
                    line_item_id,
                    buyer_id,
                    &status,
                )
                .await
            }
        },
        Commands::Shipping { action } => match action {
            ShippingAction::Show {
                credentials,
                order_id,
            } => {
                commands::orders::show_shipping(
                    &credentials.email,
                    credentials.password.as_deref(),
                    order_id,
                )
                .await
            }
        },
        Commands::Packages { credentials } => {
            commands::session::packages(&credentials.email, credentials.password.as_deref()).await
        }
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn report_error(e: &CliError) {
    eprintln!("Error: {e}");
}
