//! # Storefront CLI
//!
//! A terminal front for the storefront pages and admin actions.
//!
//! ```bash
//! storefront home
//! storefront admin
//! storefront create --id 2 --name Mug --price 9 --quantity 10
//! storefront edit 2 --price 11
//! storefront delete 2
//! storefront cart
//! ```

use catalog_client::ProductId;
use clap::{Parser, Subcommand};
use storefront::clients::StoreClient;
use storefront::config::StorefrontConfig;
use storefront::form::FormField;
use storefront::lifecycle::{setup_tracing, Session};
use storefront::views::{self, Route};
use tracing::{error, info, Instrument};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog client")]
struct Cli {
    /// Catalog root; overrides STOREFRONT_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the product cards.
    Home,
    /// Show the admin product table.
    Admin,
    /// Show the cart.
    Cart,
    /// Create a product.
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
    },
    /// Edit an existing product; omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
    },
    /// Delete a product.
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let mut config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let session = Session::connect(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("command");
    let result = run(&session.store, cli.command).instrument(span).await;
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }

    session.shutdown().await?;
    result
}

async fn run(store: &StoreClient, command: Command) -> Result<(), String> {
    // Mirrors the page mount: the list is loaded once up front. A failure is
    // rendered, not fatal.
    if let Err(e) = store.refresh().await {
        info!(error = %e, "Initial load failed");
    }

    let route = match command {
        Command::Home => Route::Home,
        Command::Admin => Route::Products,
        Command::Cart => Route::Cart,
        Command::Create {
            id,
            name,
            price,
            quantity,
        } => {
            store.select(None);
            let mut form = store.form();
            form.set(FormField::Id, id);
            form.set(FormField::Name, name);
            form.set(FormField::Price, price);
            form.set(FormField::Quantity, quantity);
            let created = store.submit(&form).await.map_err(|e| e.to_string())?;
            info!(id = %created.id, "Product created");
            Route::Products
        }
        Command::Edit {
            id,
            name,
            price,
            quantity,
        } => {
            let id = ProductId::from(id);
            let product = store
                .snapshot()
                .product(&id)
                .cloned()
                .ok_or_else(|| format!("No product with id {id}"))?;
            store.select(Some(product));

            let mut form = store.form();
            for (field, value) in [
                (FormField::Name, name),
                (FormField::Price, price),
                (FormField::Quantity, quantity),
            ] {
                if let Some(value) = value {
                    form.set(field, value);
                }
            }
            let updated = store.submit(&form).await.map_err(|e| e.to_string())?;
            info!(id = %updated.id, "Product updated");
            Route::Products
        }
        Command::Delete { id } => {
            store
                .delete(ProductId::from(id))
                .await
                .map_err(|e| e.to_string())?;
            Route::Products
        }
    };

    println!("{}", views::render(route, &store.snapshot()));
    Ok(())
}
