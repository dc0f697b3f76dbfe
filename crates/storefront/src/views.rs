//! # Text Views
//!
//! Plain-text renderings of the three storefront pages. Each one is a pure
//! function of a [`StoreSnapshot`]; none of them reaches into the store.

use crate::form::ProductForm;
use crate::store::{FormMode, LoadState, StoreSnapshot};
use catalog_client::Product;

/// The pages of the storefront shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    Cart,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Products, Route::Cart];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Products => "/products",
            Route::Cart => "/cart",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Products => "Products",
            Route::Cart => "Cart",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

pub fn render_nav() -> String {
    Route::ALL
        .iter()
        .map(|route| format!("[{}]({})", route.label(), route.path()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders `route` for the given state.
pub fn render(route: Route, snapshot: &StoreSnapshot) -> String {
    let page = match route {
        Route::Home => render_home(snapshot),
        Route::Products => render_admin(snapshot),
        Route::Cart => render_cart(),
    };
    format!("{}\n\n{}", render_nav(), page)
}

/// Catalog cards.
pub fn render_home(snapshot: &StoreSnapshot) -> String {
    let mut out = String::from("Welcome to Our Shop\n\n");
    match &snapshot.load_state {
        LoadState::NotLoaded => out.push_str("Loading products..."),
        LoadState::Failed(e) => out.push_str(&format!("Failed to load products: {e}")),
        LoadState::Loaded if snapshot.products.is_empty() => out.push_str("No products yet"),
        LoadState::Loaded => {
            let cards: Vec<String> = snapshot.products.iter().map(render_card).collect();
            out.push_str(&cards.join("\n\n"));
        }
    }
    out
}

fn render_card(product: &Product) -> String {
    format!(
        "{}\n  Price: ${}\n  Quantity: {}\n  [Add to Cart]",
        product.name, product.price, product.quantity
    )
}

/// Admin panel: form heading and the product table.
pub fn render_admin(snapshot: &StoreSnapshot) -> String {
    let mut out = String::from("Product Management\n\n");

    let form = match &snapshot.selected {
        Some(product) => ProductForm::editing(product),
        None => ProductForm::blank(),
    };
    let heading = match snapshot.mode() {
        FormMode::Edit(id) => format!("Edit Product {id}"),
        FormMode::Create => "Create New Product".to_string(),
    };
    out.push_str(&format!("{heading} [{}]\n", form.submit_label()));
    if let Some(error) = &snapshot.error {
        out.push_str(&format!("! {error}\n"));
    }

    out.push_str("\nProduct List\n");
    if snapshot.loading {
        out.push_str("(refreshing)\n");
    }
    let rows: Vec<[String; 4]> = snapshot
        .products
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                format!("${}", p.price),
                p.quantity.to_string(),
            ]
        })
        .collect();
    let header = ["ID", "Name", "Price", "Quantity"].map(String::from);
    let widths: Vec<usize> = (0..4)
        .map(|col| {
            rows.iter()
                .chain(std::iter::once(&header))
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push_str(&format!("  {}\n", table_row(&header, &widths)));
    for (product, row) in snapshot.products.iter().zip(&rows) {
        let marker = if snapshot.is_selected(&product.id) { '*' } else { ' ' };
        out.push_str(&format!("{marker} {}\n", table_row(row, &widths)));
    }
    out.trim_end().to_string()
}

fn table_row(cells: &[String; 4], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn render_cart() -> String {
    "Shopping Cart\n\nYour cart is empty".to_string()
}
