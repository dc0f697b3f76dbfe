use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use catalog_client::{CatalogError, Product, ProductId};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use storefront::config::StorefrontConfig;
use storefront::form::FormField;
use storefront::lifecycle::{Session, SessionError};
use storefront::store::StoreError;
use storefront::views::{self, Route};

type Products = Arc<Mutex<Vec<Product>>>;

async fn list_products(State(products): State<Products>) -> Json<Vec<Product>> {
    Json(products.lock().unwrap().clone())
}

async fn create_product(
    State(products): State<Products>,
    Json(product): Json<Product>,
) -> (StatusCode, Json<Product>) {
    products.lock().unwrap().push(product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(products): State<Products>,
    Path(id): Path<String>,
    Json(product): Json<Product>,
) -> Result<Json<Product>, StatusCode> {
    let mut products = products.lock().unwrap();
    let slot = products
        .iter_mut()
        .find(|p| p.id.as_str() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = product.clone();
    Ok(Json(product))
}

async fn delete_product(State(products): State<Products>, Path(id): Path<String>) -> StatusCode {
    let mut products = products.lock().unwrap();
    let before = products.len();
    products.retain(|p| p.id.as_str() != id);
    if products.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn serve(products: Products) -> SocketAddr {
    let app = Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
        .with_state(products);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

fn config_for(addr: SocketAddr) -> StorefrontConfig {
    StorefrontConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 5,
        ..StorefrontConfig::default()
    }
}

#[tokio::test]
async fn test_admin_flow_over_http() {
    let products: Products = Arc::new(Mutex::new(vec![Product::new("1", "Pen", 2.0, 100)]));
    let session = Session::connect(&config_for(serve(products.clone()).await)).unwrap();
    let store = &session.store;

    store.refresh().await.unwrap();
    assert!(views::render(Route::Home, &store.snapshot()).contains("Pen\n  Price: $2"));

    let mut form = store.form();
    form.set(FormField::Id, "2");
    form.set(FormField::Name, "Mug");
    form.set(FormField::Price, "9");
    form.set(FormField::Quantity, "10");
    store.submit(&form).await.unwrap();
    assert_eq!(store.snapshot().products.len(), 2);

    store.select(store.snapshot().product(&ProductId::from("2")).cloned());
    let mut form = store.form();
    form.set(FormField::Price, "11");
    store.submit(&form).await.unwrap();
    assert_eq!(
        store.snapshot().product(&ProductId::from("2")),
        Some(&Product::new("2", "Mug", 11.0, 10))
    );

    store.delete(ProductId::from("1")).await.unwrap();
    assert_eq!(
        store.snapshot().products,
        vec![Product::new("2", "Mug", 11.0, 10)]
    );
    assert_eq!(*products.lock().unwrap(), store.snapshot().products);

    let page = views::render(Route::Products, &store.snapshot());
    assert!(page.contains("Create New Product [Create Product]"));
    assert!(page.contains("Mug"));

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_product_surfaces_status() {
    let products: Products = Arc::new(Mutex::new(Vec::new()));
    let session = Session::connect(&config_for(serve(products).await)).unwrap();

    let result = session.store.delete(ProductId::from("404")).await;
    assert!(matches!(
        result,
        Err(StoreError::Catalog(CatalogError::Service { status: 404, .. }))
    ));

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_connect_rejects_bad_base_url() {
    let config = StorefrontConfig {
        base_url: "mailto:shop@example.com".to_string(),
        ..StorefrontConfig::default()
    };
    assert!(matches!(
        Session::connect(&config),
        Err(SessionError::Config(_))
    ));
}
