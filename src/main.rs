//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

pub(crate) fn build_router(app_state: AppState) -> Router {
    let delivery_routes = Router::new()
        .route("/neighborhoods", get(handlers::delivery::list_neighborhoods))
        .route("/quote", post(handlers::delivery::quote_delivery));

    let cart_routes = Router::new()
        .route("/items", post(handlers::cart::add_item))
        .route("/update", post(handlers::cart::update_item));

    let order_routes = Router::new()
        .route("/validate", post(handlers::orders::validate_order))
        .route("/checkout", post(handlers::orders::checkout));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/menu", get(handlers::menu::get_menu))
        .nest("/api/delivery", delivery_routes)
        .nest("/api/cart", cart_routes)
        .nest("/api/orders", order_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração ou o cardápio falharem, a aplicação não deve iniciar.
    let app_state = AppState::new()?;
    let addr = app_state.settings.bind_addr.clone();
    tracing::info!(
        "📱 Pedidos serão enviados para {}/{}",
        app_state.settings.channel.host,
        app_state.settings.channel.recipient
    );

    let app = build_router(app_state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
