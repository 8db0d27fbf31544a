// src/handlers/delivery.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, extractor::AppJson},
    config::AppState,
    models::{cart::CartLineItem, customer::DeliveryType, order::FeeQuote},
    services::{cart::Cart, delivery_fee::NeighborhoodFee},
};

// GET /api/delivery/neighborhoods
#[utoipa::path(
    get,
    path = "/api/delivery/neighborhoods",
    tag = "Delivery",
    responses(
        (status = 200, description = "Bairros atendidos e suas taxas", body = Vec<NeighborhoodFee>)
    )
)]
pub async fn list_neighborhoods(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.fee_table.entries().to_vec()))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    #[serde(default)]
    pub items: Vec<CartLineItem>,

    #[serde(default)]
    #[schema(example = "Rua X, Céu Azul, 123")]
    pub address: String,

    #[schema(example = "céu azul")]
    pub neighborhood: Option<String>,

    pub delivery_type: DeliveryType,
}

// POST /api/delivery/quote
#[utoipa::path(
    post,
    path = "/api/delivery/quote",
    tag = "Delivery",
    request_body = QuotePayload,
    responses(
        (status = 200, description = "Subtotal, taxa e total", body = FeeQuote),
        (status = 404, description = "Linha aponta para item fora do cardápio"),
        (status = 422, description = "Item de carrinho inválido ou diferente do cardápio")
    )
)]
pub async fn quote_delivery(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<QuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let cart = Cart::from_lines(&app_state.catalog, payload.items)?;

    let quote = app_state.checkout_service.quote(
        cart.lines(),
        &payload.address,
        payload.neighborhood.as_deref(),
        payload.delivery_type,
    );

    Ok((StatusCode::OK, Json(quote)))
}
