// src/handlers/cart.rs

// O servidor não guarda carrinho: o front manda as linhas atuais e recebe
// as linhas novas, já com os totais recalculados.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, extractor::AppJson},
    config::AppState,
    models::cart::{CartLineItem, CartView},
    services::cart::Cart,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
    #[serde(default)]
    pub items: Vec<CartLineItem>,

    #[schema(example = 1)]
    pub menu_item_id: i64,

    #[schema(example = "sem cebola, ponto da carne")]
    pub observations: Option<String>,
}

// POST /api/cart/items
#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Cart",
    request_body = AddItemPayload,
    responses(
        (status = 200, description = "Carrinho atualizado", body = CartView),
        (status = 404, description = "Item não existe no cardápio"),
        (status = 422, description = "Item de carrinho inválido ou diferente do cardápio")
    )
)]
pub async fn add_item(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<AddItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut cart = Cart::from_lines(&app_state.catalog, payload.items)?;
    let item = app_state.catalog.find(payload.menu_item_id)?;

    cart.add_item(item, payload.observations.as_deref())?;

    Ok((StatusCode::OK, Json(cart.view())))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[serde(default)]
    pub items: Vec<CartLineItem>,

    #[schema(example = 1)]
    pub id: i64,

    pub observations: Option<String>,

    // 0 remove a linha; acima de 10 vira 10
    #[schema(example = 3)]
    pub quantity: u32,
}

// POST /api/cart/update
#[utoipa::path(
    post,
    path = "/api/cart/update",
    tag = "Cart",
    request_body = UpdateItemPayload,
    responses(
        (status = 200, description = "Carrinho atualizado", body = CartView),
        (status = 404, description = "Linha aponta para item fora do cardápio"),
        (status = 422, description = "Item de carrinho inválido ou diferente do cardápio")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut cart = Cart::from_lines(&app_state.catalog, payload.items)?;

    if !cart.update_item(payload.id, payload.observations.as_deref(), payload.quantity) {
        tracing::debug!("Linha {} não está no carrinho, nada a atualizar", payload.id);
    }

    Ok((StatusCode::OK, Json(cart.view())))
}
