// src/handlers/orders.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, extractor::AppJson},
    config::AppState,
    models::{cart::CartLineItem, customer::CustomerData, order::CheckoutReceipt},
    services::{
        cart::Cart,
        validation::{sanitize_customer, validate_customer, ValidationReport},
    },
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub items: Vec<CartLineItem>,
    pub customer: CustomerData,
}

// POST /api/orders/validate
// Validação ao vivo do formulário, sem gerar pedido.
#[utoipa::path(
    post,
    path = "/api/orders/validate",
    tag = "Orders",
    request_body = CustomerData,
    responses(
        (status = 200, description = "Resultado da validação", body = ValidationReport),
        (status = 422, description = "Tipo de entrega ou pagamento ausente ou desconhecido")
    )
)]
pub async fn validate_order(AppJson(customer): AppJson<CustomerData>) -> impl IntoResponse {
    let report = validate_customer(&sanitize_customer(&customer));
    (StatusCode::OK, Json(report))
}

// POST /api/orders/checkout
#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    tag = "Orders",
    request_body = CheckoutPayload,
    responses(
        (status = 201, description = "Pedido montado; o front redireciona para redirectUrl", body = CheckoutReceipt),
        (status = 400, description = "Dados do cliente inválidos ou carrinho vazio"),
        (status = 404, description = "Linha aponta para item fora do cardápio"),
        (status = 422, description = "Item de carrinho inválido, diferente do cardápio ou corpo fora do contrato")
    )
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Linhas conferidas contra o cardápio; totais sempre recalculados aqui
    let cart = Cart::from_lines(&app_state.catalog, payload.items)?;

    let receipt = app_state
        .checkout_service
        .checkout(&cart, payload.customer)?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
