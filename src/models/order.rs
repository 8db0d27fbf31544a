// src/models/order.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{cart::CartLineItem, customer::CustomerData};

// Pedido derivado: existe só o tempo de gerar a mensagem. Não é salvo.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub lines: Vec<CartLineItem>,
    pub customer: CustomerData,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    #[schema(example = "57.80")]
    pub subtotal: Decimal,
    #[schema(example = "5.00")]
    pub delivery_fee: Decimal,
    #[schema(example = "62.80")]
    pub total: Decimal,
    #[schema(example = "R$ 62,80")]
    pub total_label: String,
}

// Resposta do checkout: o front redireciona para `redirect_url`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    #[schema(example = "MAT-LZ8K2J1AB3C4D")]
    pub order_id: String,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    /// Mensagem já codificada para a query string.
    pub message: String,
    #[schema(example = "https://wa.me/5581995130952?text=...")]
    pub redirect_url: String,
}
