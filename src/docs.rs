// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Menu ---
        handlers::menu::get_menu,

        // --- Delivery ---
        handlers::delivery::list_neighborhoods,
        handlers::delivery::quote_delivery,

        // --- Cart ---
        handlers::cart::add_item,
        handlers::cart::update_item,

        // --- Orders ---
        handlers::orders::validate_order,
        handlers::orders::checkout,
    ),
    components(
        schemas(
            models::menu::MenuItem,
            models::menu::MenuSection,
            models::cart::CartLineItem,
            models::cart::CartView,
            models::customer::CustomerData,
            models::customer::DeliveryType,
            models::customer::PaymentMethod,
            models::order::FeeQuote,
            models::order::CheckoutReceipt,
            services::delivery_fee::NeighborhoodFee,
            services::validation::ValidationReport,
            handlers::delivery::QuotePayload,
            handlers::cart::AddItemPayload,
            handlers::cart::UpdateItemPayload,
            handlers::orders::CheckoutPayload,
        )
    ),
    tags(
        (name = "Menu", description = "Cardápio"),
        (name = "Delivery", description = "Taxas de entrega por bairro"),
        (name = "Cart", description = "Operações do carrinho (sem estado no servidor)"),
        (name = "Orders", description = "Validação e envio do pedido pelo WhatsApp")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_checkout() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/orders/checkout"));
        assert!(doc.paths.paths.contains_key("/api/menu"));
    }
}
