// src/models/cart.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MAX_QUANTITY: u32 = 10;
pub const MAX_LINE_OBSERVATIONS: usize = 200;

fn validate_positive_price(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O preço deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// Uma linha do carrinho. O preço é uma cópia do cardápio no momento em que
// o item foi adicionado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[schema(example = 1)]
    pub id: i64,

    #[validate(length(min = 1, max = 100, message = "O nome do item deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "MATUTU'S BURGUER")]
    pub name: String,

    #[validate(custom(function = "validate_positive_price"))]
    #[schema(example = "28.90")]
    pub price: Decimal,

    #[validate(range(min = 1, max = 10, message = "A quantidade deve estar entre 1 e 10."))]
    #[schema(example = 2)]
    pub quantity: u32,

    #[validate(length(max = 200, message = "Observações do item muito longas."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "sem cebola")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    #[schema(example = 3)]
    pub total_items: u32,
    #[schema(example = "57.80")]
    pub subtotal: Decimal,
    #[schema(example = "R$ 57,80")]
    pub subtotal_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: Decimal, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: 1,
            name: "OXE".into(),
            price,
            quantity,
            observations: None,
        }
    }

    #[test]
    fn test_valid_line() {
        assert!(line(Decimal::new(2290, 2), 1).validate().is_ok());
        assert!(line(Decimal::new(2290, 2), 10).validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let errors = line(Decimal::ZERO, 1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(line(Decimal::new(-100, 2), 1).validate().is_err());
    }

    #[test]
    fn test_rejects_quantity_out_of_range() {
        assert!(line(Decimal::ONE, 0).validate().is_err());
        assert!(line(Decimal::ONE, 11).validate().is_err());
    }

    #[test]
    fn test_rejects_long_observations_and_empty_name() {
        let mut l = line(Decimal::ONE, 1);
        l.observations = Some("x".repeat(201));
        assert!(l.validate().is_err());

        l.observations = Some("x".repeat(200));
        assert!(l.validate().is_ok());

        l.name = String::new();
        assert!(l.validate().is_err());
    }
}
