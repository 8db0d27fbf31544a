// src/services/pricing.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::cart::CartLineItem;

const DECIMAL_PLACES: u32 = 2;

pub fn line_total(line: &CartLineItem) -> Decimal {
    line.price * Decimal::from(line.quantity)
}

pub fn compute_subtotal(lines: &[CartLineItem]) -> Decimal {
    lines.iter().map(line_total).sum()
}

pub fn compute_total(subtotal: Decimal, delivery_fee: Decimal) -> Decimal {
    subtotal + delivery_fee
}

pub fn total_items(lines: &[CartLineItem]) -> u32 {
    lines.iter().map(|line| line.quantity).sum()
}

/// `R$ 1234,50`: duas casas, vírgula como separador decimal e sem
/// separador de milhar.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("R$ {:.2}", rounded).replace('.', ",")
}
