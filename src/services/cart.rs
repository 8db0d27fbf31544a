// src/services/cart.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        cart::{CartLineItem, CartView, MAX_LINE_OBSERVATIONS, MAX_QUANTITY},
        menu::MenuItem,
    },
    services::{
        catalog_service::Catalog,
        pricing::{compute_subtotal, format_brl, total_items},
        security::sanitize_input,
        validation::validate_cart_line,
    },
};

fn sanitize_observations(observations: Option<&str>) -> Option<String> {
    observations.map(sanitize_input).filter(|obs| !obs.is_empty())
}

// Corta no limite; só para texto digitado agora, nunca para linhas recebidas.
fn clean_observations(observations: Option<&str>) -> Option<String> {
    sanitize_observations(observations)
        .map(|obs| obs.chars().take(MAX_LINE_OBSERVATIONS).collect::<String>())
}

// Nome e preço da linha precisam ser os do cardápio.
fn check_against_menu(catalog: &Catalog, line: &CartLineItem) -> Result<(), AppError> {
    let item = catalog.find(line.id)?;
    if line.price != item.price {
        return Err(AppError::ContractViolation(format!(
            "preço do item {} difere do cardápio",
            line.id
        )));
    }
    if line.name != sanitize_input(&item.name) {
        return Err(AppError::ContractViolation(format!(
            "nome do item {} difere do cardápio",
            line.id
        )));
    }
    Ok(())
}

// O carrinho de uma sessão. Uma linha é identificada pelo par
// (id do item, observações): o mesmo lanche personalizado de outro jeito
// vira outra linha.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstrói o carrinho que o front mandou. Cada linha é sanitizada,
    /// validada e conferida contra o cardápio; nada é corrigido em silêncio.
    /// Linhas repetidas (mesmo id e observações) viram uma só, com a soma das
    /// quantidades limitada a 10.
    pub fn from_lines(catalog: &Catalog, lines: Vec<CartLineItem>) -> Result<Self, AppError> {
        let mut cart = Self::new();
        for mut line in lines {
            line.name = sanitize_input(&line.name);
            line.observations = sanitize_observations(line.observations.as_deref());
            validate_cart_line(&line)?;
            check_against_menu(catalog, &line)?;

            match cart.position(line.id, line.observations.as_deref()) {
                Some(idx) => {
                    let existing = &mut cart.lines[idx];
                    existing.quantity = (existing.quantity + line.quantity).min(MAX_QUANTITY);
                }
                None => cart.lines.push(line),
            }
        }
        Ok(cart)
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLineItem> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: i64, observations: Option<&str>) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.id == id && line.observations.as_deref() == observations)
    }

    /// Adiciona um item do cardápio. Se já existe linha igual, soma um
    /// (até o limite de 10).
    pub fn add_item(&mut self, item: &MenuItem, observations: Option<&str>) -> Result<(), AppError> {
        let observations = clean_observations(observations);

        if let Some(idx) = self.position(item.id, observations.as_deref()) {
            let line = &mut self.lines[idx];
            line.quantity = (line.quantity + 1).min(MAX_QUANTITY);
            return Ok(());
        }

        let line = CartLineItem {
            id: item.id,
            name: sanitize_input(&item.name),
            price: item.price,
            quantity: 1,
            observations,
        };
        validate_cart_line(&line)?;
        self.lines.push(line);
        Ok(())
    }

    /// Interface usada pelos botões do carrinho: quantidade limitada a
    /// [0, 10] e zero remove a linha. Retorna `false` se a linha não existe.
    pub fn update_item(&mut self, id: i64, observations: Option<&str>, quantity: u32) -> bool {
        let observations = clean_observations(observations);
        let Some(idx) = self.position(id, observations.as_deref()) else {
            return false;
        };

        let quantity = quantity.min(MAX_QUANTITY);
        if quantity == 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity = quantity;
        }
        true
    }

    pub fn increment(&mut self, id: i64, observations: Option<&str>) -> bool {
        match self.quantity_of(id, observations) {
            Some(q) => self.update_item(id, observations, (q + 1).min(MAX_QUANTITY)),
            None => false,
        }
    }

    pub fn decrement(&mut self, id: i64, observations: Option<&str>) -> bool {
        match self.quantity_of(id, observations) {
            Some(q) => self.update_item(id, observations, q.saturating_sub(1)),
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64, observations: Option<&str>) -> bool {
        self.update_item(id, observations, 0)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity_of(&self, id: i64, observations: Option<&str>) -> Option<u32> {
        let observations = clean_observations(observations);
        self.position(id, observations.as_deref())
            .map(|idx| self.lines[idx].quantity)
    }

    pub fn subtotal(&self) -> Decimal {
        compute_subtotal(&self.lines)
    }

    pub fn total_items(&self) -> u32 {
        total_items(&self.lines)
    }

    pub fn view(&self) -> CartView {
        let subtotal = self.subtotal();
        CartView {
            items: self.lines.clone(),
            total_items: self.total_items(),
            subtotal,
            subtotal_label: format_brl(subtotal),
        }
    }
}
