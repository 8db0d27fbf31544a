// src/services/validation.rs

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    models::{
        cart::CartLineItem,
        customer::{CustomerData, DeliveryType},
    },
    services::security::{is_valid_phone, sanitize_input},
};

const MIN_ADDRESS_LEN: usize = 10;

// Ordem em que os erros aparecem para o cliente (a mesma do formulário).
const FIELD_ORDER: [&str; 4] = ["name", "phone", "address", "observations"];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

fn name_pattern() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    // Letras de qualquer alfabeto (acentos inclusos) e espaços
    NAME_REGEX.get_or_init(|| Regex::new(r"^[\p{L}\s]+$").unwrap())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

// ---
// Validações customizadas usadas pelo derive de CustomerData
// ---
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len < 2 {
        return Err(invalid("length", "Nome deve ter pelo menos 2 caracteres"));
    }
    if len > 100 {
        return Err(invalid("length", "Nome muito longo"));
    }
    if !name_pattern().is_match(name) {
        return Err(invalid("regex", "Nome deve conter apenas letras"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !is_valid_phone(phone) {
        return Err(invalid("phone", "Número de telefone inválido"));
    }
    Ok(())
}

/// Passa todos os campos de texto livre pelo sanitizador. Endereço e
/// observações que ficam vazios viram `None`.
pub fn sanitize_customer(customer: &CustomerData) -> CustomerData {
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .map(sanitize_input)
            .filter(|v| !v.is_empty())
    };

    CustomerData {
        name: sanitize_input(&customer.name),
        phone: sanitize_input(&customer.phone),
        address: optional(&customer.address),
        delivery_type: customer.delivery_type,
        payment_method: customer.payment_method,
        observations: optional(&customer.observations),
        neighborhood: optional(&customer.neighborhood),
    }
}

// Regra que o derive não expressa: endereço obrigatório só na entrega.
fn address_errors(customer: &CustomerData) -> Vec<String> {
    if customer.delivery_type != DeliveryType::Delivery {
        return Vec::new();
    }
    match customer.address.as_deref().map(str::trim) {
        None | Some("") => vec!["Endereço é obrigatório para entrega".to_string()],
        Some(address) if address.chars().count() < MIN_ADDRESS_LEN => {
            vec!["Endereço deve ter pelo menos 10 caracteres".to_string()]
        }
        Some(_) => Vec::new(),
    }
}

fn flatten_messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
    errors
        .field_errors()
        .get(field)
        .map(|field_errors| {
            field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Valida os dados do cliente e junta todas as violações, não só a primeira.
///
/// Espera dados já sanitizados (ver [`sanitize_customer`]). Nunca falha com
/// erro: o resultado diz se o pedido pode seguir.
pub fn validate_customer(customer: &CustomerData) -> ValidationReport {
    let derived = match customer.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let mut errors = Vec::new();
    for field in FIELD_ORDER {
        if field == "address" {
            errors.extend(address_errors(customer));
        }
        errors.extend(flatten_messages(&derived, field));
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Uma linha inválida é defeito de quem montou o carrinho, não do cliente.
pub fn validate_cart_line(line: &CartLineItem) -> Result<(), AppError> {
    line.validate()?;
    Ok(())
}
