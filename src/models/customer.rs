// src/models/customer.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::services::validation::{validate_name, validate_phone};

// --- Enums ---
// Valores fora do enum nem chegam aqui: o serde rejeita na desserialização.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Money,
    Card,
    Pix,
}

impl PaymentMethod {
    /// Rótulo exibido na mensagem do pedido.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Money => "Dinheiro",
            PaymentMethod::Card => "Cartão",
            PaymentMethod::Pix => "PIX",
        }
    }
}

// --- Dados do Cliente ---
// Regras que dependem de mais de um campo (endereço x tipo de entrega)
// ficam em services::validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "Maria Silva")]
    pub name: String,

    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "(81) 99999-9999")]
    pub phone: String,

    #[validate(length(max = 500, message = "Endereço muito longo"))]
    #[serde(default)]
    #[schema(example = "Rua das Flores, 123, Céu Azul")]
    pub address: Option<String>,

    // Obrigatórios no JSON; o `Default` só vale para o formulário em branco.
    pub delivery_type: DeliveryType,

    pub payment_method: PaymentMethod,

    #[validate(length(max = 500, message = "Observações muito longas"))]
    #[serde(default)]
    pub observations: Option<String>,

    // Bairro escolhido numa lista; quando presente, tem prioridade sobre o
    // texto do endereço no cálculo da taxa.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "céu azul")]
    pub neighborhood: Option<String>,
}
