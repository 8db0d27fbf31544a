use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Dois tipos de falha: o que o cliente pode corrigir (400) e o que é defeito
// de quem chamou a API (422/500).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Dados do cliente inválidos")]
    CustomerValidation(Vec<String>),

    #[error("Carrinho vazio")]
    EmptyCart,

    #[error("Item de carrinho inválido")]
    InvalidCartLine(#[from] validator::ValidationErrors),

    #[error("Violação de contrato: {0}")]
    ContractViolation(String),

    #[error("Item {0} não encontrado no cardápio")]
    MenuItemNotFound(i64),

    #[error("Cardápio inválido: {0}")]
    Catalog(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolve todas as mensagens, na ordem dos campos do formulário.
            AppError::CustomerValidation(errors) => {
                tracing::warn!("Pedido bloqueado na validação: {:?}", errors);
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidCartLine(errors) => {
                let mut details = std::collections::BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Item de carrinho inválido.",
                    "details": details,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::EmptyCart => (StatusCode::BAD_REQUEST, "Seu carrinho está vazio.".to_string()),
            AppError::MenuItemNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Item {} não encontrado no cardápio.", id),
            ),
            AppError::ContractViolation(ref reason) => {
                tracing::error!("Violação de contrato: {}", reason);
                (StatusCode::UNPROCESSABLE_ENTITY, reason.clone())
            }

            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
