// src/common/extractor.rs

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use super::error::AppError;

/// `Json<T>` com a rejeição convertida em `AppError`, para que corpo
/// malformado ou enum desconhecido responda no mesmo formato `{ "error": ... }`
/// dos demais erros da API.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::ContractViolation(rejection.body_text())),
        }
    }
}
