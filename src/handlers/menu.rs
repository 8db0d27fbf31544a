// src/handlers/menu.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::menu::MenuSection};

// GET /api/menu
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Menu",
    responses(
        (status = 200, description = "Cardápio agrupado por categoria", body = Vec<MenuSection>)
    )
)]
pub async fn get_menu(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sections = app_state.catalog.sections(app_state.images.as_ref());
    Ok((StatusCode::OK, Json(sections)))
}
