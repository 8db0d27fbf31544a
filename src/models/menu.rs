// src/models/menu.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Cardápio ---
// Carregado uma vez na subida do servidor e nunca alterado.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "MATUTU'S BURGUER")]
    pub name: String,
    pub description: String,
    #[schema(example = "28.90")]
    pub price: Decimal,
    #[serde(default)]
    pub popular: bool,
    #[schema(example = "burgers")]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[schema(example = "burgers")]
    pub key: String,
    #[schema(example = "HAMBÚRGUERES")]
    pub title: String,
}

// Formato do arquivo data/menu.json
#[derive(Debug, Deserialize)]
pub struct MenuDocument {
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
}

// --- Views para o front ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    #[serde(flatten)]
    pub item: MenuItem,
    #[schema(example = "/images/burgers/Matutus.png")]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub key: String,
    pub title: String,
    pub items: Vec<MenuItemView>,
}
