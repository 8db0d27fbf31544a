// src/services/catalog_service.rs

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::menu::{MenuCategory, MenuDocument, MenuItem, MenuItemView, MenuSection},
};

const DEFAULT_MENU: &str = include_str!("../../data/menu.json");
pub const FALLBACK_IMAGE: &str = "/images/burgers/matutus-burger.jpg";

/// Resolve a imagem de um item. O front injeta a tabela; o núcleo não
/// conhece caminhos de arquivo.
pub trait ImageLookup: Send + Sync {
    fn image_for(&self, item: &MenuItem) -> String;
}

pub struct StaticImageTable {
    by_name: HashMap<String, String>,
    fallback: String,
}

impl StaticImageTable {
    pub fn new<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
        fallback: &str,
    ) -> Self {
        Self {
            by_name: entries
                .into_iter()
                .map(|(name, path)| (name.to_string(), path.to_string()))
                .collect(),
            fallback: fallback.to_string(),
        }
    }
}

impl Default for StaticImageTable {
    fn default() -> Self {
        Self::new(
            [
                ("MATUTU'S BURGUER", "/images/burgers/Matutus.png"),
                ("PUXA VIDA", "/images/burgers/puxa-vida.png"),
                ("CABRA DA PESTE", "/images/burgers/cabra-da-peste.png"),
                ("OXE", "/images/burgers/oxe.png"),
                ("OXENTE", "/images/burgers/Oxente.png"),
                ("MEU FI", "/images/burgers/meu-fi.png"),
                ("LAMPIÃO BURGUER", "/images/burgers/Lampiao.png"),
                ("MATUTÃO", "/images/burgers/matutao.png"),
                // Bebidas
                ("Regrigerante 350ml", "/images/burgers/refrigerante.png"),
                ("Suco Natural 400ml", "/images/burgers/suco.png"),
                // Acompanhamentos
                ("Batata Frita", "/images/burgers/batata.png"),
            ],
            FALLBACK_IMAGE,
        )
    }
}

impl ImageLookup for StaticImageTable {
    fn image_for(&self, item: &MenuItem) -> String {
        self.by_name
            .get(&item.name)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

// Cardápio em memória, na ordem em que foi definido.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(categories: Vec<MenuCategory>, items: Vec<MenuItem>) -> Result<Self, AppError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        let known: HashSet<&str> = categories.iter().map(|c| c.key.as_str()).collect();

        for item in &items {
            if !ids.insert(item.id) {
                return Err(AppError::Catalog(format!("id {} repetido", item.id)));
            }
            if item.name.trim().is_empty() {
                return Err(AppError::Catalog(format!("item {} sem nome", item.id)));
            }
            if !names.insert(item.name.as_str()) {
                return Err(AppError::Catalog(format!("nome '{}' repetido", item.name)));
            }
            if item.price <= Decimal::ZERO {
                return Err(AppError::Catalog(format!("item {} com preço inválido", item.id)));
            }
            if !known.contains(item.category.as_str()) {
                return Err(AppError::Catalog(format!(
                    "item {} em categoria desconhecida '{}'",
                    item.id, item.category
                )));
            }
        }

        Ok(Self { categories, items })
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let doc: MenuDocument =
            serde_json::from_str(json).map_err(|e| AppError::Catalog(e.to_string()))?;
        Self::new(doc.categories, doc.items)
    }

    pub fn default_menu() -> Result<Self, AppError> {
        Self::from_json(DEFAULT_MENU)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: i64) -> Result<&MenuItem, AppError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(AppError::MenuItemNotFound(id))
    }

    /// Seções do cardápio já com a imagem de cada item. Categorias sem
    /// itens não aparecem.
    pub fn sections(&self, images: &dyn ImageLookup) -> Vec<MenuSection> {
        self.categories
            .iter()
            .map(|category| MenuSection {
                key: category.key.clone(),
                title: category.title.clone(),
                items: self
                    .items
                    .iter()
                    .filter(|item| item.category == category.key)
                    .map(|item| MenuItemView {
                        item: item.clone(),
                        image: images.image_for(item),
                    })
                    .collect(),
            })
            .filter(|section| !section.items.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: Decimal) -> MenuItem {
        MenuItem {
            id,
            name: name.into(),
            description: String::new(),
            price,
            popular: false,
            category: "burgers".into(),
        }
    }

    fn burgers() -> Vec<MenuCategory> {
        vec![MenuCategory {
            key: "burgers".into(),
            title: "HAMBÚRGUERES".into(),
        }]
    }

    #[test]
    fn test_default_menu_loads() {
        let catalog = Catalog::default_menu().unwrap();
        assert_eq!(catalog.items().len(), 11);
        assert_eq!(catalog.find(1).unwrap().name, "MATUTU'S BURGUER");
        assert!(matches!(catalog.find(999), Err(AppError::MenuItemNotFound(999))));
    }

    #[test]
    fn test_rejects_duplicates_and_bad_prices() {
        let dup_id = vec![item(1, "OXE", Decimal::ONE), item(1, "OXENTE", Decimal::ONE)];
        assert!(Catalog::new(burgers(), dup_id).is_err());

        let dup_name = vec![item(1, "OXE", Decimal::ONE), item(2, "OXE", Decimal::ONE)];
        assert!(Catalog::new(burgers(), dup_name).is_err());

        let free = vec![item(1, "OXE", Decimal::ZERO)];
        assert!(Catalog::new(burgers(), free).is_err());

        let mut orphan = item(1, "OXE", Decimal::ONE);
        orphan.category = "sobremesas".into();
        assert!(Catalog::new(burgers(), vec![orphan]).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Catalog::from_json("{"), Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_sections_keep_order_and_use_injected_images() {
        struct Fixed;
        impl ImageLookup for Fixed {
            fn image_for(&self, item: &MenuItem) -> String {
                format!("/img/{}.png", item.id)
            }
        }

        let catalog = Catalog::default_menu().unwrap();
        let sections = catalog.sections(&Fixed);

        let keys: Vec<&str> = sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["burgers", "sides", "drinks"]);
        assert_eq!(sections[0].items[0].image, "/img/1.png");
    }

    #[test]
    fn test_static_table_falls_back() {
        let table = StaticImageTable::default();
        assert_eq!(
            table.image_for(&item(1, "OXE", Decimal::ONE)),
            "/images/burgers/oxe.png"
        );
        assert_eq!(
            table.image_for(&item(2, "X-Tudo", Decimal::ONE)),
            FALLBACK_IMAGE
        );
    }
}
