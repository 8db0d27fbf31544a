// src/config.rs

use std::{env, sync::Arc};

use crate::services::{
    catalog_service::{Catalog, ImageLookup, StaticImageTable},
    checkout_service::{CheckoutService, LogDispatcher},
    delivery_fee::DeliveryFeeTable,
};

pub const DEFAULT_WHATSAPP_NUMBER: &str = "5581995130952";
pub const DEFAULT_MESSAGING_HOST: &str = "wa.me";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// Para onde vai a mensagem do pedido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    pub host: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub channel: ChannelSettings,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Variável ausente ou vazia usa o valor padrão.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            bind_addr: get("BIND_ADDR", DEFAULT_BIND_ADDR),
            channel: ChannelSettings {
                host: get("MESSAGING_HOST", DEFAULT_MESSAGING_HOST),
                recipient: get("WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER),
            },
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub catalog: Arc<Catalog>,
    pub images: Arc<dyn ImageLookup>,
    pub fee_table: Arc<DeliveryFeeTable>,
    pub checkout_service: CheckoutService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env();
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        // Um cardápio quebrado impede a subida do servidor
        let catalog = Catalog::default_menu()?;
        tracing::info!("✅ Cardápio carregado com {} itens", catalog.items().len());

        // --- Monta o gráfico de dependências ---
        let fee_table = Arc::new(DeliveryFeeTable::default());
        let checkout_service = CheckoutService::new(
            fee_table.clone(),
            settings.channel.clone(),
            Arc::new(LogDispatcher),
        );

        Ok(Self {
            settings,
            catalog: Arc::new(catalog),
            images: Arc::new(StaticImageTable::default()),
            fee_table,
            checkout_service,
        })
    }
}
