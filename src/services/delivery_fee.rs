// src/services/delivery_fee.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::customer::DeliveryType;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodFee {
    #[schema(example = "céu azul")]
    pub name: String,
    #[schema(example = "5.00")]
    pub fee: Decimal,
}

// Tabela de taxas por bairro. É uma lista e não um mapa: quando o endereço
// cita dois bairros, vale o que aparece primeiro aqui.
#[derive(Debug, Clone)]
pub struct DeliveryFeeTable {
    entries: Vec<NeighborhoodFee>,
}

impl DeliveryFeeTable {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, Decimal)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, fee)| NeighborhoodFee {
                name: name.trim().to_lowercase(),
                fee,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[NeighborhoodFee] {
        &self.entries
    }

    /// Taxa pelo texto do endereço. Retirada no balcão não paga taxa, e
    /// bairro desconhecido também sai com taxa zero.
    pub fn resolve(&self, address: &str, delivery_type: DeliveryType) -> Decimal {
        if delivery_type != DeliveryType::Delivery {
            return Decimal::ZERO;
        }

        let address = address.to_lowercase();
        match self.entries.iter().find(|e| address.contains(e.name.as_str())) {
            Some(entry) => entry.fee,
            None => {
                tracing::debug!("Nenhum bairro reconhecido no endereço, taxa zero");
                Decimal::ZERO
            }
        }
    }

    /// Igual a [`resolve`](Self::resolve), mas um bairro escolhido na lista
    /// tem prioridade sobre o texto livre.
    pub fn resolve_for(
        &self,
        address: &str,
        neighborhood: Option<&str>,
        delivery_type: DeliveryType,
    ) -> Decimal {
        if delivery_type != DeliveryType::Delivery {
            return Decimal::ZERO;
        }

        let selected = neighborhood.map(|n| n.trim().to_lowercase());
        if let Some(entry) = selected
            .as_deref()
            .and_then(|n| self.entries.iter().find(|e| e.name == n))
        {
            return entry.fee;
        }

        self.resolve(address, delivery_type)
    }
}

impl Default for DeliveryFeeTable {
    fn default() -> Self {
        Self::new([
            ("céu azul", Decimal::new(500, 2)),
            ("timbi", Decimal::new(600, 2)),
            ("bairro novo", Decimal::new(700, 2)),
            ("joão paulo", Decimal::new(800, 2)),
            ("santa monita", Decimal::new(800, 2)),
            ("santana", Decimal::new(900, 2)),
            ("tabatinga", Decimal::new(1000, 2)),
            ("alberto maia", Decimal::new(800, 2)),
            ("são lourenço", Decimal::new(1200, 2)),
            ("varzea", Decimal::new(1200, 2)),
        ])
    }
}
