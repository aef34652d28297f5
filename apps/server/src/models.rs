use std::collections::HashMap;

use procplan_ai::MaterialComponent as AiMaterialComponent;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CompositionRequest {
    pub item: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MaterialComponent {
    pub material: String,
    pub percentage: f64,
}

impl From<AiMaterialComponent> for MaterialComponent {
    fn from(c: AiMaterialComponent) -> Self {
        Self {
            material: c.material,
            percentage: c.percentage,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CompositionResponse {
    pub item: String,
    pub components: Vec<MaterialComponent>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MarketPriceRequest {
    pub materials: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MarketPriceResponse {
    pub prices: HashMap<String, f64>,
}

impl From<HashMap<String, Decimal>> for MarketPriceResponse {
    fn from(prices: HashMap<String, Decimal>) -> Self {
        Self {
            prices: prices
                .into_iter()
                .map(|(material, price)| (material, price.to_f64().unwrap_or_default()))
                .collect(),
        }
    }
}
