use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geojson::{AddressProperties, FeatureCollection, PointFeature};

/// A site address of an enterprise. `is_production` marks sites where
/// materials are actually made, as opposed to offices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub text_version: String,
    pub lat: f64,
    pub lon: f64,
    pub is_production: bool,
}

impl Address {
    pub fn to_feature(&self) -> PointFeature {
        PointFeature::new(
            self.lat,
            self.lon,
            AddressProperties {
                is_production: self.is_production,
                text_version: if self.text_version.is_empty() {
                    None
                } else {
                    Some(self.text_version.clone())
                },
            },
        )
    }
}

/// An enterprise and its identity. Everything else hangs off this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    /// Annual sales bracket, 1 (smallest) to 4.
    pub annual_sales: Option<u8>,
    /// Employee-count bracket, 1 (smallest) to 4.
    pub n_employees: Option<u8>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub added: String,
    pub updated: String,
}

impl Enterprise {
    /// The marker payload for this enterprise's addresses.
    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection::new(self.addresses.iter().map(Address::to_feature).collect())
    }
}

/// Build the payload for a set of enterprises (the home-page map).
pub fn all_addresses_collection(enterprises: &[Enterprise]) -> FeatureCollection {
    FeatureCollection::new(
        enterprises
            .iter()
            .flat_map(|e| e.addresses.iter().map(Address::to_feature))
            .collect(),
    )
}
