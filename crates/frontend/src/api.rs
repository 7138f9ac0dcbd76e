use ecoliste_shared::geojson::{AddressProperties, FeatureCollection, PointFeature};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> String {
    // In production, same origin. In dev, might be different.
    let window = web_sys::window().unwrap();
    let origin = window.location().origin().unwrap();
    format!("{}/graphql", origin)
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url())
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;

    if let Some(errors) = gql_resp.errors {
        if !errors.is_empty() {
            return Err(errors[0].message.clone());
        }
    }

    gql_resp.data.ok_or_else(|| "No data returned".to_string())
}

// Types mirroring the GraphQL schema

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    pub text_version: String,
    pub lat: f64,
    pub lon: f64,
    pub is_production: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    pub annual_sales: Option<i32>,
    pub n_employees: Option<i32>,
    #[serde(default)]
    pub addresses: Vec<AddressData>,
}

impl EnterpriseData {
    /// The marker payload for this enterprise's map.
    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection::new(
            self.addresses
                .iter()
                .map(|a| {
                    PointFeature::new(
                        a.lat,
                        a.lon,
                        AddressProperties {
                            is_production: a.is_production,
                            text_version: if a.text_version.is_empty() {
                                None
                            } else {
                                Some(a.text_version.clone())
                            },
                        },
                    )
                })
                .collect(),
        )
    }
}

// API functions

#[derive(Deserialize)]
pub struct EnterpriseResponse {
    pub enterprise: Option<EnterpriseData>,
}

pub async fn fetch_enterprise(id: &str) -> Result<Option<EnterpriseData>, String> {
    let variables = serde_json::json!({ "id": id });
    let resp: EnterpriseResponse = query(
        r#"query FetchEnterprise($id: ID!) {
            enterprise(id: $id) {
                id name website description annualSales nEmployees
                addresses { textVersion lat lon isProduction }
            }
        }"#,
        Some(variables),
    )
    .await?;
    Ok(resp.enterprise)
}
