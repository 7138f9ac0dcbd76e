use std::sync::Arc;

use async_graphql::{Context, InputObject, Object, SimpleObject, ID};
use ecoliste_shared::models::{Address, Enterprise};

use crate::storage::Storage;

// GraphQL output types

#[derive(SimpleObject, Clone)]
pub struct GqlAddress {
    pub text_version: String,
    pub lat: f64,
    pub lon: f64,
    pub is_production: bool,
}

impl From<Address> for GqlAddress {
    fn from(a: Address) -> Self {
        GqlAddress {
            text_version: a.text_version,
            lat: a.lat,
            lon: a.lon,
            is_production: a.is_production,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlEnterprise {
    pub id: ID,
    pub name: String,
    pub website: String,
    pub description: String,
    pub annual_sales: Option<i32>,
    pub n_employees: Option<i32>,
    pub addresses: Vec<GqlAddress>,
    pub added: String,
    pub updated: String,
}

impl From<Enterprise> for GqlEnterprise {
    fn from(e: Enterprise) -> Self {
        GqlEnterprise {
            id: ID(e.id.to_string()),
            name: e.name,
            website: e.website,
            description: e.description,
            annual_sales: e.annual_sales.map(|v| v as i32),
            n_employees: e.n_employees.map(|v| v as i32),
            addresses: e.addresses.into_iter().map(GqlAddress::from).collect(),
            added: e.added,
            updated: e.updated,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlStats {
    pub total_enterprises: u64,
    pub total_addresses: u64,
    pub db_size_bytes: u64,
}

// Input types

#[derive(InputObject)]
pub struct AddressInput {
    pub text_version: String,
    pub lat: f64,
    pub lon: f64,
    pub is_production: bool,
}

impl From<AddressInput> for Address {
    fn from(a: AddressInput) -> Self {
        Address {
            text_version: a.text_version,
            lat: a.lat,
            lon: a.lon,
            is_production: a.is_production,
        }
    }
}

#[derive(InputObject)]
pub struct CreateEnterpriseInput {
    pub name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub annual_sales: Option<i32>,
    pub n_employees: Option<i32>,
    pub addresses: Option<Vec<AddressInput>>,
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn enterprises(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlEnterprise>> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let enterprises = storage
            .list_enterprises()
            .map_err(async_graphql::Error::new)?;
        Ok(enterprises.into_iter().map(GqlEnterprise::from).collect())
    }

    async fn enterprise(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<GqlEnterprise>> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let enterprise = storage
            .get_enterprise(&id)
            .map_err(async_graphql::Error::new)?;
        Ok(enterprise.map(GqlEnterprise::from))
    }

    async fn stats(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlStats> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let total_enterprises = storage
            .count_enterprises()
            .map_err(async_graphql::Error::new)?;
        let total_addresses = storage
            .list_enterprises()
            .map_err(async_graphql::Error::new)?
            .iter()
            .map(|e| e.addresses.len() as u64)
            .sum();
        let db_size_bytes = storage.db_size_bytes().map_err(async_graphql::Error::new)?;
        Ok(GqlStats {
            total_enterprises,
            total_addresses,
            db_size_bytes,
        })
    }
}

// Mutation root

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_enterprise(
        &self,
        ctx: &Context<'_>,
        input: CreateEnterpriseInput,
    ) -> async_graphql::Result<GqlEnterprise> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let now = chrono::Utc::now().to_rfc3339();

        let enterprise = Enterprise {
            id: uuid::Uuid::new_v4(),
            name: input.name,
            website: input.website.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            annual_sales: validate_bracket(input.annual_sales)?,
            n_employees: validate_bracket(input.n_employees)?,
            addresses: input
                .addresses
                .unwrap_or_default()
                .into_iter()
                .map(Address::from)
                .collect(),
            added: now.clone(),
            updated: now,
        };

        storage
            .save_enterprise(&enterprise)
            .map_err(async_graphql::Error::new)?;

        Ok(GqlEnterprise::from(enterprise))
    }

    async fn add_address(
        &self,
        ctx: &Context<'_>,
        enterprise_id: ID,
        input: AddressInput,
    ) -> async_graphql::Result<GqlEnterprise> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();

        let mut enterprise = storage
            .get_enterprise(&enterprise_id)
            .map_err(async_graphql::Error::new)?
            .ok_or_else(|| async_graphql::Error::new("Enterprise not found"))?;

        enterprise.addresses.push(Address::from(input));
        enterprise.updated = chrono::Utc::now().to_rfc3339();

        storage
            .save_enterprise(&enterprise)
            .map_err(async_graphql::Error::new)?;

        Ok(GqlEnterprise::from(enterprise))
    }

    async fn delete_enterprise(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        storage
            .delete_enterprise(&id)
            .map_err(async_graphql::Error::new)
    }
}

/// Sales and employee counts are stored as 1-4 brackets.
fn validate_bracket(value: Option<i32>) -> async_graphql::Result<Option<u8>> {
    match value {
        None => Ok(None),
        Some(v) if (1..=4).contains(&v) => Ok(Some(v as u8)),
        Some(v) => Err(async_graphql::Error::new(format!(
            "Bracket out of range (1-4): {}",
            v
        ))),
    }
}

pub type Schema = async_graphql::Schema<QueryRoot, MutationRoot, async_graphql::EmptySubscription>;

pub fn build_schema(storage: Arc<Storage>) -> Schema {
    async_graphql::Schema::build(QueryRoot, MutationRoot, async_graphql::EmptySubscription)
        .data(storage)
        .finish()
}
