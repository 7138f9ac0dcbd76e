mod assets;
mod graphql;
mod pages;
mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::Path as UrlPath;
use axum::http::{HeaderValue, StatusCode};
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use ecoliste_shared::models;
use graphql::Schema;
use storage::Storage;

#[derive(Clone)]
struct AppState {
    schema: Schema,
    storage: Arc<Storage>,
    industry_icon_url: String,
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(state: AppState) -> Router {
    // Static file routers are stateless — merge them before adding app state
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(Path::new("assets"), CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(Path::new("dist"), CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(Path::new("dist/assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/", get(serve_all_addresses))
        .route("/structure/{id}", get(serve_enterprise))
        .with_state(state)
        .merge(static_files)
        .layer(CorsLayer::permissive())
}

fn index_template() -> String {
    // Serve the built frontend, or a bare shell the map can still mount in
    std::fs::read_to_string("dist/index.html").unwrap_or_else(|_| {
        r#"<!DOCTYPE html>
<html>
<head><title>Ecoliste</title></head>
<body>
<div id="main"></div>
</body>
</html>"#
            .to_string()
    })
}

/// Home page: every enterprise address on one map.
async fn serve_all_addresses(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let enterprises = state.storage.list_enterprises().map_err(|e| {
        tracing::error!(error = %e, "Failed to list enterprises");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let collection = models::all_addresses_collection(&enterprises);

    pages::render_map_page(&index_template(), &collection, &state.industry_icon_url)
        .map(Html)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to render map page");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Enterprise page: the addresses of one enterprise.
async fn serve_enterprise(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Html<String>, StatusCode> {
    let enterprise = state
        .storage
        .get_enterprise(&id)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load enterprise");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    pages::render_map_page(
        &index_template(),
        &enterprise.feature_collection(),
        &state.industry_icon_url,
    )
    .map(Html)
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to render map page");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let assets_dir =
        PathBuf::from(std::env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".to_string()));
    let loaded_assets = assets::Assets::load(&assets_dir).expect("Failed to load site assets");

    let db_path = PathBuf::from(
        std::env::var("DB_PATH").unwrap_or_else(|_| "data/enterprises.redb".to_string()),
    );
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create database directory");
    }
    let storage = Storage::open(&db_path);
    storage
        .seed_if_empty(&loaded_assets.seed_enterprises)
        .expect("Failed to seed database");

    let schema = graphql::build_schema(storage.clone());
    let app = build_app(AppState {
        schema,
        storage,
        industry_icon_url: loaded_assets.site.industry_icon_url,
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(%addr, "Server running");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
