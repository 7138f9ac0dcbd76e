pub mod geojson;
pub mod tile;

#[cfg(feature = "uuid-support")]
pub mod models;
