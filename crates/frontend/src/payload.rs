use ecoliste_shared::geojson::{self, FeatureCollection};

/// The inputs the page embeds for the map: the feature payload and the
/// production-site icon URL.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPayload {
    pub features: FeatureCollection,
    pub icon_url: String,
}

pub const POINTS_ELEMENT_ID: &str = "addresses-points";
pub const ICON_ELEMENT_ID: &str = "industry-icon-address";

/// Assemble the payload from the two raw text contents. A malformed
/// feature payload fails the whole load; nothing renders partially.
pub fn payload_from_parts(points_json: &str, icon_url: &str) -> Result<MapPayload, String> {
    let features = geojson::parse_feature_collection(points_json)?;
    Ok(MapPayload {
        features,
        icon_url: icon_url.trim().to_string(),
    })
}

fn element_text(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(id)?.text_content()
}

/// Read the embedded payload from the page, once, at load time.
pub fn load() -> Result<MapPayload, String> {
    let points = element_text(POINTS_ELEMENT_ID)
        .ok_or_else(|| format!("Missing element #{}", POINTS_ELEMENT_ID))?;
    let icon = element_text(ICON_ELEMENT_ID)
        .ok_or_else(|| format!("Missing element #{}", ICON_ELEMENT_ID))?;
    payload_from_parts(&points, &icon)
}

/// The icon URL alone, for pages that fetch their features from the API.
pub fn icon_url() -> Option<String> {
    element_text(ICON_ELEMENT_ID).map(|s| s.trim().to_string())
}
