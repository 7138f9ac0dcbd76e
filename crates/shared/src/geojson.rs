use serde::{Deserialize, Serialize};

/// A GeoJSON point geometry. Coordinates follow the GeoJSON order:
/// `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

fn point_type() -> String {
    "Point".to_string()
}

impl PointGeometry {
    pub fn new(lat: f64, lon: f64) -> Self {
        PointGeometry {
            kind: point_type(),
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Per-address feature properties.
///
/// `is_production` defaults to false when absent; `text_version` is the
/// popup markup and binds a popup only when present and non-empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddressProperties {
    #[serde(default)]
    pub is_production: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_version: Option<String>,
}

impl AddressProperties {
    /// The popup content, if any. Empty strings bind no popup.
    pub fn popup_text(&self) -> Option<&str> {
        self.text_version.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: AddressProperties,
}

fn feature_type() -> String {
    "Feature".to_string()
}

impl PointFeature {
    pub fn new(lat: f64, lon: f64, properties: AddressProperties) -> Self {
        PointFeature {
            kind: feature_type(),
            geometry: PointGeometry::new(lat, lon),
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<PointFeature>,
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

impl FeatureCollection {
    pub fn new(features: Vec<PointFeature>) -> Self {
        FeatureCollection {
            kind: collection_type(),
            features,
        }
    }

    pub fn empty() -> Self {
        FeatureCollection::new(Vec::new())
    }
}

/// Parse the serialized `addresses-points` payload.
///
/// Malformed JSON fails the whole parse; there is no partial recovery.
pub fn parse_feature_collection(payload: &str) -> Result<FeatureCollection, String> {
    serde_json::from_str(payload).map_err(|e| format!("Invalid feature payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [2.3, 48.8]},
                    "properties": {"is_production": true, "text_version": "<b>Plant A</b>"}
                }
            ]
        }"#;
        let fc = parse_feature_collection(json).unwrap();
        assert_eq!(fc.features.len(), 1);
        let f = &fc.features[0];
        assert!((f.geometry.lat() - 48.8).abs() < 1e-9);
        assert!((f.geometry.lon() - 2.3).abs() < 1e-9);
        assert!(f.properties.is_production);
        assert_eq!(f.properties.popup_text(), Some("<b>Plant A</b>"));
    }

    #[test]
    fn test_parse_empty_properties() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.4, 43.6]},
                    "properties": {}
                }
            ]
        }"#;
        let fc = parse_feature_collection(json).unwrap();
        let f = &fc.features[0];
        assert!(!f.properties.is_production);
        assert!(f.properties.popup_text().is_none());
    }

    #[test]
    fn test_parse_missing_properties_defaults() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}
            ]
        }"#;
        let fc = parse_feature_collection(json).unwrap();
        assert!(!fc.features[0].properties.is_production);
    }

    #[test]
    fn test_parse_empty_collection() {
        let fc = parse_feature_collection(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(fc.features.is_empty());
    }

    #[test]
    fn test_parse_malformed_json_fails() {
        assert!(parse_feature_collection("{not json").is_err());
        assert!(parse_feature_collection("").is_err());
    }

    #[test]
    fn test_parse_wrong_shape_fails() {
        // A bare array is not a feature collection
        assert!(parse_feature_collection("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_duplicate_features_kept() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.3, 48.8]}, "properties": {}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.3, 48.8]}, "properties": {}}
            ]
        }"#;
        let fc = parse_feature_collection(json).unwrap();
        assert_eq!(fc.features.len(), 2);
    }

    #[test]
    fn test_empty_text_version_binds_no_popup() {
        let props = AddressProperties {
            is_production: false,
            text_version: Some(String::new()),
        };
        assert!(props.popup_text().is_none());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let fc = FeatureCollection::new(vec![PointFeature::new(
            47.2,
            -1.55,
            AddressProperties {
                is_production: true,
                text_version: Some("12 quai de la Fosse, Nantes".to_string()),
            },
        )]);
        let json = serde_json::to_string(&fc).unwrap();
        let back = parse_feature_collection(&json).unwrap();
        assert_eq!(back, fc);
        assert!(json.contains(r#""type":"FeatureCollection""#));
        assert!(json.contains(r#""coordinates":[-1.55,47.2]"#));
    }
}
