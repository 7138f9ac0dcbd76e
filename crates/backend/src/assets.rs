use ecoliste_shared::models::Enterprise;
use serde::Deserialize;
use std::path::Path;

/// Site-wide configuration shipped next to the static files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub industry_icon_url: String,
}

pub struct Assets {
    pub site: SiteConfig,
    pub seed_enterprises: Vec<Enterprise>,
}

impl Assets {
    pub fn load(assets_dir: &Path) -> Result<Self, String> {
        let site_path = assets_dir.join("site.json");
        let site_data = std::fs::read_to_string(&site_path)
            .map_err(|e| format!("Failed to read {}: {}", site_path.display(), e))?;
        let site: SiteConfig = serde_json::from_str(&site_data)
            .map_err(|e| format!("Failed to parse site.json: {}", e))?;

        // Seed data is optional
        let seed_path = assets_dir.join("enterprises.json");
        let seed_enterprises: Vec<Enterprise> = match std::fs::read_to_string(&seed_path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| format!("Failed to parse enterprises.json: {}", e))?,
            Err(_) => Vec::new(),
        };

        tracing::info!(
            icon = %site.industry_icon_url,
            seed = seed_enterprises.len(),
            "Loaded site assets"
        );

        Ok(Assets {
            site,
            seed_enterprises,
        })
    }
}
