/// Slippy-map tile math for the OpenStreetMap base layer.
///
/// Positions are spherical-Mercator "world pixels" at a given view zoom.
/// With a 512 px tile size and a zoom offset of -1, tiles of zoom `z - 1`
/// are displayed at 512 px, so the world is `tile_size * 2^(z + offset)`
/// pixels across.
// Mercator breaks down at the poles; this is the standard cutoff latitude.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayerConfig {
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub tile_size: u32,
    pub zoom_offset: i8,
    pub subdomains: &'static [&'static str],
}

/// The canonical OSM layer configuration.
pub const OSM_LAYER: TileLayerConfig = TileLayerConfig {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution:
        r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#,
    max_zoom: 18,
    tile_size: 512,
    zoom_offset: -1,
    subdomains: &["a", "b", "c"],
};

/// A tile to draw: its source coordinates and its top-left corner in
/// viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    pub left: f64,
    pub top: f64,
}

impl TileLayerConfig {
    /// The tile zoom fetched for a given view zoom (never below 0).
    pub fn tile_zoom(&self, view_zoom: u8) -> u8 {
        (view_zoom as i16 + self.zoom_offset as i16).max(0) as u8
    }

    /// Number of tiles along one axis at a view zoom.
    pub fn tiles_across(&self, view_zoom: u8) -> u32 {
        1u32 << self.tile_zoom(view_zoom)
    }

    /// World size in pixels at a view zoom.
    pub fn world_size(&self, view_zoom: u8) -> f64 {
        (self.tiles_across(view_zoom) * self.tile_size) as f64
    }
}

/// Project (lat, lon) to world pixels at a view zoom.
pub fn project(cfg: &TileLayerConfig, lat: f64, lon: f64, view_zoom: u8) -> (f64, f64) {
    let size = cfg.world_size(view_zoom);
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = (lon + 180.0) / 360.0 * size;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(cfg: &TileLayerConfig, x: f64, y: f64, view_zoom: u8) -> (f64, f64) {
    let size = cfg.world_size(view_zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    (lat, lon)
}

/// Compute the tiles covering a `width` x `height` viewport centered on
/// (`center_lat`, `center_lon`). Tile x wraps across the antimeridian;
/// tile y outside the world is skipped.
pub fn visible_tiles(
    cfg: &TileLayerConfig,
    center_lat: f64,
    center_lon: f64,
    view_zoom: u8,
    width: f64,
    height: f64,
) -> Vec<TilePlacement> {
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let (cx, cy) = project(cfg, center_lat, center_lon, view_zoom);
    let origin_x = cx - width / 2.0;
    let origin_y = cy - height / 2.0;

    let ts = cfg.tile_size as f64;
    let n = cfg.tiles_across(view_zoom) as i64;
    let z = cfg.tile_zoom(view_zoom);

    let first_tx = (origin_x / ts).floor() as i64;
    let last_tx = ((origin_x + width - 1.0) / ts).floor() as i64;
    let first_ty = (origin_y / ts).floor() as i64;
    let last_ty = ((origin_y + height - 1.0) / ts).floor() as i64;

    let mut tiles = Vec::new();
    for ty in first_ty..=last_ty {
        if ty < 0 || ty >= n {
            continue;
        }
        for tx in first_tx..=last_tx {
            let wrapped_x = tx.rem_euclid(n);
            tiles.push(TilePlacement {
                x: wrapped_x as u32,
                y: ty as u32,
                z,
                left: tx as f64 * ts - origin_x,
                top: ty as f64 * ts - origin_y,
            });
        }
    }
    tiles
}

/// Pick the subdomain for a tile the way Leaflet does: `(x + y) % count`.
pub fn subdomain(cfg: &TileLayerConfig, x: u32, y: u32) -> &'static str {
    let idx = ((x + y) as usize) % cfg.subdomains.len();
    cfg.subdomains[idx]
}

/// Resolve a `{s}`/`{z}`/`{x}`/`{y}` URL template.
pub fn resolve_template(template: &str, s: &str, z: u8, x: u32, y: u32) -> String {
    template
        .replace("{s}", s)
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

/// Full URL for a tile placement.
pub fn tile_url(cfg: &TileLayerConfig, tile: &TilePlacement) -> String {
    resolve_template(
        cfg.url_template,
        subdomain(cfg, tile.x, tile.y),
        tile.z,
        tile.x,
        tile.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_zoom_applies_offset() {
        assert_eq!(OSM_LAYER.tile_zoom(5), 4);
        assert_eq!(OSM_LAYER.tile_zoom(1), 0);
    }

    #[test]
    fn test_tile_zoom_never_negative() {
        assert_eq!(OSM_LAYER.tile_zoom(0), 0);
    }

    #[test]
    fn test_world_size() {
        // view zoom 3 -> tile zoom 2 -> 4 tiles of 512 px
        assert!((OSM_LAYER.world_size(3) - 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_null_island_is_world_center() {
        let (x, y) = project(&OSM_LAYER, 0.0, 0.0, 3);
        assert!((x - 1024.0).abs() < 1e-6);
        assert!((y - 1024.0).abs() < 1e-6);
    }

    #[test]
    fn test_project_date_line() {
        let (x, _) = project(&OSM_LAYER, 0.0, 180.0, 3);
        assert!((x - 2048.0).abs() < 1e-6);
        let (x, _) = project(&OSM_LAYER, 0.0, -180.0, 3);
        assert!(x.abs() < 1e-6);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let (x, y) = project(&OSM_LAYER, 47.628, 2.703, 5);
        let (lat, lon) = unproject(&OSM_LAYER, x, y, 5);
        assert!((lat - 47.628).abs() < 1e-9);
        assert!((lon - 2.703).abs() < 1e-9);
    }

    #[test]
    fn test_project_clamps_polar_latitudes() {
        let (_, y_pole) = project(&OSM_LAYER, 90.0, 0.0, 5);
        let (_, y_max) = project(&OSM_LAYER, MAX_LATITUDE, 0.0, 5);
        assert!((y_pole - y_max).abs() < 1e-9);
        assert!(y_max.abs() < 1e-6);
    }

    #[test]
    fn test_y_increases_southward() {
        let (_, y_north) = project(&OSM_LAYER, 48.8, 2.3, 5);
        let (_, y_south) = project(&OSM_LAYER, 43.6, 2.3, 5);
        assert!(y_south > y_north);
    }

    #[test]
    fn test_visible_tiles_covers_viewport() {
        // 512x512 viewport centered on the world center at view zoom 3:
        // the viewport spans two tile rows and columns.
        let tiles = visible_tiles(&OSM_LAYER, 0.0, 0.0, 3, 512.0, 512.0);
        assert_eq!(tiles.len(), 4);
        let first = tiles
            .iter()
            .find(|t| t.x == 1 && t.y == 1)
            .expect("tile (1,1) visible");
        assert_eq!(first.z, 2);
        assert!((first.left - (-256.0)).abs() < 1e-6);
        assert!((first.top - (-256.0)).abs() < 1e-6);
    }

    #[test]
    fn test_visible_tiles_wraps_x() {
        // Centered on the date line the right-hand column wraps to x=0.
        let tiles = visible_tiles(&OSM_LAYER, 0.0, 180.0, 3, 512.0, 512.0);
        assert!(tiles.iter().any(|t| t.x == 0));
        assert!(tiles.iter().any(|t| t.x == 3));
    }

    #[test]
    fn test_visible_tiles_clamps_y() {
        // Near the top of the world only row 0 exists.
        let tiles = visible_tiles(&OSM_LAYER, 85.0, 0.0, 1, 512.0, 512.0);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.y == 0));
    }

    #[test]
    fn test_visible_tiles_empty_viewport() {
        assert!(visible_tiles(&OSM_LAYER, 0.0, 0.0, 5, 0.0, 512.0).is_empty());
    }

    #[test]
    fn test_subdomain_rotation() {
        assert_eq!(subdomain(&OSM_LAYER, 0, 0), "a");
        assert_eq!(subdomain(&OSM_LAYER, 1, 0), "b");
        assert_eq!(subdomain(&OSM_LAYER, 1, 1), "c");
        assert_eq!(subdomain(&OSM_LAYER, 2, 1), "a");
    }

    #[test]
    fn test_resolve_template() {
        let url = resolve_template(OSM_LAYER.url_template, "b", 4, 8, 5);
        assert_eq!(url, "https://b.tile.openstreetmap.org/4/8/5.png");
    }

    #[test]
    fn test_tile_url_deterministic() {
        let tile = TilePlacement {
            x: 8,
            y: 5,
            z: 4,
            left: 0.0,
            top: 0.0,
        };
        assert_eq!(tile_url(&OSM_LAYER, &tile), tile_url(&OSM_LAYER, &tile));
    }

    #[test]
    fn test_attribution_mentions_osm() {
        assert!(OSM_LAYER.attribution.contains("OpenStreetMap"));
    }
}
