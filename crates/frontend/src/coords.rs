use ecoliste_shared::tile::{self, TileLayerConfig};

/// Convert (lat, lon) to viewport pixels for a map centered on `center`
/// at `zoom` in a `width` x `height` viewport.
pub fn latlng_to_screen(
    cfg: &TileLayerConfig,
    center: (f64, f64),
    zoom: u8,
    width: f64,
    height: f64,
    lat: f64,
    lon: f64,
) -> (f64, f64) {
    let (cx, cy) = tile::project(cfg, center.0, center.1, zoom);
    let (px, py) = tile::project(cfg, lat, lon, zoom);
    (width / 2.0 + (px - cx), height / 2.0 + (py - cy))
}

/// Inverse of [`latlng_to_screen`].
pub fn screen_to_latlng(
    cfg: &TileLayerConfig,
    center: (f64, f64),
    zoom: u8,
    width: f64,
    height: f64,
    sx: f64,
    sy: f64,
) -> (f64, f64) {
    let (cx, cy) = tile::project(cfg, center.0, center.1, zoom);
    tile::unproject(cfg, cx + (sx - width / 2.0), cy + (sy - height / 2.0), zoom)
}

/// New map center after dragging the content by (`dx`, `dy`) screen pixels.
/// Dragging the map rightward moves the center westward.
pub fn pan_center(cfg: &TileLayerConfig, center: (f64, f64), zoom: u8, dx: f64, dy: f64) -> (f64, f64) {
    let (cx, cy) = tile::project(cfg, center.0, center.1, zoom);
    tile::unproject(cfg, cx - dx, cy - dy, zoom)
}

/// New map center so that the geographic point under `cursor` stays under
/// it when zooming from `old_zoom` to `new_zoom`.
#[allow(clippy::too_many_arguments)]
pub fn zoom_at_cursor(
    cfg: &TileLayerConfig,
    center: (f64, f64),
    old_zoom: u8,
    new_zoom: u8,
    width: f64,
    height: f64,
    cursor_x: f64,
    cursor_y: f64,
) -> (f64, f64) {
    let anchor = screen_to_latlng(cfg, center, old_zoom, width, height, cursor_x, cursor_y);
    let (apx, apy) = tile::project(cfg, anchor.0, anchor.1, new_zoom);
    let ncx = apx - (cursor_x - width / 2.0);
    let ncy = apy - (cursor_y - height / 2.0);
    tile::unproject(cfg, ncx, ncy, new_zoom)
}

/// Get the bounding client rect of an element by id.
pub fn element_rect(id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    Some(element.get_bounding_client_rect())
}
