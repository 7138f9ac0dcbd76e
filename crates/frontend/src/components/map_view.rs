use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use ecoliste_shared::geojson::PointFeature;
use ecoliste_shared::tile::{self, TileLayerConfig, OSM_LAYER};

use crate::coords;

pub const MAP_CONTAINER_ID: &str = "addresses-map";

/// Fixed initial view: metropolitan France.
const INITIAL_CENTER: (f64, f64) = (47.628, 2.703);
const INITIAL_ZOOM: u8 = 5;
const MIN_ZOOM: u8 = 2;

/// Drag threshold in pixels — movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Fallback viewport size when the container rect is not yet measurable.
const REFERENCE_WIDTH: f64 = 960.0;
const REFERENCE_HEIGHT: f64 = 600.0;

// --- Marker icon descriptors ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerIcon {
    Default,
    Production,
}

/// Pixel geometry of an icon: rendered size, anchor (the pixel placed on
/// the feature's coordinate), and the popup tip offset from that anchor.
struct IconMetrics {
    size: (f64, f64),
    anchor: (f64, f64),
    popup_anchor: (f64, f64),
}

const PRODUCTION_ICON: IconMetrics = IconMetrics {
    size: (40.0, 40.0),
    anchor: (20.0, 20.0),
    popup_anchor: (20.0, 0.0),
};

const DEFAULT_ICON: IconMetrics = IconMetrics {
    size: (25.0, 41.0),
    anchor: (12.0, 41.0),
    popup_anchor: (1.0, -34.0),
};

fn icon_metrics(icon: MarkerIcon) -> &'static IconMetrics {
    match icon {
        MarkerIcon::Production => &PRODUCTION_ICON,
        MarkerIcon::Default => &DEFAULT_ICON,
    }
}

/// Production sites get the custom icon, everything else the default pin.
pub fn icon_for(feature: &PointFeature) -> MarkerIcon {
    if feature.properties.is_production {
        MarkerIcon::Production
    } else {
        MarkerIcon::Default
    }
}

/// Top-left corner of an icon whose anchor sits on `screen`.
fn icon_origin(screen: (f64, f64), icon: MarkerIcon) -> (f64, f64) {
    let m = icon_metrics(icon);
    (screen.0 - m.anchor.0, screen.1 - m.anchor.1)
}

/// Where the popup tip sits for a marker at `screen`.
fn popup_position(screen: (f64, f64), icon: MarkerIcon) -> (f64, f64) {
    let m = icon_metrics(icon);
    (screen.0 + m.popup_anchor.0, screen.1 + m.popup_anchor.1)
}

/// Screen position of every feature; one entry per feature, in order.
fn marker_screen_positions(
    cfg: &TileLayerConfig,
    features: &[PointFeature],
    center: (f64, f64),
    zoom: u8,
    width: f64,
    height: f64,
) -> Vec<(f64, f64)> {
    features
        .iter()
        .map(|f| {
            coords::latlng_to_screen(
                cfg,
                center,
                zoom,
                width,
                height,
                f.geometry.lat(),
                f.geometry.lon(),
            )
        })
        .collect()
}

fn clamp_zoom(zoom: i16) -> u8 {
    zoom.clamp(MIN_ZOOM as i16, OSM_LAYER.max_zoom as i16) as u8
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Live container dimensions, with a fallback before first layout.
fn viewport_size() -> (f64, f64) {
    match coords::element_rect(MAP_CONTAINER_ID) {
        Some(rect) if rect.width() > 0.0 => (rect.width(), rect.height()),
        _ => (REFERENCE_WIDTH, REFERENCE_HEIGHT),
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(features: Vec<PointFeature>, icon_url: String) -> Element {
    let mut center = use_signal(|| INITIAL_CENTER);
    let mut zoom = use_signal(|| INITIAL_ZOOM);
    let mut open_popup = use_signal(|| None::<usize>);

    // Drag state
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_origin_center = use_signal(|| INITIAL_CENTER);

    let (width, height) = viewport_size();
    let cur_center = *center.read();
    let cur_zoom = *zoom.read();

    let tiles = tile::visible_tiles(
        &OSM_LAYER,
        cur_center.0,
        cur_center.1,
        cur_zoom,
        width,
        height,
    );
    let positions =
        marker_screen_positions(&OSM_LAYER, &features, cur_center, cur_zoom, width, height);

    // Popup for the currently open marker, if it has bound content
    let popup = open_popup.read().and_then(|i| {
        let feature = features.get(i)?;
        let text = feature.properties.popup_text()?.to_string();
        let (px, py) = popup_position(positions[i], icon_for(feature));
        Some((px, py, text))
    });

    let container_class = if *is_dragging.read() {
        "map-container dragging"
    } else {
        "map-container"
    };
    let tile_size = OSM_LAYER.tile_size;

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let delta_y = wheel_delta_y(evt.data().delta());
                let step: i16 = if delta_y < 0.0 { 1 } else { -1 };
                let old_z = *zoom.read();
                let new_z = clamp_zoom(old_z as i16 + step);
                if new_z == old_z {
                    return;
                }

                let Some(rect) = coords::element_rect(MAP_CONTAINER_ID) else { return };
                let client = evt.data().client_coordinates();
                let cx = client.x - rect.left();
                let cy = client.y - rect.top();

                let new_center = coords::zoom_at_cursor(
                    &OSM_LAYER, *center.read(), old_z, new_z,
                    rect.width(), rect.height(), cx, cy,
                );
                center.set(new_center);
                zoom.set(new_z);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_origin_center.set(*center.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let start = *drag_start.read();
                let dx = client.x - start.0;
                let dy = client.y - start.1;

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let origin = *drag_origin_center.read();
                    center.set(coords::pan_center(&OSM_LAYER, origin, *zoom.read(), dx, dy));
                }
            },

            onmouseup: move |_| {
                let was_drag = *did_drag.read();
                is_dragging.set(false);
                // A mouseup without drag movement on the map closes any popup;
                // marker clicks reopen theirs right after.
                if !was_drag {
                    open_popup.set(None);
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                center.set(INITIAL_CENTER);
                zoom.set(INITIAL_ZOOM);
            },

            // Tile pane
            for t in tiles {
                img {
                    key: "{t.z}-{t.x}-{t.y}",
                    class: "map-tile",
                    src: tile::tile_url(&OSM_LAYER, &t),
                    style: "left:{t.left}px;top:{t.top}px;width:{tile_size}px;height:{tile_size}px;",
                    draggable: "false",
                    alt: "",
                }
            }

            // Marker pane — one marker per feature
            for (i, feature) in features.iter().enumerate() {
                {
                    let pos = positions[i];
                    let icon = icon_for(feature);
                    let (left, top) = icon_origin(pos, icon);
                    let has_popup = feature.properties.popup_text().is_some();
                    let marker_class = if has_popup { "map-marker has-popup" } else { "map-marker" };
                    match icon {
                        MarkerIcon::Production => rsx! {
                            img {
                                key: "marker-{i}",
                                class: "{marker_class} production-marker",
                                src: "{icon_url}",
                                style: "left:{left}px;top:{top}px;width:40px;height:40px;",
                                draggable: "false",
                                alt: "Production site",
                                onclick: move |_| {
                                    if has_popup {
                                        open_popup.set(Some(i));
                                    }
                                },
                            }
                        },
                        MarkerIcon::Default => rsx! {
                            svg {
                                key: "marker-{i}",
                                class: "{marker_class} default-marker",
                                style: "left:{left}px;top:{top}px;",
                                width: "25",
                                height: "41",
                                view_box: "0 0 25 41",
                                role: "img",
                                onclick: move |_| {
                                    if has_popup {
                                        open_popup.set(Some(i));
                                    }
                                },
                                path {
                                    d: "M12.5 0C5.6 0 0 5.6 0 12.5c0 9.4 12.5 28.5 12.5 28.5S25 21.9 25 12.5C25 5.6 19.4 0 12.5 0z",
                                    fill: "#2a6fb8",
                                    stroke: "white",
                                    stroke_width: "1.5",
                                }
                                circle { cx: "12.5", cy: "12.5", r: "5", fill: "white" }
                            }
                        },
                    }
                }
            }

            // Popup pane
            if let Some((px, py, text)) = popup {
                div {
                    class: "map-popup",
                    style: "left:{px}px;top:{py}px;",
                    button {
                        class: "map-popup-close",
                        onclick: move |_| open_popup.set(None),
                        "\u{00d7}"
                    }
                    div {
                        class: "map-popup-content",
                        dangerous_inner_html: "{text}",
                    }
                }
            }

            div {
                class: "map-attribution",
                dangerous_inner_html: "{OSM_LAYER.attribution}",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoliste_shared::geojson::AddressProperties;

    fn feature(lat: f64, lon: f64, production: bool, text: Option<&str>) -> PointFeature {
        PointFeature::new(
            lat,
            lon,
            AddressProperties {
                is_production: production,
                text_version: text.map(str::to_string),
            },
        )
    }

    // --- icon selection ---

    #[test]
    fn test_production_feature_uses_custom_icon() {
        let f = feature(48.8, 2.3, true, Some("<b>Plant A</b>"));
        assert_eq!(icon_for(&f), MarkerIcon::Production);
    }

    #[test]
    fn test_plain_feature_uses_default_icon() {
        let f = feature(43.6, 1.4, false, None);
        assert_eq!(icon_for(&f), MarkerIcon::Default);
    }

    #[test]
    fn test_production_icon_geometry() {
        // 40x40, anchored at its center, popup tip 20 px right of the anchor
        let (left, top) = icon_origin((100.0, 100.0), MarkerIcon::Production);
        assert!((left - 80.0).abs() < 1e-9);
        assert!((top - 80.0).abs() < 1e-9);
        let (px, py) = popup_position((100.0, 100.0), MarkerIcon::Production);
        assert!((px - 120.0).abs() < 1e-9);
        assert!((py - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_icon_anchored_at_tip() {
        let (left, top) = icon_origin((100.0, 100.0), MarkerIcon::Default);
        assert!((left - 88.0).abs() < 1e-9);
        assert!((top - 59.0).abs() < 1e-9);
    }

    // --- popup binding ---

    #[test]
    fn test_popup_bound_only_with_text_version() {
        let with = feature(48.8, 2.3, true, Some("<b>Plant A</b>"));
        let without = feature(43.6, 1.4, false, None);
        let empty = feature(43.6, 1.4, false, Some(""));
        assert_eq!(with.properties.popup_text(), Some("<b>Plant A</b>"));
        assert!(without.properties.popup_text().is_none());
        assert!(empty.properties.popup_text().is_none());
    }

    // --- marker layout ---

    #[test]
    fn test_one_position_per_feature() {
        let features = vec![
            feature(48.8, 2.3, true, Some("A")),
            feature(43.6, 1.4, false, None),
            feature(43.6, 1.4, false, None), // duplicate renders independently
        ];
        let pos = marker_screen_positions(&OSM_LAYER, &features, INITIAL_CENTER, 5, 960.0, 600.0);
        assert_eq!(pos.len(), 3);
        assert_eq!(pos[1], pos[2]);
    }

    #[test]
    fn test_positions_order_independent() {
        let a = feature(48.8, 2.3, false, None);
        let b = feature(43.6, 1.4, false, None);
        let fwd =
            marker_screen_positions(&OSM_LAYER, &[a.clone(), b.clone()], INITIAL_CENTER, 5, 960.0, 600.0);
        let rev = marker_screen_positions(&OSM_LAYER, &[b, a], INITIAL_CENTER, 5, 960.0, 600.0);
        assert_eq!(fwd[0], rev[1]);
        assert_eq!(fwd[1], rev[0]);
    }

    #[test]
    fn test_empty_collection_yields_no_markers() {
        let pos = marker_screen_positions(&OSM_LAYER, &[], INITIAL_CENTER, 5, 960.0, 600.0);
        assert!(pos.is_empty());
    }

    #[test]
    fn test_scenario_plant_a() {
        // [2.3, 48.8] is lon/lat: one production marker at (48.8 N, 2.3 E)
        let f = feature(48.8, 2.3, true, Some("<b>Plant A</b>"));
        assert_eq!(icon_for(&f), MarkerIcon::Production);
        assert!((f.geometry.lat() - 48.8).abs() < 1e-9);
        assert!((f.geometry.lon() - 2.3).abs() < 1e-9);
        let pos = marker_screen_positions(&OSM_LAYER, &[f], INITIAL_CENTER, 5, 960.0, 600.0);
        assert_eq!(pos.len(), 1);
        // Paris is north-east of the initial center
        assert!(pos[0].0 > 480.0);
        assert!(pos[0].1 < 300.0);
    }

    #[test]
    fn test_scenario_toulouse_default() {
        let f = feature(43.6, 1.4, false, None);
        assert_eq!(icon_for(&f), MarkerIcon::Default);
        assert!(f.properties.popup_text().is_none());
    }

    // --- zoom clamping ---

    #[test]
    fn test_clamp_zoom_bounds() {
        assert_eq!(clamp_zoom(1), MIN_ZOOM);
        assert_eq!(clamp_zoom(5), 5);
        assert_eq!(clamp_zoom(25), OSM_LAYER.max_zoom);
    }
}
