use dioxus::prelude::*;

use crate::components::map_view::MapView;
use crate::payload;

/// Home page: the map of every embedded address point.
///
/// The payload is read once at load; a malformed payload aborts the whole
/// render and no markers are shown.
#[component]
pub fn Addresses() -> Element {
    let payload = use_signal(payload::load);

    let rendered = match &*payload.read() {
        Ok(p) => rsx! {
            div { class: "app",
                div { class: "header",
                    h1 { "Ecoliste" }
                }
                MapView {
                    features: p.features.features.clone(),
                    icon_url: p.icon_url.clone(),
                }
            }
        },
        Err(e) => rsx! {
            div { class: "app",
                div { class: "map-error", "Could not load the address map: {e}" }
            }
        },
    };
    rendered
}
