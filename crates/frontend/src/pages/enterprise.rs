use dioxus::prelude::*;

use crate::api;
use crate::components::enterprise_panel::EnterprisePanel;
use crate::components::map_view::MapView;
use crate::payload;

/// Icon used when the page carries no embedded icon URL.
const FALLBACK_ICON: &str = "/static/icons/industry.svg";

/// Enterprise page: identity panel plus the map of its addresses.
#[component]
pub fn Enterprise(id: String) -> Element {
    let enterprise_resource = use_resource(move || {
        let id = id.clone();
        async move { api::fetch_enterprise(&id).await }
    });

    let icon_url = payload::icon_url().unwrap_or_else(|| FALLBACK_ICON.to_string());

    let rendered = match &*enterprise_resource.read() {
        None => rsx! {
            div { class: "app",
                div { class: "muted", "Loading\u{2026}" }
            }
        },
        Some(Err(e)) => rsx! {
            div { class: "app",
                div { class: "map-error", "Could not load this enterprise: {e}" }
            }
        },
        Some(Ok(None)) => rsx! {
            div { class: "app",
                div { class: "map-error", "Enterprise not found" }
            }
        },
        Some(Ok(Some(enterprise))) => {
            let features = enterprise.feature_collection().features;
            rsx! {
                div { class: "app",
                    div { class: "header",
                        h1 { "{enterprise.name}" }
                    }
                    div { class: "sidebar",
                        EnterprisePanel { enterprise: enterprise.clone() }
                    }
                    MapView {
                        features,
                        icon_url,
                    }
                }
            }
        }
    };
    rendered
}
