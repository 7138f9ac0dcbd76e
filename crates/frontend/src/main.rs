mod api;
mod components;
mod coords;
mod pages;
mod payload;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/structure/:id")]
    Structure { id: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::addresses::Addresses {}
    }
}

#[component]
fn Structure(id: String) -> Element {
    rsx! {
        pages::enterprise::Enterprise { id }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
