use dioxus::prelude::*;

use crate::api::EnterpriseData;

/// Label for an employee-count bracket (1-4).
fn n_employees_label(bracket: Option<i32>) -> &'static str {
    match bracket {
        Some(1) => "1 to 10 employees",
        Some(2) => "11 to 50 employees",
        Some(3) => "51 to 200 employees",
        Some(4) => "More than 200 employees",
        _ => "Employee count unknown",
    }
}

/// Label for an annual-sales bracket (1-4).
fn annual_sales_label(bracket: Option<i32>) -> &'static str {
    match bracket {
        Some(1) => "Under \u{20ac}100k annual sales",
        Some(2) => "\u{20ac}100k to \u{20ac}1M annual sales",
        Some(3) => "\u{20ac}1M to \u{20ac}10M annual sales",
        Some(4) => "Over \u{20ac}10M annual sales",
        _ => "Annual sales unknown",
    }
}

#[component]
pub fn EnterprisePanel(enterprise: EnterpriseData) -> Element {
    rsx! {
        div { class: "panel enterprise-panel",
            h2 { "{enterprise.name}" }
            if enterprise.website.is_empty() {
                p { class: "muted", "No website listed" }
            } else {
                p {
                    a { href: "{enterprise.website}", "{enterprise.website}" }
                }
            }
            if enterprise.description.is_empty() {
                p { class: "muted", "No description" }
            } else {
                p { "{enterprise.description}" }
            }
            ul { class: "identity-facts",
                li { {n_employees_label(enterprise.n_employees)} }
                li { {annual_sales_label(enterprise.annual_sales)} }
            }
            if !enterprise.addresses.is_empty() {
                h3 { "Addresses" }
                ul { class: "address-list",
                    for a in &enterprise.addresses {
                        li {
                            "{a.text_version}"
                            if a.is_production {
                                span { class: "production-tag", " (production site)" }
                            }
                        }
                    }
                }
            }
        }
    }
}
