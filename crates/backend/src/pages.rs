use ecoliste_shared::geojson::FeatureCollection;

/// Escape a serialized JSON document for embedding in a `<script>` element.
///
/// `text_version` carries markup, so a literal `</script>` inside the JSON
/// would end the element early. Escaping `<`, `>` and `&` as `\uXXXX`
/// keeps the payload valid JSON while making it inert as HTML.
fn escape_json_script(json: &str) -> String {
    json.replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

/// Escape text content for a plain HTML element.
fn escape_html_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Inject the map payload into a page: the `addresses-points` JSON script
/// and the `industry-icon-address` icon URL the map reads at load time.
pub fn render_map_page(
    template: &str,
    collection: &FeatureCollection,
    icon_url: &str,
) -> Result<String, String> {
    let json = serde_json::to_string(collection).map_err(|e| e.to_string())?;
    let block = format!(
        r#"<script id="addresses-points" type="application/json">{}</script><span id="industry-icon-address" hidden>{}</span>"#,
        escape_json_script(&json),
        escape_html_text(icon_url),
    );

    Ok(match template.rfind("</body>") {
        Some(pos) => {
            let mut page = String::with_capacity(template.len() + block.len());
            page.push_str(&template[..pos]);
            page.push_str(&block);
            page.push_str(&template[pos..]);
            page
        }
        None => format!("{}{}", template, block),
    })
}
