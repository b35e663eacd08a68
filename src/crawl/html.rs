use scraper::Html;

/// Elements whose text never shows up on the rendered page
const HIDDEN: [&str; 5] = ["head", "script", "style", "noscript", "template"];

/// Flatten an HTML page into plain text, one visible text node per line
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut lines = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| HIDDEN.contains(&el.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}
