//! Page snapshot for the diagnostic `GET_DOM` request

use markurz_bridge::DomSnapshot;
use scraper::{Html, Selector};

/// Extract the page title and all level-1 heading texts.
pub fn snapshot(html: &str) -> DomSnapshot {
    let doc = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| {
            doc.select(&sel)
                .next()
                .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        })
        .unwrap_or_default();

    let headlines = match Selector::parse("h1") {
        Ok(sel) => doc
            .select(&sel)
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect(),
        Err(_) => Vec::new(),
    };

    DomSnapshot { title, headlines }
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
