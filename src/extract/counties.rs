//! Extracts the prefecture list from the site's top page.

use crate::extract::node::HtmlNode;
use crate::types::county::County;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static COUNTY_OPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#".DataKoumoku select[name="ListPref"] option"#)
        .expect("Invalid county option selector")
});

/// Reads every prefecture option of the county drop-down.
///
/// The "select a prefecture" placeholder (value `0` or empty) is skipped. A
/// repeated id keeps its first position and takes the later name.
pub fn parse_counties(html: &str) -> Vec<County> {
    let document = Html::parse_document(html);
    let mut counties: Vec<County> = Vec::new();

    for option in HtmlNode::root(&document).select(&COUNTY_OPTION) {
        let id = option.attribute("value").unwrap_or_default().trim();
        if is_placeholder(id) {
            continue;
        }
        let name = option.text();
        match counties.iter_mut().find(|county| county.id == id) {
            Some(county) => county.name = name,
            None => counties.push(County {
                id: id.to_string(),
                name,
            }),
        }
    }
    counties
}

fn is_placeholder(id: &str) -> bool {
    id.is_empty() || id.parse::<u64>().is_ok_and(|value| value == 0)
}
