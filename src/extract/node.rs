//! A thin typed view over parsed HTML elements.
//!
//! Table cells on the site are separated by whitespace text nodes. `HtmlNode`
//! hides those: [`HtmlNode::children`] yields element children only.

use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    /// The document root element.
    pub fn root(document: &'a Html) -> Self {
        Self(document.root_element())
    }

    /// All descendant text, concatenated and trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    /// Child elements in document order. Text nodes are skipped.
    pub fn children(&self) -> impl Iterator<Item = HtmlNode<'a>> + 'a {
        self.0.children().filter_map(ElementRef::wrap).map(HtmlNode)
    }

    /// Trimmed text of the first child node, element or text.
    pub fn first_child_text(&self) -> String {
        let Some(child) = self.0.first_child() else {
            return String::new();
        };
        match ElementRef::wrap(child) {
            Some(element) => HtmlNode(element).text(),
            None => child
                .value()
                .as_text()
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// True when the element holds no child elements, only text.
    pub fn is_text_only(&self) -> bool {
        self.children().next().is_none()
    }

    /// Descendants matching `selector`, in document order.
    pub fn select<'b>(&self, selector: &'b Selector) -> impl Iterator<Item = HtmlNode<'a>> + 'b
    where
        'a: 'b,
    {
        self.0.select(selector).map(HtmlNode)
    }

    /// Outer markup, attached to errors for diagnosis.
    pub fn html(&self) -> String {
        self.0.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_skip_text_nodes() {
        let document = Html::parse_fragment("<div>\n  <span> a </span>\n  text\n  <b>b</b>\n</div>");
        let selector = Selector::parse("div").unwrap();
        let div = HtmlNode::root(&document).select(&selector).next().unwrap();

        let children: Vec<String> = div.children().map(|child| child.text()).collect();
        assert_eq!(children, ["a", "b"]);
        assert!(!div.is_text_only());
        assert!(div.children().all(|child| child.is_text_only()));
    }

    #[test]
    fn test_first_child_text() {
        let document = Html::parse_fragment(
            "<p id='x'><span> SO2 </span>(ppm)</p><p id='y'> plain </p><p id='z'></p>",
        );
        let selector = Selector::parse("p").unwrap();
        let texts: Vec<String> = HtmlNode::root(&document)
            .select(&selector)
            .map(|p| p.first_child_text())
            .collect();
        assert_eq!(texts, ["SO2", "plain", ""]);
    }

    #[test]
    fn test_attribute() {
        let document = Html::parse_fragment("<table><tr><td rowspan='3'>x</td></tr></table>");
        let selector = Selector::parse("td").unwrap();
        let cell = HtmlNode::root(&document).select(&selector).next().unwrap();
        assert_eq!(cell.attribute("rowspan"), Some("3"));
        assert_eq!(cell.attribute("colspan"), None);
    }
}
