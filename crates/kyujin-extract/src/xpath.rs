//! Path-query (XPath 1.0) rules.
//!
//! The HTML is parsed once by scraper and its element tree copied into an
//! `sxd_document` package, so real-world markup that is not well-formed XML
//! can still be queried.

use kyujin_core::Field;
use scraper::{ElementRef, Html, Node};
use sxd_document::dom::{Document, Element};
use sxd_document::Package;
use sxd_xpath::Value;

/// `true` when `rule` is a path query rather than a CSS selector.
#[must_use]
pub fn is_path_query(rule: &str) -> bool {
    let rule = rule.trim_start();
    rule.starts_with('/') || rule.starts_with('(')
}

fn copy_children<'d>(source: ElementRef<'_>, target: Element<'d>, document: &Document<'d>) {
    for child in source.children() {
        match child.value() {
            Node::Text(text) => {
                target.append_child(document.create_text(text));
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    target.append_child(copy_element(element, document));
                }
            }
            _ => {}
        }
    }
}

fn copy_element<'d>(source: ElementRef<'_>, document: &Document<'d>) -> Element<'d> {
    let element = document.create_element(source.value().name());
    for (name, value) in source.value().attrs() {
        element.set_attribute_value(name, value);
    }
    copy_children(source, element, document);
    element
}

/// String values selected by `rule`, in document order.
///
/// A node-set yields each node's string value (element text, attribute
/// value); a scalar result yields one value. Invalid expressions are
/// logged and yield nothing.
#[must_use]
pub fn xpath_values(html: &Html, rule: &str, field: Field) -> Vec<String> {
    let package = Package::new();
    let document = package.as_document();
    document
        .root()
        .append_child(copy_element(html.root_element(), &document));

    match sxd_xpath::evaluate_xpath(&document, rule.trim()) {
        Ok(Value::Nodeset(nodes)) => nodes
            .document_order()
            .into_iter()
            .map(|node| node.string_value())
            .collect(),
        Ok(Value::String(text)) => vec![text],
        Ok(Value::Number(number)) => vec![number.to_string()],
        Ok(Value::Boolean(flag)) => vec![flag.to_string()],
        Err(e) => {
            tracing::warn!(field = %field, rule, error = %e, "invalid path-query rule; field left empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <h1 class="t">病棟看護師</h1>
        <ul class="access"><li>渋谷駅</li><li>原宿駅</li></ul>
        <a class="apply" href="/apply/1">応募</a>
        <p>閉じタグなし<br>改行
    </body></html>"#;

    #[test]
    fn recognizes_path_queries() {
        assert!(is_path_query("//h1"));
        assert!(is_path_query(" /html/body"));
        assert!(is_path_query("(//li)[2]"));
        assert!(!is_path_query("h1.title"));
        assert!(!is_path_query("#main > p"));
    }

    #[test]
    fn element_text_in_document_order() {
        let html = Html::parse_document(PAGE);
        assert_eq!(
            xpath_values(&html, "//h1[@class='t']", Field::Name),
            vec!["病棟看護師".to_string()]
        );
        assert_eq!(
            xpath_values(&html, "//ul[@class='access']/li", Field::Station),
            vec!["渋谷駅".to_string(), "原宿駅".to_string()]
        );
    }

    #[test]
    fn attributes_and_scalars() {
        let html = Html::parse_document(PAGE);
        assert_eq!(
            xpath_values(&html, "//a[@class='apply']/@href", Field::Detail),
            vec!["/apply/1".to_string()]
        );
        assert_eq!(
            xpath_values(&html, "string((//li)[2])", Field::Station),
            vec!["原宿駅".to_string()]
        );
    }

    #[test]
    fn malformed_markup_is_still_queryable() {
        let html = Html::parse_document(PAGE);
        let values = xpath_values(&html, "//p", Field::Detail);
        assert_eq!(values.len(), 1);
        assert!(values[0].starts_with("閉じタグなし"));
    }

    #[test]
    fn invalid_or_unmatched_rules_yield_nothing() {
        let html = Html::parse_document(PAGE);
        assert!(xpath_values(&html, "//h1[", Field::Name).is_empty());
        assert!(xpath_values(&html, "//table", Field::Name).is_empty());
    }
}
