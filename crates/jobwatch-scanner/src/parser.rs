//! Shared response-parsing helpers.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use url::Url;

const NAME_KEYS: &[&str] = &["fullLocation", "name", "location"];
const LOCALITY_KEYS: &[&str] = &["city", "locality", "cityName"];
const REGION_KEYS: &[&str] = &["region", "state", "regionName"];
// Spelled-out names first: bare ISO codes collide with state codes.
const COUNTRY_KEYS: &[&str] = &["countryName", "country"];
const NO_ITEMS: &[Value] = &[];

/// Normalize a vendor location value to one free-text string.
///
/// - string: trimmed
/// - list: each item normalized, joined with `, `
/// - object: `fullLocation`, `name` or `location` if present, else locality,
///   region and country joined with `, `
///
/// Anything else, or an empty result, is `None`.
#[must_use]
pub fn normalize_location(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(normalize_location)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => {
            if let Some(name) = first_string(map, NAME_KEYS) {
                name
            } else {
                [LOCALITY_KEYS, REGION_KEYS, COUNTRY_KEYS]
                    .iter()
                    .filter_map(|keys| first_string(map, keys))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        _ => String::new(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn first_string(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| map.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// String field of a JSON object, trimmed; empty when missing.
#[must_use]
pub fn str_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Array at `path` in a JSON document.
///
/// A missing or `null` key is an empty list; any other non-array value is `None`.
#[must_use]
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a [Value]> {
    let mut current = value;
    for key in path {
        match current.get(*key) {
            Some(next) => current = next,
            None => return Some(NO_ITEMS),
        }
    }
    match current {
        Value::Array(items) => Some(items.as_slice()),
        Value::Null => Some(NO_ITEMS),
        _ => None,
    }
}

/// Parse a CSS selector known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Text content of the first element matching `sel`, whitespace collapsed.
#[must_use]
pub fn select_text(element: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    element
        .select(sel)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// `href` of the first element matching `sel`, resolved against `base`.
#[must_use]
pub fn select_link(element: &ElementRef<'_>, sel: &Selector, base: &Url) -> Option<String> {
    element
        .select(sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| resolve_link(base, href))
}

/// Resolve a possibly relative link.
#[must_use]
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse an HTML page.
#[must_use]
pub fn parse_html(body: &str) -> Html {
    Html::parse_document(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_string_location() {
        assert_eq!(
            normalize_location(&json!("  Austin, TX ")),
            Some("Austin, TX".to_string())
        );
        assert_eq!(normalize_location(&json!("")), None);
    }

    #[test]
    fn test_normalize_list_location() {
        assert_eq!(
            normalize_location(&json!(["New York, NY", "Remote"])),
            Some("New York, NY, Remote".to_string())
        );
        assert_eq!(normalize_location(&json!([])), None);
    }

    #[test]
    fn test_normalize_nested_location() {
        assert_eq!(
            normalize_location(&json!({"city": "Berlin", "region": "BE", "country": "de"})),
            Some("Berlin, BE, de".to_string())
        );
        assert_eq!(
            normalize_location(&json!({"city": "Seattle", "countryName": "United States"})),
            Some("Seattle, United States".to_string())
        );
        assert_eq!(
            normalize_location(&json!({"name": "Austin, TX"})),
            Some("Austin, TX".to_string())
        );
        assert_eq!(
            normalize_location(&json!([{"location": "Stockholm"}, {"location": "London"}])),
            Some("Stockholm, London".to_string())
        );
    }

    #[test]
    fn test_normalize_prefers_spelled_out_location() {
        assert_eq!(
            normalize_location(&json!({
                "city": "Bangalore",
                "region": "KA",
                "country": "in",
                "fullLocation": "Bangalore, Karnataka, India"
            })),
            Some("Bangalore, Karnataka, India".to_string())
        );
        assert_eq!(
            normalize_location(&json!({"city": "Berlin", "country": "de", "countryName": "Germany"})),
            Some("Berlin, Germany".to_string())
        );
    }

    #[test]
    fn test_normalize_unrecognized_location() {
        assert_eq!(normalize_location(&json!(42)), None);
        assert_eq!(normalize_location(&json!(null)), None);
        assert_eq!(normalize_location(&json!({"lat": 1.0})), None);
    }

    #[test]
    fn test_array_at() {
        let doc = json!({"data": {"results": [1, 2]}, "jobs": null, "bad": "x"});
        assert_eq!(array_at(&doc, &["data", "results"]).map(<[Value]>::len), Some(2));
        assert_eq!(array_at(&doc, &["jobs"]).map(<[Value]>::len), Some(0));
        assert_eq!(array_at(&doc, &["missing"]).map(<[Value]>::len), Some(0));
        assert!(array_at(&doc, &["bad"]).is_none());
    }

    #[test]
    fn test_str_field_accepts_numbers() {
        let job = json!({"id": 123, "text": " Engineer "});
        assert_eq!(str_field(&job, "id"), "123");
        assert_eq!(str_field(&job, "text"), "Engineer");
        assert_eq!(str_field(&job, "missing"), "");
    }

    #[test]
    fn test_select_link_resolves_relative() {
        let html = parse_html(r#"<div class="row"><a href="/acme/job/oX1">Engineer</a></div>"#);
        let row_sel = selector("div.row");
        let a_sel = selector("a");
        let row = html.select(&row_sel).next().expect("row");
        let base = Url::parse("https://jobs.jobvite.com/acme/jobs").expect("base url");

        assert_eq!(
            select_link(&row, &a_sel, &base),
            Some("https://jobs.jobvite.com/acme/job/oX1".to_string())
        );
        assert_eq!(select_text(&row, &a_sel), Some("Engineer".to_string()));
    }
}
