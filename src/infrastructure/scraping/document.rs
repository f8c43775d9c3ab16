// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::warn;
use url::Url;

static REDIRECT_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"url=([^&]+)").unwrap());

/// Trim and collapse runs of whitespace into single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Make `url` absolute against `base`
///
/// Absolute URLs pass through, protocol-relative URLs take the scheme of
/// `base` and anything else is joined onto `base`. Empty input stays empty.
pub fn normalize_url(url: &str, base: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    match Url::parse(base) {
        Ok(base_url) => {
            if url.starts_with("//") {
                return format!("{}:{}", base_url.scheme(), url);
            }
            base_url
                .join(url)
                .map(|joined| joined.to_string())
                .unwrap_or_else(|_| format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/')))
        }
        Err(_) => format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/')),
    }
}

/// Parse a CSS selector, logging instead of failing on a bad one
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Invalid selector {}: {:?}", css, e);
            None
        }
    }
}

/// All matches of `css` below `scope`
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// First match for the first selector in `candidates` that matches anything
pub fn select_first<'a>(scope: ElementRef<'a>, candidates: &[&str]) -> Option<ElementRef<'a>> {
    candidates
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|selector| scope.select(&selector).next())
}

/// Elements matched by the first selector in `candidates` that matches anything
pub fn select_any<'a>(scope: ElementRef<'a>, candidates: &[&str]) -> Vec<ElementRef<'a>> {
    candidates
        .iter()
        .map(|css| select_all(scope, css))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

/// Cleaned text content of an element
pub fn text_of(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// Cleaned, non-empty text of the first match
pub fn select_text(scope: ElementRef<'_>, candidates: &[&str]) -> Option<String> {
    select_first(scope, candidates)
        .map(text_of)
        .filter(|text| !text.is_empty())
}

/// Non-empty attribute value
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Decoded `url=` parameter of a tracking redirect link
pub fn redirect_target(href: &str) -> Option<String> {
    let encoded = REDIRECT_TARGET.captures(href)?.get(1)?.as_str();
    urlencoding::decode(encoded)
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// JSON embedded in a `<script>` element
///
/// For a script containing `pattern` the first brace-balanced object is
/// parsed. Other scripts are tried as a whole. The first script yielding
/// valid JSON wins.
pub fn extract_json_from_script(document: &Html, pattern: Option<&str>) -> Option<Value> {
    let scripts = selector("script")?;
    for script in document.select(&scripts) {
        let text = script.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let parsed = match pattern {
            Some(pattern) if text.contains(pattern) => balanced_object(text)
                .and_then(|object| serde_json::from_str::<Value>(object).ok()),
            _ => serde_json::from_str::<Value>(text).ok(),
        };
        if parsed.is_some() {
            return parsed;
        }
    }
    None
}

/// First `{...}` object in `text`, skipping braces inside JSON strings
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
