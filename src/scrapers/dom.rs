//! Small helpers over the `scraper` tree shared by the page extractors.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Compile a CSS selector. An invalid selector reads as "nothing matched".
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(css = css, error = %e, "Invalid selector");
            None
        }
    }
}

/// First element in `document` matching `css`.
pub fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    document.select(&selector).next()
}

/// First descendant of `element` matching `css`.
pub fn select_first_in<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    element.select(&selector).next()
}

/// All elements in `document` matching `css`, in document order.
pub fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => document.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Concatenated text of every descendant text node.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
