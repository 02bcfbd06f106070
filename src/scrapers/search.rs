use crate::scrapers::dom::{select_all, text_of};
use scraper::Html;
use tracing::{debug, warn};

/// Word that marks the "N αγγελίες" results counter.
pub const COUNT_KEYWORD: &str = "αγγελίες";

const ANCHOR_SELECTOR: &str = "a.row-anchor";
const LISTING_PATH_MARKER: &str = "classifiedscarsview";

/// One fetched page of car.gr search results
///
/// Only this page is considered; further result pages are never followed.
pub struct SearchResultPage {
    url: String,
    html: String,
    document: Html,
    total: Option<u64>,
}

impl SearchResultPage {
    pub fn parse(url: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        let document = Html::parse_document(&html);
        let total = parse_total(&document);

        debug!(total = ?total, "Parsed search results counter");

        Self {
            url: url.into(),
            html,
            document,
            total,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Advertised number of results across all pages, `None` when unknown.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Listing identifiers in document order, duplicates included.
    pub fn listing_ids(&self) -> impl Iterator<Item = String> + '_ {
        select_all(&self.document, ANCHOR_SELECTOR)
            .into_iter()
            .filter_map(|anchor| {
                let href = anchor.value().attr("href");
                let id = href.and_then(listing_id_from_href);
                if id.is_none() {
                    warn!(href = ?href, "Skipping result anchor without a listing id");
                }
                id
            })
    }
}

/// Last `<strong>` counter whose leading token is a number.
fn parse_total(document: &Html) -> Option<u64> {
    let mut total = None;
    for strong in select_all(document, "strong") {
        let text = text_of(strong);
        if !text.contains(COUNT_KEYWORD) {
            continue;
        }
        let count = text
            .split_whitespace()
            .next()
            .filter(|token| token.chars().all(|c| c.is_ascii_digit()))
            .and_then(|token| token.parse::<u64>().ok());
        if count.is_some() {
            total = count;
        }
    }
    total
}

/// `/classifiedscarsview12345-toyota-yaris` -> `12345`
pub fn listing_id_from_href(href: &str) -> Option<String> {
    let flat = href.replace('/', "");
    let head = flat.split('-').next()?;
    head.replace(LISTING_PATH_MARKER, "")
        .trim()
        .parse::<u64>()
        .ok()
        .map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_HTML: &str = r#"
        <html><body>
          <div class="counter"><strong>1234 αγγελίες</strong> βρέθηκαν</div>
          <table>
            <tr><td><a class="row-anchor" href="/classifiedscarsview12345-x">A</a></td></tr>
            <tr><td><a class="row-anchor" href="/classifiedscarsview67890-y">B</a></td></tr>
            <tr><td><a class="other" href="/classifiedscarsview99999-q">ad</a></td></tr>
            <tr><td><a class="row-anchor" href="/classifiedscarsview11111-z">C</a></td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_ids_in_document_order() {
        let page = SearchResultPage::parse("https://www.car.gr/classifieds/cars/?q", RESULTS_HTML);
        let ids: Vec<String> = page.listing_ids().collect();
        assert_eq!(ids, vec!["12345", "67890", "11111"]);
    }

    #[test]
    fn test_ids_are_deterministic() {
        let page = SearchResultPage::parse("u", RESULTS_HTML);
        let first: Vec<String> = page.listing_ids().collect();
        let second: Vec<String> = page.listing_ids().collect();
        assert_eq!(first, second);

        let reparsed = SearchResultPage::parse("u", RESULTS_HTML);
        assert_eq!(first, reparsed.listing_ids().collect::<Vec<_>>());
    }

    #[test]
    fn test_total_count() {
        let page = SearchResultPage::parse("u", RESULTS_HTML);
        assert_eq!(page.total(), Some(1234));
        assert_eq!(page.url(), "u");
        assert!(page.html().contains("row-anchor"));
    }

    #[test]
    fn test_total_unknown_without_keyword_or_number() {
        let page = SearchResultPage::parse("u", "<strong>Αποτελέσματα</strong>");
        assert_eq!(page.total(), None);

        let page = SearchResultPage::parse("u", "<strong>Πολλές αγγελίες</strong>");
        assert_eq!(page.total(), None);

        let page = SearchResultPage::parse("u", "<strong>1.234 αγγελίες</strong>");
        assert_eq!(page.total(), None);
    }

    #[test]
    fn test_total_last_numeric_counter_wins() {
        let html = r#"
            <strong>12 αγγελίες</strong>
            <strong>Πολλές αγγελίες</strong>
            <strong>34 αγγελίες</strong>
            <strong>x αγγελίες</strong>
            <strong>99 αποτελέσματα</strong>
        "#;
        let page = SearchResultPage::parse("u", html);
        assert_eq!(page.total(), Some(34));
    }

    #[test]
    fn test_duplicates_kept_and_bad_anchors_skipped() {
        let html = r#"
            <a class="row-anchor" href="/classifiedscarsview5-a">x</a>
            <a class="row-anchor">no href</a>
            <a class="row-anchor" href="/classifiedscarsviewabc-b">bad</a>
            <a class="row-anchor" href="/classifiedscarsview5-a">x</a>
        "#;
        let page = SearchResultPage::parse("u", html);
        assert_eq!(page.listing_ids().collect::<Vec<_>>(), vec!["5", "5"]);
    }

    #[test]
    fn test_listing_id_from_href() {
        assert_eq!(
            listing_id_from_href("/classifiedscarsview12345-toyota-yaris"),
            Some("12345".to_string())
        );
        assert_eq!(
            listing_id_from_href("/classifiedscarsview00042-x"),
            Some("42".to_string())
        );
        assert_eq!(listing_id_from_href("/about-us"), None);
    }
}
