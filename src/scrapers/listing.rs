use crate::models::{ListingRecord, Seller, Specifications};
use crate::scrapers::dom::{select_all, select_first, select_first_in, text_of};
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Specification table labels, as they read once spaces and newlines are removed.
pub mod labels {
    pub const BHP: &str = "Ίπποι";
    pub const RELEASE_DATE: &str = "Χρονολογία";
    pub const FUEL_TYPE: &str = "Καύσιμο";
    pub const DISPLACEMENT: &str = "Κυβικά";
    pub const MILEAGE: &str = "Χιλιόμετρα";
    pub const STATUS: &str = "Κατάσταση";
    pub const PRICE: &str = "Τιμή";
    pub const LISTING_NUMBER: &str = "Νούμεροαγγελίας";
    pub const TRANSMISSION: &str = "Σασμάν";
    pub const COLOR: &str = "Χρώμα";
    pub const DRIVETRAIN: &str = "Κίνηση";
    pub const VISITS: &str = "Εμφανίσειςαγγελίας";
    pub const EURO_CLASS: &str = "Κλάσηρύπων";
    pub const REGISTRATION: &str = "Τέληκυκλοφορίας";
}

const SPEC_ROWS_SELECTOR: &str = "table#specification-table > tbody > tr";
const SELLER_SELECTOR: &str = "div.main-seller-info";
const THUMBNAIL_SELECTOR: &str = "img.thumb-img";

/// Label -> value index over the specification table
///
/// A row is indexed under the normalized text of each of its cells and carries the text of
/// its last cell. The first row to claim a label keeps it.
#[derive(Debug, Default)]
pub struct SpecTable {
    values: HashMap<String, String>,
}

impl SpecTable {
    pub fn from_document(document: &Html) -> Self {
        let rows = select_all(document, SPEC_ROWS_SELECTOR);
        if rows.is_empty() {
            debug!("No specification table rows found");
        }

        let mut values = HashMap::new();
        for row in rows {
            let cells: Vec<ElementRef<'_>> = row.children().filter_map(ElementRef::wrap).collect();
            let Some(last) = cells.last() else {
                continue;
            };
            let value = text_of(*last).replace('\n', "").trim().to_string();

            for cell in &cells {
                let label = normalize_label(&text_of(*cell));
                values.entry(label).or_insert_with(|| value.clone());
            }
        }

        Self { values }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.values.get(label).map(String::as_str)
    }

    pub fn specifications(&self) -> Specifications {
        let field = |label: &str| self.get(label).map(str::to_string);

        Specifications {
            bhp: field(labels::BHP),
            release_date: field(labels::RELEASE_DATE),
            fuel_type: field(labels::FUEL_TYPE),
            displacement: field(labels::DISPLACEMENT),
            mileage: field(labels::MILEAGE),
            status: field(labels::STATUS),
            price: field(labels::PRICE),
            listing_number: field(labels::LISTING_NUMBER),
            transmission: field(labels::TRANSMISSION),
            color: field(labels::COLOR),
            drivetrain: field(labels::DRIVETRAIN),
            visits: field(labels::VISITS),
            euro_class: field(labels::EURO_CLASS),
            registration: field(labels::REGISTRATION),
        }
    }
}

fn normalize_label(text: &str) -> String {
    text.chars().filter(|c| *c != ' ' && *c != '\n').collect()
}

/// Build a full record from one listing page.
///
/// Every field is extracted on its own; a missing or malformed element only empties that
/// field.
pub fn parse_listing(id: &str, url: &str, html: String) -> ListingRecord {
    let document = Html::parse_document(&html);

    ListingRecord::builder(id)
        .title(parse_title(&document))
        .url(url)
        .description(parse_description(&document))
        .location(
            parse_itemprop_span(&document, "addressLocality"),
            parse_itemprop_span(&document, "addressRegion"),
            parse_postal_code(&document),
        )
        .specs(SpecTable::from_document(&document).specifications())
        .seller(parse_seller(&document, id))
        .images(parse_images(&document))
        .build(html)
}

fn parse_title(document: &Html) -> Option<String> {
    select_first(document, "title").map(text_of)
}

fn parse_description(document: &Html) -> Option<String> {
    select_first(document, "[itemprop=description]")
        .map(|el| text_of(el).replace(['\n', '\r'], ""))
}

fn parse_itemprop_span(document: &Html, itemprop: &str) -> Option<String> {
    let css = format!("span[itemprop={}]", itemprop);
    select_first(document, &css).map(|span| text_of(span).trim().to_string())
}

fn parse_postal_code(document: &Html) -> Option<u32> {
    parse_itemprop_span(document, "postalCode")?.parse().ok()
}

fn parse_seller(document: &Html, id: &str) -> Seller {
    let Some(container) = select_first(document, SELLER_SELECTOR) else {
        debug!(id = id, "No main seller info found");
        return Seller::default();
    };

    let anchor = select_first_in(container, r#"a[target="_blank"]"#);
    let attr = |name: &str| {
        anchor
            .and_then(|a| a.value().attr(name))
            .map(str::to_string)
    };

    let mut seller = Seller {
        link: attr("href"),
        name: attr("title"),
        ..Default::default()
    };

    if let Some(span) = select_first_in(container, "span") {
        let text = text_of(span);
        match text.split_whitespace().collect::<Vec<_>>().as_slice() {
            [region, zip_code] => {
                seller.region = Some(region.to_string());
                seller.zip_code = Some(zip_code.to_string());
            }
            tokens => {
                warn!(
                    id = id,
                    text = %text.trim(),
                    tokens = tokens.len(),
                    "Seller location is not `region zip_code`"
                );
            }
        }
    }

    seller
}

fn parse_images(document: &Html) -> Vec<String> {
    select_all(document, THUMBNAIL_SELECTOR)
        .into_iter()
        .filter_map(|img| img.value().attr("src"))
        .map(full_size_image_url)
        .collect()
}

/// `//img.example/x_v.jpg` -> `https://img.example/x_b.jpg`
pub fn full_size_image_url(src: &str) -> String {
    let mut url = match src.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => src.to_string(),
    };

    let file_start = url.rfind('/').map_or(0, |pos| pos + 1);
    if let Some(pos) = url[file_start..].rfind("_v") {
        let marker = file_start + pos;
        url.replace_range(marker..marker + 2, "_b");
    }
    url
}
