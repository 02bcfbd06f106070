use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Seller block of a listing
///
/// Every key is optional; a listing without a seller container serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Seller {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl Seller {
    pub fn is_empty(&self) -> bool {
        self.link.is_none() && self.name.is_none() && self.region.is_none() && self.zip_code.is_none()
    }
}

/// Vehicle attributes read from the specification table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Specifications {
    pub bhp: Option<String>,
    pub release_date: Option<String>,
    pub fuel_type: Option<String>,
    pub displacement: Option<String>,
    pub mileage: Option<String>,
    pub status: Option<String>,
    pub price: Option<String>,
    pub listing_number: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub drivetrain: Option<String>,
    pub visits: Option<String>,
    pub euro_class: Option<String>,
    pub registration: Option<String>,
}

/// One parsed vehicle listing
///
/// Built once through [`ListingBuilder`]; the identifier, the raw markup and the
/// extraction timestamp cannot change afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ListingRecord {
    id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<u32>,
    #[serde(flatten)]
    pub specs: Specifications,
    pub seller: Seller,
    pub images: Vec<String>,
    scraped_at: DateTime<Utc>,
    html: String,
}

impl ListingRecord {
    pub fn builder(id: impl Into<String>) -> ListingBuilder {
        ListingBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Collects optional field values before the record is stamped and frozen
#[derive(Debug, Default)]
pub struct ListingBuilder {
    id: String,
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    city: Option<String>,
    region: Option<String>,
    postal_code: Option<u32>,
    specs: Specifications,
    seller: Seller,
    images: Vec<String>,
}

impl ListingBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn location(
        mut self,
        city: Option<String>,
        region: Option<String>,
        postal_code: Option<u32>,
    ) -> Self {
        self.city = city;
        self.region = region;
        self.postal_code = postal_code;
        self
    }

    pub fn specs(mut self, specs: Specifications) -> Self {
        self.specs = specs;
        self
    }

    pub fn seller(mut self, seller: Seller) -> Self {
        self.seller = seller;
        self
    }

    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Freeze the record, keeping `html` as its raw source and stamping `scraped_at` now.
    pub fn build(self, html: impl Into<String>) -> ListingRecord {
        ListingRecord {
            id: self.id,
            title: self.title,
            url: self.url,
            description: self.description,
            city: self.city,
            region: self.region,
            postal_code: self.postal_code,
            specs: self.specs,
            seller: self.seller,
            images: self.images,
            scraped_at: Utc::now(),
            html: html.into(),
        }
    }
}

/// Project every field of `record`, raw markup included, into an ordered map.
///
/// Callers drop the keys they do not want to surface (`html` for display, `images` for
/// tabular export).
pub fn to_dict(record: &ListingRecord) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
