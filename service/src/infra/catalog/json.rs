//! JSON documents loading into an [`InMemory`] catalog.
//!
//! Document is expected to look like:
//! ```json
//! {
//!     "currency": "USD",
//!     "agents": [{ "id": "1", "name": "Sarah Johnson", ... }],
//!     "properties": [{ "id": "1", "agentId": "1", ... }]
//! }
//! ```

use std::{collections::BTreeSet, path::Path, str::FromStr};

use common::{money::Currency, Money};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{agent, property, Agent, Property},
    infra::catalog::{Error, InMemory},
};

impl InMemory {
    /// Loads a new [`InMemory`] catalog from the JSON file at the provided
    /// `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read, or doesn't contain a valid catalog
    /// document.
    pub async fn from_json_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, Traced<Error>> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let catalog = Self::from_json_str(&json).map_err(tracerr::wrap!())?;
        log::info!(
            "loaded {} properties from `{}` catalog",
            catalog.len(),
            path.display(),
        );
        Ok(catalog)
    }

    /// Parses a new [`InMemory`] catalog from the provided JSON document.
    ///
    /// # Errors
    ///
    /// If the provided `json` isn't a valid catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, Traced<Error>> {
        let Document {
            currency,
            agents,
            properties,
        } = serde_json::from_str(json)
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let currency = match currency {
            Some(c) => Currency::from_str(&c)
                .map_err(|_| tracerr::new!(Error::invalid("currency", c)))?,
            None => Currency::default(),
        };
        let agents = agents
            .into_iter()
            .map(AgentDocument::into_agent)
            .collect::<Result<Vec<_>, _>>()
            .map_err(tracerr::wrap!())?;
        let properties = properties
            .into_iter()
            .map(|p| p.into_property(currency))
            .collect::<Result<Vec<_>, _>>()
            .map_err(tracerr::wrap!())?;

        Self::new(properties, agents).map_err(tracerr::wrap!())
    }
}

/// Parses the provided `value` of the `field`.
fn parse<T: FromStr>(
    field: &'static str,
    value: String,
) -> Result<T, Traced<Error>> {
    value
        .parse()
        .map_err(|_| tracerr::new!(Error::invalid(field, value)))
}

/// Validates the provided `value` of the `field` with the `new` constructor.
fn validate<T>(
    field: &'static str,
    value: String,
    new: impl FnOnce(String) -> Option<T>,
) -> Result<T, Traced<Error>> {
    new(value.clone()).ok_or_else(|| tracerr::new!(Error::invalid(field, value)))
}

/// Catalog document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    /// Code of the currency the prices are given in.
    #[serde(default)]
    currency: Option<String>,

    /// [`AgentDocument`]s of the catalog.
    #[serde(default)]
    agents: Vec<AgentDocument>,

    /// [`PropertyDocument`]s of the catalog.
    #[serde(default)]
    properties: Vec<PropertyDocument>,
}

/// [`Agent`] entry of a catalog [`Document`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentDocument {
    id: String,
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    bio: String,
    rating: Decimal,
    #[serde(default)]
    review_count: u32,
}

impl AgentDocument {
    /// Validates this [`AgentDocument`] into an [`Agent`].
    fn into_agent(self) -> Result<Agent, Traced<Error>> {
        let Self {
            id,
            name,
            email,
            phone,
            avatar,
            bio,
            rating,
            review_count,
        } = self;

        Ok(Agent {
            id: validate("agents.id", id, agent::Id::new)?,
            name: validate("agents.name", name, agent::Name::new)?,
            email: validate("agents.email", email, agent::Email::new)?,
            phone: validate("agents.phone", phone, agent::Phone::new)?,
            avatar: avatar
                .map(|a| validate("agents.avatar", a, property::ImageUrl::new))
                .transpose()?,
            bio,
            rating: agent::Rating::new(rating).ok_or_else(|| {
                tracerr::new!(Error::invalid("agents.rating", rating))
            })?,
            review_count,
        })
    }
}

/// [`Property`] entry of a catalog [`Document`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDocument {
    id: String,
    title: String,
    category: String,
    #[serde(rename = "type")]
    kind: String,
    price: Decimal,
    location: String,
    #[serde(default)]
    description: String,
    bedrooms: property::Bedrooms,
    bathrooms: property::Bathrooms,
    area: property::Area,
    year_built: property::YearBuilt,
    #[serde(default)]
    parking: property::Parking,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    agent_id: String,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    trending: bool,
}

impl PropertyDocument {
    /// Validates this [`PropertyDocument`] into a [`Property`] priced in the
    /// provided [`Currency`].
    fn into_property(self, currency: Currency) -> Result<Property, Traced<Error>> {
        let Self {
            id,
            title,
            category,
            kind,
            price,
            location,
            description,
            bedrooms,
            bathrooms,
            area,
            year_built,
            parking,
            amenities,
            images,
            agent_id,
            featured,
            trending,
        } = self;

        if price.is_sign_negative() {
            return Err(tracerr::new!(Error::invalid("properties.price", price)));
        }
        if bathrooms.is_sign_negative() {
            return Err(tracerr::new!(Error::invalid(
                "properties.bathrooms",
                bathrooms,
            )));
        }

        Ok(Property {
            id: validate("properties.id", id, property::Id::new)?,
            title: validate("properties.title", title, property::Title::new)?,
            category: parse("properties.category", category)?,
            kind: parse("properties.type", kind)?,
            price: Money::new(price, currency),
            location: validate(
                "properties.location",
                location,
                property::Location::new,
            )?,
            description: validate(
                "properties.description",
                description,
                property::Description::new,
            )?,
            bedrooms,
            bathrooms,
            area,
            year_built,
            parking,
            amenities: amenities
                .into_iter()
                .map(|a| validate("properties.amenities", a, property::Amenity::new))
                .collect::<Result<BTreeSet<_>, _>>()?,
            images: images
                .into_iter()
                .map(|i| validate("properties.images", i, property::ImageUrl::new))
                .collect::<Result<Vec<_>, _>>()?,
            agent_id: validate("properties.agentId", agent_id, agent::Id::new)?,
            featured,
            trending,
        })
    }
}

#[cfg(test)]
mod spec {
    use common::money::Currency;
    use rust_decimal::Decimal;

    use super::super::{Error, InMemory};
    use crate::domain::property::{Category, Kind};

    const DOCUMENT: &str = r#"{
        "currency": "EUR",
        "agents": [{
            "id": "1",
            "name": "Sarah Johnson",
            "email": "sarah@vistahaven.com",
            "phone": "+1 (555) 123-4567",
            "bio": "Luxury specialist.",
            "rating": 4.9,
            "reviewCount": 127
        }],
        "properties": [{
            "id": "1",
            "title": "Modern Condo",
            "category": "rent",
            "type": "condo",
            "price": 420000,
            "location": "Seattle, WA",
            "bedrooms": 1,
            "bathrooms": 1.5,
            "area": 900,
            "yearBuilt": 2019,
            "amenities": ["Gym", "Pool"],
            "images": ["https://images.example.com/condo.jpeg"],
            "agentId": "1",
            "featured": true
        }]
    }"#;

    #[test]
    fn parses_document() {
        let catalog = InMemory::from_json_str(DOCUMENT).unwrap();

        assert_eq!(catalog.len(), 1);
        let property = &catalog.properties[0];
        assert_eq!(property.category, Category::Rent);
        assert_eq!(property.kind, Kind::Condo);
        assert_eq!(property.price.amount, Decimal::from(420_000));
        assert_eq!(property.price.currency, Currency::Eur);
        assert_eq!(property.bathrooms, Decimal::new(15, 1));
        assert_eq!(property.parking, 0);
        assert_eq!(property.amenities.len(), 2);
        assert!(property.featured);
        assert!(!property.trending);

        let agent = catalog.agents.values().next().unwrap();
        assert_eq!(agent.rating.value(), Decimal::new(49, 1));
        assert_eq!(agent.review_count, 127);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = InMemory::from_json_str("{ \"properties\": [").unwrap_err();
        assert!(matches!(err.as_ref(), Error::Json(_)));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = InMemory::from_json_str(&DOCUMENT.replace("condo", "castle"))
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::InvalidValue { field: "properties.type", value }
                if value == "castle",
        ));

        let err = InMemory::from_json_str(&DOCUMENT.replace("4.9", "7"))
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::InvalidValue { field: "agents.rating", .. },
        ));

        let err = InMemory::from_json_str(&DOCUMENT.replace("EUR", "GBP"))
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::InvalidValue { field: "currency", .. },
        ));
    }

    #[tokio::test]
    async fn reports_missing_file() {
        let err = InMemory::from_json_file("/nonexistent/catalog.json")
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), Error::Io(_)));
    }

    #[tokio::test]
    async fn loads_shipped_catalog() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../catalog.json");
        let catalog = InMemory::from_json_file(path).await.unwrap();
        assert!(!catalog.is_empty());
    }
}
