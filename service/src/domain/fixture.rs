//! Test fixtures.

use std::collections::BTreeSet;

use common::{money::Currency, Money};
use rust_decimal::Decimal;

use crate::domain::{
    agent,
    property::{self, Amenity},
    Agent, Property,
};

/// Creates a `buy` [`Property`] with the provided `id` and plain values.
pub(crate) fn property(id: &str) -> Property {
    Property {
        id: property::Id::new(id).unwrap(),
        title: property::Title::new(format!("Property {id}")).unwrap(),
        category: property::Category::Buy,
        kind: property::Kind::House,
        price: Money::new(Decimal::from(500_000), Currency::Usd),
        location: property::Location::new("Austin, TX").unwrap(),
        description: property::Description::default(),
        bedrooms: 3,
        bathrooms: Decimal::from(2),
        area: 2000,
        year_built: 2015,
        parking: 1,
        amenities: BTreeSet::new(),
        images: vec![],
        agent_id: agent::Id::new("1").unwrap(),
        featured: false,
        trending: false,
    }
}

/// Creates an [`Agent`] with the provided `id`.
pub(crate) fn agent(id: &str) -> Agent {
    Agent {
        id: agent::Id::new(id).unwrap(),
        name: agent::Name::new("Sarah Johnson").unwrap(),
        email: agent::Email::new("sarah@vistahaven.com").unwrap(),
        phone: agent::Phone::new("+1 (555) 123-4567").unwrap(),
        avatar: None,
        bio: String::new(),
        rating: agent::Rating::new(Decimal::new(49, 1)).unwrap(),
        review_count: 127,
    }
}

/// Creates a set of [`Amenity`]s out of the provided `names`.
pub(crate) fn amenities(names: &[&str]) -> BTreeSet<Amenity> {
    names.iter().map(|n| Amenity::new(*n).unwrap()).collect()
}

/// Dataset modelled after the shipped catalog, in catalog order.
pub(crate) fn dataset() -> Vec<Property> {
    let mut villa = property("1");
    villa.title = property::Title::new("Modern Luxury Villa").unwrap();
    villa.price.amount = Decimal::from(1_250_000);
    villa.location = property::Location::new("Beverly Hills, CA").unwrap();
    villa.bedrooms = 4;
    villa.bathrooms = Decimal::from(3);
    villa.area = 3200;
    villa.year_built = 2020;
    villa.amenities = amenities(&["Pool", "Gym", "Garden", "Garage"]);
    villa.featured = true;
    villa.trending = true;

    let mut penthouse = property("2");
    penthouse.title = property::Title::new("Downtown Penthouse").unwrap();
    penthouse.kind = property::Kind::Apartment;
    penthouse.price.amount = Decimal::from(850_000);
    penthouse.location = property::Location::new("Manhattan, NY").unwrap();
    penthouse.bedrooms = 2;
    penthouse.area = 1800;
    penthouse.year_built = 2018;
    penthouse.amenities = amenities(&["Concierge", "Gym", "Doorman"]);
    penthouse.agent_id = agent::Id::new("2").unwrap();
    penthouse.featured = true;

    let mut home = property("3");
    home.title = property::Title::new("Cozy Family Home").unwrap();
    home.price.amount = Decimal::from(650_000);
    home.area = 2100;
    home.year_built = 2015;
    home.amenities = amenities(&["Backyard", "Fireplace"]);
    home.trending = true;

    let mut condo = property("4");
    condo.title = property::Title::new("Modern Condo").unwrap();
    condo.category = property::Category::Rent;
    condo.kind = property::Kind::Condo;
    condo.price.amount = Decimal::from(420_000);
    condo.location = property::Location::new("Seattle, WA").unwrap();
    condo.bedrooms = 1;
    condo.bathrooms = Decimal::ONE;
    condo.area = 900;
    condo.year_built = 2019;
    condo.amenities = amenities(&["Gym", "Pool", "Balcony"]);
    condo.agent_id = agent::Id::new("2").unwrap();

    let mut townhouse = property("5");
    townhouse.title = property::Title::new("Austin Townhouse").unwrap();
    townhouse.kind = property::Kind::Townhouse;
    townhouse.price.amount = Decimal::from(480_000);
    townhouse.bedrooms = 3;
    townhouse.bathrooms = Decimal::new(25, 1);
    townhouse.area = 1600;
    townhouse.year_built = 2015;
    townhouse.amenities = amenities(&["Garage"]);

    vec![villa, penthouse, home, condo, townhouse]
}
