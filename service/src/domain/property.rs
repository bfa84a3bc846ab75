//! [`Property`] definitions.

use std::{collections::BTreeSet, str::FromStr};

use common::{define_kind, Money};
use derive_more::{AsRef, Display};
use rust_decimal::Decimal;

use crate::domain::agent;

/// Property listed for sale or rent.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Category`] this [`Property`] is listed in.
    pub category: Category,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// Asking price of this [`Property`].
    pub price: Money,

    /// [`Location`] of this [`Property`].
    pub location: Location,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: Bedrooms,

    /// Number of bathrooms in this [`Property`].
    pub bathrooms: Bathrooms,

    /// [`Area`] of this [`Property`].
    pub area: Area,

    /// Year this [`Property`] was built in.
    pub year_built: YearBuilt,

    /// Number of parking spaces of this [`Property`].
    pub parking: Parking,

    /// [`Amenity`]s this [`Property`] offers.
    pub amenities: BTreeSet<Amenity>,

    /// [`ImageUrl`]s of this [`Property`].
    pub images: Vec<ImageUrl>,

    /// ID of the [`Agent`] this [`Property`] is listed by.
    ///
    /// [`Agent`]: crate::domain::Agent
    pub agent_id: agent::Id,

    /// Indicator whether this [`Property`] is promoted as featured.
    pub featured: bool,

    /// Indicator whether this [`Property`] is promoted as trending.
    pub trending: bool,
}

impl Property {
    /// Checks whether this [`Property`] offers at least one of the provided
    /// [`Amenity`]s.
    ///
    /// An empty `required` set is satisfied by any [`Property`].
    #[must_use]
    pub fn has_any_amenity(&self, required: &BTreeSet<Amenity>) -> bool {
        required.is_empty() || !self.amenities.is_disjoint(required)
    }
}

/// ID of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

/// Title of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Free-text location of a [`Property`] (e.g. `Austin, TX`).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Description of a [`Property`].
#[derive(AsRef, Clone, Debug, Default, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is valid.
    ///
    /// Empty descriptions are allowed.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (text.len() <= 8192).then_some(Self(text))
    }
}

/// Amenity offered by a [`Property`] (e.g. `Pool`).
///
/// Amenities are matched by exact name.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
pub struct Amenity(String);

impl Amenity {
    /// Creates a new [`Amenity`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Amenity`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Amenity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Amenity`")
    }
}

/// URL of a [`Property`] image.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        (url.starts_with("https://") || url.starts_with("http://"))
            && !url.contains(char::is_whitespace)
            && url.len() <= 2048
    }
}

/// Number of bedrooms in a [`Property`].
pub type Bedrooms = u8;

/// Number of bathrooms in a [`Property`].
///
/// May be fractional (e.g. `1.5` for a bathroom and a half-bath).
pub type Bathrooms = Decimal;

/// Area of a [`Property`] in square feet.
pub type Area = u32;

/// Year a [`Property`] was built in.
pub type YearBuilt = u16;

/// Number of parking spaces of a [`Property`].
pub type Parking = u8;

define_kind! {
    #[doc = "Category a [`Property`] is listed in."]
    enum Category {
        #[doc = "Listed for sale."]
        Buy = 1,

        #[doc = "Listed for rent."]
        Rent = 2,

        #[doc = "Offered by its owner for valuation and sale."]
        Sell = 3,
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "A detached house."]
        House = 1,

        #[doc = "An apartment in a building."]
        Apartment = 2,

        #[doc = "A condominium unit."]
        Condo = 3,

        #[doc = "A townhouse."]
        Townhouse = 4,
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use super::{Amenity, Category, Id, ImageUrl, Kind, Title};
    use crate::domain::fixture;

    fn amenities(names: &[&str]) -> BTreeSet<Amenity> {
        names.iter().map(|n| Amenity::new(*n).unwrap()).collect()
    }

    #[test]
    fn amenity_any_of() {
        let mut property = fixture::property("1");
        property.amenities = amenities(&["Pool", "Gym"]);

        assert!(property.has_any_amenity(&amenities(&["Gym", "Spa"])));
        assert!(!property.has_any_amenity(&amenities(&["Spa", "Sauna"])));
        assert!(property.has_any_amenity(&BTreeSet::new()));
    }

    #[test]
    fn kinds_parse_from_lowercase() {
        assert_eq!("house".parse::<Kind>().unwrap(), Kind::House);
        assert_eq!("Townhouse".parse::<Kind>().unwrap(), Kind::Townhouse);
        assert!("studio".parse::<Kind>().is_err());
        assert_eq!(Kind::Condo.to_string(), "condo");

        assert_eq!("rent".parse::<Category>().unwrap(), Category::Rent);
        assert_eq!(Category::ALL.len(), 3);
    }

    #[test]
    fn validates_text_values() {
        assert!(Id::new("").is_none());
        assert!(Id::new(" 1").is_none());
        assert!(Title::new("Modern Condo").is_some());
        assert!(Title::new("Modern Condo ").is_none());
        assert!(ImageUrl::new("https://images.example.com/1.jpeg").is_some());
        assert!(ImageUrl::new("ftp://images.example.com/1.jpeg").is_none());
    }
}
