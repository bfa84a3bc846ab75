//! [`Agent`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::property::ImageUrl;

/// Real-estate agent listing [`Property`]s.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    /// ID of this [`Agent`].
    pub id: Id,

    /// [`Name`] of this [`Agent`].
    pub name: Name,

    /// [`Email`] of this [`Agent`].
    pub email: Email,

    /// [`Phone`] of this [`Agent`].
    pub phone: Phone,

    /// Avatar image of this [`Agent`], if any.
    pub avatar: Option<ImageUrl>,

    /// Short biography of this [`Agent`].
    pub bio: String,

    /// Average [`Rating`] of this [`Agent`].
    pub rating: Rating,

    /// Number of reviews the [`Rating`] is aggregated from.
    pub review_count: u32,
}

/// ID of an [`Agent`].
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

/// Name of an [`Agent`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

/// Email address of an [`Agent`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of an [`Agent`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format, allowing the
        /// `+1 (555) 123-4567` notation.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d{0,3}[\s-]?(\(\d{3}\)|\d{3})[\s-]?\d{3}[\s-]?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Rating of an [`Agent`] on a `0..=5` scale.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rating(Decimal);

impl Rating {
    /// Highest possible [`Rating`].
    pub const MAX: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Creates a new [`Rating`] if the given `value` is within `0..=5`.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Self::MAX)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Returns the underlying value of this [`Rating`].
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Email, Phone, Rating};

    #[test]
    fn validates_contacts() {
        assert!(Email::new("sarah@vistahaven.com").is_some());
        assert!(Email::new("sarah@vistahaven").is_none());
        assert!(Email::new("sarah vistahaven.com").is_none());

        assert!(Phone::new("+1 (555) 123-4567").is_some());
        assert!(Phone::new("555-123-4567").is_some());
        assert!(Phone::new("12345").is_none());
    }

    #[test]
    fn rating_is_bounded() {
        assert!(Rating::new(Decimal::new(49, 1)).is_some());
        assert!(Rating::new(Decimal::new(5, 0)).is_some());
        assert!(Rating::new(Decimal::new(51, 1)).is_none());
        assert!(Rating::new(Decimal::new(-1, 0)).is_none());
    }
}
