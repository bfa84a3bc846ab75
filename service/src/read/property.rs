//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod list {
    //! [`Property`] list definitions: filtering and sorting of listings.

    use std::{
        cmp::Reverse,
        collections::BTreeSet,
        str::FromStr,
        sync::LazyLock,
    };

    use regex::Regex;
    use rust_decimal::Decimal;
    use strum::{Display, EnumString};
    use tracing as log;

    use crate::domain::{
        property::{
            Amenity, Area, Bathrooms, Bedrooms, Category, Kind, YearBuilt,
        },
        Property,
    };

    /// Criteria a [`Property`] must satisfy to be listed.
    ///
    /// Every criterion left unset doesn't constrain the result. Set criteria
    /// are combined with logical AND, numeric bounds are inclusive.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// [`Category`] to list.
        pub category: Option<Category>,

        /// [`Kind`] of the listed properties.
        pub kind: Option<Kind>,

        /// Lowest price amount.
        pub min_price: Option<Decimal>,

        /// Highest price amount.
        pub max_price: Option<Decimal>,

        /// Smallest [`Area`].
        pub min_area: Option<Area>,

        /// Largest [`Area`].
        pub max_area: Option<Area>,

        /// Oldest year of construction.
        pub min_year_built: Option<YearBuilt>,

        /// Minimal number of bedrooms.
        pub min_bedrooms: Option<Bedrooms>,

        /// Minimal number of bathrooms.
        pub min_bathrooms: Option<Bathrooms>,

        /// [`Amenity`]s of which at least one must be offered.
        pub amenities: BTreeSet<Amenity>,

        /// Text to search in titles and locations, ignoring case.
        pub text: Option<String>,

        /// Text to search in locations only, ignoring case.
        pub location: Option<String>,
    }

    impl Filter {
        /// Creates a new [`Filter`] listing the provided [`Category`] only.
        #[must_use]
        pub fn category(category: Category) -> Self {
            Self {
                category: Some(category),
                ..Self::default()
            }
        }

        /// Applies the provided [`PriceRange`] to this [`Filter`].
        #[must_use]
        pub fn with_price_range(mut self, range: PriceRange) -> Self {
            self.min_price = range.min;
            self.max_price = range.max;
            self
        }

        /// Checks whether the provided [`Property`] satisfies this [`Filter`].
        #[must_use]
        pub fn matches(&self, property: &Property) -> bool {
            let Self {
                category,
                kind,
                min_price,
                max_price,
                min_area,
                max_area,
                min_year_built,
                min_bedrooms,
                min_bathrooms,
                amenities,
                text,
                location,
            } = self;
            let price = property.price.amount;

            category.is_none_or(|c| property.category == c)
                && kind.is_none_or(|k| property.kind == k)
                && min_price.is_none_or(|min| price >= min)
                && max_price.is_none_or(|max| price <= max)
                && min_area.is_none_or(|min| property.area >= min)
                && max_area.is_none_or(|max| property.area <= max)
                && min_year_built.is_none_or(|min| property.year_built >= min)
                && min_bedrooms.is_none_or(|min| property.bedrooms >= min)
                && min_bathrooms.is_none_or(|min| property.bathrooms >= min)
                && property.has_any_amenity(amenities)
                && text.as_deref().is_none_or(|text| {
                    contains_ignore_case(property.title.as_ref(), text)
                        || contains_ignore_case(property.location.as_ref(), text)
                })
                && location.as_deref().is_none_or(|location| {
                    contains_ignore_case(property.location.as_ref(), location)
                })
        }
    }

    /// Checks whether `haystack` contains `needle`, ignoring case.
    fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Price bounds encoded as `min-max` or `min+` (no upper bound).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct PriceRange {
        /// Lowest price amount.
        pub min: Option<Decimal>,

        /// Highest price amount.
        pub max: Option<Decimal>,
    }

    impl FromStr for PriceRange {
        type Err = &'static str;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            /// Regular expression of `min-max`, `min+` and `min` formats.
            static REGEX: LazyLock<Regex> = LazyLock::new(|| {
                Regex::new(
                    r"^\s*(\d+(?:\.\d+)?)\s*(?:\+|-\s*(\d+(?:\.\d+)?))?\s*$",
                )
                .expect("valid regex")
            });

            let caps = REGEX.captures(s).ok_or("invalid `PriceRange`")?;
            let bound = |i| {
                caps.get(i)
                    .map(|m| Decimal::from_str(m.as_str()))
                    .transpose()
                    .map_err(|_| "invalid `PriceRange` bound")
            };
            Ok(Self {
                min: bound(1)?,
                max: bound(2)?,
            })
        }
    }

    /// Order of the listed [`Property`]s.
    ///
    /// Sorting is stable: properties with equal keys keep their relative
    /// order.
    #[derive(
        Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq,
    )]
    #[strum(ascii_case_insensitive)]
    pub enum Sort {
        /// Most recently built first.
        #[default]
        #[strum(to_string = "newest")]
        Newest,

        /// Cheapest first.
        #[strum(to_string = "price-asc", serialize = "price-low")]
        PriceAscending,

        /// Most expensive first.
        #[strum(to_string = "price-desc", serialize = "price-high")]
        PriceDescending,

        /// Largest first.
        #[strum(to_string = "area-desc", serialize = "area")]
        AreaDescending,
    }

    impl Sort {
        /// Sorts the provided [`Property`]s in this [`Sort`] order.
        pub fn apply(self, properties: &mut [Property]) {
            match self {
                Self::Newest => properties.sort_by_key(|p| Reverse(p.year_built)),
                Self::PriceAscending => {
                    properties.sort_by_key(|p| p.price.amount);
                }
                Self::PriceDescending => {
                    properties.sort_by_key(|p| Reverse(p.price.amount));
                }
                Self::AreaDescending => properties.sort_by_key(|p| Reverse(p.area)),
            }
        }
    }

    /// Selector of a [`Property`] list.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Selector {
        /// [`Filter`] of the list.
        pub filter: Filter,

        /// [`Sort`] order of the list.
        pub sort: Sort,
    }

    impl Selector {
        /// Selects the [`Property`]s satisfying this [`Selector`].
        #[must_use]
        pub fn select(&self, properties: &[Property]) -> Vec<Property> {
            query(properties, &self.filter, self.sort)
        }
    }

    /// Lists the provided [`Property`]s satisfying the [`Filter`] in the
    /// [`Sort`] order.
    ///
    /// The input isn't mutated, and the same input always produces the same
    /// output.
    #[must_use]
    pub fn query(
        properties: &[Property],
        filter: &Filter,
        sort: Sort,
    ) -> Vec<Property> {
        let mut listed = properties
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect::<Vec<_>>();
        sort.apply(&mut listed);
        listed
    }

    /// Raw search parameters, as provided by a search form or URL query.
    ///
    /// Unparsable values are ignored rather than rejected.
    #[derive(Clone, Debug, Default)]
    pub struct Params {
        /// [`Category`] to list.
        pub category: Option<String>,

        /// Text to search in titles and locations.
        pub query: Option<String>,

        /// Text to search in locations.
        pub location: Option<String>,

        /// [`PriceRange`] in `min-max` or `min+` format.
        pub price_range: Option<String>,

        /// [`Kind`] of the listed properties.
        pub property_type: Option<String>,

        /// Lowest price, overriding the one of `price_range`.
        pub min_price: Option<String>,

        /// Highest price, overriding the one of `price_range`.
        pub max_price: Option<String>,

        /// Minimal number of bedrooms.
        pub bedrooms: Option<String>,

        /// Minimal number of bathrooms.
        pub bathrooms: Option<String>,

        /// Smallest area.
        pub min_area: Option<String>,

        /// Largest area.
        pub max_area: Option<String>,

        /// Oldest year of construction.
        pub year_built: Option<String>,

        /// [`Amenity`]s of which at least one must be offered.
        pub amenities: Vec<String>,

        /// [`Sort`] order. Defaults to [`Sort::Newest`].
        pub sort: Option<String>,
    }

    impl From<Params> for Selector {
        fn from(params: Params) -> Self {
            let Params {
                category,
                query,
                location,
                price_range,
                property_type,
                min_price,
                max_price,
                bedrooms,
                bathrooms,
                min_area,
                max_area,
                year_built,
                amenities,
                sort,
            } = params;

            let range = lenient::<PriceRange>("priceRange", price_range.as_deref())
                .unwrap_or_default();

            let filter = Filter {
                category: lenient("category", category.as_deref()),
                kind: lenient("propertyType", property_type.as_deref()),
                min_price: lenient("minPrice", min_price.as_deref())
                    .or(range.min),
                max_price: lenient("maxPrice", max_price.as_deref())
                    .or(range.max),
                min_area: lenient("minArea", min_area.as_deref()),
                max_area: lenient("maxArea", max_area.as_deref()),
                min_year_built: lenient("yearBuilt", year_built.as_deref()),
                min_bedrooms: lenient("bedrooms", bedrooms.as_deref()),
                min_bathrooms: lenient("bathrooms", bathrooms.as_deref()),
                amenities: amenities
                    .iter()
                    .filter_map(|a| lenient("amenities", Some(a.as_str())))
                    .collect(),
                text: non_blank(query),
                location: non_blank(location),
            };

            Self {
                filter,
                sort: lenient("sort", sort.as_deref()).unwrap_or_default(),
            }
        }
    }

    /// Trims the provided text, dropping it if it's blank.
    fn non_blank(text: Option<String>) -> Option<String> {
        text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
    }

    /// Parses the provided `raw` search parameter, treating blank values as
    /// absent and ignoring unparsable ones.
    fn lenient<T: FromStr>(name: &'static str, raw: Option<&str>) -> Option<T> {
        let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
        raw.parse()
            .inspect_err(|_| {
                log::warn!("ignoring unparsable `{name}` search parameter: `{raw}`");
            })
            .ok()
    }

}
