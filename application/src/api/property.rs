//! [`Property`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query as _};

use crate::{
    api::{self, scalar},
    define_error, AsError, Context, Error,
};

/// A [`Property`] listed for sale or rent.
#[derive(Clone, Debug, From, Into)]
pub struct Property(domain::Property);

/// A property listed for sale or rent.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.clone().into()
    }

    /// Title of this `Property`.
    #[must_use]
    pub fn title(&self) -> &str {
        self.0.title.as_ref()
    }

    /// Category this `Property` is listed in.
    #[must_use]
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// Kind of this `Property`.
    #[graphql(name = "type")]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Asking price of this `Property`.
    ///
    /// Monthly rent, when listed among `RENT` properties.
    #[must_use]
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Free-text location of this `Property`.
    #[must_use]
    pub fn location(&self) -> &str {
        self.0.location.as_ref()
    }

    /// Description of this `Property`.
    #[must_use]
    pub fn description(&self) -> &str {
        self.0.description.as_ref()
    }

    /// Number of bedrooms in this `Property`.
    #[must_use]
    pub fn bedrooms(&self) -> i32 {
        self.0.bedrooms.into()
    }

    /// Number of bathrooms in this `Property`, possibly fractional.
    #[must_use]
    pub fn bathrooms(&self) -> scalar::Decimal {
        self.0.bathrooms.into()
    }

    /// Area of this `Property` in square feet.
    pub fn area(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.area)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Year this `Property` was built in.
    #[must_use]
    pub fn year_built(&self) -> i32 {
        self.0.year_built.into()
    }

    /// Number of parking spaces of this `Property`.
    #[must_use]
    pub fn parking(&self) -> i32 {
        self.0.parking.into()
    }

    /// Amenities this `Property` offers.
    #[must_use]
    pub fn amenities(&self) -> Vec<String> {
        self.0.amenities.iter().map(ToString::to_string).collect()
    }

    /// URLs of this `Property` images.
    #[must_use]
    pub fn images(&self) -> Vec<String> {
        self.0.images.iter().map(ToString::to_string).collect()
    }

    /// Indicator whether this `Property` is promoted as featured.
    #[must_use]
    pub fn featured(&self) -> bool {
        self.0.featured
    }

    /// Indicator whether this `Property` is promoted as trending.
    #[must_use]
    pub fn trending(&self) -> bool {
        self.0.trending
    }

    /// `Agent` listing this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.agent",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn agent(&self, ctx: &Context) -> Result<api::Agent, Error> {
        ctx.service()
            .execute(query::agent::ById::by(self.0.agent_id.clone()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| Error::internal(&"`Property` has no `Agent`"))
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// Unique identifier of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "PropertyId", with = scalar::Via::<domain::property::Id>)]
pub struct Id(domain::property::Id);

/// Category a `Property` is listed in.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PropertyCategory")]
pub enum Category {
    /// Listed for sale.
    Buy,

    /// Listed for rent.
    Rent,

    /// Offered by its owner for valuation and sale.
    Sell,
}

impl From<domain::property::Category> for Category {
    fn from(category: domain::property::Category) -> Self {
        use domain::property::Category as C;

        match category {
            C::Buy => Self::Buy,
            C::Rent => Self::Rent,
            C::Sell => Self::Sell,
        }
    }
}

impl From<Category> for domain::property::Category {
    fn from(category: Category) -> Self {
        match category {
            Category::Buy => Self::Buy,
            Category::Rent => Self::Rent,
            Category::Sell => Self::Sell,
        }
    }
}

/// Kind of a `Property`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PropertyType")]
pub enum Kind {
    /// A detached house.
    House,

    /// An apartment in a building.
    Apartment,

    /// A condominium unit.
    Condo,

    /// A townhouse.
    Townhouse,
}

impl From<domain::property::Kind> for Kind {
    fn from(kind: domain::property::Kind) -> Self {
        use domain::property::Kind as K;

        match kind {
            K::House => Self::House,
            K::Apartment => Self::Apartment,
            K::Condo => Self::Condo,
            K::Townhouse => Self::Townhouse,
        }
    }
}

impl From<Kind> for domain::property::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::House => Self::House,
            Kind::Apartment => Self::Apartment,
            Kind::Condo => Self::Condo,
            Kind::Townhouse => Self::Townhouse,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Property`] list.
    //!
    //! [`Property`]: super::Property

    use juniper::{GraphQLEnum, GraphQLInputObject};
    use service::{domain, read};

    use super::{Kind, ListError};
    use crate::{api::scalar, Error};

    /// Order of a `Property` list.
    #[derive(Clone, Copy, Debug, Default, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "PropertySort")]
    pub enum Sort {
        /// Most recently built first.
        #[default]
        Newest,

        /// Cheapest first.
        PriceAscending,

        /// Most expensive first.
        PriceDescending,

        /// Largest first.
        AreaDescending,
    }

    impl From<Sort> for read::property::list::Sort {
        fn from(sort: Sort) -> Self {
            match sort {
                Sort::Newest => Self::Newest,
                Sort::PriceAscending => Self::PriceAscending,
                Sort::PriceDescending => Self::PriceDescending,
                Sort::AreaDescending => Self::AreaDescending,
            }
        }
    }

    /// Criteria of a `Property` list. Unset criteria don't constrain the
    /// list, bounds are inclusive.
    #[derive(Clone, Debug, Default, GraphQLInputObject)]
    #[graphql(name = "PropertyFilter")]
    pub struct Filter {
        /// Kind of the listed `Property`s.
        #[graphql(name = "type")]
        pub kind: Option<Kind>,

        /// Lowest price.
        pub min_price: Option<scalar::Decimal>,

        /// Highest price.
        pub max_price: Option<scalar::Decimal>,

        /// Smallest area in square feet.
        pub min_area: Option<i32>,

        /// Largest area in square feet.
        pub max_area: Option<i32>,

        /// Oldest year of construction.
        pub min_year_built: Option<i32>,

        /// Minimal number of bedrooms.
        pub min_bedrooms: Option<i32>,

        /// Minimal number of bathrooms.
        pub min_bathrooms: Option<scalar::Decimal>,

        /// Amenities of which at least one must be offered.
        pub amenities: Option<Vec<String>>,

        /// Text to search in titles and locations, ignoring case.
        pub query: Option<String>,

        /// Text to search in locations, ignoring case.
        pub location: Option<String>,
    }

    impl Filter {
        /// Converts this [`Filter`] into a [`read::property::list::Filter`]
        /// of the provided [`domain::property::Category`].
        ///
        /// # Errors
        ///
        /// If any of the bounds is negative or any amenity is blank.
        pub fn into_read(
            self,
            category: domain::property::Category,
        ) -> Result<read::property::list::Filter, Error> {
            let Self {
                kind,
                min_price,
                max_price,
                min_area,
                max_area,
                min_year_built,
                min_bedrooms,
                min_bathrooms,
                amenities,
                query,
                location,
            } = self;

            Ok(read::property::list::Filter {
                category: Some(category),
                kind: kind.map(Into::into),
                min_price: min_price.map(Into::into),
                max_price: max_price.map(Into::into),
                min_area: bound(min_area)?,
                max_area: bound(max_area)?,
                min_year_built: bound(min_year_built)?,
                min_bedrooms: bound(min_bedrooms)?,
                min_bathrooms: min_bathrooms.map(Into::into),
                amenities: amenities
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| {
                        domain::property::Amenity::new(a.trim())
                            .ok_or_else(|| ListError::InvalidAmenity.into())
                    })
                    .collect::<Result<_, Error>>()?,
                text: trimmed(query),
                location: trimmed(location),
            })
        }
    }

    /// Trims the provided `text`, omitting it if it's blank.
    fn trimmed(text: Option<String>) -> Option<String> {
        text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
    }

    /// Converts the provided GraphQL integer `bound` into a domain one.
    fn bound<T: TryFrom<i32>>(bound: Option<i32>) -> Result<Option<T>, Error> {
        bound
            .map(T::try_from)
            .transpose()
            .map_err(|_| ListError::InvalidBound.into())
    }

    /// Raw search parameters of a `Property` list, as provided by a search
    /// form or URL query. Unparsable values are ignored.
    #[derive(Clone, Debug, Default, GraphQLInputObject)]
    #[graphql(name = "PropertySearchParams")]
    pub struct SearchParams {
        /// Category to list (`buy`, `rent` or `sell`).
        pub category: Option<String>,

        /// Text to search in titles and locations.
        pub query: Option<String>,

        /// Text to search in locations.
        pub location: Option<String>,

        /// Price range in `min-max` or `min+` format.
        pub price_range: Option<String>,

        /// Kind of the listed properties (e.g. `house`).
        pub property_type: Option<String>,

        /// Lowest price, overriding the one of `priceRange`.
        pub min_price: Option<String>,

        /// Highest price, overriding the one of `priceRange`.
        pub max_price: Option<String>,

        /// Minimal number of bedrooms.
        pub bedrooms: Option<String>,

        /// Minimal number of bathrooms.
        pub bathrooms: Option<String>,

        /// Smallest area in square feet.
        pub min_area: Option<String>,

        /// Largest area in square feet.
        pub max_area: Option<String>,

        /// Oldest year of construction.
        pub year_built: Option<String>,

        /// Amenities of which at least one must be offered.
        pub amenities: Option<Vec<String>>,

        /// Order of the list (`newest`, `price-low`, `price-high` or `area`).
        pub sort: Option<String>,
    }

    impl From<SearchParams> for read::property::list::Params {
        fn from(params: SearchParams) -> Self {
            let SearchParams {
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

            Self {
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
                amenities: amenities.unwrap_or_default(),
                sort,
            }
        }
    }
}

define_error! {
    enum ListError {
        #[code = "INVALID_FILTER_BOUND"]
        #[status = BAD_REQUEST]
        #[message = "Filter bounds must be non-negative and within range"]
        InvalidBound,

        #[code = "INVALID_AMENITY"]
        #[status = BAD_REQUEST]
        #[message = "Amenity must not be blank"]
        InvalidAmenity,
    }
}
