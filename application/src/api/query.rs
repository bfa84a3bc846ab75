//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "property",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PropertyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists the `Property`s of the specified category, satisfying the
    /// provided filter, in the provided order (newest first by default).
    ///
    /// Prices of `RENT` properties are listed as monthly rents.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_FILTER_BOUND` - some filter bound is negative or too large;
    /// - `INVALID_AMENITY` - some filter amenity is blank.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            filter = ?filter,
            gql.name = "properties",
            otel.name = Self::SPAN_NAME,
            sort = ?sort,
        ),
    )]
    pub async fn properties(
        category: api::property::Category,
        filter: Option<api::property::list::Filter>,
        sort: Option<api::property::list::Sort>,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        let filter = filter
            .unwrap_or_default()
            .into_read(category.into())
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(query::properties::List(
                read::property::list::Selector {
                    filter,
                    sort: sort.unwrap_or_default().into(),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Lists the `Property`s by raw search parameters, as provided by a
    /// search form or URL query.
    ///
    /// Unparsable parameters are ignored rather than failing the search.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "search",
            otel.name = Self::SPAN_NAME,
            params = ?params,
        ),
    )]
    pub async fn search(
        params: api::property::list::SearchParams,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        Ok(ctx
            .service()
            .execute(query::properties::Search(params.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Lists the `Property`s promoted as featured, in catalog order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "featuredProperties",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn featured_properties(
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        Ok(ctx
            .service()
            .execute(query::properties::Featured)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Lists the `Property`s promoted as trending, in catalog order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "trendingProperties",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn trending_properties(
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        Ok(ctx
            .service()
            .execute(query::properties::Trending)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the `Agent` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AGENT_NOT_EXISTS` - the `Agent` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "agent",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn agent(
        id: api::agent::Id,
        ctx: &Context,
    ) -> Result<api::Agent, Error> {
        ctx.service()
            .execute(query::agent::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| AgentError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Calculates the monthly payment and totals of a fixed-rate mortgage.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_MORTGAGE_INPUT` - the provided input violates some
    ///                              constraints, listed in the `violations`
    ///                              extension;
    /// - `MORTGAGE_NOT_REPRESENTABLE` - the calculated amounts are too large.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "mortgage",
            input = ?input,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn mortgage(
        input: api::mortgage::Input,
        ctx: &Context,
    ) -> Result<api::mortgage::Summary, Error> {
        ctx.service()
            .execute(query::mortgage::Calculate(input.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Estimates the market value of the described property, along with its
    /// market range and price per square foot.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_VALUATION_INPUT` - some characteristic is negative or too
    ///                               large.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "estimateValue",
            input = ?input,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn estimate_value(
        input: api::valuation::Input,
        ctx: &Context,
    ) -> Result<api::valuation::Valuation, Error> {
        let input = input.try_into().map_err(ctx.error())?;
        ctx.service()
            .execute(query::valuation::Estimate(input))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the provided ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum AgentError {
        #[code = "AGENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Agent` with the provided ID does not exist"]
        NotExists,
    }
}
