//! [`Agent`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// An agent listing properties.
#[derive(Clone, Debug, From, Into)]
pub struct Agent(domain::Agent);

/// A real-estate agent listing properties.
#[graphql_object(context = Context)]
impl Agent {
    /// Unique identifier of this `Agent`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.clone().into()
    }

    /// Full name of this `Agent`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Email address of this `Agent`.
    #[must_use]
    pub fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    /// Phone number of this `Agent`.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.0.phone.as_ref()
    }

    /// URL of this `Agent` avatar, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.0.avatar.as_ref().map(AsRef::<str>::as_ref)
    }

    /// Short biography of this `Agent`.
    #[must_use]
    pub fn bio(&self) -> &str {
        &self.0.bio
    }

    /// Rating of this `Agent` on a `0..=5` scale.
    #[must_use]
    pub fn rating(&self) -> scalar::Decimal {
        self.0.rating.value().into()
    }

    /// Number of reviews this `Agent` received.
    pub fn review_count(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.review_count)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// `Property`s listed by this `Agent`, in catalog order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Agent.properties",
            id = %self.0.id,
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn properties(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        Ok(ctx
            .service()
            .execute(query::properties::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .filter(|p| p.agent_id == self.0.id)
            .map(Into::into)
            .collect())
    }
}

/// Unique identifier of an `Agent`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AgentId", with = scalar::Via::<domain::agent::Id>)]
pub struct Id(domain::agent::Id);
