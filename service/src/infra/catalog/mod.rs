//! [`Catalog`]-related implementations.

#[cfg(feature = "json")]
pub mod json;

use std::{
    collections::{HashMap, HashSet},
    io,
    sync::Arc,
};

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::domain::{agent, property, Agent, Property};

/// Catalog operation.
pub use common::Handler as Catalog;

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read a catalog source.
    #[display("Failed to read catalog: {_0}")]
    Io(io::Error),

    /// Failed to parse a JSON catalog document.
    #[cfg(feature = "json")]
    #[display("Failed to parse JSON catalog: {_0}")]
    Json(serde_json::Error),

    /// Catalog contains an invalid value.
    #[display("Invalid `{field}` value in catalog: `{value}`")]
    #[from(ignore)]
    InvalidValue {
        /// Name of the field holding the invalid value.
        field: &'static str,

        /// Invalid value itself.
        value: String,
    },
}

impl Error {
    /// Creates a new [`Error::InvalidValue`] of the provided `field`.
    #[must_use]
    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

/// Immutable in-memory [`Catalog`] snapshot.
///
/// Cloning is cheap, as the snapshot is shared.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// [`Property`]s of this [`InMemory`] catalog, in catalog order.
    properties: Arc<[Property]>,

    /// [`Agent`]s of this [`InMemory`] catalog.
    agents: Arc<HashMap<agent::Id, Agent>>,
}

impl InMemory {
    /// Creates a new [`InMemory`] catalog out of the provided [`Property`]s
    /// and [`Agent`]s.
    ///
    /// # Errors
    ///
    /// If IDs are duplicated, or any [`Property`] refers to an unknown
    /// [`Agent`].
    pub fn new(
        properties: Vec<Property>,
        agents: Vec<Agent>,
    ) -> Result<Self, Traced<Error>> {
        let mut agents_by_id = HashMap::with_capacity(agents.len());
        for agent in agents {
            if agents_by_id.contains_key(&agent.id) {
                return Err(tracerr::new!(Error::invalid("agents.id", agent.id)));
            }
            _ = agents_by_id.insert(agent.id.clone(), agent);
        }

        let mut ids = HashSet::with_capacity(properties.len());
        for property in &properties {
            if !ids.insert(&property.id) {
                return Err(tracerr::new!(Error::invalid(
                    "properties.id",
                    &property.id,
                )));
            }
            if !agents_by_id.contains_key(&property.agent_id) {
                return Err(tracerr::new!(Error::invalid(
                    "properties.agentId",
                    &property.agent_id,
                )));
            }
        }

        Ok(Self {
            properties: properties.into(),
            agents: Arc::new(agents_by_id),
        })
    }

    /// Returns the number of [`Property`]s in this [`InMemory`] catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Indicates whether this [`InMemory`] catalog has no [`Property`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Catalog<Select<By<Option<Property>, property::Id>>> for InMemory {
    type Ok = Option<Property>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.properties.iter().find(|p| p.id == id).cloned())
    }
}

impl Catalog<Select<By<Vec<Property>, ()>>> for InMemory {
    type Ok = Vec<Property>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Property>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.properties.to_vec())
    }
}

impl Catalog<Select<By<Option<Agent>, agent::Id>>> for InMemory {
    type Ok = Option<Agent>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Agent>, agent::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.agents.get(by.as_inner()).cloned())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use super::{Catalog as _, Error, InMemory};
    use crate::domain::{agent, fixture, property, Agent, Property};

    fn catalog() -> InMemory {
        InMemory::new(
            fixture::dataset(),
            vec![fixture::agent("1"), fixture::agent("2")],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn selects_property_by_id() {
        let catalog = catalog();

        let found = catalog
            .execute(Select(By::<Option<Property>, _>::new(
                property::Id::new("3").unwrap(),
            )))
            .await
            .unwrap();
        assert_eq!(
            AsRef::<str>::as_ref(&found.unwrap().title),
            "Cozy Family Home",
        );

        let missing = catalog
            .execute(Select(By::<Option<Property>, _>::new(
                property::Id::new("42").unwrap(),
            )))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn selects_all_in_catalog_order() {
        let all = catalog()
            .execute(Select(By::<Vec<Property>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(all, fixture::dataset());
    }

    #[tokio::test]
    async fn selects_agent_by_id() {
        let catalog = catalog();

        let agent = catalog
            .execute(Select(By::<Option<Agent>, _>::new(
                agent::Id::new("2").unwrap(),
            )))
            .await
            .unwrap();
        assert_eq!(AsRef::<str>::as_ref(&agent.unwrap().id), "2");

        let missing = catalog
            .execute(Select(By::<Option<Agent>, _>::new(
                agent::Id::new("3").unwrap(),
            )))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn rejects_unknown_agent() {
        let err = InMemory::new(fixture::dataset(), vec![fixture::agent("1")])
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::InvalidValue { field: "properties.agentId", value }
                if value == "2",
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = InMemory::new(
            vec![fixture::property("1"), fixture::property("1")],
            vec![fixture::agent("1")],
        )
        .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::InvalidValue { field: "properties.id", .. },
        ));

        let err = InMemory::new(
            vec![],
            vec![fixture::agent("1"), fixture::agent("1")],
        )
        .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::InvalidValue { field: "agents.id", .. },
        ));
    }
}
