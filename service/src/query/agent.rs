//! [`Query`] collection related to a single [`Agent`].

use common::operations::By;

use crate::domain::{agent, Agent};
#[cfg(doc)]
use crate::Query;

use super::CatalogQuery;

/// Queries an [`Agent`] by its [`agent::Id`].
pub type ById = CatalogQuery<By<Option<Agent>, agent::Id>>;
