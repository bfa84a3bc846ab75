//! GraphQL API definitions.

pub mod agent;
pub mod mortgage;
pub mod property;
mod query;
pub mod scalar;
pub mod valuation;

use crate::Context;

pub use self::{agent::Agent, property::Property, query::Query};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    juniper::EmptyMutation<Context>,
    juniper::EmptySubscription<Context>,
>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(
        Query,
        juniper::EmptyMutation::new(),
        juniper::EmptySubscription::new(),
    )
}

#[cfg(test)]
mod spec {
    use juniper::{graphql_value, DefaultScalarValue, ExecutionError, Value};
    use service::infra::InMemory;

    use crate::{Context, Service};

    fn context() -> Context {
        let catalog =
            InMemory::from_json_str(include_str!("../../../catalog.json"))
                .unwrap();
        Context::new(Service::new(service::Config::default(), catalog))
    }

    async fn execute(
        query: &str,
        ctx: &Context,
    ) -> (Value, Vec<ExecutionError<DefaultScalarValue>>) {
        juniper::execute(
            query,
            None,
            &super::schema(),
            &juniper::Variables::new(),
            ctx,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn lists_rentals_with_derived_rents() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{
                properties(category: RENT, filter: { maxPrice: "500" }) {
                    id
                    price
                }
            }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({
                "properties": [{ "id": "4", "price": "420USD" }]
            }),
        );
    }

    #[tokio::test]
    async fn rejects_negative_filter_bounds() {
        let ctx = context();

        let (_, errs) = execute(
            "{ properties(category: BUY, filter: { minArea: -1 }) { id } }",
            &ctx,
        )
        .await;

        assert_eq!(errs.len(), 1);
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn trims_filter_text() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{
                properties(
                    category: BUY,
                    filter: { query: " Austin ", location: " TX " },
                ) {
                    id
                }
            }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(res, graphql_value!({ "properties": [{ "id": "3" }] }));
    }

    #[tokio::test]
    async fn searches_leniently() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{
                search(params: {
                    category: "buy",
                    query: "austin",
                    bedrooms: "many",
                }) {
                    title
                    agent { name }
                }
            }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({
                "search": [{
                    "title": "Cozy Family Home",
                    "agent": { "name": "Sarah Johnson" }
                }]
            }),
        );
    }

    #[tokio::test]
    async fn slices_promoted_properties() {
        let ctx = context();

        let (res, errs) = execute(
            "{ featuredProperties { id } trendingProperties { id } }",
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({
                "featuredProperties": [{ "id": "1" }, { "id": "2" }],
                "trendingProperties": [{ "id": "1" }, { "id": "3" }]
            }),
        );
    }

    #[tokio::test]
    async fn resolves_agent_properties() {
        let ctx = context();

        let (res, errs) =
            execute(r#"{ agent(id: "2") { properties { id } } }"#, &ctx).await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({
                "agent": { "properties": [{ "id": "2" }, { "id": "4" }] }
            }),
        );
    }

    #[tokio::test]
    async fn reports_missing_property() {
        let ctx = context();

        let (_, errs) =
            execute(r#"{ property(id: "42") { id } }"#, &ctx).await;

        assert_eq!(errs.len(), 1);
        assert_eq!(ctx.error_status_code(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn calculates_mortgage() {
        let ctx = context();

        let (res, errs) = execute(
            "{
                mortgage(input: {
                    propertyPrice: 500000,
                    downPayment: 100000,
                    annualInterestRate: 6.5,
                    loanTermYears: 30,
                }) {
                    loanAmount
                    monthlyPayment
                    totalInterest
                }
            }",
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({
                "mortgage": {
                    "loanAmount": "400000USD",
                    "monthlyPayment": "2528.27USD",
                    "totalInterest": "510177.95USD"
                }
            }),
        );
    }

    #[tokio::test]
    async fn rejects_invalid_mortgage() {
        let ctx = context();

        let (_, errs) = execute(
            "{
                mortgage(input: {
                    propertyPrice: 50000,
                    downPayment: 0,
                    annualInterestRate: 6.5,
                    loanTermYears: 25,
                }) {
                    monthlyPayment
                }
            }",
            &ctx,
        )
        .await;

        assert_eq!(errs.len(), 1);
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn estimates_value() {
        let ctx = context();

        let (res, errs) = execute(
            "{
                estimateValue(input: { propertyType: HOUSE, area: 1500 }) {
                    estimate
                    low
                    high
                    pricePerSquareFoot
                }
            }",
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({
                "estimateValue": {
                    "estimate": "425000USD",
                    "low": "382500USD",
                    "high": "467500USD",
                    "pricePerSquareFoot": "283USD"
                }
            }),
        );
    }

    #[tokio::test]
    async fn rejects_oversized_valuation_input() {
        let ctx = context();

        let (_, errs) = execute(
            r#"{
                estimateValue(input: {
                    bathrooms: "79228162514264337593543950335"
                }) {
                    estimate
                }
            }"#,
            &ctx,
        )
        .await;

        assert_eq!(errs.len(), 1);
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }
}
