//! [`Query`] collection related to the multiple [`Property`]s.

use common::{
    operations::{By, Select},
    Money, Percent,
};
use tracerr::Traced;

use crate::{
    domain::{property::Category, Property},
    infra::{catalog, Catalog},
    read::property::list::{Params, Selector},
    Service,
};

use super::{CatalogQuery, Query};

/// Queries all the [`Property`]s in catalog order.
pub type All = CatalogQuery<By<Vec<Property>, ()>>;

/// Queries a list of [`Property`]s satisfying a [`Selector`].
///
/// When listing [`Category::Rent`], prices are replaced with monthly rents
/// before filtering (see [`Config::rent_price_ratio`]).
///
/// [`Config::rent_price_ratio`]: crate::Config::rent_price_ratio
#[derive(Clone, Debug, Default)]
pub struct List(pub Selector);

/// Queries a list of [`Property`]s by raw search [`Params`].
#[derive(Clone, Debug, Default)]
pub struct Search(pub Params);

/// Queries [`Property`]s promoted as featured, in catalog order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Featured;

/// Queries [`Property`]s promoted as trending, in catalog order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trending;

impl<C> Query<List> for Service<C>
where
    C: Catalog<
        Select<By<Vec<Property>, ()>>,
        Ok = Vec<Property>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        List(selector): List,
    ) -> Result<Self::Ok, Self::Err> {
        let mut properties = self
            .catalog()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        if selector.filter.category == Some(Category::Rent) {
            if let Some(ratio) = self.config().rent_price_ratio {
                derive_rents(&mut properties, ratio);
            }
        }

        Ok(selector.select(&properties))
    }
}

impl<C> Query<Search> for Service<C>
where
    Self: Query<List, Ok = Vec<Property>, Err = Traced<catalog::Error>>,
{
    type Ok = Vec<Property>;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        Search(params): Search,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(List(params.into()))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Query<Featured> for Service<C>
where
    C: Catalog<
        Select<By<Vec<Property>, ()>>,
        Ok = Vec<Property>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<catalog::Error>;

    async fn execute(&self, _: Featured) -> Result<Self::Ok, Self::Err> {
        let mut properties = self
            .catalog()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        properties.retain(|p| p.featured);
        Ok(properties)
    }
}

impl<C> Query<Trending> for Service<C>
where
    C: Catalog<
        Select<By<Vec<Property>, ()>>,
        Ok = Vec<Property>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<catalog::Error>;

    async fn execute(&self, _: Trending) -> Result<Self::Ok, Self::Err> {
        let mut properties = self
            .catalog()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        properties.retain(|p| p.trending);
        Ok(properties)
    }
}

/// Replaces prices of the [`Category::Rent`] [`Property`]s with monthly rents
/// being the provided `ratio` of them, rounded to a whole amount.
fn derive_rents(properties: &mut [Property], ratio: Percent) {
    for property in properties
        .iter_mut()
        .filter(|p| p.category == Category::Rent)
    {
        let price = property.price;
        property.price =
            Money::new(ratio.of(price.amount), price.currency).whole();
    }
}

#[cfg(test)]
mod spec {
    use common::Percent;
    use rust_decimal::Decimal;

    use super::{Featured, List, Search, Trending};
    use crate::{
        domain::{fixture, property::Category, Property},
        infra::InMemory,
        read::property::list::{Filter, Params, Selector, Sort},
        Config, Query as _, Service,
    };

    fn service(config: Config) -> Service<InMemory> {
        let catalog = InMemory::new(
            fixture::dataset(),
            vec![fixture::agent("1"), fixture::agent("2")],
        )
        .unwrap();
        Service::new(config, catalog)
    }

    fn ids(properties: &[Property]) -> Vec<&str> {
        properties.iter().map(|p| p.id.as_ref()).collect()
    }

    fn rentals(max_price: Option<Decimal>) -> List {
        List(Selector {
            filter: Filter {
                max_price,
                ..Filter::category(Category::Rent)
            },
            sort: Sort::Newest,
        })
    }

    #[tokio::test]
    async fn derives_rents_before_filtering() {
        let svc = service(Config::default());

        let listed = svc
            .execute(rentals(Some(Decimal::from(500))))
            .await
            .unwrap();
        assert_eq!(ids(&listed), ["4"]);
        assert_eq!(listed[0].price.amount, Decimal::from(420));
    }

    #[tokio::test]
    async fn rounds_derived_rents() {
        let svc = service(Config {
            rent_price_ratio: Some("0.15".parse::<Percent>().unwrap()),
            ..Config::default()
        });

        // 420000 * 0.15% = 630
        let listed = svc.execute(rentals(None)).await.unwrap();
        assert_eq!(listed[0].price.amount, Decimal::from(630));

        let svc = service(Config {
            rent_price_ratio: Some("0.0001".parse::<Percent>().unwrap()),
            ..Config::default()
        });

        // 420000 * 0.0001% = 0.42
        let listed = svc.execute(rentals(None)).await.unwrap();
        assert_eq!(listed[0].price.amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn keeps_sale_prices_without_ratio() {
        let svc = service(Config {
            rent_price_ratio: None,
            ..Config::default()
        });

        let listed = svc.execute(rentals(None)).await.unwrap();
        assert_eq!(listed[0].price.amount, Decimal::from(420_000));

        let listed = svc
            .execute(rentals(Some(Decimal::from(500))))
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn keeps_sale_prices_of_other_categories() {
        let svc = service(Config::default());

        let listed = svc
            .execute(List(Selector {
                filter: Filter::category(Category::Buy),
                sort: Sort::PriceAscending,
            }))
            .await
            .unwrap();
        assert_eq!(ids(&listed), ["5", "3", "2", "1"]);
        assert_eq!(listed[0].price.amount, Decimal::from(480_000));
    }

    #[tokio::test]
    async fn searches_by_params() {
        let svc = service(Config::default());

        let listed = svc
            .execute(Search(Params {
                category: Some("buy".into()),
                query: Some("Austin".into()),
                sort: Some("price-low".into()),
                ..Params::default()
            }))
            .await
            .unwrap();
        assert_eq!(ids(&listed), ["5", "3"]);

        let listed = svc
            .execute(Search(Params {
                category: Some("rent".into()),
                price_range: Some("0-1000".into()),
                ..Params::default()
            }))
            .await
            .unwrap();
        assert_eq!(ids(&listed), ["4"]);
    }

    #[tokio::test]
    async fn slices_promoted() {
        let svc = service(Config::default());

        let featured = svc.execute(Featured).await.unwrap();
        assert_eq!(ids(&featured), ["1", "2"]);

        let trending = svc.execute(Trending).await.unwrap();
        assert_eq!(ids(&trending), ["1", "3"]);
    }
}
