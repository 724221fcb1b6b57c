use super::Engine;

use async_trait::async_trait;

use crate::{
    api::HistoryAPI,
    entities::{group_by_day, HistoryDay, RouteDetails, RouteHistoryEntry},
    error::Error,
};

#[async_trait]
impl HistoryAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn view_route(&self, id: String) -> Result<Option<RouteDetails>, Error> {
        let mut store = self.store.lock().await;

        let route = match store.get_route_by_id(&id) {
            Some(route) => route.clone(),
            None => {
                tracing::debug!("no route with id {}", id);
                return Ok(None);
            }
        };

        store.add_to_history(route.clone())?;
        let is_saved = store.is_saved(&id);

        Ok(Some(RouteDetails::new(route, is_saved)))
    }

    #[tracing::instrument(skip(self))]
    async fn list_history(&self) -> Result<Vec<RouteHistoryEntry>, Error> {
        Ok(self.store.lock().await.history().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn history_by_day(&self) -> Result<Vec<HistoryDay>, Error> {
        Ok(group_by_day(self.store.lock().await.history()))
    }

    #[tracing::instrument(skip(self))]
    async fn clear_history(&self) -> Result<(), Error> {
        tracing::info!("clearing route history");

        self.store.lock().await.clear_history()
    }
}

#[test]
fn viewing_a_route_records_history() {
    use super::test_engine;
    use crate::api::SearchAPI;
    use crate::entities::EcoRating;
    use tokio_test::block_on;

    let (_, engine) = test_engine(4);
    let routes = block_on(engine.search_routes("Hyderabad".into(), "Secunderabad".into())).unwrap();

    let details = block_on(engine.view_route(routes[0].id.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(details.route, routes[0]);
    assert_eq!(details.eco_rating, EcoRating::CarbonNeutral);
    assert!(!details.is_saved);
    assert!(details.impact.saved_emissions > 0.0);

    block_on(engine.view_route(routes[4].id.clone())).unwrap();

    let history = block_on(engine.list_history()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].route.id, routes[4].id);
    assert_eq!(history[1].route.id, routes[0].id);
    assert!(history[0].date >= history[1].date);
}

#[test]
fn viewing_unknown_route_leaves_history_alone() {
    use super::test_engine;
    use tokio_test::block_on;

    let (_, engine) = test_engine(4);

    assert!(block_on(engine.view_route("missing".into())).unwrap().is_none());
    assert!(block_on(engine.list_history()).unwrap().is_empty());
}

#[test]
fn history_days_and_clear() {
    use super::test_engine;
    use crate::api::SearchAPI;
    use crate::store::{RouteStore, HISTORY_KEY};
    use tokio_test::block_on;

    let (slots, engine) = test_engine(8);
    let routes = block_on(engine.search_routes("A".into(), "B".into())).unwrap();
    for route in &routes {
        block_on(engine.view_route(route.id.clone())).unwrap();
    }

    let days = block_on(engine.history_by_day()).unwrap();
    let grouped: usize = days.iter().map(|day| day.entries.len()).sum();
    assert_eq!(grouped, 5);

    block_on(engine.clear_history()).unwrap();

    assert!(block_on(engine.list_history()).unwrap().is_empty());
    assert!(block_on(engine.history_by_day()).unwrap().is_empty());
    assert_eq!(slots.read(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    assert!(RouteStore::open(slots).history().is_empty());
}
