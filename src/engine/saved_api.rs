use super::Engine;

use async_trait::async_trait;

use crate::{api::SavedAPI, entities::Route, error::Error};

#[async_trait]
impl SavedAPI for Engine {
    /// `false` when no route with `id` is known.
    #[tracing::instrument(skip(self))]
    async fn save_route(&self, id: String) -> Result<bool, Error> {
        let mut store = self.store.lock().await;

        let route = match store.get_route_by_id(&id) {
            Some(route) => route.clone(),
            None => return Ok(false),
        };

        store.save_route(route)?;
        tracing::info!("saved route {}, {} saved in total", id, store.saved().len());

        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    async fn remove_saved(&self, id: String) -> Result<(), Error> {
        self.store.lock().await.remove_from_saved(&id)
    }

    #[tracing::instrument(skip(self))]
    async fn list_saved(&self) -> Result<Vec<Route>, Error> {
        Ok(self.store.lock().await.saved().to_vec())
    }
}

#[test]
fn saving_twice_keeps_one_copy() {
    use super::test_engine;
    use crate::api::{HistoryAPI, SearchAPI};
    use tokio_test::block_on;

    let (_, engine) = test_engine(2);
    let routes = block_on(engine.search_routes("Hyderabad".into(), "Secunderabad".into())).unwrap();
    let id = routes[2].id.clone();

    assert!(block_on(engine.save_route(id.clone())).unwrap());
    assert!(block_on(engine.save_route(id.clone())).unwrap());

    let saved = block_on(engine.list_saved()).unwrap();
    assert_eq!(saved, vec![routes[2].clone()]);

    let details = block_on(engine.view_route(id)).unwrap().unwrap();
    assert!(details.is_saved);
}

#[test]
fn saving_unknown_route_reports_false() {
    use super::test_engine;
    use tokio_test::block_on;

    let (_, engine) = test_engine(2);

    assert!(!block_on(engine.save_route("missing".into())).unwrap());
    assert!(block_on(engine.list_saved()).unwrap().is_empty());
}

#[test]
fn saved_routes_outlive_the_session() {
    use super::{test_engine, Engine};
    use crate::api::SearchAPI;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;
    use tokio_test::block_on;

    let (slots, engine) = test_engine(6);
    let routes = block_on(engine.search_routes("A".into(), "B".into())).unwrap();
    block_on(engine.save_route(routes[0].id.clone())).unwrap();
    block_on(engine.save_route(routes[1].id.clone())).unwrap();
    block_on(engine.remove_saved(routes[1].id.clone())).unwrap();
    block_on(engine.remove_saved("missing".into())).unwrap();

    let next = Engine::with_rng(slots, Duration::ZERO, StdRng::seed_from_u64(7));

    assert!(block_on(next.session_routes()).unwrap().is_empty());
    assert_eq!(block_on(next.list_saved()).unwrap(), vec![routes[0].clone()]);
    assert_eq!(
        block_on(next.find_route(routes[0].id.clone())).unwrap(),
        Some(routes[0].clone())
    );
    assert_eq!(block_on(next.find_route(routes[1].id.clone())).unwrap(), None);
}
