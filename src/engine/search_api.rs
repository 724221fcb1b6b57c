use super::Engine;

use async_trait::async_trait;

use crate::{
    api::SearchAPI,
    entities::Route,
    error::{invalid_input_error, Error},
};

#[async_trait]
impl SearchAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn search_routes(
        &self,
        start_name: String,
        end_name: String,
    ) -> Result<Vec<Route>, Error> {
        if start_name.trim().is_empty() || end_name.trim().is_empty() {
            return Err(invalid_input_error());
        }

        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }

        let routes = self
            .generator
            .lock()
            .await
            .generate_routes(&start_name, &end_name);

        let mut store = self.store.lock().await;
        for route in &routes {
            store.add_route(route.clone());
        }

        tracing::info!(
            "found {} routes, session now holds {}",
            routes.len(),
            store.session_routes().len()
        );

        Ok(routes)
    }

    #[tracing::instrument(skip(self))]
    async fn session_routes(&self) -> Result<Vec<Route>, Error> {
        Ok(self.store.lock().await.session_routes().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, id: String) -> Result<Option<Route>, Error> {
        Ok(self.store.lock().await.get_route_by_id(&id).cloned())
    }
}

#[test]
fn search_registers_routes_in_session() {
    use super::test_engine;
    use tokio_test::block_on;

    let (_, engine) = test_engine(1);

    let first = block_on(engine.search_routes("Hyderabad".into(), "Secunderabad".into())).unwrap();
    let second = block_on(engine.search_routes("Gachibowli".into(), "Ameerpet".into())).unwrap();

    let session = block_on(engine.session_routes()).unwrap();
    assert_eq!(session.len(), 10);
    assert_eq!(&session[..5], &first[..]);
    assert_eq!(&session[5..], &second[..]);

    let found = block_on(engine.find_route(first[2].id.clone())).unwrap();
    assert_eq!(found.as_ref(), Some(&first[2]));
}

#[test]
fn search_orders_by_footprint() {
    use super::test_engine;
    use crate::entities::TransportMode;
    use tokio_test::block_on;

    let (_, engine) = test_engine(9);

    let routes = block_on(engine.search_routes("Hyderabad".into(), "Secunderabad".into())).unwrap();

    assert_eq!(routes.len(), 5);
    assert_eq!(routes[0].transport_mode, TransportMode::Walking);
    assert_eq!(routes[0].carbon_footprint, 0.0);
    assert_eq!(routes[1].transport_mode, TransportMode::Cycling);
    assert_eq!(routes[1].carbon_footprint, 0.0);
    assert!(routes
        .windows(2)
        .all(|pair| pair[0].carbon_footprint <= pair[1].carbon_footprint));
}

#[test]
fn blank_names_are_rejected() {
    use super::test_engine;
    use tokio_test::block_on;

    let (_, engine) = test_engine(1);

    let err = block_on(engine.search_routes("  ".into(), "Secunderabad".into())).unwrap_err();
    assert_eq!(err.code, 101);

    let err = block_on(engine.search_routes("Hyderabad".into(), "".into())).unwrap_err();
    assert_eq!(err.code, 101);

    assert!(block_on(engine.session_routes()).unwrap().is_empty());
}

#[test]
fn names_are_stored_as_typed() {
    use super::test_engine;
    use tokio_test::block_on;

    let (_, engine) = test_engine(1);

    let routes =
        block_on(engine.search_routes(" Hyderabad".into(), "Secunderabad  ".into())).unwrap();

    assert!(routes
        .iter()
        .all(|r| r.start_name == " Hyderabad" && r.end_name == "Secunderabad  "));
}

#[test]
fn search_waits_for_configured_delay() {
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio_test::block_on;

    use crate::store::MemorySlotStore;

    let delay = Duration::from_millis(30);
    let engine = Engine::with_rng(
        Arc::new(MemorySlotStore::new()),
        delay,
        StdRng::seed_from_u64(5),
    );

    let started = Instant::now();
    block_on(engine.search_routes("A".into(), "B".into())).unwrap();

    assert!(started.elapsed() >= delay);
}

#[test]
fn unknown_route_is_none() {
    use super::test_engine;
    use tokio_test::block_on;

    let (_, engine) = test_engine(1);

    assert_eq!(block_on(engine.find_route("nope".into())).unwrap(), None);
}
