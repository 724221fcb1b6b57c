mod history_api;
mod profile_api;
mod saved_api;
mod search_api;

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::{
    api::API,
    config::Config,
    error::Error,
    generator::Generator,
    store::{FileSlotStore, RouteStore, SlotStore},
};

/// Owns the route generator and the route store for one running app.
pub struct Engine {
    generator: Mutex<Generator<StdRng>>,
    store: Mutex<RouteStore>,
    search_delay: Duration,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip(slots))]
    pub fn new(slots: Arc<dyn SlotStore>, search_delay: Duration) -> Self {
        Self::with_rng(slots, search_delay, StdRng::from_entropy())
    }

    pub fn with_rng(slots: Arc<dyn SlotStore>, search_delay: Duration, rng: StdRng) -> Self {
        Self {
            generator: Mutex::new(Generator::new(rng)),
            store: Mutex::new(RouteStore::open(slots)),
            search_delay,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let slots = FileSlotStore::new(&config.data_dir)?;

        Ok(Self::new(Arc::new(slots), config.search_delay))
    }
}

impl API for Engine {}

#[cfg(test)]
pub(crate) fn test_engine(seed: u64) -> (Arc<dyn SlotStore>, Engine) {
    let slots: Arc<dyn SlotStore> = Arc::new(crate::store::MemorySlotStore::new());
    let engine = Engine::with_rng(
        slots.clone(),
        Duration::ZERO,
        StdRng::seed_from_u64(seed),
    );

    (slots, engine)
}

#[test]
fn engine_from_config_uses_data_dir() {
    use tokio_test::block_on;

    use crate::api::{HistoryAPI, SearchAPI};

    let dir = std::env::temp_dir().join(format!("ecoroute-engine-{}", uuid::Uuid::new_v4()));
    let config = Config {
        data_dir: dir.clone(),
        search_delay: Duration::ZERO,
        ..Config::default()
    };

    let engine = Engine::from_config(&config).unwrap();
    let routes =
        block_on(engine.search_routes("Hyderabad".into(), "Secunderabad".into())).unwrap();
    block_on(engine.view_route(routes[0].id.clone())).unwrap();

    assert!(dir.join("routeHistory.json").exists());

    let reopened = Engine::from_config(&config).unwrap();
    assert_eq!(block_on(reopened.list_history()).unwrap().len(), 1);

    std::fs::remove_dir_all(dir).unwrap();
}
