use super::Engine;

use async_trait::async_trait;

use crate::{api::ProfileAPI, entities::ImpactSummary, error::Error};

#[async_trait]
impl ProfileAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn profile_summary(&self) -> Result<ImpactSummary, Error> {
        Ok(ImpactSummary::from_history(
            self.store.lock().await.history(),
        ))
    }
}

#[test]
fn summary_tracks_viewed_routes() {
    use super::test_engine;
    use crate::api::{HistoryAPI, SearchAPI};
    use crate::entities::TransportMode;
    use tokio_test::block_on;

    let (_, engine) = test_engine(12);
    assert_eq!(
        block_on(engine.profile_summary()).unwrap(),
        ImpactSummary::default()
    );

    let routes = block_on(engine.search_routes("A".into(), "B".into())).unwrap();
    let cycling = routes
        .iter()
        .find(|route| route.transport_mode == TransportMode::Cycling)
        .unwrap();
    block_on(engine.view_route(cycling.id.clone())).unwrap();

    let summary = block_on(engine.profile_summary()).unwrap();
    assert_eq!(summary.routes_planned, 1);
    assert_eq!(summary.total_distance, cycling.distance);
    assert_eq!(summary.total_emitted, 0.0);
    assert!(summary.carbon_saved > 0.0);
}
