use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{HistoryDay, ImpactSummary, Route, RouteDetails, RouteHistoryEntry};
use crate::error::Error;

#[async_trait]
pub trait SearchAPI {
    async fn search_routes(&self, start_name: String, end_name: String)
        -> Result<Vec<Route>, Error>;
    async fn session_routes(&self) -> Result<Vec<Route>, Error>;
    async fn find_route(&self, id: String) -> Result<Option<Route>, Error>;
}

#[async_trait]
pub trait HistoryAPI {
    async fn view_route(&self, id: String) -> Result<Option<RouteDetails>, Error>;
    async fn list_history(&self) -> Result<Vec<RouteHistoryEntry>, Error>;
    async fn history_by_day(&self) -> Result<Vec<HistoryDay>, Error>;
    async fn clear_history(&self) -> Result<(), Error>;
}

#[async_trait]
pub trait SavedAPI {
    async fn save_route(&self, id: String) -> Result<bool, Error>;
    async fn remove_saved(&self, id: String) -> Result<(), Error>;
    async fn list_saved(&self) -> Result<Vec<Route>, Error>;
}

#[async_trait]
pub trait ProfileAPI {
    async fn profile_summary(&self) -> Result<ImpactSummary, Error>;
}

pub trait API: SearchAPI + HistoryAPI + SavedAPI + ProfileAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
