use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::api::DynAPI;
use crate::entities::{HistoryDay, RouteHistoryEntry};
use crate::error::Error;

pub async fn list(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<RouteHistoryEntry>>, Error> {
    let history = api.list_history().await?;

    Ok(history.into())
}

pub async fn by_day(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<HistoryDay>>, Error> {
    let days = api.history_by_day().await?;

    Ok(days.into())
}

pub async fn clear(Extension(api): Extension<DynAPI>) -> Result<StatusCode, Error> {
    api.clear_history().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[test]
fn view_fills_history_and_clear_empties_it() {
    use super::{routes, test_api};
    use axum::extract::Path;
    use tokio_test::block_on;

    let api = test_api(10);
    let found = block_on(api.search_routes("A".into(), "B".into())).unwrap();

    block_on(routes::view(Extension(api.clone()), Path(found[1].id.clone()))).unwrap();

    let Json(history) = block_on(list(Extension(api.clone()))).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].route, found[1]);

    let Json(days) = block_on(by_day(Extension(api.clone()))).unwrap();
    assert_eq!(days.len(), 1);

    assert_eq!(
        block_on(clear(Extension(api.clone()))).unwrap(),
        StatusCode::NO_CONTENT
    );
    let Json(history) = block_on(list(Extension(api))).unwrap();
    assert!(history.is_empty());
}
