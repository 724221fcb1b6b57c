use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;

use crate::api::DynAPI;
use crate::entities::Route;
use crate::error::{not_found_error, Error};

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Route>>, Error> {
    let saved = api.list_saved().await?;

    Ok(saved.into())
}

pub async fn save(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    if !api.save_route(id).await? {
        return Err(not_found_error());
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    api.remove_saved(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[test]
fn save_and_remove() {
    use super::test_api;
    use tokio_test::block_on;

    let api = test_api(21);
    let routes = block_on(api.search_routes("A".into(), "B".into())).unwrap();
    let id = routes[0].id.clone();

    block_on(save(Extension(api.clone()), Path(id.clone()))).unwrap();
    block_on(save(Extension(api.clone()), Path(id.clone()))).unwrap();

    let Json(saved) = block_on(list(Extension(api.clone()))).unwrap();
    assert_eq!(saved.len(), 1);

    let err = block_on(save(Extension(api.clone()), Path("missing".into()))).unwrap_err();
    assert_eq!(err.code, 102);

    block_on(remove(Extension(api.clone()), Path("missing".into()))).unwrap();
    block_on(remove(Extension(api.clone()), Path(id))).unwrap();

    let Json(saved) = block_on(list(Extension(api))).unwrap();
    assert!(saved.is_empty());
}
