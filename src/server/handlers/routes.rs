use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Route, RouteDetails};
use crate::error::{not_found_error, Error};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    start_name: String,
    end_name: String,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SearchParams>,
) -> Result<Json<Vec<Route>>, Error> {
    let routes = api
        .search_routes(params.start_name, params.end_name)
        .await?;

    Ok(routes.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Route>>, Error> {
    let routes = api.session_routes().await?;

    Ok(routes.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Route>, Error> {
    let route = api.find_route(id).await?.ok_or_else(not_found_error)?;

    Ok(route.into())
}

pub async fn view(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<RouteDetails>, Error> {
    let details = api.view_route(id).await?.ok_or_else(not_found_error)?;

    Ok(details.into())
}

#[test]
fn search_then_find() {
    use super::test_api;
    use tokio_test::block_on;

    let api = test_api(3);
    let params = SearchParams {
        start_name: "Hyderabad".into(),
        end_name: "Secunderabad".into(),
    };

    let Json(routes) = block_on(search(Extension(api.clone()), Json(params))).unwrap();
    assert_eq!(routes.len(), 5);

    let Json(found) = block_on(find(Extension(api.clone()), Path(routes[3].id.clone()))).unwrap();
    assert_eq!(found, routes[3]);

    let Json(session) = block_on(list(Extension(api))).unwrap();
    assert_eq!(session, routes);
}

#[test]
fn missing_route_is_not_found() {
    use super::test_api;
    use tokio_test::block_on;

    let api = test_api(3);

    let err = block_on(find(Extension(api.clone()), Path("missing".into()))).unwrap_err();
    assert_eq!(err.code, 102);

    let err = block_on(view(Extension(api), Path("missing".into()))).unwrap_err();
    assert_eq!(err.code, 102);
}

#[test]
fn search_params_use_camel_case() {
    let params: SearchParams =
        serde_json::from_str(r#"{"startName": "Hyderabad", "endName": "Secunderabad"}"#).unwrap();

    assert_eq!(params.start_name, "Hyderabad");
    assert_eq!(params.end_name, "Secunderabad");
}
