mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post, put},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{server_error, Error};
use crate::server::handlers::{history, profile, routes, saved};

pub fn app(api: DynAPI) -> Router {
    Router::new()
        .route("/routes", get(routes::list))
        .route("/routes/search", post(routes::search))
        .route("/routes/:id", get(routes::find))
        .route("/routes/:id/view", post(routes::view))
        .route("/history", get(history::list).delete(history::clear))
        .route("/history/days", get(history::by_day))
        .route("/saved", get(saved::list))
        .route("/saved/:id", put(saved::save).delete(saved::remove))
        .route("/profile/summary", get(profile::summary))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app(api).into_make_service())
        .await
        .map_err(server_error)
}

#[cfg(test)]
fn request(
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> axum::http::Request<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{header, Request};

    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };

    request.unwrap()
}

#[test]
fn routes_answer_with_expected_status() {
    use axum::http::StatusCode;
    use tokio_test::block_on;
    use tower::ServiceExt;

    use crate::server::handlers::test_api;

    let api = test_api(17);
    let send = |method: &str, uri: &str, body: Option<&str>| {
        block_on(app(api.clone()).oneshot(request(method, uri, body)))
            .unwrap()
            .status()
    };

    let search = r#"{"startName": "Hyderabad", "endName": "Secunderabad"}"#;
    assert_eq!(send("POST", "/routes/search", Some(search)), StatusCode::OK);

    let blank = r#"{"startName": " ", "endName": "Secunderabad"}"#;
    assert_eq!(
        send("POST", "/routes/search", Some(blank)),
        StatusCode::BAD_REQUEST
    );

    let routes = block_on(api.session_routes()).unwrap();
    let id = routes[0].id.clone();

    assert_eq!(send("GET", "/routes", None), StatusCode::OK);
    assert_eq!(send("GET", &format!("/routes/{}", id), None), StatusCode::OK);
    assert_eq!(send("GET", "/routes/missing", None), StatusCode::NOT_FOUND);
    assert_eq!(
        send("POST", &format!("/routes/{}/view", id), None),
        StatusCode::OK
    );
    assert_eq!(
        send("POST", "/routes/missing/view", None),
        StatusCode::NOT_FOUND
    );

    assert_eq!(send("GET", "/history", None), StatusCode::OK);
    assert_eq!(send("GET", "/history/days", None), StatusCode::OK);
    assert_eq!(send("DELETE", "/history", None), StatusCode::NO_CONTENT);

    assert_eq!(
        send("PUT", &format!("/saved/{}", id), None),
        StatusCode::NO_CONTENT
    );
    assert_eq!(send("PUT", "/saved/missing", None), StatusCode::NOT_FOUND);
    assert_eq!(send("GET", "/saved", None), StatusCode::OK);
    assert_eq!(
        send("DELETE", &format!("/saved/{}", id), None),
        StatusCode::NO_CONTENT
    );

    assert_eq!(send("GET", "/profile/summary", None), StatusCode::OK);

    assert_eq!(block_on(api.session_routes()).unwrap().len(), 5);
    assert!(block_on(api.list_saved()).unwrap().is_empty());
}
