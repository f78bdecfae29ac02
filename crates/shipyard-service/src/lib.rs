//! Shipyard ship catalog HTTP service.
//!
//! This crate wires the catalog handlers into an axum [`Router`]; `main.rs`
//! only reads configuration and serves it.
//!
//! # Endpoints
//!
//! - `GET /rest/ships` - Filtered, sorted, paged ship list
//! - `GET /rest/ships/count` - Number of ships matching the filter (no paging)
//! - `POST /rest/ships` - Create a ship
//! - `GET /rest/ships/{id}` - Read a ship
//! - `POST /rest/ships/{id}` - Partially update a ship
//! - `DELETE /rest/ships/{id}` - Delete a ship
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

#![deny(warnings)]

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use shipyard_lib::{Error as LibError, Ship, ShipId};
use shipyard_service_shared::{
    AppState, CreateShipRequest, MetricsLayer, ProblemDetails, RequestId, ShipQueryParams,
    UpdateShipRequest, from_lib_error, health_live, health_ready, metrics_handler, parse_ship_id,
    record_ship_created, record_ship_deleted, record_ship_not_found, record_ship_updated,
    record_ships_queried, record_validation_failed,
};

type ApiResult<T> = Result<T, Box<ProblemDetails>>;

/// Build the service router.
///
/// `metrics_path` is where the Prometheus exposition is served.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/rest/ships", get(list_ships).post(create_ship))
        .route("/rest/ships/count", get(count_ships))
        .route(
            "/rest/ships/{id}",
            get(get_ship).post(update_ship).delete(delete_ship),
        )
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

fn rejected(operation: &str, problem: Box<ProblemDetails>) -> Box<ProblemDetails> {
    record_validation_failed(operation);
    warn!(
        operation,
        detail = problem.detail.as_deref().unwrap_or(""),
        "request rejected"
    );
    problem
}

fn store_failure(error: &LibError, request_id: &RequestId) -> Box<ProblemDetails> {
    error!(request_id = %request_id, error = %error, "ship store operation failed");
    Box::new(from_lib_error(error, request_id.as_str()))
}

fn not_found(operation: &str, id: ShipId, request_id: &RequestId) -> Box<ProblemDetails> {
    record_ship_not_found(operation);
    info!(request_id = %request_id, id, operation, "ship not found");
    Box::new(ProblemDetails::ship_not_found(id, request_id.as_str()))
}

fn ship_id(raw: &str, request_id: &RequestId) -> ApiResult<ShipId> {
    parse_ship_id(raw, request_id.as_str()).map_err(|problem| rejected("id", problem))
}

fn query_params(
    params: Result<Query<ShipQueryParams>, QueryRejection>,
    request_id: &RequestId,
) -> ApiResult<ShipQueryParams> {
    params.map(|Query(params)| params).map_err(|rejection| {
        rejected(
            "query",
            Box::new(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id.as_str(),
            )),
        )
    })
}

fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
    operation: &str,
    request_id: &RequestId,
) -> ApiResult<T> {
    body.map(|Json(body)| body).map_err(|rejection| {
        rejected(
            operation,
            Box::new(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id.as_str(),
            )),
        )
    })
}

/// Handle `GET /rest/ships`.
async fn list_ships(
    State(state): State<AppState>,
    request_id: RequestId,
    params: Result<Query<ShipQueryParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Ship>>> {
    let params = query_params(params, &request_id)?;
    let filter = params
        .to_filter(request_id.as_str())
        .map_err(|problem| rejected("query", problem))?;
    let page_request = params
        .to_page_request(state.default_page_size(), request_id.as_str())
        .map_err(|problem| rejected("query", problem))?;

    let catalog = state.catalog();
    let matched = catalog
        .query(&filter)
        .map_err(|e| store_failure(&e, &request_id))?;
    record_ships_queried("list", matched.len());

    let matched_count = matched.len();
    let page = catalog.page(matched, &page_request);
    info!(
        request_id = %request_id,
        matched = matched_count,
        returned = page.len(),
        page_number = page_request.page_number,
        page_size = page_request.page_size,
        order = %page_request.order,
        "listed ships"
    );
    Ok(Json(page))
}

/// Handle `GET /rest/ships/count`. Paging parameters are accepted and ignored.
async fn count_ships(
    State(state): State<AppState>,
    request_id: RequestId,
    params: Result<Query<ShipQueryParams>, QueryRejection>,
) -> ApiResult<Json<usize>> {
    let params = query_params(params, &request_id)?;
    let filter = params
        .to_filter(request_id.as_str())
        .map_err(|problem| rejected("query", problem))?;

    let count = state
        .catalog()
        .count(&filter)
        .map_err(|e| store_failure(&e, &request_id))?;
    record_ships_queried("count", count);
    Ok(Json(count))
}

/// Handle `POST /rest/ships`.
async fn create_ship(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Result<Json<CreateShipRequest>, JsonRejection>,
) -> ApiResult<Json<Ship>> {
    let draft = json_body(body, "create", &request_id)?
        .to_draft(request_id.as_str())
        .map_err(|problem| rejected("create", problem))?;

    let ship = state
        .catalog()
        .create(draft)
        .map_err(|e| store_failure(&e, &request_id))?;
    record_ship_created();
    info!(request_id = %request_id, id = ship.id, rating = ship.rating, "ship created");
    Ok(Json(ship))
}

/// Handle `GET /rest/ships/{id}`.
async fn get_ship(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Ship>> {
    let id = ship_id(&raw_id, &request_id)?;
    state
        .catalog()
        .read(id)
        .map_err(|e| store_failure(&e, &request_id))?
        .map(Json)
        .ok_or_else(|| not_found("read", id, &request_id))
}

/// Handle `POST /rest/ships/{id}`.
///
/// The id and the body are both validated before the catalog is touched, so
/// an invalid request is a 400 even for an id that does not exist.
async fn update_ship(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateShipRequest>, JsonRejection>,
) -> ApiResult<Json<Ship>> {
    let id = ship_id(&raw_id, &request_id)?;
    let patch = json_body(body, "update", &request_id)?
        .to_patch(request_id.as_str())
        .map_err(|problem| rejected("update", problem))?;

    let updated = state
        .catalog()
        .update(id, patch)
        .map_err(|e| store_failure(&e, &request_id))?
        .ok_or_else(|| not_found("update", id, &request_id))?;
    record_ship_updated();
    info!(request_id = %request_id, id, rating = updated.rating, "ship updated");
    Ok(Json(updated))
}

/// Handle `DELETE /rest/ships/{id}`. Success is a 200 with an empty body.
async fn delete_ship(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = ship_id(&raw_id, &request_id)?;
    let deleted = state
        .catalog()
        .delete(id)
        .map_err(|e| store_failure(&e, &request_id))?;
    if !deleted {
        return Err(not_found("delete", id, &request_id));
    }
    record_ship_deleted();
    info!(request_id = %request_id, id, "ship deleted");
    Ok(StatusCode::OK)
}
