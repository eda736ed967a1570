//! Route handlers.
//!
//! List handlers share one pipeline: validate parameters, run the query on a
//! fresh connection, reject pages past the end, wrap the rows in the
//! [`Paginated`] envelope. Detail handlers return one payload or 404.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::Uri;
use axum::Json;
use serde_json::{json, Value};

use super::params::{self, PageRequest, QueryParams};
use super::resources::{self, Resource};
use super::views::{CarPartDetailView, CarPartView, PartView, PersonView};
use super::{AppState, Paginated};
use crate::error::{Error, Result};
use crate::model::{
    Car, CarSession, Garage, GarageBay, Session, Team, TelemetrySession, WorkAssignment,
    WorkOrder,
};
use crate::storage::{ListQuery, Page, Storage};

type ListResponse<T> = Result<Json<Paginated<T>>>;

/// Parse filters, search and ordering for `resource`, then paginate.
async fn list<T, F>(
    state: &AppState,
    uri: &Uri,
    params: &QueryParams,
    resource: &Resource,
    fetch: F,
) -> ListResponse<T>
where
    T: Send + 'static,
    F: FnOnce(&Storage, ListQuery) -> Result<Page<T>> + Send + 'static,
{
    let query = params::list_query(resource, params)?;
    paginate(state, uri, params, query, fetch).await
}

/// Paginate a fixed query. Only `page` and `page_size` are read.
async fn paginate<T, F>(
    state: &AppState,
    uri: &Uri,
    params: &QueryParams,
    query: ListQuery,
    fetch: F,
) -> ListResponse<T>
where
    T: Send + 'static,
    F: FnOnce(&Storage, ListQuery) -> Result<Page<T>> + Send + 'static,
{
    let request = PageRequest::parse(params, &state.pagination)?;
    let query = query.window(request.size, request.offset());

    let page = state
        .with_storage(move |storage| fetch(storage, query))
        .await?;
    if page.results.is_empty() && request.number > 1 {
        return Err(Error::InvalidPage {
            page: request.number,
        });
    }

    Ok(Json(Paginated::new(page, request, uri.path(), uri.query())))
}

fn part_views(storage: &Storage, page: Page<crate::model::Part>) -> Result<Page<PartView>> {
    let derived = storage.assess_parts(&page.results)?;
    Ok(Page {
        count: page.count,
        results: page
            .results
            .into_iter()
            .zip(derived)
            .map(|(part, derived)| PartView::new(part, derived))
            .collect(),
    })
}

pub(crate) async fn index() -> Json<Value> {
    Json(json!({
        "teams": "/teams",
        "people": "/people",
        "garages": "/garages",
        "garage-bays": "/garage-bays",
        "cars": "/cars",
        "parts": "/parts",
        "car-parts": "/car-parts",
        "sessions": "/sessions",
        "car-sessions": "/car-sessions",
        "telemetry-sessions": "/telemetry-sessions",
        "work-orders": "/work-orders",
        "work-assignments": "/work-assignments",
    }))
}

pub(crate) async fn list_teams(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<Team> {
    list(&state, &uri, &params, &resources::TEAMS, |storage, query| {
        storage.list_teams(&query)
    })
    .await
}

pub(crate) async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Team>> {
    state.with_storage(move |storage| storage.get_team(id)).await.map(Json)
}

pub(crate) async fn list_people(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<PersonView> {
    list(&state, &uri, &params, &resources::PEOPLE, |storage, query| {
        Ok(storage.list_people(&query)?.map(PersonView::from))
    })
    .await
}

pub(crate) async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PersonView>> {
    state
        .with_storage(move |storage| storage.get_person(id).map(PersonView::from))
        .await
        .map(Json)
}

pub(crate) async fn list_garages(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<Garage> {
    list(&state, &uri, &params, &resources::GARAGES, |storage, query| {
        storage.list_garages(&query)
    })
    .await
}

pub(crate) async fn get_garage(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Garage>> {
    state.with_storage(move |storage| storage.get_garage(id)).await.map(Json)
}

pub(crate) async fn list_garage_bays(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<GarageBay> {
    list(&state, &uri, &params, &resources::GARAGE_BAYS, |storage, query| {
        storage.list_garage_bays(&query)
    })
    .await
}

pub(crate) async fn get_garage_bay(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GarageBay>> {
    state
        .with_storage(move |storage| storage.get_garage_bay(id))
        .await
        .map(Json)
}

pub(crate) async fn list_cars(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<Car> {
    list(&state, &uri, &params, &resources::CARS, |storage, query| {
        storage.list_cars(&query)
    })
    .await
}

pub(crate) async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Car>> {
    state.with_storage(move |storage| storage.get_car(id)).await.map(Json)
}

pub(crate) async fn list_parts(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<PartView> {
    list(&state, &uri, &params, &resources::PARTS, |storage, query| {
        let page = storage.list_parts(&query)?;
        part_views(storage, page)
    })
    .await
}

pub(crate) async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PartView>> {
    state
        .with_storage(move |storage| {
            let part = storage.get_part(id)?;
            let derived = storage.assess_part(&part)?;
            Ok(PartView::new(part, derived))
        })
        .await
        .map(Json)
}

/// Parts flagged for replacement, as a plain array.
pub(crate) async fn lifecycle_warnings(
    State(state): State<AppState>,
) -> Result<Json<Vec<PartView>>> {
    state
        .with_storage(|storage| {
            Ok(storage
                .lifecycle_warnings()?
                .into_iter()
                .map(|(part, derived)| PartView::new(part, derived))
                .collect())
        })
        .await
        .map(Json)
}

pub(crate) async fn list_car_parts(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<CarPartView> {
    list(&state, &uri, &params, &resources::CAR_PARTS, |storage, query| {
        Ok(storage.list_car_parts(&query)?.map(CarPartView::from))
    })
    .await
}

pub(crate) async fn active_car_parts(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<CarPartView> {
    paginate(&state, &uri, &params, ListQuery::new(), |storage, query| {
        Ok(storage.list_active_car_parts(query)?.map(CarPartView::from))
    })
    .await
}

pub(crate) async fn car_parts_by_car(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<CarPartView> {
    paginate(&state, &uri, &params, ListQuery::new(), move |storage, query| {
        Ok(storage
            .list_car_parts_by_car(car_id, query)?
            .map(CarPartView::from))
    })
    .await
}

pub(crate) async fn get_car_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CarPartDetailView>> {
    state
        .with_storage(move |storage| {
            let car_part = storage.get_car_part(id)?;
            let car = storage.get_car(car_part.car_id)?;
            let part = storage.get_part(car_part.part_id)?;
            let derived = storage.assess_part(&part)?;
            Ok(CarPartDetailView::new(
                car_part,
                car,
                PartView::new(part, derived),
            ))
        })
        .await
        .map(Json)
}

pub(crate) async fn list_sessions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<Session> {
    list(&state, &uri, &params, &resources::SESSIONS, |storage, query| {
        storage.list_sessions(&query)
    })
    .await
}

pub(crate) async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Session>> {
    state.with_storage(move |storage| storage.get_session(id)).await.map(Json)
}

pub(crate) async fn list_car_sessions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<CarSession> {
    list(&state, &uri, &params, &resources::CAR_SESSIONS, |storage, query| {
        storage.list_car_sessions(&query)
    })
    .await
}

pub(crate) async fn get_car_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CarSession>> {
    state
        .with_storage(move |storage| storage.get_car_session(id))
        .await
        .map(Json)
}

pub(crate) async fn list_telemetry_sessions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<TelemetrySession> {
    list(
        &state,
        &uri,
        &params,
        &resources::TELEMETRY_SESSIONS,
        |storage, query| storage.list_telemetry_sessions(&query),
    )
    .await
}

pub(crate) async fn get_telemetry_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TelemetrySession>> {
    state
        .with_storage(move |storage| storage.get_telemetry_session(id))
        .await
        .map(Json)
}

pub(crate) async fn list_work_orders(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<WorkOrder> {
    list(&state, &uri, &params, &resources::WORK_ORDERS, |storage, query| {
        storage.list_work_orders(&query)
    })
    .await
}

pub(crate) async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WorkOrder>> {
    state
        .with_storage(move |storage| storage.get_work_order(id))
        .await
        .map(Json)
}

pub(crate) async fn list_work_assignments(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> ListResponse<WorkAssignment> {
    list(
        &state,
        &uri,
        &params,
        &resources::WORK_ASSIGNMENTS,
        |storage, query| storage.list_work_assignments(&query),
    )
    .await
}

pub(crate) async fn get_work_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WorkAssignment>> {
    state
        .with_storage(move |storage| storage.get_work_assignment(id))
        .await
        .map(Json)
}
