use crate::services::{EventsError, EventsService};
use crate::types::{
    CreateEventRequest, EventBucket, EventBucketsQuery, EventResponse, UpdateEventRequest,
};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::Query;
use pulse_core::error_builder;
use pulse_core::problemdetails::Problem;
use pulse_core::ProblemDetails;
use std::sync::Arc;
use tracing::error;

pub struct AppState {
    pub events_service: Arc<EventsService>,
}

fn into_problem(err: EventsError) -> Problem {
    match err {
        EventsError::Validation(message) => error_builder::unprocessable_entity()
            .detail(message)
            .build(),
        EventsError::NotFound => error_builder::not_found()
            .detail("No event with that id exists")
            .build(),
        EventsError::Database(e) => {
            error!("Event store unavailable: {}", e);
            error_builder::service_unavailable().build()
        }
    }
}

/// Get bucketed event counts grouped by operating system and page
#[utoipa::path(
    get,
    path = "/events",
    params(
        ("duration" = Option<String>, Query, description = "Bucket width such as '1 hour' or '1 day' (default: '1 day')"),
        ("pages" = Option<Vec<String>>, Query, description = "Pages to include, repeated; omitted or empty falls back to the default page list")
    ),
    responses(
        (status = 200, description = "Ordered sequence of bucketed counts", body = Vec<EventBucket>),
        (status = 422, description = "Invalid bucket width", body = ProblemDetails),
        (status = 503, description = "Event store unavailable", body = ProblemDetails)
    ),
    tag = "Events"
)]
pub async fn get_event_buckets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventBucketsQuery>,
) -> Result<Json<Vec<EventBucket>>, Problem> {
    let buckets = state
        .events_service
        .get_event_buckets(query.duration, query.pages)
        .await
        .map_err(into_problem)?;

    Ok(Json(buckets))
}

/// Record a new event
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 422, description = "Missing or empty page", body = ProblemDetails),
        (status = 503, description = "Event store unavailable", body = ProblemDetails)
    ),
    tag = "Events"
)]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), Problem> {
    // Fall back to the request's User-Agent header when the body omits it
    let user_agent = payload.user_agent.or_else(|| {
        headers
            .get(header::USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string())
    });

    let event = state
        .events_service
        .create_event(
            payload.page,
            user_agent,
            payload.description,
            payload.time.map(Into::into),
        )
        .await
        .map_err(into_problem)?;

    Ok((StatusCode::CREATED, Json(event.into())))
}

/// Get a single event by id
#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "The event", body = EventResponse),
        (status = 404, description = "Unknown event id", body = ProblemDetails),
        (status = 503, description = "Event store unavailable", body = ProblemDetails)
    ),
    tag = "Events"
)]
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<EventResponse>, Problem> {
    let event = state
        .events_service
        .get_event(id)
        .await
        .map_err(into_problem)?;

    Ok(Json(event.into()))
}

/// Update an event's description
#[utoipa::path(
    put,
    path = "/events/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "The refreshed event", body = EventResponse),
        (status = 404, description = "Unknown event id", body = ProblemDetails),
        (status = 503, description = "Event store unavailable", body = ProblemDetails)
    ),
    tag = "Events"
)]
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, Problem> {
    let event = state
        .events_service
        .update_event(id, payload.description)
        .await
        .map_err(into_problem)?;

    Ok(Json(event.into()))
}

/// Configure routes for events
pub fn configure_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(get_event_buckets).post(create_event))
        .route("/events/{id}", get(get_event).put(update_event))
}

#[derive(utoipa::OpenApi)]
#[openapi(
    paths(get_event_buckets, create_event, get_event, update_event),
    components(
        schemas(
            EventBucketsQuery,
            EventBucket,
            CreateEventRequest,
            UpdateEventRequest,
            EventResponse,
            ProblemDetails,
        )
    ),
    tags(
        (name = "Events", description = "Event recording and bucketed aggregation endpoints")
    )
)]
pub struct EventsApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_422() {
        let problem = into_problem(EventsError::Validation("bad width".to_string()));
        assert_eq!(problem.status_code, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let problem = into_problem(EventsError::NotFound);
        assert_eq!(problem.status_code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_maps_to_503() {
        let problem = into_problem(EventsError::Database(sea_orm::DbErr::Custom(
            "connection refused".to_string(),
        )));
        assert_eq!(problem.status_code, StatusCode::SERVICE_UNAVAILABLE);
    }
}
