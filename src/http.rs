// Mergington High School Activities - HTTP adapter
//
// Thin translation layer: extract path/query parameters, call the service,
// render its results. The error-to-status mapping and the response body
// shapes live here and nowhere else.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::registry::Activity;
use crate::service::{ActivityError, ActivityService};

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Activity as served over the wire. The map key carries the name, so the
/// record itself does not repeat it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl From<Activity> for ActivityRecord {
    fn from(activity: Activity) -> Self {
        ActivityRecord {
            description: activity.description,
            schedule: activity.schedule,
            max_participants: activity.max_participants,
            participants: activity.participants,
        }
    }
}

/// Confirmation body for successful signup/unregister
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body for GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Query parameters for the mutation endpoints
#[derive(Debug, Deserialize)]
pub struct EmailParam {
    pub email: String,
}

// ============================================================================
// ERROR MAPPING
// ============================================================================

impl ActivityError {
    /// HTTP status for each failure case
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActivityError::NotFound => StatusCode::NOT_FOUND,
            ActivityError::AlreadyRegistered | ActivityError::NotRegistered => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(%status, detail = %self, "request rejected");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET / - send browsers to the static front-end
async fn root_redirect() -> Redirect {
    Redirect::temporary("/static/index.html")
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "mergington-activities",
    })
}

/// GET /activities - the whole registry, keyed by activity name
async fn get_activities(
    State(service): State<ActivityService>,
) -> Json<HashMap<String, ActivityRecord>> {
    let records = service
        .list_activities()
        .into_iter()
        .map(|(name, activity)| (name, ActivityRecord::from(activity)))
        .collect();
    Json(records)
}

/// POST /activities/:activity_name/signup?email=...
async fn signup_for_activity(
    State(service): State<ActivityService>,
    Path(activity_name): Path<String>,
    Query(params): Query<EmailParam>,
) -> Result<Json<MessageResponse>, ActivityError> {
    let message = service.signup(&activity_name, &params.email)?;
    Ok(Json(MessageResponse { message }))
}

/// POST /activities/:activity_name/unregister?email=...
async fn unregister_from_activity(
    State(service): State<ActivityService>,
    Path(activity_name): Path<String>,
    Query(params): Query<EmailParam>,
) -> Result<Json<MessageResponse>, ActivityError> {
    let message = service.unregister(&activity_name, &params.email)?;
    Ok(Json(MessageResponse { message }))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Assemble the full application router around one shared service handle
pub fn app(service: ActivityService) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/health", get(health_check))
        .route("/activities", get(get_activities))
        .route("/activities/:activity_name/signup", post(signup_for_activity))
        .route(
            "/activities/:activity_name/unregister",
            post(unregister_from_activity),
        )
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ActivityStore;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt; // for `.collect()`
    use tower::ServiceExt; // for `.oneshot()`

    fn test_app() -> Router {
        app(ActivityService::new(ActivityStore::with_default_activities()))
    }

    fn signup_uri(activity: &str, email: &str) -> String {
        format!(
            "/activities/{}/signup?email={}",
            urlencoding::encode(activity),
            urlencoding::encode(email)
        )
    }

    fn unregister_uri(activity: &str, email: &str) -> String {
        format!(
            "/activities/{}/unregister?email={}",
            urlencoding::encode(activity),
            urlencoding::encode(email)
        )
    }

    /// Fire one request at the router and decode the JSON body (Null when
    /// the body is empty or not JSON)
    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_get_activities() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/activities").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_object());
        assert!(body.get("Chess Club").is_some());
        assert!(body.get("Programming Class").is_some());
        assert!(body.get("Gym Class").is_some());
    }

    #[tokio::test]
    async fn test_get_activities_has_required_fields() {
        let app = test_app();

        let (_, body) = send(&app, "GET", "/activities").await;

        let chess = body.get("Chess Club").unwrap().as_object().unwrap();
        assert!(chess.contains_key("description"));
        assert!(chess.contains_key("schedule"));
        assert!(chess.contains_key("max_participants"));
        assert!(chess.contains_key("participants"));
        // The name travels as the map key, not as a record field
        assert_eq!(chess.len(), 4);
        assert_eq!(chess["max_participants"], 12);
    }

    #[tokio::test]
    async fn test_participants_are_arrays() {
        let app = test_app();

        let (_, body) = send(&app, "GET", "/activities").await;

        for (name, record) in body.as_object().unwrap() {
            let participants = record
                .get("participants")
                .unwrap_or_else(|| panic!("{} has no participants field", name));
            assert!(participants.is_array());
            for entry in participants.as_array().unwrap() {
                assert!(entry.is_string());
            }
        }
    }

    #[tokio::test]
    async fn test_signup_for_activity_success() {
        let app = test_app();

        let (status, body) = send(&app, "POST", &signup_uri("Chess Club", "test@mergington.edu")).await;

        assert_eq!(status, StatusCode::OK);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("test@mergington.edu"));

        // The new participant shows up in the listing
        let (_, listing) = send(&app, "GET", "/activities").await;
        let participants = listing["Chess Club"]["participants"].as_array().unwrap();
        assert!(participants.contains(&json!("test@mergington.edu")));
    }

    #[tokio::test]
    async fn test_signup_for_activity_duplicate() {
        let app = test_app();

        // michael is seeded into Chess Club
        let (status, body) = send(
            &app,
            "POST",
            &signup_uri("Chess Club", "michael@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("already signed up"));
    }

    #[tokio::test]
    async fn test_signup_for_nonexistent_activity() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            &signup_uri("Nonexistent Club", "test@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_signup_requires_email_param() {
        let app = test_app();

        let (status, _) = send(&app, "POST", "/activities/Chess%20Club/signup").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unregister_from_activity_success() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            &unregister_uri("Chess Club", "michael@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("michael@mergington.edu"));

        let (_, listing) = send(&app, "GET", "/activities").await;
        let participants = listing["Chess Club"]["participants"].as_array().unwrap();
        assert!(!participants.contains(&json!("michael@mergington.edu")));
    }

    #[tokio::test]
    async fn test_unregister_not_registered() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            &unregister_uri("Chess Club", "notregistered@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("not registered"));
    }

    #[tokio::test]
    async fn test_unregister_nonexistent_activity() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            &unregister_uri("Nonexistent Club", "test@mergington.edu"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_signup_and_unregister_workflow() {
        let app = test_app();
        let activity = "Programming Class";
        let email = "workflow@mergington.edu";

        // Not enrolled to begin with
        let (_, listing) = send(&app, "GET", "/activities").await;
        assert!(!listing[activity]["participants"]
            .as_array()
            .unwrap()
            .contains(&json!(email)));

        // Sign up, then appear in the listing
        let (status, _) = send(&app, "POST", &signup_uri(activity, email)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, listing) = send(&app, "GET", "/activities").await;
        assert!(listing[activity]["participants"]
            .as_array()
            .unwrap()
            .contains(&json!(email)));

        // Unregister, then disappear again
        let (status, _) = send(&app, "POST", &unregister_uri(activity, email)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, listing) = send(&app, "GET", "/activities").await;
        assert!(!listing[activity]["participants"]
            .as_array()
            .unwrap()
            .contains(&json!(email)));
    }

    #[tokio::test]
    async fn test_root_redirect() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/static/index.html"
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "mergington-activities");
    }
}
