use pulse_core::DateTime;
use serde::Deserialize;
use utoipa::ToSchema;

/// Query parameters for the bucketed aggregation
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventBucketsQuery {
    /// Bucket width such as "1 hour" or "1 day" (default: "1 day")
    pub duration: Option<String>,
    /// Pages to include, repeated (`pages=/&pages=/about`). Omitted or empty
    /// falls back to the default page list.
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Page the event was recorded on; required, must not be empty
    pub page: String,
    /// Raw user-agent string; falls back to the User-Agent request header
    pub user_agent: Option<String>,
    pub description: Option<String>,
    /// Occurrence time; defaults to the insertion time
    pub time: Option<DateTime>,
}

/// Update payload. Only `description` is accepted; every other event field
/// is immutable after creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_page() {
        let result: Result<CreateEventRequest, _> =
            serde_json::from_str(r#"{"description": "no page"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_request_optional_fields_default() {
        let request: CreateEventRequest = serde_json::from_str(r#"{"page": "/"}"#).unwrap();
        assert_eq!(request.page, "/");
        assert!(request.user_agent.is_none());
        assert!(request.description.is_none());
        assert!(request.time.is_none());
    }

    #[test]
    fn test_update_request_accepts_only_description() {
        let request: UpdateEventRequest =
            serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(request.description, "x");
    }
}
