use pulse_core::UtcDateTime;
use pulse_entities::events;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    #[schema(value_type = String, format = DateTime)]
    pub time: UtcDateTime,
    pub page: String,
    pub user_agent: Option<String>,
    pub description: Option<String>,
}

impl From<events::Model> for EventResponse {
    fn from(model: events::Model) -> Self {
        Self {
            id: model.id,
            time: model.time,
            page: model.page,
            user_agent: model.user_agent,
            description: model.description,
        }
    }
}

/// One row of the bucketed aggregation
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EventBucket {
    #[schema(value_type = String, format = DateTime)]
    pub bucket: UtcDateTime,
    pub operating_system: String,
    pub page: String,
    pub count: i64,
}
