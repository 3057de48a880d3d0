use axum::Json;
use serde::{Deserialize, Serialize};
use todo_core::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: timestamp::format(&timestamp::now()),
    })
}
