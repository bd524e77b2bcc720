use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DispatchQuery {
    /// Encoded floor request, e.g. `12U`
    pub request: String,
}

#[derive(Debug, Deserialize)]
pub struct DispatchRequestBody {
    /// Encoded lift states in fleet order, e.g. `["12D", "0", "4U"]`
    pub fleet: Vec<String>,
    pub request: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DispatchSuccessResponse {
    pub request: String,
    pub lifts: Vec<String>,
    pub wait_times: Vec<u8>,
    pub selected_index: usize,
    /// 1-based lift number, as shown to passengers
    pub selected_lift: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DispatchErrorResponse {
    pub error_code: DispatchErrorCode,
    pub error_message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FleetSuccessResponse {
    pub lifts: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FleetErrorResponse {
    pub error_code: FleetErrorCode,
    pub error_message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Ko,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthSuccessResponse {
    pub status: HealthStatus,
    pub lifts: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthErrorResponse {
    pub error_code: HealthErrorCode,
    pub error_message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchErrorCode {
    InvalidRequest,
    InvalidLiftState,
    EmptyFleet,
    NoData,
    InternalError,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FleetErrorCode {
    NoData,
    InternalError,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthErrorCode {
    InternalError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dispatch_success_response_serializes_all_fields() {
        let response = DispatchSuccessResponse {
            request: "12U".to_string(),
            lifts: vec!["10".to_string(), "3U".to_string(), "15D".to_string()],
            wait_times: vec![2, 9, 3],
            selected_index: 0,
            selected_lift: 1,
            timestamp: "2026-01-11T12:30:00Z".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize dispatch response");
        assert_eq!(
            value,
            json!({
                "request": "12U",
                "lifts": ["10", "3U", "15D"],
                "wait_times": [2, 9, 3],
                "selected_index": 0,
                "selected_lift": 1,
                "timestamp": "2026-01-11T12:30:00Z"
            })
        );
    }

    #[test]
    fn dispatch_error_response_uses_screaming_snake_case_code() {
        let response = DispatchErrorResponse {
            error_code: DispatchErrorCode::InvalidLiftState,
            error_message: "invalid lift state".to_string(),
            timestamp: "2026-01-11T12:32:00Z".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize error response");
        assert_eq!(
            value,
            json!({
                "error_code": "INVALID_LIFT_STATE",
                "error_message": "invalid lift state",
                "timestamp": "2026-01-11T12:32:00Z"
            })
        );
    }

    #[test]
    fn health_success_response_serializes_status() {
        let response = HealthSuccessResponse {
            status: HealthStatus::Ko,
            lifts: 0,
            timestamp: "2026-01-11T12:33:00Z".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize health response");
        assert_eq!(
            value,
            json!({
                "status": "ko",
                "lifts": 0,
                "timestamp": "2026-01-11T12:33:00Z"
            })
        );
    }

    #[test]
    fn dispatch_body_deserializes_from_json() {
        let body: DispatchRequestBody =
            serde_json::from_value(json!({"fleet": ["0", "1D", "12"], "request": "17D"}))
                .expect("deserialize dispatch body");

        assert_eq!(body.fleet, vec!["0", "1D", "12"]);
        assert_eq!(body.request, "17D");
    }
}
