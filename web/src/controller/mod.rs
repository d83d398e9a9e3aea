use crate::params::message::MessageParams;
use crate::Error;
use axum::Json;
use serde::Serialize;

pub(crate) mod health_check_controller;
pub(crate) mod message_controller;
pub(crate) mod publish_controller;
pub(crate) mod stream_controller;

/// Envelope returned by the publish endpoints: a short status word plus the
/// accepted payload echoed back.
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: &'static str, data: T) -> Self {
        Self {
            status,
            data: Some(data),
        }
    }
}

/// Shared validation for both publish endpoints. A missing body, a body that
/// failed JSON extraction, and a missing or empty `message` field are all the
/// same client error; none of them may enqueue anything.
pub(crate) fn require_message(params: Option<Json<MessageParams>>) -> crate::Result<String> {
    params
        .and_then(|Json(params)| params.message_text().map(str::to_string))
        .ok_or_else(|| Error::invalid("message is required"))
}
