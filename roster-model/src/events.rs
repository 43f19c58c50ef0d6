use serde::{Deserialize, Serialize};

use crate::{ModelResult, RequestId};

/// Payload of a `request-completed` broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCompleted {
    pub request_id: RequestId,
    pub result: String,
    pub timestamp: i64,
}

/// Payload of a `request-error` broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFailed {
    pub request_id: RequestId,
    pub error: String,
    pub timestamp: i64,
}

/// Handshake sent to a subscriber right after its socket is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectAck {
    pub connection_id: String,
}

/// Every frame the notification channel sends, encoded as
/// `{"event": <name>, "data": <payload>}` JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ChannelEvent {
    #[serde(rename = "connect")]
    Connected(ConnectAck),
    #[serde(rename = "request-completed")]
    RequestCompleted(RequestCompleted),
    #[serde(rename = "request-error")]
    RequestError(RequestFailed),
}

impl ChannelEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::Connected(_) => "connect",
            ChannelEvent::RequestCompleted(_) => "request-completed",
            ChannelEvent::RequestError(_) => "request-error",
        }
    }

    /// The request this event reports on, if any.
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            ChannelEvent::Connected(_) => None,
            ChannelEvent::RequestCompleted(event) => Some(&event.request_id),
            ChannelEvent::RequestError(event) => Some(&event.request_id),
        }
    }

    pub fn to_frame(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_frame(frame: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(frame)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_frame_matches_wire_contract() {
        let event = ChannelEvent::RequestCompleted(RequestCompleted {
            request_id: RequestId::from("req_10_1"),
            result: "Lorem ipsum.".into(),
            timestamp: 10,
        });

        let frame: serde_json::Value =
            serde_json::from_str(&event.to_frame().unwrap()).unwrap();
        assert_eq!(frame["event"], "request-completed");
        assert_eq!(frame["data"]["requestId"], "req_10_1");
        assert_eq!(frame["data"]["result"], "Lorem ipsum.");
    }

    #[test]
    fn error_frame_parses_back() {
        let raw = r#"{"event":"request-error","data":{"requestId":"req_1_3","error":"Processing failed","timestamp":7}}"#;
        let event = ChannelEvent::from_frame(raw).unwrap();

        assert_eq!(event.name(), "request-error");
        assert_eq!(event.request_id().map(|id| id.as_str()), Some("req_1_3"));
    }

    #[test]
    fn unknown_event_is_rejected() {
        let raw = r#"{"event":"request-cancelled","data":{}}"#;
        assert!(ChannelEvent::from_frame(raw).is_err());
    }
}
