use crate::error::{BridgeError, BridgeResult};
use crate::types::{QueueEnvelope, QueuePayload, RequestRecord};

/// Timestamp layout shared by request and response records on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The remote protocol pairs the first two parameters of each payload.
/// Fewer than two is a contract violation; extras are not consumed.
pub const REQUIRED_PARAMETERS: usize = 2;

/// Translate one queue envelope into the ordered request records it carries.
///
/// The timestamp is captured once per batch so every record of the batch is
/// comparably stamped. Decoding failures produce no records; the caller must
/// not attempt partial recovery.
pub fn translate_envelope(envelope: &QueueEnvelope) -> BridgeResult<Vec<RequestRecord>> {
    let payload: QueuePayload = serde_json::from_str(&envelope.payload)?;

    if payload.parameters.len() < REQUIRED_PARAMETERS {
        return Err(BridgeError::ParameterCount {
            required: REQUIRED_PARAMETERS,
            actual: payload.parameters.len(),
        });
    }

    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

    Ok(payload.parameters[..REQUIRED_PARAMETERS]
        .iter()
        .map(|parameter| RequestRecord {
            service_name: payload.service_name.clone(),
            parameter: parameter.to_string(),
            timestamp: timestamp.clone(),
        })
        .collect())
}
