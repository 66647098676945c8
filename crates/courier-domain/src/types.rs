use serde::Deserialize;

/// Raw message delivered by the pub/sub transport, consumed once by the
/// translator.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEnvelope {
    pub topic: String,
    pub payload: String,
}

/// Decoded structure carried inside an envelope payload.
///
/// The serde renames pin the queue wire format: a JSON object with a
/// `serviceName` string and a `numbers` integer array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueuePayload {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    #[serde(rename = "numbers")]
    pub parameters: Vec<i64>,
}

/// One unit of work sent over the duplex stream. Immutable after
/// construction; all records of a batch share one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub service_name: String,
    pub parameter: String,
    pub timestamp: String,
}

/// One reply received from the duplex stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub service_name: String,
    pub message: String,
    pub timestamp: String,
}
