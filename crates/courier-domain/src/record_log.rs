use tracing::info;

use crate::types::{RequestRecord, ResponseRecord};

/// Capability for emitting the per-record request/response log lines.
///
/// The pump receives this explicitly instead of reaching for global logger
/// state, so tests can observe exactly which records were logged and in
/// which order.
pub trait RecordLogger: Send + Sync {
    fn request(&self, record: &RequestRecord);
    fn response(&self, record: &ResponseRecord);
}

/// Production logger backed by `tracing`.
pub struct TracingRecordLogger;

impl RecordLogger for TracingRecordLogger {
    fn request(&self, record: &RequestRecord) {
        info!(
            target: "courier::request",
            service_name = %record.service_name,
            message = %record.parameter,
            time = %record.timestamp,
            "forwarding request"
        );
    }

    fn response(&self, record: &ResponseRecord) {
        info!(
            target: "courier::response",
            service_name = %record.service_name,
            message = %record.message,
            time = %record.timestamp,
            "received response"
        );
    }
}
