pub mod error;
pub mod record_log;
pub mod translator;
pub mod transport;
pub mod types;

pub use error::{BridgeError, BridgeResult};
pub use record_log::{RecordLogger, TracingRecordLogger};
pub use translator::translate_envelope;
pub use transport::{EnvelopeSource, RequestSink, ResponseSource};
pub use types::{QueueEnvelope, QueuePayload, RequestRecord, ResponseRecord};
