use courier_domain::{RequestRecord, ResponseRecord};

use crate::proto::microservice::v1::{Request, Response};

/// Convert a domain request record to its wire representation.
pub fn request_to_proto(record: RequestRecord) -> Request {
    Request {
        name: record.service_name,
        message: record.parameter,
        time: record.timestamp,
    }
}

/// Convert a wire response to the domain record the log sink consumes.
pub fn response_to_domain(response: Response) -> ResponseRecord {
    ResponseRecord {
        service_name: response.name,
        message: response.message,
        timestamp: response.time,
    }
}
