pub mod client;
pub mod conversions;

pub mod proto {
    pub mod microservice {
        pub mod v1 {
            include!(concat!(env!("OUT_DIR"), "/microservice.v1.rs"));
        }
    }
}

pub use client::{GrpcRequestSink, GrpcResponseSource, RemoteServiceClient};
