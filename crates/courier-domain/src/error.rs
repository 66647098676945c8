use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("malformed queue payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("queue payload carries {actual} parameter(s), {required} required")]
    ParameterCount { required: usize, actual: usize },

    #[error("request stream send failed: {0}")]
    StreamSend(String),

    #[error("response stream receive failed: {0}")]
    StreamReceive(String),

    #[error("subscription receive failed: {0}")]
    Subscription(#[from] anyhow::Error),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
