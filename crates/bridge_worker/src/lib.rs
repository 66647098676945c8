pub mod bridge_worker;
pub mod pump;

pub use bridge_worker::BridgeWorker;
pub use pump::DuplexPump;
