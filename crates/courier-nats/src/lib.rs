pub mod client;
pub mod subscriber;

pub use client::NatsClient;
pub use subscriber::TopicSubscriber;
