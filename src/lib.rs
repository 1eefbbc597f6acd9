pub mod autoplay;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod fetch;
pub mod queue;
pub mod resource;
pub mod session;
