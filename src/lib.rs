pub mod auth;
pub mod config;
pub mod export;
pub mod form;
pub mod render;
pub mod store;
pub mod summary;
pub mod value;

pub use render::{DisplayNode, render};
pub use value::{DecodeError, JsonValue};
