//! Client module for the remote media-transformation cloud service

pub mod api;
pub mod models;
pub mod transform;

pub use api::*;
pub use models::*;
pub use transform::*;
