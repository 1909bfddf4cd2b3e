pub mod app;
pub mod deserializers;
pub mod error;
pub mod pagination;
pub mod quiz;
mod routes;

pub use app::{router, run_server, AppState};
