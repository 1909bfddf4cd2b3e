//! Trivia question bank served over a JSON API.

pub mod db;
pub mod server;
pub mod settings;
pub mod telemetry;
