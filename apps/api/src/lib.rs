//! Resume-to-job-description matching: an HTTP analysis service backed by a
//! schema-constrained generation API, and the client that drives it.

pub mod analysis;
pub mod client;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;
