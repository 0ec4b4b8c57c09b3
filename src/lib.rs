pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod password;
pub mod reference;
pub mod routes;
pub mod schema;
pub mod state;
pub mod storage;
pub mod workflow;
