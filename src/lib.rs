#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "A multi-user project and task tracker. The crate holds the in-memory entity store,"]
#![doc = "authentication and ownership checks, domain models, routing configuration and error"]
#![doc = "handling. The binary (`main.rs`) wires them into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::store::Store;
