pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod inventory;
pub mod model;
pub mod routes;
pub mod store;
#[cfg(test)]
mod testing;
