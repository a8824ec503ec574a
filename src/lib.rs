pub mod api;
pub mod db;
pub mod mcp;
pub mod models;
pub mod planning;
