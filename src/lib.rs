pub mod api;
pub mod catalog;
pub mod combos;
pub mod config;
pub mod conflict;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod scorer;
pub mod session;
pub mod stats;
// cmd and reports are modules of the binary crate (main.rs).
