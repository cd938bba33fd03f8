//! # Chain Board
//!
//! Application layer of the restaurant-chain analytics board: session
//! state over the cleaned sales table, report and analysis views,
//! spreadsheet export, and the natural-language Q&A client. The heavy
//! lifting lives in the `sales_data`, `demand_forecast` and
//! `portion_math` crates; this one wires them to a CLI.

pub mod chat;
pub mod config;
pub mod dynamics;
pub mod export;
pub mod reports;
pub mod seasonal;
pub mod session;

pub use crate::config::AppConfig;
pub use crate::session::SessionState;
