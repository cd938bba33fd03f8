//! # ChainBoard Workspace
//!
//! Umbrella for the ChainBoard workspace: re-exports the library
//! members so the demos and downstream experiments can depend on a
//! single crate.
//!
//! ## Example
//!
//! ```
//! let table = chain_board_workspace::sales_data::utils::generate_test_table(
//!     &["Beef Patty Prep"],
//!     &["Riverside Mall"],
//!     2024,
//!     8,
//!     100.0,
//!     1,
//! );
//! assert_eq!(table.len(), 8);
//! ```

pub use demand_forecast;
pub use portion_math;
pub use sales_data;
