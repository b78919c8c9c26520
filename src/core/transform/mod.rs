//! Data transformation logic
//!
//! Converts retrieved records into a [`Sheet`](crate::domain::Sheet) ready for
//! a spreadsheet writer. See [`tabulate`] for the column and cell rules.

pub mod tabulate;

pub use tabulate::{tabulate, to_cell};
