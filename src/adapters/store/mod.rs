//! Document store interface consumed by the export workflow

pub mod traits;

pub use traits::{DocumentStore, StoreDocument};
