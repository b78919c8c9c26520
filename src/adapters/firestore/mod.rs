//! Cloud Firestore adapter
//!
//! Talks to the Firestore REST API (or the local emulator) and yields
//! [`StoreDocument`](crate::adapters::store::StoreDocument)s.

pub mod client;
pub mod models;

pub use client::FirestoreClient;
pub use models::{convert_fields, FirestoreDocument, FirestoreValue, ListDocumentsResponse};
