//! Firestore REST client.
//!
//! A narrow client over the Firestore v1 REST API covering what maintenance
//! jobs need: listing a collection, deleting a field, and removing values
//! from an array field.

pub mod client;
pub mod document;
pub mod errors;
pub mod value;

pub use client::FirestoreClient;
pub use document::Document;
pub use errors::FirestoreError;
pub use value::Value;
