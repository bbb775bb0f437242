//! Document store backends.
//!
//! Currently Firestore (via its REST surface) is the only supported backend. You should never
//! need to talk to the store directly; use the [`crate::traits::TokenStore`] seam instead.
pub mod firestore;
