//! Collaborator seams for the notification engine.
//!
//! The engine reads device tokens from a document store and hands batched notifications to a
//! push delivery gateway, but it never touches either directly. Backends implement the traits
//! in this module:
//!
//! * [`TokenStore`] resolves a user identifier to the set of device tokens registered for that
//!   user. The engine ships a Firestore-REST implementation; tests substitute an in-memory one.
//! * [`PushChannel`] performs one batched multicast send and reports the per-recipient
//!   outcomes. The FCM adapter lives with the hosting server.
mod push_channel;
mod token_store;

pub use push_channel::{PushChannel, PushChannelError, PushResponse, TokenOutcome};
pub use token_store::{TokenStore, TokenStoreError};
