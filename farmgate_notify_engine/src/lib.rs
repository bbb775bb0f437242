//! FarmGate Notification Engine
//!
//! The engine reacts to order lifecycle events on the FarmGate marketplace and dispatches push
//! notifications to the devices of the relevant counterparty: the farmer when an order is
//! created, the buyer when an order's status changes. It is delivery-provider agnostic.
//!
//! The library is divided into three main sections:
//! 1. The collaborator seams ([`mod@traits`]). The engine never talks to a concrete document
//!    store or push gateway directly; backends implement [`traits::TokenStore`] and
//!    [`traits::PushChannel`]. A Firestore-REST document store backend ships with the engine
//!    ([`FirestoreDocStore`]); push gateway adapters live with the server that hosts the engine.
//! 2. The notification flow API ([`mod@fne_api`]). [`NotifyFlowApi`] is the public entry point:
//!    it resolves tokens, composes payloads and runs the batched dispatch, treating expected
//!    absences (no record, no tokens, no status transition) as clean no-ops.
//! 3. Dispatch events ([`mod@events`]). After every dispatch a `DispatchCompletedEvent` is
//!    published so that hosting code can observe delivery outcomes (counts and
//!    permanently-invalid tokens) without coupling to the flow itself.
mod db;

pub mod db_types;
pub mod events;
pub mod fne_api;
pub mod traits;

pub use db::firestore::{FirestoreConfig, FirestoreDocStore};
pub use fne_api::{dispatch_api::Dispatcher, errors::NotifyFlowError, notify_flow_api::NotifyFlowApi};
