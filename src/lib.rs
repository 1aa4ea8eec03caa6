//! Ariane — the decision core of an internal HR assistant.
//!
//! Given a free-text message and an authenticated employee identity, Ariane
//! classifies the message into an intent, drives a per-user multi-turn
//! leave-request collection flow, and computes workload analytics rendered
//! as reports. Transport framing and persistence live behind the traits in
//! [`store`].
//!
//! See `DESIGN.md` for full architecture documentation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod types;

pub mod intent;
pub mod text;

pub mod dialogue;
pub mod report;
pub mod workload;

pub mod store;
