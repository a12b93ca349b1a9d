//! Route handlers and their response payloads.
//!
//! [`demo`] serves the routing demo, [`users`] the store-backed user service.
//! Both return a [`HandlerResponse`](crate::dispatcher::HandlerResponse)
//! carrying one of the [`Payload`] shapes.

pub mod demo;
mod types;
pub mod users;

pub use types::*;
