//! # reliefhub-realtime
//!
//! Real-time push channel for ReliefHub. Maintains a registry of live
//! WebSocket connections per user and delivers typed outbound messages
//! best-effort: a recipient with no open connection simply misses the push
//! (the persisted notification row is the durable copy).

pub mod hub;
pub mod message;

pub use hub::{ConnectionHub, ConnectionId};
pub use message::OutboundMessage;
