//! Domain layer for the broadcast hub.
//!
//! This module contains the types the hub operates on and the contract of
//! its trace collaborator, independent of transport and infrastructure.

pub mod client;
pub mod error;
pub mod factory;
pub mod trace;
pub mod value_object;

pub use client::{ClientHandle, OutboundQueue, Payload};
pub use error::{DeliveryError, ValueObjectError};
pub use factory::ClientIdFactory;
pub use trace::{TraceEvent, Tracer};
pub use value_object::ClientId;
