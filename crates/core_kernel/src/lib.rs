//! Core Kernel - Foundational types shared by the Capsule CRM client
//!
//! This crate provides the building blocks used by the domain and adapter crates:
//! - Typed integer identifiers for every record kind
//! - Payload helpers that absorb the quirks of Capsule's JSON
//! - The port error type every adapter returns

pub mod identifiers;
pub mod payload;
pub mod ports;
pub mod error;

pub use identifiers::{
    PartyId, ContactId, OpportunityId, MilestoneId, CaseId, TrackId,
    TaskId, HistoryId, AttachmentId, UserId,
};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
