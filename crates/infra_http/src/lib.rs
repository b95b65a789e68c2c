//! Infrastructure HTTP Layer
//!
//! This crate connects the CRM domain to the Capsule REST API (v1).
//!
//! # Architecture
//!
//! - [`CapsuleConfig`]: account, token and timeout, loaded from the environment
//! - [`CapsuleConnection`]: signs and sends requests, maps HTTP statuses
//! - [`CapsuleAdapter`]: implements the `domain_crm` ports on a connection
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{CapsuleAdapter, CapsuleConfig};
//! use domain_crm::{RecordPortExt, Person};
//!
//! let crm = CapsuleAdapter::from_config(&CapsuleConfig::new("sample", token))?;
//! let person = crm.create(Person::new("Eric", "Schmidt")).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod connection;
pub mod error;

pub use adapters::CapsuleAdapter;
pub use config::CapsuleConfig;
pub use connection::{check_response, CapsuleConnection};
pub use error::HttpError;
