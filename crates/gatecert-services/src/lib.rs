//! # gatecert Services
//!
//! Client for the remote management service.
//!
//! This crate provides:
//! - **Management**: vault create/delete/populate, public key retrieval,
//!   credential registration and region lookup
//! - **Translation**: mapping of transport failures, HTTP statuses and
//!   secure-store error codes onto typed errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod management;
pub mod translate;

pub use management::{ManagementClient, ManagementConfig};
