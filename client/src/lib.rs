//! Networked side of the httpdrop page client.
//!
//! # Overview
//! Supplies what `httpdrop-core` leaves to the host: a ureq transport that
//! reports upload progress, an async submitter that keeps hooks on the
//! caller's task, environment configuration, and a `Page` controller that
//! ties the page handlers to real submissions.

pub mod config;
pub mod page;
pub mod submit;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use page::Page;
pub use submit::AsyncSubmitter;
pub use transport::{ProgressReader, UreqTransport};
