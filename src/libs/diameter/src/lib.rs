//! Diameter Protocol Library for the HSS test core
//!
//! This crate provides the Diameter message handling used on the S6a
//! interface (MME <-> HSS, 3GPP TS 29.272):
//! - RFC 6733 message header and AVP encoding/decoding
//! - Common base-protocol AVP codes and Result-Code values
//! - S6a application constants and the Update-Location-Request view

pub mod common;
pub mod avp;
pub mod message;
pub mod s6a;
pub mod error;

pub use common::*;
pub use avp::*;
pub use message::*;
pub use error::*;

/// 3GPP Vendor ID
pub const VENDOR_ID_3GPP: u32 = 10415;

/// Diameter protocol version
pub const DIAMETER_VERSION: u8 = 1;
