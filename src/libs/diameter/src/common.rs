//! Common Diameter types and constants

use crate::avp::{Avp, AvpData};
use crate::VENDOR_ID_3GPP;

/// AVP codes for common Diameter AVPs
pub mod avp_code {
    // RFC 6733 Base Protocol AVPs
    pub const USER_NAME: u32 = 1;
    pub const SESSION_ID: u32 = 263;
    pub const ORIGIN_HOST: u32 = 264;
    pub const VENDOR_ID: u32 = 266;
    pub const RESULT_CODE: u32 = 268;
    pub const AUTH_SESSION_STATE: u32 = 277;
    pub const DESTINATION_REALM: u32 = 283;
    pub const DESTINATION_HOST: u32 = 293;
    pub const ORIGIN_REALM: u32 = 296;
    pub const EXPERIMENTAL_RESULT: u32 = 297;
    pub const EXPERIMENTAL_RESULT_CODE: u32 = 298;

    // 3GPP specific AVPs shared across applications
    pub const RAT_TYPE: u32 = 1032;
    pub const SERVICE_SELECTION: u32 = 493;
}

/// Auth session state values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AuthSessionState {
    StateMaintained = 0,
    NoStateMaintained = 1,
}

impl AuthSessionState {
    pub fn to_avp(self) -> Avp {
        Avp::mandatory(avp_code::AUTH_SESSION_STATE, AvpData::Enumerated(self as i32))
    }
}

/// RAT type values (3GPP TS 29.212)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RatType {
    Wlan = 0,
    Virtual = 1,
    Utran = 1000,
    Geran = 1001,
    Gan = 1002,
    HspaEvolution = 1003,
    Eutran = 1004,
    EutranNbIot = 1005,
}

/// Experimental-Result structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentalResult {
    pub vendor_id: u32,
    pub experimental_result_code: u32,
}

impl ExperimentalResult {
    /// A 3GPP experimental result
    pub fn new(result_code: u32) -> Self {
        Self {
            vendor_id: VENDOR_ID_3GPP,
            experimental_result_code: result_code,
        }
    }

    /// Grouped Experimental-Result AVP (RFC 6733 Section 7.6)
    pub fn to_avp(&self) -> Avp {
        Avp::grouped(
            avp_code::EXPERIMENTAL_RESULT,
            vec![
                Avp::mandatory(avp_code::VENDOR_ID, AvpData::Unsigned32(self.vendor_id)),
                Avp::mandatory(
                    avp_code::EXPERIMENTAL_RESULT_CODE,
                    AvpData::Unsigned32(self.experimental_result_code),
                ),
            ],
        )
    }
}
