//! S6a Interface - MME <-> HSS (3GPP TS 29.272)
//!
//! Only the Update-Location procedure (ULR/ULA) is modelled here.

use bytes::Bytes;

use crate::avp::{Avp, AvpData, AvpSource};
use crate::common::{avp_code, AuthSessionState};
use crate::error::{DiameterError, DiameterResult};
use crate::message::DiameterMessage;
use crate::VENDOR_ID_3GPP;

/// S6a Application ID (3GPP TS 29.272)
pub const S6A_APPLICATION_ID: u32 = 16777251;

/// S6a Command Codes
pub mod cmd {
    /// Update-Location-Request/Answer
    pub const UPDATE_LOCATION: u32 = 316;
}

/// S6a AVP Codes (vendor 10415)
pub mod avp {
    /// Subscription-Data
    pub const SUBSCRIPTION_DATA: u32 = 1400;
    /// ULR-Flags
    pub const ULR_FLAGS: u32 = 1405;
    /// ULA-Flags
    pub const ULA_FLAGS: u32 = 1406;
    /// Visited-PLMN-Id
    pub const VISITED_PLMN_ID: u32 = 1407;
    /// Network-Access-Mode
    pub const NETWORK_ACCESS_MODE: u32 = 1417;
    /// Context-Identifier
    pub const CONTEXT_IDENTIFIER: u32 = 1423;
    /// Subscriber-Status
    pub const SUBSCRIBER_STATUS: u32 = 1424;
    /// Access-Restriction-Data
    pub const ACCESS_RESTRICTION_DATA: u32 = 1426;
    /// All-APN-Configurations-Included-Indicator
    pub const ALL_APN_CONFIG_INC_IND: u32 = 1428;
    /// APN-Configuration-Profile
    pub const APN_CONFIGURATION_PROFILE: u32 = 1429;
    /// APN-Configuration
    pub const APN_CONFIGURATION: u32 = 1430;
    /// EPS-Subscribed-QoS-Profile
    pub const EPS_SUBSCRIBED_QOS_PROFILE: u32 = 1431;
    /// AMBR
    pub const AMBR: u32 = 1435;
    /// PDN-Type
    pub const PDN_TYPE: u32 = 1456;
    /// MSISDN
    pub const MSISDN: u32 = 701;
    /// Max-Requested-Bandwidth-DL
    pub const MAX_BANDWIDTH_DL: u32 = 515;
    /// Max-Requested-Bandwidth-UL
    pub const MAX_BANDWIDTH_UL: u32 = 516;
    /// QoS-Class-Identifier
    pub const QOS_CLASS_IDENTIFIER: u32 = 1028;
    /// Allocation-Retention-Priority
    pub const ALLOCATION_RETENTION_PRIORITY: u32 = 1034;
    /// Priority-Level
    pub const PRIORITY_LEVEL: u32 = 1046;
    /// Pre-emption-Capability
    pub const PRE_EMPTION_CAPABILITY: u32 = 1047;
    /// Pre-emption-Vulnerability
    pub const PRE_EMPTION_VULNERABILITY: u32 = 1048;
}

/// ULR Flags
pub mod ulr_flags {
    pub const SINGLE_REGISTRATION_IND: u32 = 1;
    pub const S6A_S6D_INDICATOR: u32 = 1 << 1;
    pub const SKIP_SUBSCRIBER_DATA: u32 = 1 << 2;
    pub const GPRS_SUBSCRIPTION_DATA_IND: u32 = 1 << 3;
    pub const NODE_TYPE_IND: u32 = 1 << 4;
    pub const INITIAL_ATTACH_IND: u32 = 1 << 5;
    pub const PS_LCS_SUPPORTED_BY_UE: u32 = 1 << 6;
}

/// S6a Experimental Result Codes
pub mod exp_result {
    /// DIAMETER_ERROR_USER_UNKNOWN
    pub const ERROR_USER_UNKNOWN: u32 = 5001;
    /// DIAMETER_ERROR_UNKNOWN_EPS_SUBSCRIPTION
    pub const ERROR_UNKNOWN_EPS_SUBSCRIPTION: u32 = 5420;
}

/// Subscriber-Status (TS 29.272 7.3.29)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SubscriberStatus {
    ServiceGranted = 0,
    OperatorDeterminedBarring = 1,
}

/// Network-Access-Mode (TS 29.272 7.3.21)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum NetworkAccessMode {
    PacketAndCircuit = 0,
    OnlyPacket = 2,
}

/// PDN-Type (TS 29.272 7.3.62)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PdnType {
    Ipv4 = 0,
    Ipv6 = 1,
    Ipv4v6 = 2,
    Ipv4OrIpv6 = 3,
}

/// All-APN-Configurations-Included-Indicator (TS 29.272 7.3.46)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AllApnConfigurationsIncluded {
    AllIncluded = 0,
    ModifiedAdded = 1,
}

/// Pre-emption-Capability (TS 29.212 5.3.46)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PreemptionCapability {
    Enabled = 0,
    Disabled = 1,
}

/// Pre-emption-Vulnerability (TS 29.212 5.3.47)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PreemptionVulnerability {
    Enabled = 0,
    Disabled = 1,
}

/// Decoded view of an Update-Location-Request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UlrMessage {
    pub session_id: String,
    /// IMSI
    pub user_name: String,
    pub visited_plmn_id: Bytes,
    pub ulr_flags: u32,
    pub rat_type: u32,
    pub origin_host: Option<String>,
    pub origin_realm: Option<String>,
}

impl UlrMessage {
    /// Decode the ULR fields the HSS consumes.
    ///
    /// Absent mandatory AVPs yield `MissingAvp`, AVPs whose payload does not
    /// match the dictionary type yield `InvalidAvpValue`.
    pub fn parse(msg: &DiameterMessage) -> DiameterResult<Self> {
        let session_id = utf8_field(msg, avp_code::SESSION_ID, None, "Session-Id")?;
        let user_name = utf8_field(msg, avp_code::USER_NAME, None, "User-Name")?;

        let visited_plmn_id = msg
            .find_field(avp::VISITED_PLMN_ID, Some(VENDOR_ID_3GPP))?
            .as_octet_string()
            .cloned()
            .ok_or_else(|| invalid("Visited-PLMN-Id"))?;

        let ulr_flags = msg
            .find_field(avp::ULR_FLAGS, Some(VENDOR_ID_3GPP))?
            .as_u32()
            .ok_or_else(|| invalid("ULR-Flags"))?;

        let rat_type = msg
            .find_field(avp_code::RAT_TYPE, Some(VENDOR_ID_3GPP))?
            .as_u32()
            .ok_or_else(|| invalid("RAT-Type"))?;

        Ok(Self {
            session_id,
            user_name,
            visited_plmn_id,
            ulr_flags,
            rat_type,
            origin_host: msg.origin_host().map(str::to_string),
            origin_realm: msg.origin_realm().map(str::to_string),
        })
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.ulr_flags & flag != 0
    }
}

fn utf8_field(
    msg: &DiameterMessage,
    code: u32,
    vendor_id: Option<u32>,
    name: &str,
) -> DiameterResult<String> {
    msg.find_field(code, vendor_id)?
        .as_utf8_string()
        .map(str::to_string)
        .ok_or_else(|| invalid(name))
}

fn invalid(name: &str) -> DiameterError {
    DiameterError::InvalidAvpValue(format!("{} cannot be decoded", name))
}

/// Create an Update-Location-Request (ULR)
#[allow(clippy::too_many_arguments)]
pub fn create_ulr(
    session_id: &str,
    origin_host: &str,
    origin_realm: &str,
    destination_realm: &str,
    user_name: &str,
    visited_plmn_id: &[u8],
    ulr_flags: u32,
    rat_type: u32,
) -> DiameterMessage {
    let mut msg = DiameterMessage::new_request(cmd::UPDATE_LOCATION, S6A_APPLICATION_ID);

    msg.add_avp(Avp::mandatory(
        avp_code::SESSION_ID,
        AvpData::Utf8String(session_id.to_string()),
    ));
    msg.add_avp(Avp::mandatory(
        avp_code::ORIGIN_HOST,
        AvpData::DiameterIdentity(origin_host.to_string()),
    ));
    msg.add_avp(Avp::mandatory(
        avp_code::ORIGIN_REALM,
        AvpData::DiameterIdentity(origin_realm.to_string()),
    ));
    msg.add_avp(Avp::mandatory(
        avp_code::DESTINATION_REALM,
        AvpData::DiameterIdentity(destination_realm.to_string()),
    ));
    msg.add_avp(Avp::mandatory(
        avp_code::USER_NAME,
        AvpData::Utf8String(user_name.to_string()),
    ));
    msg.add_avp(AuthSessionState::NoStateMaintained.to_avp());
    msg.add_avp(Avp::vendor_mandatory(
        avp_code::RAT_TYPE,
        VENDOR_ID_3GPP,
        AvpData::Enumerated(rat_type as i32),
    ));
    msg.add_avp(Avp::vendor_mandatory(
        avp::ULR_FLAGS,
        VENDOR_ID_3GPP,
        AvpData::Unsigned32(ulr_flags),
    ));
    msg.add_avp(Avp::vendor_mandatory(
        avp::VISITED_PLMN_ID,
        VENDOR_ID_3GPP,
        AvpData::OctetString(Bytes::copy_from_slice(visited_plmn_id)),
    ));

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RatType;

    fn sample_ulr() -> DiameterMessage {
        create_ulr(
            "mme.epc.mnc001.mcc001.3gppnetwork.org;1;42",
            "mme.epc.mnc001.mcc001.3gppnetwork.org",
            "epc.mnc001.mcc001.3gppnetwork.org",
            "epc.mnc001.mcc001.3gppnetwork.org",
            "001010123456789",
            &[0x00, 0xF1, 0x10],
            ulr_flags::S6A_S6D_INDICATOR | ulr_flags::INITIAL_ATTACH_IND,
            RatType::Eutran as u32,
        )
    }

    #[test]
    fn test_create_ulr() {
        let msg = sample_ulr();
        assert_eq!(msg.header.command_code, cmd::UPDATE_LOCATION);
        assert_eq!(msg.header.application_id, S6A_APPLICATION_ID);
        assert!(msg.header.is_request());
        assert_eq!(msg.user_name(), Some("001010123456789"));
    }

    #[test]
    fn test_parse_ulr() {
        let ulr = UlrMessage::parse(&sample_ulr()).unwrap();
        assert_eq!(ulr.user_name, "001010123456789");
        assert_eq!(ulr.rat_type, 1004);
        assert_eq!(&ulr.visited_plmn_id[..], &[0x00, 0xF1, 0x10]);
        assert!(ulr.has_flag(ulr_flags::INITIAL_ATTACH_IND));
        assert!(!ulr.has_flag(ulr_flags::SKIP_SUBSCRIBER_DATA));
        assert_eq!(
            ulr.origin_realm.as_deref(),
            Some("epc.mnc001.mcc001.3gppnetwork.org")
        );
    }

    #[test]
    fn test_parse_ulr_from_wire() {
        let mut bytes = sample_ulr().encode().freeze();
        let decoded = DiameterMessage::decode(&mut bytes).unwrap();
        let ulr = UlrMessage::parse(&decoded).unwrap();
        assert_eq!(ulr.session_id, "mme.epc.mnc001.mcc001.3gppnetwork.org;1;42");
        assert_eq!(ulr.ulr_flags, 0x22);
    }

    #[test]
    fn test_parse_ulr_bad_flags() {
        let mut msg = sample_ulr();
        msg.avps.retain(|a| a.code != avp::ULR_FLAGS);
        msg.add_avp(Avp::vendor_mandatory(
            avp::ULR_FLAGS,
            VENDOR_ID_3GPP,
            AvpData::Raw(Bytes::from_static(&[0x01])),
        ));
        assert!(matches!(
            UlrMessage::parse(&msg),
            Err(DiameterError::InvalidAvpValue(_))
        ));
    }

    #[test]
    fn test_parse_ulr_missing_rat_type() {
        let mut msg = sample_ulr();
        msg.avps.retain(|a| a.code != avp_code::RAT_TYPE);
        assert_eq!(
            UlrMessage::parse(&msg).unwrap_err(),
            DiameterError::MissingAvp {
                code: avp_code::RAT_TYPE,
                vendor_id: Some(VENDOR_ID_3GPP)
            }
        );
    }
}
