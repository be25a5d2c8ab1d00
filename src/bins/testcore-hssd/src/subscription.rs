//! Subscription-Data construction for the Update-Location-Answer
//!
//! Every value except the AMBR bandwidths is a fixed reference value; the
//! bandwidths come from the subscriber's resolved profile.

use bytes::Bytes;
use testcore_diameter::s6a::{
    avp, AllApnConfigurationsIncluded, NetworkAccessMode, PdnType, PreemptionCapability,
    PreemptionVulnerability, SubscriberStatus,
};
use testcore_diameter::{avp_code, Avp, AvpData, VENDOR_ID_3GPP};

use crate::config::SubscriptionProfile;

pub const ULA_FLAGS: u32 = 0;
pub const MSISDN: &str = "12345";
pub const ACCESS_RESTRICTION_DATA: u32 = 47;
pub const SUBSCRIBER_STATUS: SubscriberStatus = SubscriberStatus::ServiceGranted;
pub const NETWORK_ACCESS_MODE: NetworkAccessMode = NetworkAccessMode::PacketAndCircuit;
pub const APN_CONTEXT_IDENTIFIER: u32 = 0;
pub const ALL_APN_CONFIGURATIONS_INCLUDED: AllApnConfigurationsIncluded =
    AllApnConfigurationsIncluded::AllIncluded;
pub const APN_PDN_TYPE: PdnType = PdnType::Ipv4;
pub const APN_SERVICE_SELECTION: &str = "oai.ipv4";
pub const APN_QOS_CLASS_IDENTIFIER: i32 = 9;
pub const EPS_PRIORITY_LEVEL: u32 = 15;
pub const EPS_PREEMPTION_CAPABILITY: PreemptionCapability = PreemptionCapability::Disabled;
pub const EPS_PREEMPTION_VULNERABILITY: PreemptionVulnerability = PreemptionVulnerability::Enabled;

fn unsigned(code: u32, value: u32) -> Avp {
    Avp::vendor_mandatory(code, VENDOR_ID_3GPP, AvpData::Unsigned32(value))
}

fn enumerated(code: u32, value: i32) -> Avp {
    Avp::vendor_mandatory(code, VENDOR_ID_3GPP, AvpData::Enumerated(value))
}

fn group(code: u32, avps: Vec<Avp>) -> Avp {
    Avp::vendor_grouped(code, VENDOR_ID_3GPP, avps)
}

/// ULA-Flags AVP
pub fn ula_flags() -> Avp {
    unsigned(avp::ULA_FLAGS, ULA_FLAGS)
}

/// AMBR group. Built anew for each placement in the answer.
pub fn ambr(profile: &SubscriptionProfile) -> Avp {
    group(
        avp::AMBR,
        vec![
            unsigned(avp::MAX_BANDWIDTH_DL, profile.max_dl_bit_rate),
            unsigned(avp::MAX_BANDWIDTH_UL, profile.max_ul_bit_rate),
        ],
    )
}

fn eps_subscribed_qos_profile() -> Avp {
    group(
        avp::EPS_SUBSCRIBED_QOS_PROFILE,
        vec![
            enumerated(avp::QOS_CLASS_IDENTIFIER, APN_QOS_CLASS_IDENTIFIER),
            group(
                avp::ALLOCATION_RETENTION_PRIORITY,
                vec![
                    unsigned(avp::PRIORITY_LEVEL, EPS_PRIORITY_LEVEL),
                    enumerated(avp::PRE_EMPTION_CAPABILITY, EPS_PREEMPTION_CAPABILITY as i32),
                    enumerated(
                        avp::PRE_EMPTION_VULNERABILITY,
                        EPS_PREEMPTION_VULNERABILITY as i32,
                    ),
                ],
            ),
        ],
    )
}

fn apn_configuration(profile: &SubscriptionProfile) -> Avp {
    group(
        avp::APN_CONFIGURATION,
        vec![
            unsigned(avp::CONTEXT_IDENTIFIER, APN_CONTEXT_IDENTIFIER),
            enumerated(avp::PDN_TYPE, APN_PDN_TYPE as i32),
            Avp::mandatory(
                avp_code::SERVICE_SELECTION,
                AvpData::Utf8String(APN_SERVICE_SELECTION.to_string()),
            ),
            eps_subscribed_qos_profile(),
            ambr(profile),
        ],
    )
}

fn apn_configuration_profile(profile: &SubscriptionProfile) -> Avp {
    group(
        avp::APN_CONFIGURATION_PROFILE,
        vec![
            unsigned(avp::CONTEXT_IDENTIFIER, APN_CONTEXT_IDENTIFIER),
            enumerated(avp::ALL_APN_CONFIG_INC_IND, ALL_APN_CONFIGURATIONS_INCLUDED as i32),
            apn_configuration(profile),
        ],
    )
}

/// Subscription-Data group for a resolved profile.
///
/// The subscription-level AMBR and the APN-level AMBR are separate AVPs
/// carrying the same values.
pub fn subscription_data(profile: &SubscriptionProfile) -> Avp {
    group(
        avp::SUBSCRIPTION_DATA,
        vec![
            Avp::vendor_mandatory(
                avp::MSISDN,
                VENDOR_ID_3GPP,
                AvpData::OctetString(Bytes::from_static(MSISDN.as_bytes())),
            ),
            unsigned(avp::ACCESS_RESTRICTION_DATA, ACCESS_RESTRICTION_DATA),
            enumerated(avp::SUBSCRIBER_STATUS, SUBSCRIBER_STATUS as i32),
            enumerated(avp::NETWORK_ACCESS_MODE, NETWORK_ACCESS_MODE as i32),
            apn_configuration_profile(profile),
            ambr(profile),
        ],
    )
}
