//! Update-Location-Request validation
//!
//! Mandatory AVPs per 3GPP TS 29.272 Table 5.2.1.1.1/1. Only presence is
//! checked here; value decoding happens in [`UlrMessage::parse`].
//!
//! [`UlrMessage::parse`]: testcore_diameter::s6a::UlrMessage::parse

use std::fmt;

use testcore_diameter::s6a::avp;
use testcore_diameter::{avp_code, AvpSource, VENDOR_ID_3GPP};

use crate::error::UlaError;

/// Mandatory ULR field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UlrField {
    /// User-Name, carrying the IMSI
    UserName,
    VisitedPlmnId,
    UlrFlags,
    RatType,
    SessionId,
}

impl UlrField {
    /// Validation order. The first absent field is the one reported.
    pub const MANDATORY: [UlrField; 5] = [
        UlrField::UserName,
        UlrField::VisitedPlmnId,
        UlrField::UlrFlags,
        UlrField::RatType,
        UlrField::SessionId,
    ];

    pub fn code(self) -> u32 {
        match self {
            UlrField::UserName => avp_code::USER_NAME,
            UlrField::VisitedPlmnId => avp::VISITED_PLMN_ID,
            UlrField::UlrFlags => avp::ULR_FLAGS,
            UlrField::RatType => avp_code::RAT_TYPE,
            UlrField::SessionId => avp_code::SESSION_ID,
        }
    }

    pub fn vendor_id(self) -> Option<u32> {
        match self {
            UlrField::UserName | UlrField::SessionId => None,
            UlrField::VisitedPlmnId | UlrField::UlrFlags | UlrField::RatType => {
                Some(VENDOR_ID_3GPP)
            }
        }
    }
}

impl fmt::Display for UlrField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UlrField::UserName => "IMSI",
            UlrField::VisitedPlmnId => "Visited PLMN ID",
            UlrField::UlrFlags => "ULR flags",
            UlrField::RatType => "RAT type",
            UlrField::SessionId => "SessionID",
        };
        f.write_str(name)
    }
}

/// Check that every mandatory ULR AVP is present.
///
/// AVPs are matched on code and vendor: a ULR-Flags, Visited-PLMN-Id or
/// RAT-Type AVP sent without the 3GPP Vendor-Id is reported as missing.
pub fn validate_ulr<M: AvpSource + ?Sized>(msg: &M) -> Result<(), UlaError> {
    for field in UlrField::MANDATORY {
        if msg.find_field(field.code(), field.vendor_id()).is_err() {
            return Err(UlaError::MissingAvp(field));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use testcore_diameter::common::RatType;
    use testcore_diameter::s6a::{create_ulr, ulr_flags};
    use testcore_diameter::DiameterMessage;

    pub(crate) fn test_ulr(imsi: &str) -> DiameterMessage {
        let mut msg = create_ulr(
            "mme.epc.mnc001.mcc001.3gppnetwork.org;1;1",
            "mme.epc.mnc001.mcc001.3gppnetwork.org",
            "epc.mnc001.mcc001.3gppnetwork.org",
            "epc.mnc001.mcc001.3gppnetwork.org",
            imsi,
            &[0x00, 0xF1, 0x10],
            ulr_flags::S6A_S6D_INDICATOR,
            RatType::Eutran as u32,
        );
        msg.header.hop_by_hop_id = 7;
        msg.header.end_to_end_id = 11;
        msg
    }

    pub(crate) fn without(mut msg: DiameterMessage, field: UlrField) -> DiameterMessage {
        msg.avps
            .retain(|a| !(a.code == field.code() && a.vendor_id == field.vendor_id()));
        msg
    }

    #[test]
    fn test_valid_ulr() {
        assert!(validate_ulr(&test_ulr("001010000000001")).is_ok());
    }

    #[test]
    fn test_each_missing_field() {
        for field in UlrField::MANDATORY {
            let msg = without(test_ulr("001010000000001"), field);
            match validate_ulr(&msg) {
                Err(UlaError::MissingAvp(missing)) => assert_eq!(missing, field),
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_reports_first_missing_only() {
        let msg = without(test_ulr("001010000000001"), UlrField::SessionId);
        let msg = without(msg, UlrField::VisitedPlmnId);
        let err = validate_ulr(&msg).unwrap_err();
        assert_eq!(err.to_string(), "Missing Visited PLMN ID in message");
    }

    #[test]
    fn test_missing_session_id_message() {
        let msg = without(test_ulr("001010000000001"), UlrField::SessionId);
        let err = validate_ulr(&msg).unwrap_err();
        assert!(err.to_string().contains("SessionID"));
    }

    #[test]
    fn test_vendor_mismatch_is_missing() {
        let mut msg = test_ulr("001010000000001");
        for a in msg.avps.iter_mut().filter(|a| a.code == avp::ULR_FLAGS) {
            a.vendor_id = None;
        }
        assert!(matches!(
            validate_ulr(&msg),
            Err(UlaError::MissingAvp(UlrField::UlrFlags))
        ));
    }
}
