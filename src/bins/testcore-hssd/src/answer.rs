//! Update-Location-Answer construction
//!
//! Every answer carries, in order: Session-Id (when the request had one),
//! the outcome, Origin-Host, Origin-Realm and Auth-Session-State.

use testcore_diameter::{
    avp_code, AuthSessionState, Avp, AvpData, DiameterMessage, ExperimentalResult, ResultCode,
};

use crate::config::{ServerIdentity, SubscriptionProfile};
use crate::error::FailureCode;
use crate::subscription;

fn answer_envelope(
    request: &DiameterMessage,
    server: &ServerIdentity,
    outcome: Avp,
) -> DiameterMessage {
    let mut answer = DiameterMessage::new_answer(request);

    if let Some(session_id) = request.find_avp(avp_code::SESSION_ID) {
        answer.add_avp(session_id.clone());
    }
    answer.add_avp(outcome);
    answer.add_avp(Avp::mandatory(
        avp_code::ORIGIN_HOST,
        AvpData::DiameterIdentity(server.host.clone()),
    ));
    answer.add_avp(Avp::mandatory(
        avp_code::ORIGIN_REALM,
        AvpData::DiameterIdentity(server.realm.clone()),
    ));
    answer.add_avp(AuthSessionState::NoStateMaintained.to_avp());

    answer
}

fn result_code(rc: ResultCode) -> Avp {
    Avp::mandatory(avp_code::RESULT_CODE, AvpData::Unsigned32(rc.code()))
}

/// DIAMETER_SUCCESS answer carrying the subscriber's Subscription-Data
pub fn success_answer(
    request: &DiameterMessage,
    server: &ServerIdentity,
    profile: &SubscriptionProfile,
) -> DiameterMessage {
    let mut answer = answer_envelope(request, server, result_code(ResultCode::Success));
    answer.add_avp(subscription::ula_flags());
    answer.add_avp(subscription::subscription_data(profile));
    answer
}

/// Answer carrying only the failure code
pub fn failure_answer(
    request: &DiameterMessage,
    server: &ServerIdentity,
    code: FailureCode,
) -> DiameterMessage {
    match code {
        FailureCode::Result(rc) => {
            let mut answer = answer_envelope(request, server, result_code(rc));
            if rc.is_protocol_error() {
                answer.header.set_error();
            }
            answer
        }
        FailureCode::Experimental(code) => {
            answer_envelope(request, server, ExperimentalResult::new(code).to_avp())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ulr::tests::{test_ulr, without};
    use crate::ulr::UlrField;
    use testcore_diameter::s6a::avp;
    use testcore_diameter::{AvpSource, VENDOR_ID_3GPP};

    fn server() -> ServerIdentity {
        ServerIdentity {
            host: "hss.epc.mnc001.mcc001.3gppnetwork.org".to_string(),
            realm: "epc.mnc001.mcc001.3gppnetwork.org".to_string(),
        }
    }

    #[test]
    fn test_success_envelope() {
        let request = test_ulr("001010000000001");
        let profile = SubscriptionProfile {
            max_ul_bit_rate: 1,
            max_dl_bit_rate: 2,
        };
        let answer = success_answer(&request, &server(), &profile);

        assert!(answer.header.is_answer());
        assert_eq!(answer.header.hop_by_hop_id, 7);
        assert_eq!(answer.header.end_to_end_id, 11);
        assert_eq!(answer.session_id(), request.session_id());
        assert_eq!(answer.result_code(), Some(2001));
        assert_eq!(answer.origin_host(), Some("hss.epc.mnc001.mcc001.3gppnetwork.org"));
        assert_eq!(answer.origin_realm(), Some("epc.mnc001.mcc001.3gppnetwork.org"));
        assert!(answer.find_vendor_avp(avp::ULA_FLAGS, VENDOR_ID_3GPP).is_some());
        assert!(answer.find_vendor_avp(avp::SUBSCRIPTION_DATA, VENDOR_ID_3GPP).is_some());
        assert_eq!(answer.avps[0].code, avp_code::SESSION_ID);
    }

    #[test]
    fn test_result_code_failure() {
        let request = test_ulr("001010000000001");
        let answer = failure_answer(
            &request,
            &server(),
            FailureCode::Result(ResultCode::MissingAvp),
        );
        assert_eq!(answer.result_code(), Some(5005));
        assert_eq!(answer.experimental_result_code(), None);
        assert!(!answer.header.is_error());
        assert!(answer.find_vendor_avp(avp::SUBSCRIPTION_DATA, VENDOR_ID_3GPP).is_none());
        assert_eq!(answer.avps.len(), 5);
    }

    #[test]
    fn test_protocol_error_sets_e_bit() {
        let request = test_ulr("001010000000001");
        let answer = failure_answer(&request, &server(), FailureCode::Result(ResultCode::TooBusy));
        assert!(answer.header.is_error());
    }

    #[test]
    fn test_experimental_failure() {
        let request = test_ulr("001010000000001");
        let answer = failure_answer(&request, &server(), FailureCode::Experimental(5001));
        assert_eq!(answer.result_code(), None);
        assert_eq!(answer.experimental_result_code(), Some(5001));
        assert_eq!(answer.session_id(), request.session_id());
    }

    #[test]
    fn test_failure_without_session_id() {
        let request = without(test_ulr("001010000000001"), UlrField::SessionId);
        let answer = failure_answer(
            &request,
            &server(),
            FailureCode::Result(ResultCode::MissingAvp),
        );
        assert!(answer.session_id().is_none());
        assert!(answer.find_field(avp_code::ORIGIN_HOST, None).is_ok());
    }
}
