//! HSS S6a Diameter Path
//!
//! Update-Location handling: validate the ULR, look the subscriber up,
//! resolve its subscription profile and answer with a ULA.

use std::io::Write;
use std::sync::Arc;

use testcore_diameter::s6a::UlrMessage;
use testcore_diameter::DiameterMessage;

use crate::answer::{failure_answer, success_answer};
use crate::config::HssConfig;
use crate::error::UlaError;
use crate::profile::resolve_profile;
use crate::store::SubscriberStore;
use crate::ulr::validate_ulr;

/// A ULR that could not be served.
///
/// `answer` is always a complete failure ULA that can be sent to the peer.
#[derive(Debug)]
pub struct UlaRejection {
    pub answer: DiameterMessage,
    pub error: UlaError,
}

impl UlaRejection {
    pub fn into_answer(self) -> DiameterMessage {
        self.answer
    }
}

/// Home Subscriber Server S6a endpoint for Update-Location.
///
/// Holds only the immutable configuration and the store handle, so one
/// instance can serve concurrent requests from several threads.
pub struct HomeSubscriberServer<S> {
    config: Arc<HssConfig>,
    store: S,
}

impl<S: SubscriberStore> HomeSubscriberServer<S> {
    pub fn new(config: Arc<HssConfig>, store: S) -> Self {
        Self { config, store }
    }

    fn reject(&self, msg: &DiameterMessage, error: UlaError) -> UlaRejection {
        UlaRejection {
            answer: failure_answer(msg, &self.config.server, error.failure_code()),
            error,
        }
    }

    /// Build the Update-Location-Answer for an Update-Location-Request
    pub fn new_ula(&self, msg: &DiameterMessage) -> Result<DiameterMessage, UlaRejection> {
        validate_ulr(msg).map_err(|e| self.reject(msg, e))?;

        let ulr = UlrMessage::parse(msg).map_err(|e| self.reject(msg, UlaError::Decode(e)))?;

        let subscriber = self
            .store
            .get_subscriber_data(&ulr.user_name)
            .map_err(|source| {
                self.reject(
                    msg,
                    UlaError::UserUnknown {
                        imsi: ulr.user_name.clone(),
                        source,
                    },
                )
            })?;

        let profile = resolve_profile(
            &subscriber.sub_profile,
            &self.config.sub_profiles,
            self.config.default_sub_profile.as_ref(),
        )
        .map_err(|e| self.reject(msg, e))?;

        log::debug!(
            "[{}] ULA granted (AMBR DL={} UL={})",
            ulr.user_name,
            profile.max_dl_bit_rate,
            profile.max_ul_bit_rate
        );
        Ok(success_answer(msg, &self.config.server, profile))
    }

    /// Answer a received ULR on `conn`.
    ///
    /// Rejections are logged and still answered; only a failure to write
    /// the answer is returned.
    pub fn handle_ulr<W: Write + ?Sized>(
        &self,
        conn: &mut W,
        msg: &DiameterMessage,
    ) -> std::io::Result<()> {
        log::debug!("ULR Received in hss service");

        let answer = match self.new_ula(msg) {
            Ok(answer) => answer,
            Err(rejection) => {
                log::log!(rejection.error.log_level(), "{}", rejection.error);
                rejection.into_answer()
            }
        };

        let buf = answer.encode();
        if let Err(e) = conn.write_all(&buf).and_then(|_| conn.flush()) {
            log::error!("Failed to send ULA: {}", e);
            return Err(e);
        }
        Ok(())
    }
}
