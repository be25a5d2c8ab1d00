//! Subscription profile resolution

use std::collections::HashMap;

use crate::config::SubscriptionProfile;
use crate::error::UlaError;

/// Pick the profile a subscriber is provisioned with.
///
/// A name missing from `profiles` falls back to `default`. Without a
/// default the subscriber has no EPS subscription.
pub fn resolve_profile<'a>(
    name: &str,
    profiles: &'a HashMap<String, SubscriptionProfile>,
    default: Option<&'a SubscriptionProfile>,
) -> Result<&'a SubscriptionProfile, UlaError> {
    if let Some(profile) = profiles.get(name) {
        return Ok(profile);
    }

    match default {
        Some(profile) => {
            log::debug!(
                "Subscriber profile '{}' not found, using default profile instead",
                name
            );
            Ok(profile)
        }
        None => Err(UlaError::UnknownEpsSubscription {
            profile: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    static CAPTURED: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut captured) = CAPTURED.lock() {
                captured.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Debug);
        });
    }

    fn logged_about(name: &str) -> Vec<log::Level> {
        let needle = format!("'{}'", name);
        CAPTURED
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, msg)| msg.contains(&needle))
            .map(|(level, _)| *level)
            .collect()
    }

    const GOLD: SubscriptionProfile = SubscriptionProfile {
        max_ul_bit_rate: 50_000_000,
        max_dl_bit_rate: 100_000_000,
    };
    const DEFAULT: SubscriptionProfile = SubscriptionProfile {
        max_ul_bit_rate: 1_000,
        max_dl_bit_rate: 2_000,
    };

    fn profiles() -> HashMap<String, SubscriptionProfile> {
        HashMap::from([("gold".to_string(), GOLD)])
    }

    #[test]
    fn test_named_profile() {
        let table = profiles();
        assert_eq!(resolve_profile("gold", &table, Some(&DEFAULT)).unwrap(), &GOLD);
        assert_eq!(resolve_profile("gold", &table, None).unwrap(), &GOLD);
    }

    #[test]
    fn test_default_fallback() {
        let table = profiles();
        assert_eq!(
            resolve_profile("platinum", &table, Some(&DEFAULT)).unwrap(),
            &DEFAULT
        );
        assert_eq!(resolve_profile("", &table, Some(&DEFAULT)).unwrap(), &DEFAULT);
    }

    #[test]
    fn test_no_default() {
        let table = profiles();
        match resolve_profile("unknown", &table, None) {
            Err(UlaError::UnknownEpsSubscription { profile }) => assert_eq!(profile, "unknown"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_default_fallback_logged_at_debug() {
        capture_logs();
        let table = profiles();

        resolve_profile("gold", &table, Some(&DEFAULT)).unwrap();
        assert!(logged_about("gold").is_empty());

        resolve_profile("tin-fallback", &table, Some(&DEFAULT)).unwrap();
        assert_eq!(logged_about("tin-fallback"), vec![log::Level::Debug]);
    }
}
