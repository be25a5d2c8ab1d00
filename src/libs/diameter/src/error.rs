//! Diameter error types

use thiserror::Error;

/// Diameter error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiameterError {
    #[error("Invalid message format: {0}")]
    InvalidMessage(String),

    #[error("Invalid AVP: {0}")]
    InvalidAvp(String),

    #[error("Missing mandatory AVP: code={code} vendor={vendor_id:?}")]
    MissingAvp { code: u32, vendor_id: Option<u32> },

    #[error("Invalid AVP value: {0}")]
    InvalidAvpValue(String),

    #[error("Buffer too small: need {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Diameter result type
pub type DiameterResult<T> = Result<T, DiameterError>;

/// Diameter Result-Code values (RFC 6733 Section 7.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ResultCode {
    MultiRoundAuth = 1001,

    Success = 2001,
    LimitedSuccess = 2002,

    CommandUnsupported = 3001,
    UnableToDeliver = 3002,
    RealmNotServed = 3003,
    TooBusy = 3004,
    LoopDetected = 3005,
    RedirectIndication = 3006,
    ApplicationUnsupported = 3007,
    InvalidHdrBits = 3008,
    InvalidAvpBits = 3009,
    UnknownPeer = 3010,

    AuthenticationRejected = 4001,
    OutOfSpace = 4002,
    ElectionLost = 4003,

    AvpUnsupported = 5001,
    UnknownSessionId = 5002,
    AuthorizationRejected = 5003,
    InvalidAvpValue = 5004,
    MissingAvp = 5005,
    ResourcesExceeded = 5006,
    ContradictingAvps = 5007,
    AvpNotAllowed = 5008,
    AvpOccursTooManyTimes = 5009,
    NoCommonApplication = 5010,
    UnsupportedVersion = 5011,
    UnableToComply = 5012,
    InvalidBitInHeader = 5013,
    InvalidAvpLength = 5014,
    InvalidMessageLength = 5015,
    InvalidAvpBitCombo = 5016,
    NoCommonSecurity = 5017,
}

/// Result-Code class, taken from the thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    Informational,
    Success,
    ProtocolError,
    TransientFailure,
    PermanentFailure,
    Unrecognized,
}

impl ResultClass {
    /// Classify a raw Result-Code or Experimental-Result-Code value
    pub fn of(code: u32) -> Self {
        match code / 1000 {
            1 => ResultClass::Informational,
            2 => ResultClass::Success,
            3 => ResultClass::ProtocolError,
            4 => ResultClass::TransientFailure,
            5 => ResultClass::PermanentFailure,
            _ => ResultClass::Unrecognized,
        }
    }
}

impl ResultCode {
    /// Numeric value carried in the Result-Code AVP
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn class(self) -> ResultClass {
        ResultClass::of(self.code())
    }

    /// Protocol errors are answered with the E bit set in the header
    pub fn is_protocol_error(self) -> bool {
        self.class() == ResultClass::ProtocolError
    }
}
