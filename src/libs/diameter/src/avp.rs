//! Diameter AVP (Attribute-Value Pair) encoding and decoding
//!
//! AVP format (RFC 6733):
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           AVP Code                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |V M P r r r r r|                  AVP Length                   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        Vendor-ID (opt)                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Data ...
//! +-+-+-+-+-+-+-+-+
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{DiameterError, DiameterResult};

/// AVP flags
pub mod avp_flags {
    /// Vendor-Specific bit
    pub const VENDOR: u8 = 0x80;
    /// Mandatory bit
    pub const MANDATORY: u8 = 0x40;
    /// Protected bit (encryption)
    pub const PROTECTED: u8 = 0x20;
}

/// AVP header size without vendor ID
pub const AVP_HEADER_SIZE: usize = 8;
/// AVP header size with vendor ID
pub const AVP_HEADER_SIZE_VENDOR: usize = 12;

/// Diameter AVP
#[derive(Debug, Clone, PartialEq)]
pub struct Avp {
    /// AVP code
    pub code: u32,
    /// AVP flags
    pub flags: u8,
    /// Vendor ID (if vendor-specific)
    pub vendor_id: Option<u32>,
    /// AVP data
    pub data: AvpData,
}

/// AVP data types
#[derive(Debug, Clone, PartialEq)]
pub enum AvpData {
    OctetString(Bytes),
    Integer32(i32),
    Unsigned32(u32),
    Utf8String(String),
    /// DiameterIdentity (FQDN)
    DiameterIdentity(String),
    /// Grouped AVP (contains other AVPs)
    Grouped(Vec<Avp>),
    /// Enumerated (same wire format as Integer32)
    Enumerated(i32),
    /// Undecoded payload, as received from the wire
    Raw(Bytes),
}

impl Avp {
    /// Create a new AVP
    pub fn new(code: u32, flags: u8, vendor_id: Option<u32>, data: AvpData) -> Self {
        Self {
            code,
            flags,
            vendor_id,
            data,
        }
    }

    /// Create a mandatory AVP
    pub fn mandatory(code: u32, data: AvpData) -> Self {
        Self::new(code, avp_flags::MANDATORY, None, data)
    }

    /// Create a vendor-specific mandatory AVP
    pub fn vendor_mandatory(code: u32, vendor_id: u32, data: AvpData) -> Self {
        Self::new(
            code,
            avp_flags::VENDOR | avp_flags::MANDATORY,
            Some(vendor_id),
            data,
        )
    }

    /// Create a mandatory grouped AVP
    pub fn grouped(code: u32, avps: Vec<Avp>) -> Self {
        Self::mandatory(code, AvpData::Grouped(avps))
    }

    /// Create a vendor-specific mandatory grouped AVP
    pub fn vendor_grouped(code: u32, vendor_id: u32, avps: Vec<Avp>) -> Self {
        Self::vendor_mandatory(code, vendor_id, AvpData::Grouped(avps))
    }

    /// Check if AVP is vendor-specific
    pub fn is_vendor_specific(&self) -> bool {
        self.flags & avp_flags::VENDOR != 0
    }

    /// Check if AVP is mandatory
    pub fn is_mandatory(&self) -> bool {
        self.flags & avp_flags::MANDATORY != 0
    }

    fn header_len(&self) -> usize {
        if self.is_vendor_specific() {
            AVP_HEADER_SIZE_VENDOR
        } else {
            AVP_HEADER_SIZE
        }
    }

    /// Get the encoded length of this AVP (including padding)
    pub fn encoded_len(&self) -> usize {
        let total = self.header_len() + self.data.encoded_len();
        (total + 3) & !3
    }

    /// Encode AVP to bytes
    pub fn encode(&self, buf: &mut BytesMut) {
        let data_len = self.data.encoded_len();
        let avp_len = self.header_len() + data_len;

        buf.put_u32(self.code);

        // Flags and 24-bit length
        buf.put_u8(self.flags);
        buf.put_u8(((avp_len >> 16) & 0xFF) as u8);
        buf.put_u16((avp_len & 0xFFFF) as u16);

        if let Some(vendor_id) = self.vendor_id {
            buf.put_u32(vendor_id);
        }

        self.data.encode(buf);

        let padding = (4 - (data_len % 4)) % 4;
        buf.put_bytes(0, padding);
    }

    /// Decode AVP from bytes
    pub fn decode(buf: &mut Bytes) -> DiameterResult<Self> {
        if buf.remaining() < AVP_HEADER_SIZE {
            return Err(DiameterError::BufferTooSmall {
                needed: AVP_HEADER_SIZE,
                available: buf.remaining(),
            });
        }

        let code = buf.get_u32();
        let flags = buf.get_u8();
        let len_high = buf.get_u8() as usize;
        let len_low = buf.get_u16() as usize;
        let avp_len = (len_high << 16) | len_low;

        let is_vendor = flags & avp_flags::VENDOR != 0;
        let header_len = if is_vendor {
            AVP_HEADER_SIZE_VENDOR
        } else {
            AVP_HEADER_SIZE
        };

        if avp_len < header_len {
            return Err(DiameterError::InvalidAvp(format!(
                "AVP {} length {} is less than header size {}",
                code, avp_len, header_len
            )));
        }

        let vendor_id = if is_vendor {
            if buf.remaining() < 4 {
                return Err(DiameterError::BufferTooSmall {
                    needed: 4,
                    available: buf.remaining(),
                });
            }
            Some(buf.get_u32())
        } else {
            None
        };

        let data_len = avp_len - header_len;
        if buf.remaining() < data_len {
            return Err(DiameterError::BufferTooSmall {
                needed: data_len,
                available: buf.remaining(),
            });
        }

        let data_bytes = buf.copy_to_bytes(data_len);

        // The last AVP of a message may omit its padding
        let padding = (4 - (data_len % 4)) % 4;
        buf.advance(padding.min(buf.remaining()));

        Ok(Self {
            code,
            flags,
            vendor_id,
            data: AvpData::Raw(data_bytes),
        })
    }

    /// Get data as OctetString
    pub fn as_octet_string(&self) -> Option<&Bytes> {
        match &self.data {
            AvpData::OctetString(b) | AvpData::Raw(b) => Some(b),
            _ => None,
        }
    }

    /// Get data as Unsigned32 (Enumerated values are accepted too)
    pub fn as_u32(&self) -> Option<u32> {
        match &self.data {
            AvpData::Unsigned32(v) => Some(*v),
            AvpData::Enumerated(v) | AvpData::Integer32(v) => Some(*v as u32),
            AvpData::Raw(b) if b.len() == 4 => Some(b.clone().get_u32()),
            _ => None,
        }
    }

    /// Get data as UTF8String
    pub fn as_utf8_string(&self) -> Option<&str> {
        match &self.data {
            AvpData::Utf8String(s) | AvpData::DiameterIdentity(s) => Some(s),
            AvpData::Raw(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Get data as already-built grouped AVPs
    pub fn as_grouped(&self) -> Option<&[Avp]> {
        match &self.data {
            AvpData::Grouped(avps) => Some(avps),
            _ => None,
        }
    }

    /// Get the members of a grouped AVP, parsing them if the AVP came off the wire
    pub fn decode_grouped(&self) -> DiameterResult<Vec<Avp>> {
        match &self.data {
            AvpData::Grouped(avps) => Ok(avps.clone()),
            AvpData::Raw(b) | AvpData::OctetString(b) => {
                let mut buf = b.clone();
                let mut avps = Vec::new();
                while buf.has_remaining() {
                    avps.push(Avp::decode(&mut buf)?);
                }
                Ok(avps)
            }
            _ => Err(DiameterError::InvalidAvpValue(format!(
                "AVP {} is not a grouped AVP",
                self.code
            ))),
        }
    }
}

impl AvpData {
    /// Get the encoded length of this data (without padding)
    pub fn encoded_len(&self) -> usize {
        match self {
            AvpData::OctetString(b) | AvpData::Raw(b) => b.len(),
            AvpData::Integer32(_) | AvpData::Unsigned32(_) | AvpData::Enumerated(_) => 4,
            AvpData::Utf8String(s) | AvpData::DiameterIdentity(s) => s.len(),
            AvpData::Grouped(avps) => avps.iter().map(|a| a.encoded_len()).sum(),
        }
    }

    /// Encode data to bytes
    pub fn encode(&self, buf: &mut BytesMut) {
        match self {
            AvpData::OctetString(b) | AvpData::Raw(b) => buf.put_slice(b),
            AvpData::Integer32(v) | AvpData::Enumerated(v) => buf.put_i32(*v),
            AvpData::Unsigned32(v) => buf.put_u32(*v),
            AvpData::Utf8String(s) | AvpData::DiameterIdentity(s) => buf.put_slice(s.as_bytes()),
            AvpData::Grouped(avps) => {
                for avp in avps {
                    avp.encode(buf);
                }
            }
        }
    }
}

/// Lookup of AVPs by (code, vendor) within a message or grouped AVP.
///
/// A `vendor_id` of `None` addresses IETF AVPs, which carry no Vendor-Id.
pub trait AvpSource {
    /// The AVPs directly contained in this source
    fn avp_list(&self) -> &[Avp];

    /// Find the first AVP matching code and vendor
    fn find_field(&self, code: u32, vendor_id: Option<u32>) -> DiameterResult<&Avp> {
        self.avp_list()
            .iter()
            .find(|a| a.code == code && a.vendor_id == vendor_id)
            .ok_or(DiameterError::MissingAvp { code, vendor_id })
    }

    /// Find every AVP matching code and vendor
    fn find_all_fields(&self, code: u32, vendor_id: Option<u32>) -> Vec<&Avp> {
        self.avp_list()
            .iter()
            .filter(|a| a.code == code && a.vendor_id == vendor_id)
            .collect()
    }
}

impl AvpSource for [Avp] {
    fn avp_list(&self) -> &[Avp] {
        self
    }
}

impl AvpSource for Vec<Avp> {
    fn avp_list(&self) -> &[Avp] {
        self
    }
}

/// Scalar AVPs have no members
impl AvpSource for Avp {
    fn avp_list(&self) -> &[Avp] {
        self.as_grouped().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avp_encode_decode_u32() {
        let avp = Avp::mandatory(268, AvpData::Unsigned32(2001));
        let mut buf = BytesMut::new();
        avp.encode(&mut buf);
        assert_eq!(buf.len(), 12);

        let mut bytes = buf.freeze();
        let decoded = Avp::decode(&mut bytes).unwrap();

        assert_eq!(decoded.code, 268);
        assert_eq!(decoded.as_u32(), Some(2001));
        assert!(!bytes.has_remaining());
    }

    #[test]
    fn test_avp_string_padding() {
        let avp = Avp::mandatory(263, AvpData::Utf8String("abcde".to_string()));
        assert_eq!(avp.encoded_len(), 16);

        let mut buf = BytesMut::new();
        avp.encode(&mut buf);
        assert_eq!(buf.len(), 16);

        let mut bytes = buf.freeze();
        let decoded = Avp::decode(&mut bytes).unwrap();
        assert_eq!(decoded.as_utf8_string(), Some("abcde"));
    }

    #[test]
    fn test_avp_vendor_specific() {
        let avp = Avp::vendor_mandatory(1032, 10415, AvpData::Enumerated(1004));
        assert!(avp.is_vendor_specific());
        assert!(avp.is_mandatory());
        assert_eq!(avp.vendor_id, Some(10415));
        assert_eq!(avp.encoded_len(), 16);
    }

    #[test]
    fn test_avp_decode_short_length() {
        let mut bytes = Bytes::from_static(&[0, 0, 1, 7, 0x40, 0, 0, 4]);
        assert!(matches!(
            Avp::decode(&mut bytes),
            Err(DiameterError::InvalidAvp(_))
        ));
    }

    #[test]
    fn test_grouped_decode_from_wire() {
        let group = Avp::vendor_grouped(
            1435,
            10415,
            vec![
                Avp::vendor_mandatory(516, 10415, AvpData::Unsigned32(50)),
                Avp::vendor_mandatory(515, 10415, AvpData::Unsigned32(100)),
            ],
        );
        let mut buf = BytesMut::new();
        group.encode(&mut buf);

        let mut bytes = buf.freeze();
        let decoded = Avp::decode(&mut bytes).unwrap();
        assert!(decoded.as_grouped().is_none());

        let members = decoded.decode_grouped().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members.find_field(515, Some(10415)).unwrap().as_u32(), Some(100));
    }

    #[test]
    fn test_find_field_matches_vendor() {
        let avps = vec![
            Avp::mandatory(1, AvpData::Utf8String("001010000000001".to_string())),
            Avp::vendor_mandatory(1405, 10415, AvpData::Unsigned32(0)),
        ];
        assert!(avps.find_field(1, None).is_ok());
        assert!(avps.find_field(1405, Some(10415)).is_ok());
        assert_eq!(
            avps.find_field(1405, None).unwrap_err(),
            DiameterError::MissingAvp { code: 1405, vendor_id: None }
        );
    }

    #[test]
    fn test_scalar_has_no_fields() {
        let avp = Avp::mandatory(268, AvpData::Unsigned32(2001));
        assert!(avp.avp_list().is_empty());
        assert!(avp.decode_grouped().is_err());
    }
}
