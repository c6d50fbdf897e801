//! Native binary artifact format.
//!
//! A 32-byte header followed by a postcard-encoded payload. postcard writes
//! `f64` as its 8 little-endian bytes, so parameters survive a round trip
//! bit-exactly.
//!
//! # Format Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Header (32 bytes)                        │
//! ├────────────────────────────────────────────────────────────┤
//! │                    Payload (variable)                       │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use crate::error::{ArtifactError, Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Magic bytes identifying a co2-regression artifact.
pub const MAGIC: &[u8; 4] = b"CO2R";

/// Current format version (major).
pub const CURRENT_VERSION_MAJOR: u8 = 1;

/// Current format version (minor).
pub const CURRENT_VERSION_MINOR: u8 = 0;

/// Oldest format version (major) this build reads.
pub const MIN_VERSION_MAJOR: u8 = 1;

/// Size of the format header in bytes.
pub const HEADER_SIZE: usize = 32;

// ============================================================================
// Format Flags
// ============================================================================

/// Bitfield flags for format features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatFlags(u16);

impl FormatFlags {
    /// Payload metadata carries feature names.
    pub const HAS_FEATURE_NAMES: u16 = 1 << 0;
    /// Payload metadata carries a fit summary.
    pub const HAS_SUMMARY: u16 = 1 << 1;

    /// Create empty flags.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create flags from raw value.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check if a flag is set.
    pub const fn contains(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u16) {
        self.0 |= flag;
    }
}

// ============================================================================
// Format Header
// ============================================================================

/// 32-byte header of the native artifact.
///
/// # Layout
///
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     Magic ("CO2R")
/// 4       1     Version major
/// 5       1     Version minor
/// 6       2     Flags (bitfield)
/// 8       4     Payload size (bytes)
/// 12      4     CRC32 checksum of payload
/// 16      4     Number of features
/// 20      12    Reserved
/// ```
///
/// All integers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHeader {
    /// Format version (major).
    pub version_major: u8,
    /// Format version (minor).
    pub version_minor: u8,
    /// Feature flags.
    pub flags: FormatFlags,
    /// Size of the payload in bytes.
    pub payload_size: u32,
    /// CRC32 checksum of the payload.
    pub checksum: u32,
    /// Number of input features.
    pub num_features: u32,
}

impl FormatHeader {
    /// Create a new header with current version.
    pub fn new(num_features: u32, flags: FormatFlags) -> Self {
        Self {
            version_major: CURRENT_VERSION_MAJOR,
            version_minor: CURRENT_VERSION_MINOR,
            flags,
            payload_size: 0,
            checksum: 0,
            num_features,
        }
    }

    /// Serialize header to 32 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[0..4].copy_from_slice(MAGIC);
        buf[4] = self.version_major;
        buf[5] = self.version_minor;
        buf[6..8].copy_from_slice(&self.flags.bits().to_le_bytes());
        buf[8..12].copy_from_slice(&self.payload_size.to_le_bytes());
        buf[12..16].copy_from_slice(&self.checksum.to_le_bytes());
        buf[16..20].copy_from_slice(&self.num_features.to_le_bytes());
        // 20..32 reserved, left zero

        buf
    }

    /// Parse header from 32 bytes.
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> std::result::Result<Self, ArtifactError> {
        if &buf[0..4] != MAGIC {
            return Err(ArtifactError::NotAnArtifact);
        }

        let version_major = buf[4];
        let version_minor = buf[5];
        check_version(version_major, version_minor)?;

        Ok(Self {
            version_major,
            version_minor,
            flags: FormatFlags::from_bits(u16::from_le_bytes([buf[6], buf[7]])),
            payload_size: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            checksum: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            num_features: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
        })
    }

    /// Parse the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, ArtifactError> {
        let buf: &[u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(ArtifactError::Truncated {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            })?;
        Self::from_bytes(buf)
    }
}

/// Accept any minor revision of a supported major version.
///
/// Major 0 was never written and anything newer than
/// [`CURRENT_VERSION_MAJOR`] is unknown to this build.
pub fn check_version(major: u8, minor: u8) -> std::result::Result<(), ArtifactError> {
    if (MIN_VERSION_MAJOR..=CURRENT_VERSION_MAJOR).contains(&major) {
        Ok(())
    } else {
        Err(ArtifactError::UnsupportedVersion { major, minor })
    }
}

// ============================================================================
// CRC32 Helper
// ============================================================================

/// Compute CRC32 checksum of data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

// ============================================================================
// Native Codec
// ============================================================================

/// Codec for writing and reading the native artifact format.
#[derive(Debug, Clone, Default)]
pub struct NativeCodec;

impl NativeCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }

    /// Write header and payload to a writer.
    ///
    /// Fills in `payload_size` and `checksum` on `header`.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        header: &mut FormatHeader,
        payload: &[u8],
    ) -> Result<()> {
        header.payload_size = u32::try_from(payload.len()).map_err(|_| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "payload exceeds 4 GiB",
            ))
        })?;
        header.checksum = compute_checksum(payload);

        writer.write_all(&header.to_bytes())?;
        writer.write_all(payload)?;
        Ok(())
    }

    /// Serialize a payload to bytes with header.
    pub fn serialize<T: serde::Serialize>(
        &self,
        num_features: u32,
        flags: FormatFlags,
        payload: &T,
    ) -> Result<Vec<u8>> {
        let payload_bytes = postcard::to_allocvec(payload)?;

        let mut header = FormatHeader::new(num_features, flags);
        let mut output = Vec::with_capacity(HEADER_SIZE + payload_bytes.len());
        self.write_to(&mut output, &mut header, &payload_bytes)?;
        Ok(output)
    }

    /// Deserialize a complete artifact from bytes.
    ///
    /// The slice must hold exactly one artifact: a short slice is
    /// [`ArtifactError::Truncated`], extra bytes after the payload (or inside
    /// it, past the decoded value) are [`ArtifactError::TrailingBytes`].
    pub fn deserialize<T: for<'de> serde::Deserialize<'de>>(
        &self,
        bytes: &[u8],
    ) -> Result<(FormatHeader, T)> {
        let header = FormatHeader::parse(bytes)?;

        let body = &bytes[HEADER_SIZE..];
        let declared = header.payload_size as usize;
        if body.len() < declared {
            return Err(ArtifactError::Truncated {
                expected: HEADER_SIZE + declared,
                actual: bytes.len(),
            }
            .into());
        }
        if body.len() > declared {
            return Err(ArtifactError::TrailingBytes(body.len() - declared).into());
        }

        verify_checksum(&header, body)?;

        let (payload, rest) = postcard::take_from_bytes(body).map_err(ArtifactError::Decoding)?;
        if !rest.is_empty() {
            return Err(ArtifactError::TrailingBytes(rest.len()).into());
        }
        Ok((header, payload))
    }
}

fn verify_checksum(header: &FormatHeader, payload: &[u8]) -> std::result::Result<(), ArtifactError> {
    let actual = compute_checksum(payload);
    if actual != header.checksum {
        return Err(ArtifactError::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
