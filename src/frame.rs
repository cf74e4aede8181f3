//! IM871A HCI frame handling.
//!
//! A received frame is laid out as
//!
//! ```text
//! | 0xA5 | control | ... payload / timestamp / RSSI ... | FCS lo | FCS hi |
//! ```
//!
//! The checksum covers everything between the start-of-frame byte and the
//! FCS field. The FCS is the complemented CRC register, sent little endian.

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

use crate::crc::{Engine, CRC16_INIT_VALUE};
use crate::hex::HexError;

pub const START_OF_FRAME: u8 = 0xA5;
pub const FCS_LEN: usize = 2;

/// Register value left after running the CRC over a body followed by its own
/// FCS.
pub const GOOD_RESIDUE: u16 = 0xF0B8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame too short: {len} bytes")]
    TooShort { len: usize },

    #[error("Missing start of frame: expected 0xa5, found {found:#04x}")]
    MissingStartOfFrame { found: u8 },

    #[error("CRC mismatch: expected {expected}, calculated {calculated}")]
    CrcMismatch { expected: Fcs, calculated: Fcs },

    #[error(transparent)]
    Hex(#[from] HexError),
}

/// Frame check sequence: the final, complemented checksum.
///
/// Displayed in wire order, which is how captured checksums are usually
/// written down (`Fcs(0x8538)` prints as `3885`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fcs(pub u16);

impl Fcs {
    pub fn compute(body: &[u8], engine: Engine) -> Self {
        Fcs(engine.checksum(body))
    }

    pub fn from_le_bytes(bytes: [u8; FCS_LEN]) -> Self {
        Fcs(LittleEndian::read_u16(&bytes))
    }

    pub fn to_le_bytes(self) -> [u8; FCS_LEN] {
        let mut bytes = [0u8; FCS_LEN];
        LittleEndian::write_u16(&mut bytes, self.0);
        bytes
    }
}

impl fmt::Display for Fcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [lo, hi] = self.to_le_bytes();
        write!(f, "{lo:02x}{hi:02x}")
    }
}

/// Splits a received frame into the checksummed body and its FCS.
pub fn split(frame: &[u8]) -> Result<(&[u8], Fcs), FrameError> {
    if frame.len() < 1 + FCS_LEN {
        return Err(FrameError::TooShort { len: frame.len() });
    }
    if frame[0] != START_OF_FRAME {
        return Err(FrameError::MissingStartOfFrame { found: frame[0] });
    }

    let (body, fcs) = frame[1..].split_at(frame.len() - 1 - FCS_LEN);
    Ok((body, Fcs(LittleEndian::read_u16(fcs))))
}

/// Checks the FCS of a received frame and returns it.
pub fn verify(frame: &[u8], engine: Engine) -> Result<Fcs, FrameError> {
    let (body, expected) = split(frame)?;
    let calculated = Fcs::compute(body, engine);
    trace!(
        "verify {} body bytes with {}: expected {}, calculated {}",
        body.len(),
        engine.get().name(),
        expected,
        calculated
    );

    if expected != calculated {
        debug!("CRC mismatch: expected {}, calculated {}", expected, calculated);
        return Err(FrameError::CrcMismatch { expected, calculated });
    }
    Ok(calculated)
}

/// Builds a full frame: start byte, `body`, FCS.
pub fn seal(body: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(body.len() + 1 + FCS_LEN);
    frame.push(START_OF_FRAME);
    frame.extend_from_slice(body);
    frame.extend_from_slice(&Fcs::compute(body, Engine::Table).to_le_bytes());
    frame
}

/// Register after running over `body` and its trailing FCS. Equals
/// [`GOOD_RESIDUE`] for an intact frame regardless of content.
pub fn residue(body_with_fcs: &[u8], engine: Engine) -> u16 {
    engine.get().compute(body_with_fcs, CRC16_INIT_VALUE)
}
