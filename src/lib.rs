//! CRC-16 (reversed CCITT, 0x8408) for frames received from an IM871A
//! wireless M-Bus dongle.

pub mod crc;
pub mod frame;
pub mod hex;

pub use crate::crc::{
    checksum, crc16_bitwise, crc16_table, Crc16Engine, Engine, CRC16_INIT_VALUE, CRC16_POLY,
    CRC16_TABLE,
};
pub use crate::frame::{Fcs, FrameError};
pub use crate::hex::{hex_decode, HexError};
