//! CRC-16 as computed by the IM871A wM-Bus dongle.
//!
//! CCITT polynomial `G(x) = 1 + x^5 + x^12 + x^16` (0x1021) processed LSB
//! first, i.e. the reversed form 0x8408 with a right-shifting register.
//! Callers start from [`CRC16_INIT_VALUE`] and complement the result.

use crc::{Crc, CRC_16_IBM_SDLC};

pub const CRC16_POLY: u16 = 0x8408;
pub const CRC16_INIT_VALUE: u16 = 0xFFFF;

/// Lookup table indexed by `(crc ^ byte) & 0xFF`.
///
/// Entry `i` is `crc16_bitwise(&[i], 0)`, so the table is regenerated here
/// from the bitwise step instead of being pasted in.
pub const CRC16_TABLE: [u16; 256] = make_crc16_table();

// Same algorithm from the crc catalogue (X-25: init 0xFFFF, xorout 0xFFFF).
pub const CRC16_X25: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

/// Feeds the 8 bits of `byte` into `crc`, least significant bit first.
const fn bitwise_step(mut crc: u16, mut byte: u8) -> u16 {
    let mut bits = 0;
    while bits < 8 {
        if (byte as u16 ^ crc) & 1 != 0 {
            crc = (crc >> 1) ^ CRC16_POLY;
        } else {
            crc >>= 1;
        }
        byte >>= 1;
        bits += 1;
    }
    crc
}

const fn make_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = bitwise_step(0, i as u8);
        i += 1;
    }
    table
}

/// Table driven CRC, one lookup per byte.
pub fn crc16_table(data: &[u8], initial: u16) -> u16 {
    let mut crc = initial;
    for &byte in data {
        let index = (crc ^ byte as u16) & 0x00FF;
        crc = (crc >> 8) ^ CRC16_TABLE[index as usize];
    }
    crc
}

/// Bit by bit reference CRC. Always agrees with [`crc16_table`].
pub fn crc16_bitwise(data: &[u8], initial: u16) -> u16 {
    data.iter().fold(initial, |crc, &byte| bitwise_step(crc, byte))
}

/// Final checksum of a frame body: `!crc16(body, 0xFFFF)`.
pub fn checksum(data: &[u8]) -> u16 {
    !crc16_table(data, CRC16_INIT_VALUE)
}

pub trait Crc16Engine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs the register over `data` starting from `initial`. The result is
    /// not complemented.
    fn compute(&self, data: &[u8], initial: u16) -> u16;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TableEngine;

#[derive(Debug, Default, Clone, Copy)]
pub struct BitwiseEngine;

/// Backed by the `crc` crate.
///
/// The catalogue entry fixes init and xorout at 0xFFFF, so only
/// [`CRC16_INIT_VALUE`] goes through the crate; any other starting value is
/// handed to the table path.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogEngine;

impl Crc16Engine for TableEngine {
    fn name(&self) -> &'static str {
        "table"
    }

    fn compute(&self, data: &[u8], initial: u16) -> u16 {
        crc16_table(data, initial)
    }
}

impl Crc16Engine for BitwiseEngine {
    fn name(&self) -> &'static str {
        "bitwise"
    }

    fn compute(&self, data: &[u8], initial: u16) -> u16 {
        crc16_bitwise(data, initial)
    }
}

impl Crc16Engine for CatalogEngine {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn compute(&self, data: &[u8], initial: u16) -> u16 {
        if initial == CRC16_INIT_VALUE {
            // undo the catalogue's final xor
            !CRC16_X25.checksum(data)
        } else {
            crc16_table(data, initial)
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    #[default]
    Table,
    Bitwise,
    Catalog,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Table, Engine::Bitwise, Engine::Catalog];

    pub fn get(self) -> &'static dyn Crc16Engine {
        match self {
            Engine::Table => &TableEngine,
            Engine::Bitwise => &BitwiseEngine,
            Engine::Catalog => &CatalogEngine,
        }
    }

    /// Final (complemented) checksum of `data` with this engine.
    pub fn checksum(self, data: &[u8]) -> u16 {
        !self.get().compute(data, CRC16_INIT_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // xorshift32, enough to get varied inputs without another dependency
    fn pseudo_random(seed: &mut u32) -> u32 {
        let mut x = *seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        *seed = x;
        x
    }

    #[test]
    fn table_matches_bitwise_derivation() {
        for i in 0..=255u8 {
            assert_eq!(CRC16_TABLE[i as usize], crc16_bitwise(&[i], 0), "index {i}");
        }
    }

    #[test]
    fn table_matches_historical_values() {
        assert_eq!(CRC16_TABLE[0x00], 0x0000);
        assert_eq!(CRC16_TABLE[0x01], 0x1189);
        assert_eq!(CRC16_TABLE[0x0F], 0xF8F7);
        assert_eq!(CRC16_TABLE[0x80], 0x8408);
        assert_eq!(CRC16_TABLE[0xA7], 0xD1B5);
        assert_eq!(CRC16_TABLE[0xFF], 0x0F78);
    }

    #[test]
    fn table_and_bitwise_agree() {
        let mut seed = 0x2545_F491;
        for len in 0..=256usize {
            let data: Vec<u8> = (0..len).map(|_| pseudo_random(&mut seed) as u8).collect();
            let init = pseudo_random(&mut seed) as u16;
            for initial in [init, 0x0000, 0xFFFF] {
                assert_eq!(
                    crc16_table(&data, initial),
                    crc16_bitwise(&data, initial),
                    "len {len} init {initial:#06x}"
                );
            }
        }
    }

    #[test]
    fn empty_input_returns_initial() {
        for initial in [0x0000, 0x1234, 0x8408, 0xFFFF] {
            assert_eq!(crc16_table(&[], initial), initial);
            assert_eq!(crc16_bitwise(&[], initial), initial);
        }
        assert_eq!(checksum(&[]), 0x0000);
    }

    #[test]
    fn deterministic() {
        let data = hex!("82 03 27 44 2d 2c");
        assert_eq!(crc16_table(&data, 0xFFFF), crc16_table(&data, 0xFFFF));
        assert_eq!(crc16_bitwise(&data, 0xFFFF), crc16_bitwise(&data, 0xFFFF));
    }

    #[test]
    fn x25_check_value() {
        assert_eq!(checksum(b"123456789"), 0x906E);
        assert_eq!(CRC16_X25.checksum(b"123456789"), 0x906E);
    }

    #[test]
    fn small_vectors() {
        assert_eq!(crc16_table(&hex!("41 42"), 0), 0x3EA8);
        assert_eq!(checksum(&hex!("82")), 0x5762);
    }

    #[test]
    fn engines_agree() {
        let mut seed = 0xDEAD_BEEF;
        for len in [0usize, 1, 2, 7, 42, 48, 255] {
            let data: Vec<u8> = (0..len).map(|_| pseudo_random(&mut seed) as u8).collect();
            let expected = checksum(&data);
            for engine in Engine::ALL {
                assert_eq!(engine.checksum(&data), expected, "{} len {len}", engine.get().name());
            }
        }
    }

    #[test]
    fn catalog_engine_other_initial_values() {
        let data = hex!("82 03 27 44");
        assert_eq!(
            CatalogEngine.compute(&data, 0x1D0F),
            crc16_bitwise(&data, 0x1D0F)
        );
    }
}
