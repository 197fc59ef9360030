//! iNES header validation.
//!
//! <https://www.nesdev.org/wiki/INES>

use crate::{
    error::{Error, Result},
    region::RegionKind,
};
use serde::Serialize;
use tracing::trace;

pub const HEADER_SIZE: usize = 0x10;
pub const MAGIC: [u8; 4] = *b"NES\x1a";

const ZERO_FILL: std::ops::Range<usize> = 11..HEADER_SIZE;

/// An `iNES` formatted header representing hardware specs of a given NES cartridge.
///
/// Only the original header layout is accepted. `NES 2.0` headers reuse the reserved bytes
/// 11-15 and are rejected as malformed.
#[derive(Default, Copy, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct NesHeader {
    pub prg_rom_banks: u8, // Number of 16KB PRG-ROM banks (Program ROM)
    pub chr_rom_banks: u8, // Number of 8KB CHR-ROM banks (Character ROM)
    pub flags6: u8,        // Mirroring, Battery, Trainer, Four-Screen, Mapper D0..D3
    pub flags7: u8,        // VS Unisystem, Playchoice-10, Mapper D4..D7
    pub prg_ram_banks: u8, // Number of 8KB PRG-RAM banks, 0 infers 1
    pub flags9: u8,        // TV system
    pub flags10: u8,       // Unofficial, not interpreted
}

impl NesHeader {
    /// Validate and parse `NesHeader` from the start of ROM data.
    ///
    /// # Errors
    ///
    /// If the signature is missing, the header is shorter than 16 bytes, or the reserved bytes
    /// are not zero, then an error is returned.
    pub fn parse(rom_data: &[u8]) -> Result<Self> {
        let mut found = [0x00; 4];
        let magic_len = rom_data.len().min(MAGIC.len());
        found[..magic_len].copy_from_slice(&rom_data[..magic_len]);
        if magic_len < MAGIC.len() || found != MAGIC {
            return Err(Error::BadMagic { found });
        }
        trace!("nes header signature found");

        let Some(header) = rom_data.get(..HEADER_SIZE) else {
            return Err(Error::TruncatedRom {
                region: RegionKind::Header,
                end: HEADER_SIZE,
                len: rom_data.len(),
            });
        };

        // Bytes 11-15 must sum to zero, report the first non-zero one
        if let Some((i, &value)) = header[ZERO_FILL]
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > 0)
        {
            return Err(Error::BadHeader {
                byte: (ZERO_FILL.start + i) as u8,
                value,
                message: "reserved header bytes 11-15 must be zero".to_string(),
            });
        }
        trace!("nes header zero fill verified");

        Ok(Self {
            prg_rom_banks: header[4],
            chr_rom_banks: header[5],
            flags6: header[6],
            flags7: header[7],
            prg_ram_banks: header[8],
            flags9: header[9],
            flags10: header[10],
        })
    }

    /// Serialize back into the 16-byte header layout.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        [
            MAGIC[0],
            MAGIC[1],
            MAGIC[2],
            MAGIC[3],
            self.prg_rom_banks,
            self.chr_rom_banks,
            self.flags6,
            self.flags7,
            self.prg_ram_banks,
            self.flags9,
            self.flags10,
            0x00,
            0x00,
            0x00,
            0x00,
            0x00,
        ]
    }
}

impl std::fmt::Debug for NesHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("NesHeader")
            .field("prg_rom_banks", &self.prg_rom_banks)
            .field("chr_rom_banks", &self.chr_rom_banks)
            .field("flags6", &format_args!("0b{:08b}", &self.flags6))
            .field("flags7", &format_args!("0b{:08b}", &self.flags7))
            .field("prg_ram_banks", &self.prg_ram_banks)
            .field("flags9", &format_args!("0b{:08b}", &self.flags9))
            .field("flags10", &format_args!("0b{:08b}", &self.flags10))
            .finish()
    }
}
