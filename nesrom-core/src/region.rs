//! Cartridge memory region layout.

use crate::{
    error::{Error, Result},
    flags::DecodedFlags,
    header::{NesHeader, HEADER_SIZE},
};
use serde::Serialize;
use std::ops::Range;

pub const TRAINER_SIZE: usize = 0x0200;
pub const PRG_ROM_BANK_SIZE: usize = 0x4000;
pub const CHR_ROM_BANK_SIZE: usize = 0x2000;

/// Identifies a section of an `iNES` image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[must_use]
pub enum RegionKind {
    Header,
    Trainer,
    PrgRom,
    ChrRom,
}

impl RegionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Trainer => "trainer",
            Self::PrgRom => "PRG-ROM",
            Self::ChrRom => "CHR-ROM",
        }
    }
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A half-open byte range `[start, end)` within a ROM image.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub const fn empty(start: usize) -> Self {
        Self { start, end: start }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Creates the region of `len` bytes that follows this one.
    fn next(self, kind: RegionKind, len: usize, rom_len: usize) -> Result<Self> {
        let truncated = |end| Error::TruncatedRom {
            region: kind,
            end,
            len: rom_len,
        };
        let end = self
            .end
            .checked_add(len)
            .ok_or_else(|| truncated(usize::MAX))?;
        if end > rom_len {
            return Err(truncated(end));
        }
        Ok(Self {
            start: self.end,
            end,
        })
    }
}

/// Byte ranges of the trainer, PRG-ROM and CHR-ROM, laid out contiguously in that order after
/// the header.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct MemoryRegions {
    pub trainer: Region,
    pub prg_rom: Region,
    pub chr_rom: Region,
}

impl MemoryRegions {
    /// Computes region boundaries for a ROM image of `rom_len` bytes.
    ///
    /// # Errors
    ///
    /// If any region would extend past `rom_len`, then an error is returned.
    pub fn compute(header: &NesHeader, flags: &DecodedFlags, rom_len: usize) -> Result<Self> {
        let header_region = Region {
            start: 0,
            end: HEADER_SIZE,
        };
        if rom_len < header_region.end {
            return Err(Error::TruncatedRom {
                region: RegionKind::Header,
                end: header_region.end,
                len: rom_len,
            });
        }

        let trainer_len = if flags.has_trainer { TRAINER_SIZE } else { 0 };
        let trainer = header_region.next(RegionKind::Trainer, trainer_len, rom_len)?;
        let prg_rom = trainer.next(
            RegionKind::PrgRom,
            usize::from(header.prg_rom_banks) * PRG_ROM_BANK_SIZE,
            rom_len,
        )?;
        let chr_rom = prg_rom.next(
            RegionKind::ChrRom,
            usize::from(header.chr_rom_banks) * CHR_ROM_BANK_SIZE,
            rom_len,
        )?;

        Ok(Self {
            trainer,
            prg_rom,
            chr_rom,
        })
    }

    /// The first byte offset not covered by any region.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.chr_rom.end
    }
}
