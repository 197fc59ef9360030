//! Header control flag decoding.
//!
//! See: <https://www.nesdev.org/wiki/INES#Flags_6>

use crate::header::NesHeader;
use bitflags::bitflags;
use serde::Serialize;

pub const PRG_RAM_BANK_SIZE: usize = 0x2000;

bitflags! {
    // Flags 6
    //
    // NNNN FTBM
    // |||| |||+- Mirroring: 0 = horizontal (vertical arrangement), 1 = vertical (horizontal
    // |||| |||              arrangement)
    // |||| ||+-- Cartridge contains battery-backed PRG-RAM ($6000-$7FFF)
    // |||| |+--- 512-byte trainer at $7000-$71FF (stored before PRG data)
    // |||| +---- Ignore mirroring control or above mirroring bit; provide four-screen VRAM
    // ++++------ Lower nybble of mapper number
    #[derive(Default, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
    #[must_use]
    pub struct Flags6: u8 {
        const VERTICAL = 0x01;
        const BATTERY = 0x02;
        const TRAINER = 0x04;
        const FOUR_SCREEN = 0x08;
        const MAPPER_LO = 0xF0;
    }
}

bitflags! {
    // Flags 7
    //
    // NNNN xxPV
    // |||| |||+- VS Unisystem
    // |||| ||+-- PlayChoice-10 (8 KB of Hint Screen data stored after CHR data)
    // |||| ++--- NES 2.0 identifier, unused by this decoder
    // ++++------ Upper nybble of mapper number
    #[derive(Default, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
    #[must_use]
    pub struct Flags7: u8 {
        const VS_UNISYSTEM = 0x01;
        const PLAYCHOICE10 = 0x02;
        const MAPPER_HI = 0xF0;
    }
}

bitflags! {
    // Flags 9
    //
    // xxxx xxxT
    //         +- TV system: 0 = NTSC, 1 = PAL
    #[derive(Default, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
    #[must_use]
    pub struct Flags9: u8 {
        const PAL = 0x01;
    }
}

/// Nametable Mirroring Mode
///
/// <https://www.nesdev.org/wiki/Mirroring#Nametable_Mirroring>
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[must_use]
pub enum Mirroring {
    #[default]
    Horizontal,
    Vertical,
    /// Mirroring control is ignored and the cartridge provides four-screen VRAM.
    FourScreen,
}

impl Mirroring {
    /// Return `Mirroring` as a `str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::FourScreen => "four-screen",
        }
    }
}

impl AsRef<str> for Mirroring {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Mirroring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::FourScreen => "Four Screen",
        };
        write!(f, "{s}")
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[must_use]
pub enum TvSystem {
    #[default]
    Ntsc,
    Pal,
}

impl TvSystem {
    #[must_use]
    pub fn is_ntsc(&self) -> bool {
        self == &Self::Ntsc
    }

    #[must_use]
    pub fn is_pal(&self) -> bool {
        self == &Self::Pal
    }
}

impl AsRef<str> for TvSystem {
    fn as_ref(&self) -> &str {
        match self {
            Self::Ntsc => "NTSC",
            Self::Pal => "PAL",
        }
    }
}

impl std::fmt::Display for TvSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Control values decoded from header flag bytes 6, 7, 8 and 9.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct DecodedFlags {
    pub mapper_num: u8,
    pub mirroring: Mirroring,
    pub has_trainer: bool,
    pub battery_backed: bool,
    pub tv_system: TvSystem,
    pub vs_unisystem: bool,
    pub playchoice10: bool,
    pub prg_ram_size: usize,
}

impl DecodedFlags {
    pub const fn decode(header: &NesHeader) -> Self {
        let flags6 = Flags6::from_bits_retain(header.flags6);
        let flags7 = Flags7::from_bits_retain(header.flags7);
        let flags9 = Flags9::from_bits_retain(header.flags9);

        // Upper 4 bits of flags 7 = D4..D7, upper 4 bits of flags 6 = D0..D3
        let mapper_num = (flags7.bits() & Flags7::MAPPER_HI.bits())
            | ((flags6.bits() & Flags6::MAPPER_LO.bits()) >> 4);

        let mirroring = if flags6.contains(Flags6::FOUR_SCREEN) {
            Mirroring::FourScreen
        } else if flags6.contains(Flags6::VERTICAL) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let tv_system = if flags9.contains(Flags9::PAL) {
            TvSystem::Pal
        } else {
            TvSystem::Ntsc
        };

        // A value of 0 infers 8KB for compatibility
        let prg_ram_banks = if header.prg_ram_banks == 0 {
            1
        } else {
            header.prg_ram_banks as usize
        };

        Self {
            mapper_num,
            mirroring,
            has_trainer: flags6.contains(Flags6::TRAINER),
            battery_backed: flags6.contains(Flags6::BATTERY),
            tv_system,
            vs_unisystem: flags7.contains(Flags7::VS_UNISYSTEM),
            playchoice10: flags7.contains(Flags7::PLAYCHOICE10),
            prg_ram_size: prg_ram_banks * PRG_RAM_BANK_SIZE,
        }
    }
}
