#![doc = include_str!("../README.md")]

pub mod error;
pub mod flags;
pub mod header;
pub mod region;
pub mod rom;

pub mod prelude {
    //! The prelude re-exports all the common structs/enums used to decode a ROM image.

    pub use crate::{
        error::{Error, Result},
        flags::{DecodedFlags, Mirroring, TvSystem},
        header::NesHeader,
        region::{MemoryRegions, Region, RegionKind},
        rom::{RomImage, RomInfo},
    };
}
