//! Decoded `iNES` ROM image.

use crate::{
    error::{Error, Result},
    flags::{DecodedFlags, Mirroring, TvSystem},
    header::NesHeader,
    region::{MemoryRegions, Region},
};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info};

/// A validated `iNES` cartridge image.
///
/// Owns the raw file contents. All header fields, flags and region boundaries are computed once
/// during construction and the region accessors return views into the owned buffer.
#[must_use]
pub struct RomImage {
    name: String,
    data: Box<[u8]>,
    header: NesHeader,
    flags: DecodedFlags,
    regions: MemoryRegions,
}

impl RomImage {
    /// Load `RomImage` from a ROM path.
    ///
    /// # Errors
    ///
    /// If the path is not a readable file, the NES header is invalid, or the data does not match
    /// the header, then an error is returned.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::invalid_input(path, "file does not exist"));
        } else if !path.is_file() {
            return Err(Error::invalid_input(path, "not a file"));
        }

        let mut rom = BufReader::new(
            File::open(path)
                .map_err(|err| Error::invalid_input(path, format!("failed to open rom: {err}")))?,
        );
        let mut data = Vec::new();
        rom.read_to_end(&mut data)
            .map_err(|err| Error::invalid_input(path, format!("failed to read rom: {err}")))?;

        Self::from_bytes(path.to_string_lossy(), data)
    }

    /// Load `RomImage` from ROM data.
    ///
    /// # Errors
    ///
    /// If the data cannot be read, the NES header is invalid, or the data does not match the
    /// header, then an error is returned.
    pub fn from_rom<S, F>(name: S, rom_data: &mut F) -> Result<Self>
    where
        S: ToString,
        F: Read,
    {
        let mut data = Vec::new();
        rom_data
            .read_to_end(&mut data)
            .map_err(|err| Error::io(err, "failed to read rom data"))?;
        Self::from_bytes(name, data)
    }

    /// Decode `RomImage` from an owned buffer.
    ///
    /// # Errors
    ///
    /// If the NES header is invalid, or the data does not match the header, then an error is
    /// returned.
    pub fn from_bytes<S, D>(name: S, data: D) -> Result<Self>
    where
        S: ToString,
        D: Into<Vec<u8>>,
    {
        let name = name.to_string();
        let data = data.into().into_boxed_slice();

        let header = NesHeader::parse(&data)?;
        let flags = DecodedFlags::decode(&header);
        let regions = MemoryRegions::compute(&header, &flags, data.len())?;

        let rom = Self {
            name,
            data,
            header,
            flags,
            regions,
        };

        info!("loaded ROM `{rom}`");
        debug!("{rom:?}");
        if rom.trailing_len() > 0 {
            debug!(
                "ignoring {} trailing bytes after CHR-ROM in `{}`",
                rom.trailing_len(),
                rom.name
            );
        }
        Ok(rom)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entire raw file contents.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    pub const fn header(&self) -> &NesHeader {
        &self.header
    }

    pub const fn flags(&self) -> &DecodedFlags {
        &self.flags
    }

    pub const fn regions(&self) -> &MemoryRegions {
        &self.regions
    }

    /// Trainer bytes. Empty unless the header sets the trainer flag.
    #[must_use]
    pub fn trainer(&self) -> &[u8] {
        self.region(self.regions.trainer)
    }

    #[must_use]
    pub fn prg_rom(&self) -> &[u8] {
        self.region(self.regions.prg_rom)
    }

    #[must_use]
    pub fn chr_rom(&self) -> &[u8] {
        self.region(self.regions.chr_rom)
    }

    #[must_use]
    pub fn has_trainer(&self) -> bool {
        self.flags.has_trainer
    }

    #[must_use]
    pub fn has_chr_rom(&self) -> bool {
        !self.regions.chr_rom.is_empty()
    }

    /// Returns the Mapper number for this ROM.
    #[must_use]
    pub const fn mapper_num(&self) -> u8 {
        self.flags.mapper_num
    }

    /// Returns hardware configured `Mirroring`.
    pub const fn mirroring(&self) -> Mirroring {
        self.flags.mirroring
    }

    /// Returns whether this cartridge has battery-backed Save RAM.
    #[must_use]
    pub const fn battery_backed(&self) -> bool {
        self.flags.battery_backed
    }

    /// Returns PRG-RAM size in bytes.
    #[must_use]
    pub const fn prg_ram_size(&self) -> usize {
        self.flags.prg_ram_size
    }

    pub const fn tv_system(&self) -> TvSystem {
        self.flags.tv_system
    }

    /// Number of bytes after CHR-ROM that are not part of any region.
    #[must_use]
    pub fn trailing_len(&self) -> usize {
        self.data.len() - self.regions.end()
    }

    /// Returns a serializable summary of this ROM.
    pub fn info(&self) -> RomInfo {
        RomInfo {
            name: self.name.clone(),
            len: self.data.len(),
            header: self.header,
            flags: self.flags,
            prg_rom_size_kib: self.regions.prg_rom.len() / 0x0400,
            chr_rom_size_kib: self.regions.chr_rom.len() / 0x0400,
            prg_ram_size_kib: self.flags.prg_ram_size / 0x0400,
            regions: self.regions,
            trailing_len: self.trailing_len(),
        }
    }

    // Bounds were verified by `MemoryRegions::compute` during construction
    fn region(&self, region: Region) -> &[u8] {
        &self.data[region.range()]
    }
}

impl std::fmt::Display for RomImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(
            f,
            "{} - Mapper {:03}, PRG-ROM: {}K, CHR-ROM: {}K, PRG-RAM: {}K, Trainer: {}, Mirroring: {}, Battery: {}, TV: {}",
            self.name,
            self.mapper_num(),
            self.regions.prg_rom.len() / 0x0400,
            self.regions.chr_rom.len() / 0x0400,
            self.prg_ram_size() / 0x0400,
            self.has_trainer(),
            self.mirroring(),
            self.battery_backed(),
            self.tv_system(),
        )
    }
}

impl std::fmt::Debug for RomImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("RomImage")
            .field("name", &self.name)
            .field("len", &self.data.len())
            .field("header", &self.header)
            .field("flags", &self.flags)
            .field("regions", &self.regions)
            .finish()
    }
}

/// Serializable summary of a decoded [`RomImage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct RomInfo {
    pub name: String,
    pub len: usize,
    pub header: NesHeader,
    pub flags: DecodedFlags,
    pub prg_rom_size_kib: usize,
    pub chr_rom_size_kib: usize,
    pub prg_ram_size_kib: usize,
    pub regions: MemoryRegions,
    pub trailing_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{CHR_ROM_BANK_SIZE, PRG_ROM_BANK_SIZE, TRAINER_SIZE};

    fn rom_data(header: [u8; 16], len: usize) -> Vec<u8> {
        let mut data = header.to_vec();
        data.extend((0..len.saturating_sub(16)).map(|i| (i % 251) as u8));
        data.truncate(len);
        data
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RomImage>();
    }

    #[test]
    fn views_into_raw_data() {
        let header = [
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x01, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let len = 16 + TRAINER_SIZE + PRG_ROM_BANK_SIZE + CHR_ROM_BANK_SIZE;
        let data = rom_data(header, len);
        let rom = RomImage::from_bytes("views", data.clone()).expect("valid rom");

        assert_eq!(rom.raw(), data.as_slice());
        assert_eq!(rom.trainer(), &data[16..528]);
        assert_eq!(rom.prg_rom(), &data[528..528 + PRG_ROM_BANK_SIZE]);
        assert_eq!(rom.chr_rom(), &data[528 + PRG_ROM_BANK_SIZE..]);
        assert_eq!(
            rom.prg_rom().as_ptr(),
            rom.raw()[rom.regions().prg_rom.start..].as_ptr()
        );
        assert_eq!(rom.trailing_len(), 0);
    }

    #[test]
    fn from_rom_reader() {
        let header = [
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let data = rom_data(header, 16 + PRG_ROM_BANK_SIZE);
        let rom = RomImage::from_rom("reader", &mut data.as_slice()).expect("valid rom");
        assert_eq!(rom.name(), "reader");
        assert_eq!(rom.mirroring(), Mirroring::Vertical);
        assert!(!rom.has_chr_rom());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disconnected"))
        }
    }

    #[test]
    fn from_rom_read_failure() {
        let result = RomImage::from_rom("failing", &mut FailingReader);
        match result {
            Err(err @ Error::Io { .. }) => assert!(err.is_input_error()),
            result => panic!("expected Io error, got {result:?}"),
        }
    }

    #[test]
    fn display_summary() {
        let header = [
            0x4E, 0x45, 0x53, 0x1A, 0x02, 0x01, 0x12, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let data = rom_data(header, 40976);
        let rom = RomImage::from_bytes("game.nes", data).expect("valid rom");
        assert_eq!(
            rom.to_string(),
            "game.nes - Mapper 001, PRG-ROM: 32K, CHR-ROM: 8K, PRG-RAM: 8K, Trainer: false, Mirroring: Horizontal, Battery: true, TV: PAL"
        );
    }

    #[test]
    fn info_summary() {
        let header = [
            0x4E, 0x45, 0x53, 0x1A, 0x02, 0x01, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let data = rom_data(header, 40976 + 64);
        let info = RomImage::from_bytes("info", data).expect("valid rom").info();
        assert_eq!(info.len, 41040);
        assert_eq!(info.prg_rom_size_kib, 32);
        assert_eq!(info.chr_rom_size_kib, 8);
        assert_eq!(info.prg_ram_size_kib, 16);
        assert_eq!(info.trailing_len, 64);
    }
}
