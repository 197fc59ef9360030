use crate::config::{Config, OutputFormat};
use nesrom_core::prelude::*;
use std::fmt::Write;

/// Render a decoded ROM according to `config`.
pub fn render(rom: &RomImage, config: &Config) -> anyhow::Result<String> {
    match config.format {
        OutputFormat::Text => Ok(text(rom, config)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rom.info())?),
    }
}

fn region_line(out: &mut String, label: &str, region: Region) {
    let _ = writeln!(
        out,
        "  {label:<10} ${:06X}..${:06X} ({} bytes)",
        region.start,
        region.end,
        region.len()
    );
}

fn text(rom: &RomImage, config: &Config) -> String {
    let info = rom.info();
    let flags = rom.flags();
    let mut out = String::new();

    let _ = writeln!(out, "{}", info.name);
    let _ = writeln!(out, "  Size:      {} bytes", info.len);
    let _ = writeln!(out, "  Mapper:    {:03}", flags.mapper_num);
    let _ = writeln!(out, "  Mirroring: {}", flags.mirroring);
    let _ = writeln!(out, "  Battery:   {}", flags.battery_backed);
    let _ = writeln!(out, "  TV System: {}", flags.tv_system);
    let _ = writeln!(out, "  PRG-RAM:   {}K", info.prg_ram_size_kib);
    if flags.vs_unisystem {
        let _ = writeln!(out, "  VS Unisystem");
    }
    if flags.playchoice10 {
        let _ = writeln!(out, "  PlayChoice-10");
    }
    if config.show_flags10 {
        let _ = writeln!(out, "  Flags 10:  0b{:08b}", info.header.flags10);
    }
    region_line(&mut out, "Trainer:", info.regions.trainer);
    region_line(&mut out, "PRG-ROM:", info.regions.prg_rom);
    region_line(&mut out, "CHR-ROM:", info.regions.chr_rom);
    if info.trailing_len > 0 {
        let _ = writeln!(out, "  Trailing:  {} bytes ignored", info.trailing_len);
    }
    out
}
