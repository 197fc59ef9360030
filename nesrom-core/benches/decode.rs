use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nesrom_core::prelude::*;

fn rom_data() -> Vec<u8> {
    // Mapper 004, 128K PRG-ROM, 128K CHR-ROM, trainer, vertical mirroring
    let mut data = vec![
        0x4E, 0x45, 0x53, 0x1A, 0x08, 0x10, 0x45, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];
    data.resize(16 + 0x200 + 8 * 0x4000 + 16 * 0x2000, 0xEA);
    data
}

fn decode(c: &mut Criterion) {
    let data = rom_data();
    let mut group = c.benchmark_group("decode");
    group.bench_function("header", |b| {
        b.iter(|| NesHeader::parse(black_box(&data)).expect("valid header"))
    });
    group.bench_function("rom_image", |b| {
        b.iter_batched(
            || data.clone(),
            |data| RomImage::from_bytes("bench", data).expect("valid rom"),
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, decode);
criterion_main!(benches);
