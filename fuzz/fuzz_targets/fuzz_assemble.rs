#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unitbench::generator::{FileConfig, FixedPicker, assemble};

#[derive(Arbitrary, Debug)]
struct Knobs {
    mult: (i8, i8, i8),
    add: (i8, i8, i8),
    comp: (i8, i8, i8),
    flags: u8,
}

fuzz_target!(|k: Knobs| {
    // small signed counts reach both validation and generation
    let mut cfg = FileConfig::default()
        .with_mult(i64::from(k.mult.0 % 8), i64::from(k.mult.1 % 16))
        .with_add(i64::from(k.add.0 % 8), i64::from(k.add.1 % 16))
        .with_comp(i64::from(k.comp.0 % 8), i64::from(k.comp.1 % 16));
    cfg.mult.annot = i64::from(k.mult.2);
    cfg.add.annot = i64::from(k.add.2);
    cfg.comp.annot = i64::from(k.comp.2);
    cfg.mult.per_line = k.flags & 1 != 0;
    cfg.mult.end = k.flags & 2 != 0;
    cfg.mult.no_correction = k.flags & 4 != 0;
    cfg.add.per_line = k.flags & 8 != 0;
    cfg.add.end = k.flags & 16 != 0;
    cfg.add.no_correction = k.flags & 32 != 0;
    cfg.comp.no_correction = k.flags & 64 != 0;
    if let Ok(file) = assemble(&cfg, &mut FixedPicker("m".into())) {
        assert!(file.source.starts_with("import units.qual.*;"));
        assert!(file.source.ends_with("    }\n}"));
    }
});
