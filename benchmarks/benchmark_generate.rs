use std::time::Instant;

use unitbench::generator::{FileConfig, FixedPicker, assemble};

const ITERATIONS: u32 = 20;

fn time_assemble(label: &str, cfg: &FileConfig) {
    let mut picker = FixedPicker("m".into());
    let mut bytes = 0usize;
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        match assemble(cfg, &mut picker) {
            Ok(file) => bytes = file.source.len(),
            Err(e) => {
                eprintln!("{label}: {e}");
                return;
            }
        }
    }
    let per_iter = start.elapsed() / ITERATIONS;
    println!("{label:<28} {per_iter:>12?} per file, {bytes} bytes");
}

fn main() {
    println!("assemble() over {ITERATIONS} iterations");
    time_assemble("mult 30x15", &FileConfig::default().with_mult(30, 15));
    time_assemble("add 30x15", &FileConfig::default().with_add(30, 15));
    time_assemble("comp 30x15", &FileConfig::default().with_comp(30, 15));

    let mut per_line = FileConfig::default().with_mult(100, 100);
    per_line.mult.per_line = true;
    per_line.mult.end = true;
    time_assemble("mult 100x100 per-line", &per_line);

    let mut mixed = FileConfig::default().with_mult(50, 50).with_add(50, 50).with_comp(50, 50);
    mixed.mult.annot = 50;
    mixed.add.annot = 50;
    mixed.comp.annot = 50;
    time_assemble("mixed 50x50 half annotated", &mixed);

    time_assemble("mult 1x10000", &FileConfig::default().with_mult(1, 10_000));
}
