#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    let text = String::from_utf8_lossy(data);
    // arbitrary tool output yields a value or an error, never a panic
    let _ = unitbench::harness::parse_statistic(&text, "smt_solving_time(millisec)", "fuzz");
});
