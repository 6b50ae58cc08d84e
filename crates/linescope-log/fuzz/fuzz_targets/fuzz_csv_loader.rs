#![no_main]

use libfuzzer_sys::fuzz_target;
use linescope_log::{LoadOptions, load_reader};

fuzz_target!(|data: &[u8]| {
    // Neither mode may panic, whatever the bytes
    let _ = load_reader(data, &LoadOptions::default());
    let _ = load_reader(data, &LoadOptions::strict());
});
