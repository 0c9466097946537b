#![no_main]
use libfuzzer_sys::fuzz_target;

use scanjson::{decode, Decoder};

fuzz_target!(|data: &[u8]| {
    // We only care about inputs that are valid UTF-8.
    if let Ok(s) = std::str::from_utf8(data) {
        // Looking for panics and stack overflows, not for errors.
        let _ = decode(s);
        let _ = Decoder::new().max_depth(8).decode(s);
    }
});
