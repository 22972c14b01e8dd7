#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(period) = s.parse::<ustva::Period>() {
            let _ = period.months().count();
            let _ = period.code();
        }
    }
});
