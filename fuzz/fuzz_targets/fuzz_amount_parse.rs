#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(cents) = ustva::Cents::parse(s) {
            let _ = cents.gross_from_inclusive(19);
            let _ = cents.tax_from_exclusive(7);
            let _ = cents.to_decimal_string();
        }
    }
});
