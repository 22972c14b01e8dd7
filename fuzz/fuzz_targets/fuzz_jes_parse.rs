#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as data.xml, including undeclared encodings.
    let _ = ustva::jes::from_xml_bytes(data);
});
