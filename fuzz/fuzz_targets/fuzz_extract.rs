#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    let mut clean = Vec::new();
    let opts = csvsig::container::ContainerOptions { chunk_size: 64 };
    if let Ok(pair) = csvsig::container::extract_stream(data, &mut clean, &opts) {
        // Two non-empty signature lines were removed.
        assert!(!pair.signature1().is_empty());
        assert!(clean.len() < data.len());
    }
});
