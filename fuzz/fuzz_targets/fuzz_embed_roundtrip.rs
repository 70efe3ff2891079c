#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    body: Vec<u8>,
    chunk: u8,
}

fuzz_target!(|input: Input| {
    if input.body.len() > 16384 { return; }
    let opts = csvsig::container::ContainerOptions { chunk_size: usize::from(input.chunk).max(1) };
    let Ok(pair) = csvsig::container::SignaturePair::new("FUZZSIG1", "FUZZSIG2") else { return };
    let mut signed = Vec::new();
    if csvsig::container::embed_stream(&input.body[..], &mut signed, &pair, &opts).is_err() {
        return;
    }
    let mut clean = Vec::new();
    let got = match csvsig::container::extract_stream(&signed[..], &mut clean, &opts) {
        Ok(p) => p,
        Err(e) => panic!("embedded output failed to extract: {e}"),
    };
    assert_eq!(got, pair);
    // An unterminated last header line gains a line ending on embed.
    if clean != input.body {
        assert!(clean.starts_with(&input.body));
    }
});
