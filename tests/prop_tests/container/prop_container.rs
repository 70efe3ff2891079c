use csvsig::container::{ContainerOptions, SignaturePair, embed_stream, extract_stream};
use proptest::prelude::*;

fn build(first: &str, headers: &[String], rows: &[String], eol: &str) -> Vec<u8> {
    let mut out = format!("{first}{eol}");
    for h in headers {
        out.push_str(h);
        out.push_str(eol);
    }
    for r in rows {
        out.push_str(r);
        out.push_str(eol);
    }
    out.into_bytes()
}

/// Data rows, comments, and rows that look like signature lines.
fn payload_row() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9,]{1,12}",
        "#[a-z ]{0,8}",
        "##signature1=[A-Za-z0-9]{1,12}",
        "##signature2=[A-Za-z0-9]{1,12}",
    ]
}

fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    bytes.split_inclusive(|b| *b == b'\n').collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_embed_extract_roundtrip(
        first in "[a-z,]{0,12}",
        headers in proptest::collection::vec("#[a-z0-9,=]{0,12}", 0..5),
        rows in proptest::collection::vec("[a-z0-9,# ]{1,16}", 0..8),
        crlf in any::<bool>(),
        s1 in "[A-Za-z0-9+/=]{1,40}",
        s2 in "[A-Za-z0-9+/=]{1,40}",
        chunk in 1usize..32,
    ) {
        let input = build(&first, &headers, &rows, if crlf { "\r\n" } else { "\n" });
        let pair = SignaturePair::new(s1, s2).unwrap();
        let opts = ContainerOptions { chunk_size: chunk };
        let mut signed = Vec::new();
        embed_stream(&input[..], &mut signed, &pair, &opts).unwrap();
        prop_assert_eq!(signed.len(), input.len() + 2 * 13 + pair.signature1().len() + pair.signature2().len() + if crlf { 4 } else { 2 });

        let mut clean = Vec::new();
        let got = extract_stream(&signed[..], &mut clean, &opts).unwrap();
        prop_assert_eq!(clean, input);
        prop_assert_eq!(got, pair);
    }

    #[test]
    fn prop_rsid_boundary_keeps_signature_like_payload(
        headers in proptest::collection::vec("#[a-z0-9]{0,8}", 0..4),
        rsid in 0u32..10_000,
        rows in proptest::collection::vec(payload_row(), 0..8),
        crlf in any::<bool>(),
    ) {
        let eol = if crlf { "\r\n" } else { "\n" };
        let mut tail = vec![format!("# rsid {rsid}")];
        tail.extend(rows);
        let input = build("a,b", &headers, &tail, eol);
        let payload = build("", &[], &tail, eol).split_off(eol.len());

        let pair = SignaturePair::new("REALSIG1", "REALSIG2").unwrap();
        let mut signed = Vec::new();
        embed_stream(&input[..], &mut signed, &pair, &ContainerOptions { chunk_size: 5 }).unwrap();
        let expected_sigs = format!("##signature1=REALSIG1{eol}##signature2=REALSIG2{eol}");
        let head_len = input.len() - payload.len();
        prop_assert_eq!(&signed[..head_len], &input[..head_len]);
        prop_assert_eq!(&signed[head_len..head_len + expected_sigs.len()], expected_sigs.as_bytes());
        prop_assert_eq!(&signed[head_len + expected_sigs.len()..], &payload[..]);

        let mut clean = Vec::new();
        let got = extract_stream(&signed[..], &mut clean, &ContainerOptions { chunk_size: 3 }).unwrap();
        prop_assert_eq!(clean, input);
        prop_assert_eq!(got, pair);
    }

    #[test]
    fn prop_header_order_and_position(
        headers in proptest::collection::vec("#[a-z]{0,8}", 0..6),
        rows in proptest::collection::vec("[0-9]{1,6},[a-z]{1,6}", 1..6),
    ) {
        let input = build("h1,h2", &headers, &rows, "\n");
        let pair = SignaturePair::new("SIGA", "SIGB").unwrap();
        let mut signed = Vec::new();
        embed_stream(&input[..], &mut signed, &pair, &ContainerOptions::default()).unwrap();

        let lines = split_lines(&signed);
        let n = headers.len();
        prop_assert_eq!(lines[0], &b"h1,h2\n"[..]);
        for (i, h) in headers.iter().enumerate() {
            let expected = format!("{h}\n");
            prop_assert_eq!(lines[1 + i], expected.as_bytes());
        }
        prop_assert_eq!(lines[1 + n], &b"##signature1=SIGA\n"[..]);
        prop_assert_eq!(lines[2 + n], &b"##signature2=SIGB\n"[..]);
        let boundary = format!("{}\n", rows[0]);
        prop_assert_eq!(lines[3 + n], boundary.as_bytes());
        prop_assert_eq!(lines.len(), input_line_count(&input) + 2);
    }

    #[test]
    fn prop_signature_lines_follow_first_line_ending(
        crlf in any::<bool>(),
        rows in proptest::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let eol = if crlf { "\r\n" } else { "\n" };
        let input = build("head", &["#c".to_string()], &rows, eol);
        let pair = SignaturePair::new("S1", "S2").unwrap();
        let mut signed = Vec::new();
        embed_stream(&input[..], &mut signed, &pair, &ContainerOptions::default()).unwrap();
        let lines = split_lines(&signed);
        let (l1, l2) = (format!("##signature1=S1{eol}"), format!("##signature2=S2{eol}"));
        prop_assert_eq!(lines[2], l1.as_bytes());
        prop_assert_eq!(lines[3], l2.as_bytes());
    }
}

fn input_line_count(input: &[u8]) -> usize {
    split_lines(input).len()
}
