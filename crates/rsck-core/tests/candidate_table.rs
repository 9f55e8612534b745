use rsck_core::table::candidate::{decode_le_chunk, encode_le_chunk, CandidateRecord, MIN_CHUNKS};
use rsck_core::table::CandidateTable;

fn payload(selector: u32, otid: u32, words: &[u32; 12]) -> String {
    let mut s = encode_le_chunk(selector);
    s.push_str(&encode_le_chunk(otid));
    for _ in 2..8 {
        s.push_str("00000000");
    }
    for w in words {
        s.push_str(&encode_le_chunk(w ^ selector ^ otid));
    }
    s
}

#[test]
fn chunks_are_little_endian() {
    assert_eq!(decode_le_chunk("78563412"), Some(0x1234_5678));
    assert_eq!(decode_le_chunk("FFFFFF7F"), Some(0x7FFF_FFFF));
    assert_eq!(decode_le_chunk("7856341"), None);
    assert_eq!(decode_le_chunk("785634zz"), None);
}

#[test]
fn first_word_round_trips() {
    let hex = payload(0xA1B2_C3D4, 0x0BAD_F00D, &[7; 12]);
    let rec = CandidateRecord::from_hex("X", &hex).unwrap();
    assert_eq!(rec.selector, 0xA1B2_C3D4);
    assert_eq!(encode_le_chunk(rec.selector), hex[0..8]);
}

#[test]
fn data_words_fold_out_selector_and_otid() {
    let words = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0xFFFF_FFFF];
    let rec = CandidateRecord::from_hex("X", &payload(0x0012_3456, 0xDEAD_BEEF, &words)).unwrap();
    assert_eq!(rec.words, words);
}

#[test]
fn data_words_are_lossy() {
    // Different chunk 0/1 and data chunks can derive identical words; the
    // originals cannot be recovered from the record.
    let a = CandidateRecord::from_hex("A", &payload(5, 0, &[9; 12])).unwrap();
    let b = CandidateRecord::from_hex("B", &payload(5, 0x1111_1111, &[9; 12])).unwrap();
    assert_eq!(a.words, b.words);
}

#[test]
fn parse_keeps_file_order() {
    let text = format!(
        "ZUBAT,{}\nABRA,{}\n\nMEW,{}\n",
        payload(1, 2, &[3; 12]),
        payload(4, 5, &[6; 12]),
        payload(7, 8, &[9; 12])
    );
    let t = CandidateTable::parse(&text).unwrap();
    let names: Vec<&str> = t.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["ZUBAT", "ABRA", "MEW"]);
    assert_eq!(t.get("ABRA").unwrap().selector, 4);
    assert_eq!(t.len(), 3);
}

#[test]
fn parse_rejects_bad_rows() {
    let good = payload(1, 2, &[3; 12]);
    assert!(CandidateTable::parse(&format!("A,{}\nA,{}\n", good, good)).is_err());
    assert!(CandidateTable::parse(&format!("A{}\n", good)).is_err());
    assert!(CandidateTable::parse(&format!("A,{}\n", &good[..MIN_CHUNKS * 8 - 1])).is_err());
    let mut bad = good.clone();
    bad.replace_range(100..102, "zz");
    assert!(CandidateTable::parse(&format!("A,{}\n", bad)).is_err());
}

#[test]
fn longer_payloads_are_accepted() {
    let mut hex = payload(1, 2, &[3; 12]);
    hex.push_str(&"ab".repeat(20));
    let rec = CandidateRecord::from_hex("X", &hex).unwrap();
    assert_eq!(rec.words, [3; 12]);
}
