use rsck_core::key::Identity;
use rsck_core::order::PermutationTable;
use rsck_core::search::run_task;
use rsck_core::table::candidate::CandidateRecord;
use rsck_core::table::{permutation, CandidateTable, IdentityRecord, IdentityTable};
use rsck_core::{RsckError, SearchTables};

fn identities(rows: &[(u16, u16)]) -> IdentityTable {
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, &(tid, sid))| IdentityRecord { advance: i as u32, id: Identity::new(tid, sid) })
        .collect();
    IdentityTable::new(rows).unwrap()
}

fn candidate(name: &str, selector: u32, words: [u32; 12]) -> CandidateRecord {
    CandidateRecord { name: name.to_string(), selector, words }
}

fn tables(ids: &[(u16, u16)], cands: Vec<CandidateRecord>) -> SearchTables {
    SearchTables {
        candidates: CandidateTable::new(cands).unwrap(),
        identities: identities(ids),
        orders: PermutationTable::builtin(),
    }
}

#[test]
fn one_identity_one_frame_one_row() {
    // key(1,1) ^ key(0,0) = 0x00010001 balances against twelve 1s.
    let t = tables(&[(0, 0), (1, 1)], vec![candidate("TESTMON", 0, [1; 12])]);
    let mut matches: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();

    let summary = run_task(&t, 1, 1, &mut matches, &mut specials).unwrap();

    assert_eq!(summary.tid, 1);
    assert_eq!(summary.matches, 1);
    assert_eq!(summary.specials, 0);
    assert!(specials.is_empty());
    assert_eq!(
        matches,
        vec!["1,0,1 1,0 0,0x0000,0x0001,0x0000 0x0001 0x0000 0x0001,1,0,TESTMON".to_string()]
    );
}

#[test]
fn container_index_is_reported() {
    // Player row 1 packs to 0x38000000 against a zero enemy key; the buffer
    // only balances when slot 9 carries container 5.
    let mut words = [0x2000_0000u32; 12];
    for w in &mut words[0..5] {
        *w = 0x1800_0000;
    }
    words[5] = 0x1000_0000;
    words[9] = 0x8000_0000;

    let t = tables(&[(0, 0), (0, 0x3800)], vec![candidate("BALLMON", 0, words)]);
    let mut matches: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();
    run_task(&t, 1, 1, &mut matches, &mut specials).unwrap();

    assert_eq!(matches.len(), 1);
    let cols: Vec<&str> = matches[0].split(',').collect();
    assert_eq!(cols[2], "0 14336");
    assert_eq!(cols[4], "0x0000");
    assert_eq!(cols[5], "0x2000");
    assert_eq!(cols[7], "5");
    assert_eq!(cols[9], "BALLMON");
}

#[test]
fn enemy_uses_swapped_halves() {
    // Player (5,9) packs to 0x00090005, every enemy frame to 0x00050009.
    // The combined key 0x000C000C flips bits that cancel out in 0x12345678.
    let t = tables(&[(5, 9), (5, 9)], vec![candidate("M", 0, [0x1234_5678; 12])]);
    let mut matches: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();
    run_task(&t, 0, 2, &mut matches, &mut specials).unwrap();

    assert_eq!(matches.len(), 2);
    for r in &matches {
        let cols: Vec<&str> = r.split(',').collect();
        assert_eq!(cols[2], "5 9");
        assert_eq!(cols[3], "9 5");
        // 0x000C000C ^ 0x12345678
        assert_eq!(cols[4], "0x5674");
        assert_eq!(cols[5], "0x1238");
    }
}

#[test]
fn special_rows_go_to_both_sinks() {
    let mut words = [0u32; 12];
    words[0] = 39_710;
    let t = tables(&[(0, 0)], vec![candidate("RARE", 0, words), candidate("PLAIN", 0, [0; 12])]);
    let mut matches: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();

    let summary = run_task(&t, 0, 1, &mut matches, &mut specials).unwrap();

    assert_eq!(summary.matches, 2);
    assert_eq!(summary.specials, 1);
    assert_eq!(specials.len(), 1);
    assert!(specials[0].ends_with(",RARE"));
    assert!(specials[0].contains(",0x9b1e,"));
    assert_eq!(matches[0], specials[0]);
}

#[test]
fn missing_order_code_aborts_task() {
    let mut t = tables(&[(0, 0)], vec![candidate("ODD", 1, [0; 12])]);
    t.orders = permutation::parse("GAEM,1,2,3,4,5,6,7,8,9,10,11,12\n").unwrap();
    let mut matches: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();

    let err = run_task(&t, 0, 1, &mut matches, &mut specials).unwrap_err();
    assert!(matches!(err, RsckError::MissingOrderCode { code: "GAME", selector: 1 }));
    assert!(matches.is_empty());
}

#[test]
fn frames_beyond_table_are_rejected() {
    let t = tables(&[(0, 0), (1, 1)], vec![candidate("M", 0, [0; 12])]);
    let mut sink: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();
    assert!(matches!(
        run_task(&t, 0, 3, &mut sink, &mut specials),
        Err(RsckError::IdentityOutOfRange { index: 2, len: 2 })
    ));
    assert!(matches!(
        run_task(&t, 5, 1, &mut sink, &mut specials),
        Err(RsckError::IdentityOutOfRange { index: 5, len: 2 })
    ));
}

#[test]
fn candidates_searched_in_table_order() {
    let t = tables(&[(0, 0)], vec![candidate("B", 3, [0; 12]), candidate("A", 7, [0; 12])]);
    let mut matches: Vec<String> = Vec::new();
    let mut specials: Vec<String> = Vec::new();
    run_task(&t, 0, 1, &mut matches, &mut specials).unwrap();
    let names: Vec<&str> = matches.iter().map(|r| r.rsplit(',').next().unwrap()).collect();
    assert_eq!(names, ["B", "A"]);
}
