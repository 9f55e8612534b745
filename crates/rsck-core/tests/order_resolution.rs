use rsck_core::order::{order_code, role_permutation, FieldRole, PermutationTable, ORDER_CODES};
use rsck_core::table::permutation;
use rsck_core::RsckError;

#[test]
fn selector_wraps_mod_24() {
    assert_eq!(order_code(0), "GAEM");
    assert_eq!(order_code(23), "MEAG");
    assert_eq!(order_code(24), "GAEM");
    assert_eq!(order_code(24 * 1000 + 9), "AEMG");
    assert_eq!(order_code(u32::MAX), ORDER_CODES[(u32::MAX % 24) as usize]);
}

#[test]
fn codes_are_distinct_role_orders() {
    for code in ORDER_CODES {
        let perm = role_permutation(code).expect(code);
        let mut sorted = perm;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], "{code}");
    }
    let mut codes = ORDER_CODES.to_vec();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 24);
}

#[test]
fn role_spans_land_in_code_position() {
    // MAGE: misc first, then attacks, growth, evs.
    let perm = role_permutation("MAGE").unwrap();
    assert_eq!(perm, [9, 10, 11, 3, 4, 5, 0, 1, 2, 6, 7, 8]);
    assert_eq!(role_permutation("GAEM").unwrap(), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    assert_eq!(FieldRole::from_symbol('E'), Some(FieldRole::Evs));
    assert_eq!(FieldRole::Misc.symbol(), 'M');
    assert!(role_permutation("GAE").is_none());
    assert!(role_permutation("GAEX").is_none());
}

#[test]
fn builtin_table_resolves_every_selector() {
    let t = PermutationTable::builtin();
    assert_eq!(t.len(), 24);
    for sel in 0..48u32 {
        assert!(t.resolve(sel).is_ok());
    }
}

#[test]
fn missing_code_is_a_configuration_error() {
    let t = permutation::parse("GAEM,1,2,3,4,5,6,7,8,9,10,11,12\n").unwrap();
    assert_eq!(t.len(), 1);
    assert!(t.resolve(24).is_ok());
    match t.resolve(1) {
        Err(RsckError::MissingOrderCode { code, selector }) => {
            assert_eq!(code, "GAME");
            assert_eq!(selector, 1);
        }
        other => panic!("expected MissingOrderCode, got {other:?}"),
    }
}

#[test]
fn permutation_file_indices_are_one_based() {
    let t = permutation::parse("AGEM, 4,5,6, 1,2,3, 7,8,9, 10,11,12\n").unwrap();
    assert_eq!(t.get("AGEM"), Some(&[3, 4, 5, 0, 1, 2, 6, 7, 8, 9, 10, 11]));
    assert_eq!(t.get("AGEM"), role_permutation("AGEM").as_ref());
}

#[test]
fn permutation_file_rejects_bad_rows() {
    assert!(permutation::parse("GAEM,1,2,3\n").is_err());
    assert!(permutation::parse("GAEM,0,2,3,4,5,6,7,8,9,10,11,12\n").is_err());
    assert!(permutation::parse("GAEM,1,2,3,4,5,6,7,8,9,10,11,13\n").is_err());
    assert!(permutation::parse("XXXX,1,2,3,4,5,6,7,8,9,10,11,12\n").is_err());
    assert!(permutation::parse("GAEM,1,2,x,4,5,6,7,8,9,10,11,12\n").is_err());
}
