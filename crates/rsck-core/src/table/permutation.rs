// crates/rsck-core/src/table/permutation.rs
//
// `orderCode,i1,...,i12` rows. Indices are 1-based word positions of the
// candidate record (1..=12), stored 0-based.

use super::{data_lines, line_err};
use crate::error::Result;
use crate::order::{Permutation, PermutationTable, WORD_COUNT};

pub fn parse(text: &str) -> Result<PermutationTable> {
    let mut table = PermutationTable::empty();

    for (line_no, line) in data_lines(text) {
        let mut fields = line.split(',').map(str::trim);
        let code = fields.next().unwrap_or_default();

        let idx: Vec<usize> = fields
            .map(|f| f.parse::<usize>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| line_err("permutation", line_no, e))?;
        if idx.len() != WORD_COUNT {
            return Err(line_err(
                "permutation",
                line_no,
                format!("{code}: expected {WORD_COUNT} indices, got {}", idx.len()),
            ));
        }

        let mut perm: Permutation = [0; WORD_COUNT];
        for (slot, &i) in perm.iter_mut().zip(idx.iter()) {
            if !(1..=WORD_COUNT).contains(&i) {
                return Err(line_err("permutation", line_no, format!("{code}: index {i} not in 1..=12")));
            }
            *slot = i - 1;
        }

        table
            .insert(code, perm)
            .map_err(|e| line_err("permutation", line_no, e))?;
    }

    Ok(table)
}
