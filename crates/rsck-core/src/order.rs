// crates/rsck-core/src/order.rs
//
// Group selector -> order code -> 12-slot permutation.

use crate::error::{Result, RsckError};

pub const WORD_COUNT: usize = 12;

/// Buffer slot `i` is filled from `words[perm[i]]`.
pub type Permutation = [usize; WORD_COUNT];

/// The 24 substructure orders, indexed by `selector % 24`.
pub const ORDER_CODES: [&str; 24] = [
    "GAEM", "GAME", "GEAM", "GEMA", "GMAE", "GMEA",
    "AGEM", "AGME", "AEGM", "AEMG", "AMGE", "AMEG",
    "EGAM", "EGMA", "EAGM", "EAMG", "EMGA", "EMAG",
    "MGAE", "MGEA", "MAGE", "MAEG", "MEGA", "MEAG",
];

/// The four 3-word field groups of a candidate record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Growth,
    Attacks,
    Evs,
    Misc,
}

impl FieldRole {
    pub const SPAN: usize = 3;

    pub fn from_symbol(c: char) -> Option<FieldRole> {
        match c {
            'G' => Some(FieldRole::Growth),
            'A' => Some(FieldRole::Attacks),
            'E' => Some(FieldRole::Evs),
            'M' => Some(FieldRole::Misc),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            FieldRole::Growth => 'G',
            FieldRole::Attacks => 'A',
            FieldRole::Evs => 'E',
            FieldRole::Misc => 'M',
        }
    }

    /// First word of this role's span within `CandidateRecord::words`.
    pub const fn span_start(self) -> usize {
        match self {
            FieldRole::Growth => 0,
            FieldRole::Attacks => 3,
            FieldRole::Evs => 6,
            FieldRole::Misc => 9,
        }
    }
}

#[inline]
pub fn order_index(selector: u32) -> usize {
    (selector % ORDER_CODES.len() as u32) as usize
}

#[inline]
pub fn order_code(selector: u32) -> &'static str {
    ORDER_CODES[order_index(selector)]
}

pub fn code_index(code: &str) -> Option<usize> {
    ORDER_CODES.iter().position(|c| *c == code)
}

/// Expand an order code into its permutation: position `j` of the code
/// claims buffer slots `3j..3j+3` for that role's span.
pub fn role_permutation(code: &str) -> Option<Permutation> {
    let roles: Vec<FieldRole> = code.chars().map(FieldRole::from_symbol).collect::<Option<_>>()?;
    if roles.len() != 4 {
        return None;
    }

    let mut perm = [0usize; WORD_COUNT];
    for (j, role) in roles.iter().enumerate() {
        for k in 0..FieldRole::SPAN {
            perm[j * FieldRole::SPAN + k] = role.span_start() + k;
        }
    }
    Some(perm)
}

/// Order code -> permutation lookup, one optional entry per known code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    entries: [Option<Permutation>; 24],
}

impl PermutationTable {
    pub fn empty() -> Self {
        Self { entries: [None; 24] }
    }

    /// All 24 codes expanded from their field roles.
    pub fn builtin() -> Self {
        let mut t = Self::empty();
        for (i, code) in ORDER_CODES.iter().enumerate() {
            t.entries[i] = role_permutation(code);
        }
        t
    }

    pub fn insert(&mut self, code: &str, perm: Permutation) -> Result<()> {
        let idx = code_index(code)
            .ok_or_else(|| RsckError::TableFormat(format!("unknown order code {code:?}")))?;
        if let Some(bad) = perm.iter().find(|&&w| w >= WORD_COUNT) {
            return Err(RsckError::TableFormat(format!(
                "order code {code}: word index {bad} out of range"
            )));
        }
        self.entries[idx] = Some(perm);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Permutation> {
        code_index(code).and_then(|i| self.entries[i].as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a candidate's group selector to its permutation.
    pub fn resolve(&self, selector: u32) -> Result<&Permutation> {
        self.entries[order_index(selector)]
            .as_ref()
            .ok_or(RsckError::MissingOrderCode { code: order_code(selector), selector })
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::builtin()
    }
}
