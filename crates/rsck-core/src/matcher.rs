// crates/rsck-core/src/matcher.rs
//
// Checksum comparison over the 12-slot working buffer, plus the container
// sweep that patches slot 9 before each comparison.

use crate::order::{Permutation, WORD_COUNT};

pub type WorkingBuffer = [u32; WORD_COUNT];

/// Species value (low half of key ^ slot 0) marking a special outcome.
pub const SPECIAL_SPECIES: u32 = 39_710;

pub const CONTAINER_SLOT: usize = 9;
pub const CONTAINER_SHIFT: u32 = 27;
/// Bits of slot 9 that survive a container patch (bit 31 and bits 26..0).
pub const CONTAINER_KEEP_MASK: u32 = 0x87FF_FFFF;
pub const CONTAINER_MIN: u8 = 1;
pub const CONTAINER_MAX: u8 = 12;

const EGG_BIT: u32 = 30;

/// Fill a working buffer from a candidate's 12 words.
pub fn build_buffer(words: &[u32; WORD_COUNT], perm: &Permutation) -> WorkingBuffer {
    let mut buf = [0u32; WORD_COUNT];
    for (slot, &src) in buf.iter_mut().zip(perm.iter()) {
        *slot = words[src];
    }
    buf
}

#[inline]
fn fold(x: u32) -> u32 {
    (x & 0xFFFF) + (x >> 16)
}

/// 16-bit folding checksum: both halves of every slot, summed mod 2^16.
#[inline]
pub fn fold_checksum(buf: &WorkingBuffer) -> u16 {
    buf.iter().fold(0u32, |acc, &s| acc.wrapping_add(fold(s))) as u16
}

/// Same checksum as `fold_checksum`, computed over `key ^ slot`.
#[inline]
pub fn keyed_checksum(buf: &WorkingBuffer, key: u32) -> u16 {
    buf.iter().fold(0u32, |acc, &s| acc.wrapping_add(fold(key ^ s))) as u16
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    pub special: bool,
    /// key ^ slot 0: species in the low half, held item in the high half.
    pub species_word: u32,
    /// key ^ slot 3 and key ^ slot 4.
    pub move_words: [u32; 2],
    /// key ^ slot 10.
    pub egg_word: u32,
}

impl MatchResult {
    pub const NONE: MatchResult = MatchResult {
        matched: false,
        special: false,
        species_word: 0,
        move_words: [0, 0],
        egg_word: 0,
    };

    pub fn species(&self) -> u16 {
        self.species_word as u16
    }

    pub fn held_item(&self) -> u16 {
        (self.species_word >> 16) as u16
    }

    pub fn egg(&self) -> bool {
        (self.egg_word >> EGG_BIT) & 1 == 1
    }
}

/// Compare the unmodified checksum with the checksum under
/// `player_key ^ enemy_key`.
pub fn check(buf: &WorkingBuffer, player_key: u32, enemy_key: u32) -> MatchResult {
    let key = player_key ^ enemy_key;
    if fold_checksum(buf) != keyed_checksum(buf, key) {
        return MatchResult::NONE;
    }

    let species_word = key ^ buf[0];
    MatchResult {
        matched: true,
        special: species_word & 0xFFFF == SPECIAL_SPECIES,
        species_word,
        move_words: [key ^ buf[3], key ^ buf[4]],
        egg_word: key ^ buf[10],
    }
}

/// Overwrite bits 30..27 with `index`, keep everything else.
#[inline]
pub fn patch_container(word: u32, index: u8) -> u32 {
    (word & CONTAINER_KEEP_MASK) | (((index as u32) & 0xF) << CONTAINER_SHIFT)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotMatch {
    pub container: u8,
    pub result: MatchResult,
}

/// Sweep container indices 1..=12 through slot 9 and stop at the first
/// index that matches. Later indices are never tried once one matches.
///
/// Slot 9 is left holding the last index tried.
pub fn search_containers(buf: &mut WorkingBuffer, player_key: u32, enemy_key: u32) -> Option<SlotMatch> {
    for container in CONTAINER_MIN..=CONTAINER_MAX {
        buf[CONTAINER_SLOT] = patch_container(buf[CONTAINER_SLOT], container);
        let result = check(buf, player_key, enemy_key);
        if result.matched {
            return Some(SlotMatch { container, result });
        }
    }
    None
}
