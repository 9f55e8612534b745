// crates/rsck-core/src/key.rs
//
// Identity -> 32-bit key derivation.

/// Fixed personality constant every key is combined with.
pub const PID_CONSTANT: u32 = 1_321_080;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    pub tid: u16,
    pub sid: u16,
}

impl Identity {
    pub const fn new(tid: u16, sid: u16) -> Self {
        Self { tid, sid }
    }

    /// Same row read with the TID/SID halves exchanged.
    /// Enemy-side identities are stored this way round.
    pub const fn swapped(self) -> Self {
        Self { tid: self.sid, sid: self.tid }
    }

    /// SID in the high half, TID in the low half.
    #[inline]
    pub const fn packed(self) -> u32 {
        ((self.sid as u32) << 16) | self.tid as u32
    }

    #[inline]
    pub const fn key(self) -> u32 {
        PID_CONSTANT ^ self.packed()
    }
}
