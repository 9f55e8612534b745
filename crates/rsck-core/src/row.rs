// crates/rsck-core/src/row.rs
//
// CSV rendering of matches.

use std::io::Write;

use crate::error::Result;
use crate::key::Identity;
use crate::matcher::SlotMatch;

pub const CSV_HEADER: &str =
    "Player frame,Enemy Frame,Player TID/SID,Enemy TID/SID,Species,Held Item,Moves,Pokeball,Egg,Enemy Mon";

/// `0x` + the low `bytes` bytes of `value` as zero-padded lower-case hex.
/// Widths past 8 bytes pad with zeros.
pub fn hex_field(value: u64, bytes: usize) -> String {
    let digits = bytes * 2;
    let masked = if bytes >= 8 { value } else { value & ((1u64 << (bytes * 8)) - 1) };
    format!("0x{masked:0digits$x}")
}

#[inline]
fn lo16(v: u32) -> u64 {
    u64::from(v & 0xFFFF)
}

#[inline]
fn hi16(v: u32) -> u64 {
    u64::from(v >> 16)
}

/// One reported match.
#[derive(Clone, Copy, Debug)]
pub struct MatchRow<'a> {
    pub player_frame: usize,
    pub enemy_frame: usize,
    pub player: Identity,
    /// Enemy identity as used for its key (row halves already exchanged).
    pub enemy: Identity,
    pub hit: SlotMatch,
    pub candidate: &'a str,
}

impl MatchRow<'_> {
    pub fn to_csv(&self) -> String {
        let r = &self.hit.result;
        let [m3, m4] = r.move_words;
        format!(
            "{},{},{} {},{} {},{},{},{} {} {} {},{},{},{}",
            self.player_frame,
            self.enemy_frame,
            self.player.tid,
            self.player.sid,
            self.enemy.tid,
            self.enemy.sid,
            hex_field(lo16(r.species_word), 2),
            hex_field(hi16(r.species_word), 2),
            hex_field(lo16(m3), 2),
            hex_field(hi16(m3), 2),
            hex_field(lo16(m4), 2),
            hex_field(hi16(m4), 2),
            self.hit.container,
            u8::from(r.egg()),
            self.candidate
        )
    }
}

/// Destination for match rows. Each search task owns its sinks.
pub trait RowSink {
    fn write_row(&mut self, row: &MatchRow<'_>) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl RowSink for Vec<String> {
    fn write_row(&mut self, row: &MatchRow<'_>) -> Result<()> {
        self.push(row.to_csv());
        Ok(())
    }
}

/// CSV writer: header on creation, one line per row.
pub struct CsvSink<W: Write> {
    out: W,
    rows: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out, rows: 0 })
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &MatchRow<'_>) -> Result<()> {
        writeln!(self.out, "{}", row.to_csv())?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
