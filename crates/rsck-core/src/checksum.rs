// crates/rsck-core/src/checksum.rs
//
// Output fingerprints, so two runs can be compared without diffing CSVs.

use std::io::Read;

use crate::error::Result;

pub fn crc32(bytes: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new();
    h.update(bytes);
    h.finalize()
}

/// CRC-32 of everything `r` yields, plus the byte count.
pub fn crc32_reader<R: Read>(mut r: R) -> Result<(u32, u64)> {
    let mut h = crc32fast::Hasher::new();
    let mut buf = [0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let n = r.read(&mut buf)?;
        if n == 0 {
            break;
        }
        h.update(&buf[..n]);
        total += n as u64;
    }
    Ok((h.finalize(), total))
}
