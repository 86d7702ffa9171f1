//! Full-fidelity JSON export.

use std::io::Write;

use personagen_core::Person;

use crate::errors::GenerateError;

/// Writes the whole batch as one pretty-printed JSON array; returns bytes
/// written.
pub fn write_json<W: Write>(mut writer: W, people: &[Person]) -> Result<u64, GenerateError> {
    let bytes = serde_json::to_vec_pretty(people)?;
    writer.write_all(&bytes)?;
    writer.write_all(b"\n")?;
    Ok(bytes.len() as u64 + 1)
}

/// Writes one JSON object per line; returns bytes written.
pub fn write_ndjson<W: Write>(mut writer: W, people: &[Person]) -> Result<u64, GenerateError> {
    let mut total = 0_u64;
    for person in people {
        let bytes = serde_json::to_vec(person)?;
        writer.write_all(&bytes)?;
        writer.write_all(b"\n")?;
        total += bytes.len() as u64 + 1;
    }
    Ok(total)
}
