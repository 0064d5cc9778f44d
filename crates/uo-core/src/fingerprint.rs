use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct FingerprintOptions {
    /// Object keys dropped at every depth, e.g. timestamps.
    pub ignore_object_keys: BTreeSet<String>,
}

impl FingerprintOptions {
    pub fn ignoring<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_object_keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// JSON bytes with object keys sorted at every depth.
pub fn canonical_json_bytes(value: &Value, options: &FingerprintOptions) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    write_canonical(value, options, &mut out)?;
    Ok(out)
}

/// Hex SHA-256 over the canonical JSON form.
pub fn fingerprint_hex(value: &Value, options: &FingerprintOptions) -> serde_json::Result<String> {
    let bytes = canonical_json_bytes(value, options)?;
    Ok(format!("{:x}", Sha256::digest(bytes)))
}

fn write_canonical(value: &Value, options: &FingerprintOptions, out: &mut Vec<u8>) -> serde_json::Result<()> {
    match value {
        Value::Object(object) => {
            let ordered = object
                .iter()
                .filter(|(key, _)| !options.ignore_object_keys.contains(*key))
                .collect::<BTreeMap<_, _>>();
            out.push(b'{');
            for (position, (key, item)) in ordered.into_iter().enumerate() {
                if position > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_canonical(item, options, out)?;
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (position, item) in items.iter().enumerate() {
                if position > 0 {
                    out.push(b',');
                }
                write_canonical(item, options, out)?;
            }
            out.push(b']');
        }
        scalar => serde_json::to_writer(&mut *out, scalar)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
