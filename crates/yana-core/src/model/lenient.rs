//! Field decoders for blobs written by older builds.
//!
//! Earlier builds wrote `null` for fields they had not filled in yet. Those
//! decode to the field's default instead of failing the whole blob.

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a version code from any JSON number or `null`.
///
/// `null` and negative codes decode to `0`, which no supported minimum
/// accepts. Fractions round down and codes above `u32::MAX` saturate.
pub(crate) fn version_code<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(code) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(0);
    };

    if !code.is_finite() || code < 0.0 {
        return Ok(0);
    }
    // Float-to-int `as` saturates at the target bounds.
    Ok(code.floor() as u32)
}
