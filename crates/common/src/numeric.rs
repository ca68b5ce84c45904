//! Numeric helpers: random integers, identifiers, byte sizes and clamping.

use rand::Rng;

use crate::error::CommonError;
use crate::ports::RandomPort;

/// Units used by [`format_bytes`], in powers of 1024.
pub const BYTE_UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Default rounding precision for [`format_bytes`].
pub const DEFAULT_BYTE_DECIMALS: usize = 2;

fn check_range(min: i64, max: i64) -> Result<(), CommonError> {
    if min > max {
        return Err(CommonError::invalid_argument(format!(
            "min ({}) must not exceed max ({})",
            min, max
        )));
    }
    Ok(())
}

/// Uniform random integer in `[min, max]`, both inclusive.
///
/// # Errors
///
/// Returns [`CommonError::InvalidArgument`] when `min > max`.
pub fn random_int(min: i64, max: i64) -> Result<i64, CommonError> {
    random_int_with(&mut rand::thread_rng(), min, max)
}

/// [`random_int`] drawing from the given RNG.
pub fn random_int_with<R>(rng: &mut R, min: i64, max: i64) -> Result<i64, CommonError>
where
    R: Rng + ?Sized,
{
    check_range(min, max)?;
    Ok(rng.gen_range(min..=max))
}

/// [`random_int`] drawing from an injected [`RandomPort`].
pub fn random_int_from(random: &dyn RandomPort, min: i64, max: i64) -> Result<i64, CommonError> {
    check_range(min, max)?;
    Ok(random.gen_range(min, max))
}

/// Random version-4 UUID in hyphenated lowercase form.
///
/// Backed by the operating system's secure random source.
///
/// # Examples
///
/// ```
/// let id = snipkit_common::generate_uuid();
/// assert_eq!(id.len(), 36);
/// assert_eq!(&id[14..15], "4");
/// ```
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// [`generate_uuid`] drawing from an injected [`RandomPort`].
pub fn generate_uuid_from(random: &dyn RandomPort) -> String {
    random.gen_uuid().to_string()
}

/// Human-readable byte size with two decimals, e.g. `1.5 KB`.
///
/// # Examples
///
/// ```
/// use snipkit_common::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 Bytes");
/// assert_eq!(format_bytes(1024), "1 KB");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with_precision(bytes, DEFAULT_BYTE_DECIMALS)
}

/// Human-readable byte size rounded to `decimals` places.
///
/// Picks the largest binary unit whose scaled value is at least one, rounds
/// halves up and drops trailing zeros from the rounded number.
pub fn format_bytes_with_precision(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return format!("0 {}", BYTE_UNITS[0]);
    }

    let exponent = ((bytes.ilog2() / 10) as usize).min(BYTE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    // Halves round up; float formatting alone would round them to even
    let factor = 10f64.powi(decimals.min(f64::DIGITS as usize) as i32);
    let rounded = format!("{:.*}", decimals, (scaled * factor).round() / factor);

    format!("{} {}", trim_fraction(&rounded), BYTE_UNITS[exponent])
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// True when compiled for a browser-like (`wasm32-unknown-unknown`) host.
pub fn is_browser() -> bool {
    cfg!(all(target_arch = "wasm32", target_os = "unknown"))
}

/// Bounds `n` into `[min, max]`.
///
/// Unlike `Ord::clamp` this never panics: if `min > max`, `max` wins.
pub fn clamp<T: PartialOrd>(n: T, min: T, max: T) -> T {
    let floored = if n < min { min } else { n };
    if floored > max {
        max
    } else {
        floored
    }
}
