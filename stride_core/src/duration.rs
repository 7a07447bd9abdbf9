//! Compound duration parsing.
//!
//! Accepts strings such as `0h50m`, `3h00m`, `1.5h` or `1h30m15s`: an optional
//! sign followed by one or more `<decimal><unit>` pairs. Units are `ns`, `us`
//! (also `µs`/`μs`), `ms`, `s`, `m` and `h`. The bare string `0` is zero.

use crate::{Error, Result};
use chrono::Duration;

const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

/// Parse a compound duration string into a `chrono::Duration`
///
/// The result may be zero or negative; rejecting those is left to the caller.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = |reason: &str| Error::InvalidDuration(format!("{:?}: {}", input, reason));

    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        // Integer part
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        // Optional fraction
        let (frac_digits, after_frac) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after_frac
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(after_frac.len());
        let (unit, tail) = after_frac.split_at(unit_len);

        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            "" => return Err(invalid("missing unit")),
            other => return Err(invalid(&format!("unknown unit {:?}", other))),
        };

        total = total
            .checked_add(scaled(int_digits, frac_digits, scale).ok_or_else(|| invalid("overflow"))?)
            .ok_or_else(|| invalid("overflow"))?;
        rest = tail;
    }

    if negative {
        total = -total;
    }

    let nanos = i64::try_from(total).map_err(|_| invalid("overflow"))?;
    Ok(Duration::nanoseconds(nanos))
}

/// Value of `<int>.<frac>` units expressed in nanoseconds, truncating below 1ns
fn scaled(int_digits: &str, frac_digits: &str, scale: i128) -> Option<i128> {
    let mut value: i128 = 0;
    for d in int_digits.bytes() {
        value = value.checked_mul(10)?.checked_add(i128::from(d - b'0'))?;
        // Anything past i64 nanoseconds will be rejected anyway
        if value > i128::from(i64::MAX) {
            return None;
        }
    }
    let mut nanos = value.checked_mul(scale)?;

    let mut divisor: i128 = 1;
    let mut frac: i128 = 0;
    for d in frac_digits.bytes() {
        // Digits beyond nanosecond resolution of an hour cannot matter
        if divisor >= 1_000_000_000_000_000_000 {
            break;
        }
        frac = frac * 10 + i128::from(d - b'0');
        divisor *= 10;
    }
    nanos = nanos.checked_add(frac * scale / divisor)?;
    Some(nanos)
}
