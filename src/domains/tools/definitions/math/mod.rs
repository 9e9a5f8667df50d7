//! Arithmetic tools.
//!
//! Neither tool needs the remote service, so both keep working without a
//! Firecrawl credential.

pub mod add;
pub mod calculate;

pub use add::{AddParams, AddTool};
pub use calculate::{CalculateParams, CalculateTool, Operation};

/// Render a number the way JavaScript's `String(n)` does.
///
/// Plain decimal notation for exponents in `[-7, 21)`, exponent notation
/// (`1e+21`, `1.5e-7`) outside it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        // Covers -0.0 too
        "0".to_string()
    } else if value < 0.0 {
        format!("-{}", format_positive(-value))
    } else {
        format_positive(value)
    }
}

fn format_positive(value: f64) -> String {
    // `{:e}` yields the shortest round-tripping digits, e.g. "1.5e-7".
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(-n as usize))
    } else {
        let exp = n - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exp.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exp.abs())
        }
    }
}
