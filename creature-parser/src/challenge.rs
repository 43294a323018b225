//! Parsing helpers for the "challenge rating (XP)" compound field.

use std::fmt;

use crate::ParseError;

/// Split on whitespace that is not inside parentheses. Consecutive delimiters count as one.
///
/// `"1/2 (100 XP)"` becomes `["1/2", "(100 XP)"]`.
pub fn split_not_in_parens(s: &str) -> Vec<String> {
    let mut results = Vec::new();
    let mut current = String::new();
    let mut depth_closer: Option<char> = None;
    let mut in_space = false;

    for c in s.chars() {
        match depth_closer {
            None if c == '(' => depth_closer = Some(')'),
            Some(closer) if c == closer => depth_closer = None,
            _ => {}
        }
        if matches!(c, ' ' | '\r' | '\n' | '\t') && depth_closer.is_none() {
            if !in_space {
                results.push(std::mem::take(&mut current));
                in_space = true;
            }
        } else {
            in_space = false;
            current.push(c);
        }
    }
    results.push(current);
    results
}

/// Strip one layer of surrounding parentheses.
pub fn no_parens(s: &str) -> &str {
    s.strip_prefix('(').and_then(|t| t.strip_suffix(')')).unwrap_or(s)
}

/// Parse "n/d" or a plain number.
pub fn fraction_to_float(s: &str) -> Result<f64, String> {
    let parts: Vec<&str> = s.split('/').collect();
    let num = |p: &str| p.trim().parse::<f64>().map_err(|e| format!("\"{}\": {}", p, e));
    match parts.as_slice() {
        [whole] => num(whole),
        [n, d] => Ok(num(n)? / num(d)?),
        _ => Err(format!("\"{}\" has more than one '/'", s)),
    }
}

/// Split "100 XP" or "1 ft" into its number (thousands separators removed) and unit.
pub fn unit_str_to_pair(s: &str) -> Result<(f64, String), String> {
    match s.split(' ').collect::<Vec<_>>().as_slice() {
        [value, unit] => {
            let digits = value.replace(',', "");
            let v = digits.parse::<f64>().map_err(|e| format!("\"{}\": {}", value, e))?;
            Ok((v, unit.to_string()))
        }
        [value] => {
            let digits = value.replace(',', "");
            digits.parse::<f64>().map(|v| (v, String::new())).map_err(|e| format!("\"{}\": {}", value, e))
        }
        _ => Err(format!("\"{}\" is not a number and a unit separated by one space", s)),
    }
}

/// Number part of [`unit_str_to_pair`].
pub fn unit_str_to_value(s: &str) -> Result<f64, String> { unit_str_to_pair(s).map(|(v, _)| v) }

/// A challenge rating kept as an exact fraction in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeRating {
    num: i64,
    den: i64,
}

impl ChallengeRating {
    /// Used for creatures without a challenge field.
    pub const MISSING: ChallengeRating = ChallengeRating { num: -1, den: 1 };

    /// `None` for a zero denominator, or when a term does not fit once normalized.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        let g = gcd(num.checked_abs()?, den.checked_abs()?).max(1);
        let sign = if den < 0 { -1 } else { 1 };
        Some(Self { num: (num / g).checked_mul(sign)?, den: (den / g).checked_mul(sign)? })
    }

    /// Parse "10", "1/2", "1/8".
    pub fn parse(s: &str) -> Result<Self, String> {
        let int = |p: &str| p.trim().parse::<i64>().map_err(|e| format!("\"{}\": {}", p, e));
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [whole] => Ok(Self { num: int(whole)?, den: 1 }),
            [n, d] => Self::new(int(n)?, int(d)?).ok_or_else(|| format!("\"{}\" is not a usable fraction", s)),
            _ => Err(format!("\"{}\" has more than one '/'", s)),
        }
    }

    pub fn value(&self) -> f64 { self.num as f64 / self.den as f64 }

    /// "n/d", or a bare integer when the denominator is 1.
    pub fn to_fraction_string(&self) -> String {
        if self.den == 1 {
            self.num.to_string()
        } else {
            format!("{}/{}", self.num, self.den)
        }
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_fraction_string()) }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Parse a Challenge field such as `"1/2 (100 XP)"` or `"10 (5,900 XP)"` into CR and XP.
pub fn parse_challenge(raw: &str) -> Result<(ChallengeRating, i64), ParseError> {
    let fail = |reason: String| ParseError::Challenge { raw: raw.to_string(), reason };

    let parts = split_not_in_parens(raw.trim());
    let [cr_part, xp_part] = parts.as_slice() else {
        return Err(fail(format!(
            "expected 2 parts like \"# (# XP)\" but got {}",
            parts.len()
        )));
    };
    let cr = ChallengeRating::parse(cr_part).map_err(fail)?;
    if !(xp_part.starts_with('(') && xp_part.ends_with(')')) {
        return Err(fail(format!("\"{}\" is not parenthesized", xp_part)));
    }
    let (xp, unit) = unit_str_to_pair(no_parens(xp_part)).map_err(fail)?;
    if unit != "XP" {
        return Err(fail(format!("expected \"(# XP)\" after the rating but got \"{}\"", xp_part)));
    }
    Ok((cr, xp.round() as i64))
}
