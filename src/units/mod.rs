//! Numeric-with-unit values such as `"12px"` or `"0.9vw"`.
//!
//! Accepted grammar: `['-'] digits ['.' digits] [ws*] [unit]`.

use std::fmt;

/// CSS length units the editor recognizes, in lookup order.
pub const CSS_UNITS: [CssUnit; 8] = [
    CssUnit::Px,
    CssUnit::Rem,
    CssUnit::Em,
    CssUnit::Vw,
    CssUnit::Vh,
    CssUnit::Percent,
    CssUnit::Pt,
    CssUnit::Ch,
];

const STEP_PRECISION: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CssUnit {
    #[default]
    Px,
    Rem,
    Em,
    Vw,
    Vh,
    Percent,
    Pt,
    Ch,
}

impl CssUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Vw => "vw",
            Self::Vh => "vh",
            Self::Percent => "%",
            Self::Pt => "pt",
            Self::Ch => "ch",
        }
    }

    /// Case-insensitive lookup against the allowlist.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let lowered = suffix.to_ascii_lowercase();
        CSS_UNITS
            .into_iter()
            .find(|unit| unit.as_str() == lowered)
    }
}

impl fmt::Display for CssUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number extracted from field text plus the unit it resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitValue {
    pub number: f64,
    pub unit: CssUnit,
}

impl UnitValue {
    pub const fn new(number: f64, unit: CssUnit) -> Self {
        Self { number, unit }
    }

    pub fn numeric_text(&self) -> String {
        format_number(self.number)
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.number), self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    Sign,
    Integer,
    Point,
    Fraction,
    Gap,
    Suffix,
}

/// Splits `raw` into number and unit. Unrecognized suffixes resolve to
/// `fallback`; text outside the grammar yields `None`.
pub fn parse_value_and_unit(raw: &str, fallback: CssUnit) -> Option<UnitValue> {
    let mut state = ScanState::Start;
    let mut number_end = 0;
    let mut suffix_start = raw.len();
    let mut saw_digit = false;

    for (index, c) in raw.char_indices() {
        state = match (state, c) {
            (ScanState::Start, '-') => ScanState::Sign,
            (ScanState::Start | ScanState::Sign | ScanState::Integer, '0'..='9') => {
                saw_digit = true;
                ScanState::Integer
            }
            (ScanState::Start | ScanState::Sign | ScanState::Integer, '.') => ScanState::Point,
            (ScanState::Point | ScanState::Fraction, '0'..='9') => {
                saw_digit = true;
                ScanState::Fraction
            }
            (ScanState::Integer | ScanState::Point | ScanState::Fraction, c)
                if c.is_whitespace() =>
            {
                number_end = index;
                ScanState::Gap
            }
            (ScanState::Gap, c) if c.is_whitespace() => ScanState::Gap,
            (ScanState::Integer | ScanState::Point | ScanState::Fraction, c)
                if is_suffix_char(c) =>
            {
                number_end = index;
                suffix_start = index;
                ScanState::Suffix
            }
            (ScanState::Gap, c) if is_suffix_char(c) => {
                suffix_start = index;
                ScanState::Suffix
            }
            (ScanState::Suffix, c) if is_suffix_char(c) => ScanState::Suffix,
            _ => return None,
        };
    }

    match state {
        ScanState::Integer | ScanState::Point | ScanState::Fraction => number_end = raw.len(),
        ScanState::Gap | ScanState::Suffix => {}
        ScanState::Start | ScanState::Sign => return None,
    }
    if !saw_digit {
        return None;
    }

    let number = raw[..number_end].parse::<f64>().ok()?;
    let unit = CssUnit::from_suffix(&raw[suffix_start..]).unwrap_or(fallback);
    Some(UnitValue::new(number, unit))
}

fn is_suffix_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '%'
}

/// Reads the longest numeric prefix of `raw`, ignoring leading whitespace and
/// anything after the number (`"12abc"` reads as 12).
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut best = None;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let mantissa_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if trimmed[mantissa_start..end].bytes().any(|b| b.is_ascii_digit()) {
        best = Some(end);
        if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if exp_end < bytes.len() && matches!(bytes[exp_end], b'-' | b'+') {
                exp_end += 1;
            }
            let digits_start = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > digits_start {
                best = Some(exp_end);
            }
        }
    }

    best.and_then(|end| trimmed[..end].parse::<f64>().ok())
}

/// Shortest decimal text for `value`: `12.0` prints as `12`, `-0` as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Drops binary noise from repeated fractional steps (`0.7 + 0.1`).
/// Values too large to scale come back unchanged.
pub fn round_step_result(value: f64) -> f64 {
    let scaled = value * STEP_PRECISION;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / STEP_PRECISION;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Clamps `value` to whichever bounds are present.
pub fn clamp_to_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let lower = min.map_or(value, |min| value.max(min));
    max.map_or(lower, |max| lower.min(max))
}
