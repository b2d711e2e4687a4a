//! Grammars of the raw column values
//!
//! Every parser returns the reason of the failure as a `String`, the decoder adds the
//! table, column and line to build an [crate::Error::InvalidValue].
use chrono::NaiveDate;
use rgb::RGB8;

pub fn parse_integer(s: &str) -> Result<i64, String> {
    s.parse()
        .map_err(|_| "an integer is expected".to_owned())
}

pub fn parse_float(s: &str) -> Result<f64, String> {
    let grammar_ok = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    match s.parse::<f64>() {
        Ok(f) if grammar_ok && f.is_finite() => Ok(f),
        _ => Err("a decimal number is expected".to_owned()),
    }
}

pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err("expected 0 or 1".to_owned()),
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|e| format!("YYYYMMDD expected ({})", e))
}

fn parse_time_impl(h: &str, m: &str, s: &str) -> Option<u32> {
    let number = |part: &str| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse::<u32>().ok()
    };
    let hours = number(h)?;
    let minutes = number(m).filter(|m| *m < 60)?;
    let seconds = number(s).filter(|s| *s < 60)?;
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Number of seconds since the start of the service day. Can exceed 24:00:00
pub fn parse_time(s: &str) -> Result<u32, String> {
    let len = s.len();
    let invalid = || "HH:MM:SS format is expected".to_owned();

    if !(7..=8).contains(&len) || !s.is_ascii() || &s[len - 3..len - 2] != ":" || &s[len - 6..len - 5] != ":" {
        Err(invalid())
    } else {
        let sec = &s[len - 2..];
        let min = &s[len - 5..len - 3];
        let hour = &s[..len - 6];
        parse_time_impl(hour, min, sec).ok_or_else(invalid)
    }
}

/// Parses a `RRGGBB` colour, without a leading `#`
pub fn parse_color(s: &str) -> Result<RGB8, String> {
    let invalid = || "RRGGBB format is expected, without a leading `#`".to_owned();
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| invalid())?;
    Ok(RGB8::new(r, g, b))
}

pub fn default_route_color() -> RGB8 {
    RGB8::new(255, 255, 255)
}
