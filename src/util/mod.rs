use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DURATION_PART: Regex = Regex::new(r"(\d+)(d|h|m|s)").unwrap();
}

/// Parse a duration such as `168h`, `7d`, `1h30m` or `90s`. A bare `0` is accepted as zero.
pub(crate) fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.starts_with('-') {
        return Err("duration cannot be negative".to_string());
    }
    if s == "0" {
        return Ok(Duration::zero());
    }

    let mut seconds :i64 = 0;
    let mut consumed = 0usize;
    for part in DURATION_PART.captures_iter(s) {
        let whole = part.get(0).unwrap();
        if whole.start() != consumed {
            break;
        }
        consumed = whole.end();

        let value = part[1].parse::<i64>().map_err(|e| format!("invalid duration '{}': {}", s, e))?;
        let unit :i64 = match &part[2] {
            "d" => 24 * 60 * 60,
            "h" => 60 * 60,
            "m" => 60,
            _ => 1,
        };
        seconds = value.checked_mul(unit)
            .and_then(|part_seconds| seconds.checked_add(part_seconds))
            .ok_or_else(|| format!("duration '{}' is too long", s))?;
    }

    if consumed == 0 || consumed != s.len() {
        return Err(format!("invalid duration '{}', expected e.g. 168h, 7d or 1h30m", s));
    }
    if seconds > i64::MAX / 1000 {
        return Err(format!("duration '{}' is too long", s));
    }

    Ok(Duration::seconds(seconds))
}
