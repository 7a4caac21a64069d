//! Numeral word composition.
//!
//! A run made only of digits reads positionally (`二〇二〇` is 2020). Anything
//! with units composes as in ordinary writing: `三十五`, `一百零五`,
//! `一萬二千`. Small units must strictly decrease within a section, big units
//! must strictly decrease overall.

use crate::error::LexErrorKind;

fn digit(c: char) -> Option<i64> {
    let value = match c {
        '零' | '〇' => 0,
        '一' => 1,
        '二' | '兩' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    };
    Some(value)
}

fn small_unit(c: char) -> Option<i64> {
    match c {
        '十' => Some(10),
        '百' => Some(100),
        '千' => Some(1_000),
        _ => None,
    }
}

fn big_unit(c: char) -> Option<i64> {
    match c {
        '萬' => Some(10_000),
        '億' => Some(100_000_000),
        '兆' => Some(1_000_000_000_000),
        _ => None,
    }
}

/// Parse a numeral word, with an optional leading `負`.
pub fn parse(text: &str) -> Result<i64, LexErrorKind> {
    let (negative, body) = match text.strip_prefix('負') {
        Some(body) => (true, body),
        None => (false, text),
    };
    if body.is_empty() {
        return Err(LexErrorKind::InvalidNumeral);
    }

    let value = if body.chars().all(|c| digit(c).is_some()) {
        positional(body)?
    } else {
        composed(body)?
    };
    Ok(if negative { -value } else { value })
}

fn positional(body: &str) -> Result<i64, LexErrorKind> {
    body.chars()
        .filter_map(digit)
        .try_fold(0i64, |acc, d| acc.checked_mul(10)?.checked_add(d))
        .ok_or(LexErrorKind::InvalidNumeral)
}

fn composed(body: &str) -> Result<i64, LexErrorKind> {
    let overflow = || LexErrorKind::InvalidNumeral;

    let mut total = 0i64;
    let mut section = 0i64;
    let mut pending: Option<i64> = None;
    let mut last_small = i64::MAX;
    let mut last_big = i64::MAX;

    for c in body.chars() {
        if let Some(d) = digit(c) {
            if pending.is_some() {
                return Err(LexErrorKind::InvalidNumeral);
            }
            // 零 between units is a filler.
            if d != 0 {
                pending = Some(d);
            }
        } else if let Some(unit) = small_unit(c) {
            if unit >= last_small {
                return Err(LexErrorKind::InvalidNumeral);
            }
            let count = pending.take().unwrap_or(1);
            section = section
                .checked_add(count * unit)
                .ok_or_else(overflow)?;
            last_small = unit;
        } else if let Some(unit) = big_unit(c) {
            if unit >= last_big {
                return Err(LexErrorKind::InvalidNumeral);
            }
            let value = section + pending.take().unwrap_or(0);
            if value == 0 {
                return Err(LexErrorKind::InvalidNumeral);
            }
            total = value
                .checked_mul(unit)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(overflow)?;
            section = 0;
            last_small = i64::MAX;
            last_big = unit;
        } else {
            return Err(LexErrorKind::InvalidNumeral);
        }
    }

    total
        .checked_add(section + pending.unwrap_or(0))
        .ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digits() {
        assert_eq!(parse("零"), Ok(0));
        assert_eq!(parse("三"), Ok(3));
        assert_eq!(parse("兩"), Ok(2));
    }

    #[test]
    fn test_positional_runs() {
        assert_eq!(parse("二〇二〇"), Ok(2020));
        assert_eq!(parse("一二三"), Ok(123));
    }

    #[test]
    fn test_units() {
        assert_eq!(parse("十"), Ok(10));
        assert_eq!(parse("十二"), Ok(12));
        assert_eq!(parse("三十五"), Ok(35));
        assert_eq!(parse("一百零五"), Ok(105));
        assert_eq!(parse("九千九百九十九"), Ok(9999));
    }

    #[test]
    fn test_big_units() {
        assert_eq!(parse("一萬二千"), Ok(12_000));
        assert_eq!(parse("三億零五萬"), Ok(300_050_000));
        assert_eq!(parse("千萬"), Ok(10_000_000));
        assert_eq!(parse("二兆"), Ok(2_000_000_000_000));
    }

    #[test]
    fn test_negative() {
        assert_eq!(parse("負三"), Ok(-3));
        assert_eq!(parse("負十二"), Ok(-12));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse("十十"), Err(LexErrorKind::InvalidNumeral));
        assert_eq!(parse("十百"), Err(LexErrorKind::InvalidNumeral));
        assert_eq!(parse("二三十"), Err(LexErrorKind::InvalidNumeral));
        assert_eq!(parse("萬"), Err(LexErrorKind::InvalidNumeral));
        assert_eq!(parse("萬萬"), Err(LexErrorKind::InvalidNumeral));
        assert_eq!(parse("負"), Err(LexErrorKind::InvalidNumeral));
    }
}
