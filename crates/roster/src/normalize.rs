//! Value normalization shared by the comparator and the analytics.

use once_cell::sync::Lazy;
use regex::Regex;
use teamnet_protocol::Generation;

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(19|20)[0-9]{2}").expect("valid regex"));
// ASCII only: `\d` would also take other scripts' digits, which never parse as a year.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Two-digit years at or above this value belong to the 1900s.
pub const PIVOT_YEAR: i32 = 50;

const MISSING_SENTINELS: [&str; 3] = ["nan", "None", "null"];

/// True when a cell carries a usable value.
///
/// Empty cells and the sentinels spreadsheet exports use for missing values
/// (`nan`, `None`, `null`) count as absent.
pub fn is_filled(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) => {
            let value = value.trim();
            !value.is_empty() && !MISSING_SENTINELS.contains(&value)
        }
    }
}

/// Extract a four-digit year from free text such as `1994`, `94` or `2021.11.30`.
///
/// A `19xx`/`20xx` token anywhere in the text wins. Otherwise the first
/// standalone two-digit number is expanded around [`PIVOT_YEAR`]. Text with
/// no plausible year yields `None`.
pub fn extract_year(raw: &str) -> Option<i32> {
    if let Some(m) = FOUR_DIGIT_YEAR.find(raw) {
        if let Ok(year) = m.as_str().parse::<i32>() {
            return Some(year);
        }
    }

    let two_digits = DIGIT_RUN.find_iter(raw).find(|m| m.as_str().len() == 2)?;
    let yy: i32 = two_digits.as_str().parse().ok()?;
    Some(if yy >= PIVOT_YEAR { 1900 + yy } else { 2000 + yy })
}

/// Same as [`extract_year`] but tolerant of absent cells.
pub fn year_of(raw: Option<&str>) -> Option<i32> {
    raw.filter(|v| is_filled(Some(v))).and_then(extract_year)
}

pub fn generation(year: i32) -> Generation {
    if year <= 1980 {
        Generation::GenX
    } else if year <= 1996 {
        Generation::Millennial
    } else {
        Generation::GenZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_two_digit_years_around_pivot() {
        assert_eq!(extract_year("94"), Some(1994));
        assert_eq!(extract_year("05"), Some(2005));
        assert_eq!(extract_year("50"), Some(1950));
        assert_eq!(extract_year("49"), Some(2049));
    }

    #[test]
    fn skips_non_ascii_digits() {
        assert_eq!(extract_year("\u{0664} 94"), Some(1994));
        assert_eq!(extract_year("\u{0967}\u{0968}"), None);
        assert_eq!(extract_year("\u{0664}1994"), Some(1994));
    }

    #[test]
    fn prefers_four_digit_tokens() {
        assert_eq!(extract_year("1994"), Some(1994));
        assert_eq!(extract_year("2021.11.30"), Some(2021));
        assert_eq!(extract_year("joined 2018.1.22"), Some(2018));
    }

    #[test]
    fn never_guesses_without_digits() {
        assert_eq!(extract_year("abcd"), None);
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("123"), None);
        assert_eq!(extract_year("1850"), None);
    }

    #[test]
    fn sentinels_are_not_filled() {
        assert!(!is_filled(None));
        assert!(!is_filled(Some("   ")));
        assert!(!is_filled(Some("nan")));
        assert!(!is_filled(Some("None")));
        assert!(!is_filled(Some("null")));
        assert!(is_filled(Some("INTP")));
    }

    #[test]
    fn year_of_skips_sentinels() {
        assert_eq!(year_of(Some("nan")), None);
        assert_eq!(year_of(Some(" 93 ")), Some(1993));
        assert_eq!(year_of(None), None);
    }

    #[test]
    fn generation_boundaries() {
        assert_eq!(generation(1980), Generation::GenX);
        assert_eq!(generation(1981), Generation::Millennial);
        assert_eq!(generation(1996), Generation::Millennial);
        assert_eq!(generation(1997), Generation::GenZ);
    }
}
