use chrono::{Datelike, NaiveDate};

/// Width of the date field embedded in every key.
pub const DATE_CODE_BITS: u32 = 14;

/// Largest value [`date_code`] can produce: day 366 of the last year before
/// the code wraps.
pub const MAX_DATE_CODE: u16 = 365 + 366 * 39;

/// Maps a calendar date to its 14-bit code:
/// `(day_of_year - 1) + 366 * (year mod 40)`.
///
/// The code is deterministic and wraps with a 40-year period: two dates the
/// same day of year and exactly 40 years apart collide. No timezone handling
/// happens here; callers supply a date already adjusted to the operative
/// zone.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use keyprefix::date_code;
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// assert_eq!(date_code(date), 8418);
/// ```
#[must_use]
pub fn date_code(date: NaiveDate) -> u16 {
    let year = date.year().rem_euclid(40) as u16;
    (date.ordinal() as u16 - 1) + 366 * year
}

/// Current date in UTC, used by the date-less generation conveniences.
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn known_date_codes() {
        assert_eq!(date_code(date(2023, 1, 1)), 8418);
        assert_eq!(date_code(date(2024, 1, 1)), 8784);
        assert_eq!(date_code(date(2024, 12, 31)), 9149);
        // Leap day of a year divisible by 40.
        assert_eq!(date_code(date(2000, 2, 29)), 59);
        assert_eq!(date_code(date(1999, 12, 31)), 14638);
    }

    #[test]
    fn codes_stay_within_fourteen_bits() {
        // Sweep one full wrap period a week at a time.
        let mut d = date(2000, 1, 1);
        let end = date(2040, 1, 1);
        while d < end {
            let code = date_code(d);
            assert!(code <= MAX_DATE_CODE, "{d}: {code}");
            assert!(u32::from(code) < (1 << DATE_CODE_BITS), "{d}: {code}");
            d = d + chrono::Days::new(7);
        }
    }

    #[test]
    fn wraps_with_a_forty_year_period() {
        assert_eq!(date_code(date(1984, 3, 5)), date_code(date(2024, 3, 5)));
        assert_ne!(date_code(date(2004, 3, 5)), date_code(date(2024, 3, 5)));
    }
}
