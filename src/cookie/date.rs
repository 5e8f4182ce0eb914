//! Legacy HTTP date formats found in cookie `Expires` attributes.
use std::borrow::Cow;

/// A single component of a [`DateFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Item {
    /// Day name, full or abbreviated, e.g. `Sun` or `Sunday`, not checked against the date.
    Weekday,
    /// Day of month, one or two digits.
    Day,
    /// Month name, full or abbreviated, e.g. `Nov` or `November`.
    Month,
    /// Year taken literally.
    Year,
    /// Two digit year, `70` to `99` are in 1900s, the rest in 2000s. Longer years are taken
    /// literally.
    ShortYear,
    /// `HH:mm:ss`.
    Time,
    /// Zone name, e.g. `GMT`, `UTC` or `PST`, optionally followed by an offset as in
    /// `GMT+09:00`, or a bare numeric offset.
    Zone,
    /// Numeric offset, e.g. `+0900`.
    Offset,
    /// One or more spaces.
    Space,
    /// Literal byte.
    Lit(u8),
}

/// Ordered date layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateFormat {
    name: &'static str,
    items: &'static [Item],
}

impl DateFormat {
    #[inline]
    pub const fn new(name: &'static str, items: &'static [Item]) -> Self {
        Self { name, items }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parse `text` into seconds since the unix epoch.
    pub fn parse(&self, text: &str) -> Option<i64> {
        let mut cursor = Cursor { bytes: text.trim().as_bytes() };
        let mut date = Date::default();

        for item in self.items {
            match item {
                Item::Weekday => {
                    lookup(&WEEKDAYS, cursor.letters())?;
                }
                Item::Day => date.day = cursor.number(1, 2).filter(|d| (1..=31).contains(d))?,
                Item::Month => date.month = lookup(&MONTHS, cursor.letters())? as u32 + 1,
                Item::Year => date.year = cursor.number(1, 4)? as i64,
                Item::ShortYear => {
                    let start = cursor.bytes.len();
                    let year = cursor.number(2, 4)? as i64;
                    date.year = match start - cursor.bytes.len() {
                        2 if year >= 70 => 1900 + year,
                        2 => 2000 + year,
                        _ => year,
                    };
                }
                Item::Time => {
                    date.hour = cursor.number(1, 2).filter(|h| *h < 24)?;
                    cursor.byte(b':')?;
                    date.minute = cursor.number(1, 2).filter(|m| *m < 60)?;
                    cursor.byte(b':')?;
                    date.second = cursor.number(1, 2).filter(|s| *s < 60)?;
                }
                Item::Zone => date.offset = cursor.zone()?,
                Item::Offset => date.offset = cursor.offset()?,
                Item::Space => {
                    cursor.byte(b' ')?;
                    while cursor.byte(b' ').is_some() { }
                }
                Item::Lit(byte) => cursor.byte(*byte)?,
            }
        }

        if !cursor.bytes.is_empty() {
            return None;
        }

        Some(date.unix_timestamp())
    }
}

/// `Sun Nov  6 08:49:37 1994`
pub const ASCTIME: DateFormat = DateFormat::new("asctime", &[
    Item::Weekday, Item::Space, Item::Month, Item::Space, Item::Day, Item::Space, Item::Time,
    Item::Space, Item::Year,
]);

/// `Sunday, 06-Nov-94 08:49:37 GMT`
pub const RFC1036: DateFormat = DateFormat::new("rfc1036", &[
    Item::Weekday, Item::Lit(b','), Item::Space, Item::Day, Item::Lit(b'-'), Item::Month,
    Item::Lit(b'-'), Item::ShortYear, Item::Space, Item::Time, Item::Space, Item::Zone,
]);

/// `Sun, 06 Nov 1994 08:49:37 GMT`
pub const RFC1123: DateFormat = DateFormat::new("rfc1123", &[
    Item::Weekday, Item::Lit(b','), Item::Space, Item::Day, Item::Space, Item::Month,
    Item::Space, Item::Year, Item::Space, Item::Time, Item::Space, Item::Zone,
]);

/// `Sun, 06-Nov-1994 08:49:37 GMT`
pub const RFC850: DateFormat = DateFormat::new("rfc850", &[
    Item::Weekday, Item::Lit(b','), Item::Space, Item::Day, Item::Lit(b'-'), Item::Month,
    Item::Lit(b'-'), Item::Year, Item::Space, Item::Time, Item::Space, Item::Zone,
]);

/// `Sun, 06 Nov 1994 08:49:37 +0000`
pub const RFC1123_OFFSET: DateFormat = DateFormat::new("rfc1123-offset", &[
    Item::Weekday, Item::Lit(b','), Item::Space, Item::Day, Item::Space, Item::Month,
    Item::Space, Item::Year, Item::Space, Item::Time, Item::Space, Item::Offset,
]);

/// `Sun, 06-Nov-1994 08:49:37 +0000`
pub const RFC850_OFFSET: DateFormat = DateFormat::new("rfc850-offset", &[
    Item::Weekday, Item::Lit(b','), Item::Space, Item::Day, Item::Lit(b'-'), Item::Month,
    Item::Lit(b'-'), Item::Year, Item::Space, Item::Time, Item::Space, Item::Offset,
]);

const LEGACY: &[DateFormat] = &[
    ASCTIME,
    RFC1036,
    RFC1123,
    RFC850,
    RFC1123_OFFSET,
    RFC850_OFFSET,
];

/// Ordered set of [`DateFormat`], the first format that parses wins.
///
/// A [`DateFormats`] is a caller owned resource, each decoding call site holds its own set and
/// passes it to [`parse_with`].
///
/// [`parse_with`]: super::parse_with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormats {
    formats: Cow<'static, [DateFormat]>,
}

impl DateFormats {
    /// Legacy formats: asctime, RFC1036, then RFC1123 and RFC850 with zone names and with
    /// numeric offsets.
    #[inline]
    pub const fn legacy() -> Self {
        Self { formats: Cow::Borrowed(LEGACY) }
    }

    #[inline]
    pub fn new(formats: Vec<DateFormat>) -> Self {
        Self { formats: Cow::Owned(formats) }
    }

    #[inline]
    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Parse `text` into seconds since the unix epoch, with the first matching format.
    pub fn parse(&self, text: &str) -> Option<i64> {
        self.formats.iter().find_map(|format| format.parse(text))
    }
}

impl Default for DateFormats {
    #[inline]
    fn default() -> Self {
        Self::legacy()
    }
}

// ===== Parsing =====

const WEEKDAYS: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
];

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Match full or three letter abbreviated names, ignoring case.
fn lookup(names: &[&str], word: &[u8]) -> Option<usize> {
    if word.len() < 3 {
        return None;
    }
    names.iter().position(|name| {
        let name = name.as_bytes();
        (word.len() == 3 || word.len() == name.len()) && name[..word.len()].eq_ignore_ascii_case(word)
    })
}

#[derive(Debug)]
struct Cursor<'a> {
    bytes: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn byte(&mut self, expected: u8) -> Option<()> {
        match self.bytes {
            [byte, rest @ ..] if *byte == expected => {
                self.bytes = rest;
                Some(())
            }
            _ => None,
        }
    }

    fn letters(&mut self) -> &'a [u8] {
        self.take_while(u8::is_ascii_alphabetic)
    }

    fn number(&mut self, min: usize, max: usize) -> Option<u32> {
        let digits = self.take_while(u8::is_ascii_digit);
        if !(min..=max).contains(&digits.len()) {
            return None;
        }
        Some(digits.iter().fold(0, |acc, d| acc * 10 + (d - b'0') as u32))
    }

    fn take_while(&mut self, f: impl Fn(&u8) -> bool) -> &'a [u8] {
        let n = self.bytes.iter().position(|b| !f(b)).unwrap_or(self.bytes.len());
        let (taken, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        taken
    }

    /// Seconds east of UTC.
    fn zone(&mut self) -> Option<i64> {
        let name = self.letters();
        let base = match name.to_ascii_uppercase().as_slice() {
            b"" => return self.offset(),
            b"GMT" | b"UTC" | b"UT" | b"Z" => 0,
            b"EDT" => -4,
            b"EST" | b"CDT" => -5,
            b"CST" | b"MDT" => -6,
            b"MST" | b"PDT" => -7,
            b"PST" => -8,
            _ => return None,
        };
        if base == 0 && matches!(self.bytes.first(), Some(b'+' | b'-')) {
            return self.offset();
        }
        Some(base * 3600)
    }

    /// `+hhmm`, `+hh:mm` or `+hh`.
    fn offset(&mut self) -> Option<i64> {
        let sign = match *self.bytes.first()? {
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };
        self.bytes = &self.bytes[1..];

        let digits = self.take_while(u8::is_ascii_digit);
        let (hours, minutes) = match digits {
            [h1, h2, m1, m2] => (two_digits(*h1, *h2), two_digits(*m1, *m2)),
            [h1, h2] => match self.byte(b':') {
                Some(()) => (two_digits(*h1, *h2), self.number(2, 2)?),
                None => (two_digits(*h1, *h2), 0),
            },
            _ => return None,
        };

        if hours > 23 || minutes > 59 {
            return None;
        }

        Some(sign * (hours as i64 * 3600 + minutes as i64 * 60))
    }
}

const fn two_digits(tens: u8, ones: u8) -> u32 {
    ((tens - b'0') * 10 + (ones - b'0')) as u32
}

#[derive(Debug)]
struct Date {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    offset: i64,
}

impl Default for Date {
    fn default() -> Self {
        Self { year: 1970, month: 1, day: 1, hour: 0, minute: 0, second: 0, offset: 0 }
    }
}

impl Date {
    fn unix_timestamp(&self) -> i64 {
        let days = days_from_civil(self.year, self.month, self.day);
        let secs = self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64;
        days * 86400 + secs - self.offset
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
///
/// Days past the end of a month roll over into the next one.
///
/// [source](https://howardhinnant.github.io/date_algorithms.html#days_from_civil)
const fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    /* 0000-03-01, shifted so leap day is the last day of the year */

    const DAYS_PER_400Y: i64 = 365 * 400 + 97;
    const UNIX_EPOCH_DAYS: i64 = 719468;

    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = year - era * 400;

    // March is 0
    let month = (month as i64 + 9) % 12;
    let day_of_year = (153 * month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * DAYS_PER_400Y + day_of_era - UNIX_EPOCH_DAYS
}

#[cfg(test)]
mod test {
    use super::*;

    const NOV_6_1994: i64 = 784111777;

    #[test]
    fn test_days_from_civil() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 3, 1), 11017);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2021, 2, 29), days_from_civil(2021, 3, 1));
    }

    #[test]
    fn test_legacy_formats() {
        let formats = DateFormats::legacy();
        assert_eq!(formats.parse("Sun Nov  6 08:49:37 1994"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sunday, 06-Nov-94 08:49:37 GMT"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06 Nov 1994 08:49:37 GMT"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06-Nov-1994 08:49:37 GMT"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06 Nov 1994 08:49:37 +0000"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06-Nov-1994 08:49:37 -0000"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Wed, 09-Jun-2021 10:18:14 GMT"), Some(1623233894));
    }

    #[test]
    fn test_zones() {
        let formats = DateFormats::legacy();
        assert_eq!(formats.parse("Sun, 06 Nov 1994 00:49:37 PST"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06 Nov 1994 17:49:37 GMT+09:00"), Some(NOV_6_1994));
        assert_eq!(formats.parse("sun, 06 nov 1994 10:49:37 +0200"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06 Nov 1994 08:49:37 CEST"), None);
    }

    #[test]
    fn test_short_year() {
        assert_eq!(RFC1036.parse("Thu, 01-Jan-70 00:00:00 GMT"), Some(0));
        assert_eq!(RFC1036.parse("Sat, 01-Jan-00 00:00:00 GMT"), Some(946684800));
    }

    #[test]
    fn test_rejects() {
        let formats = DateFormats::legacy();
        assert_eq!(formats.parse(""), None);
        assert_eq!(formats.parse("tomorrow"), None);
        assert_eq!(formats.parse("Sun, 06 Nov 1994 25:49:37 GMT"), None);
        assert_eq!(formats.parse("Sun, 32 Nov 1994 08:49:37 GMT"), None);
        assert_eq!(formats.parse("Sun, 06 Nov 1994 08:49:37 GMT trailing"), None);
        assert_eq!(formats.parse("Su, 06 Nov 1994 08:49:37 GMT"), None);
    }

    #[test]
    fn test_custom_formats() {
        let formats = DateFormats::new(vec![ASCTIME]);
        assert_eq!(formats.formats().len(), 1);
        assert_eq!(formats.parse("Sun Nov  6 08:49:37 1994"), Some(NOV_6_1994));
        assert_eq!(formats.parse("Sun, 06 Nov 1994 08:49:37 GMT"), None);
    }
}
