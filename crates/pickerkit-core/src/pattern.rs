//! Date patterns.
//!
//! A [`DatePattern`] compiles a display pattern written in the familiar
//! letter syntax (`dd/MM/yyyy HH:mm`) into chrono format items. The same
//! compiled pattern parses submitted text into a [`DateValue`] and formats
//! values back to text.
//!
//! # Supported letters
//!
//! | Letter | Field | Counts |
//! |--------|-------|--------|
//! | `y`, `u` | year | `yy` two digits, anything else four |
//! | `M`, `L` | month | 1-2 numeric, 3 short name, 4+ long name |
//! | `d` | day of month | 1 unpadded, 2 padded |
//! | `E` | weekday | 1-3 short name, 4+ long name |
//! | `H` | hour 0-23 | 1 unpadded, 2 padded |
//! | `h` | hour 1-12 | 1 unpadded, 2 padded |
//! | `m` | minute | 1 unpadded, 2 padded |
//! | `s` | second | 1 unpadded, 2 padded |
//! | `S` | fraction of second | 1-9 digits shown |
//! | `a` | AM/PM marker | any |
//!
//! Text between single quotes is literal and `''` is a literal quote.
//!
//! Parsing is lenient about widths: numbers may drop their padding and a
//! fraction may carry 1 to 9 digits. Month and weekday names and AM/PM
//! markers are accepted in the given locale and in English.
//!
//! # Example
//!
//! ```rust
//! use pickerkit_core::{DatePattern, DateValue, Locale};
//! use chrono::NaiveDate;
//!
//! let pattern = DatePattern::new("dd/MM/yyyy").unwrap();
//! let value = pattern.parse("10/01/2024").unwrap();
//! assert_eq!(value, DateValue::Date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
//! assert_eq!(pattern.format(&value, Locale::POSIX), "10/01/2024");
//! ```

use std::fmt;

use chrono::format::{ParseResult, Parsed, StrftimeItems, parse_and_remainder};
use chrono::{Datelike, Locale, NaiveDateTime, NaiveTime, Timelike, Weekday};
use tracing::trace;

use crate::error::{ConvertError, ConvertResult, PatternError};
use crate::value::{DateValue, TemporalKind, anchor_date};

/// A single field of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year4,
    Year2,
    MonthNumber { padded: bool },
    MonthShort,
    MonthLong,
    Day { padded: bool },
    WeekdayShort,
    WeekdayLong,
    Hour24 { padded: bool },
    Hour12 { padded: bool },
    Minute { padded: bool },
    Second { padded: bool },
    Fraction { digits: u8 },
    AmPm,
}

impl Field {
    fn from_letter(letter: char, count: usize) -> Option<Self> {
        let padded = count >= 2;
        let field = match letter {
            'y' | 'u' if count == 2 => Self::Year2,
            'y' | 'u' => Self::Year4,
            'M' | 'L' => match count {
                1 | 2 => Self::MonthNumber { padded },
                3 => Self::MonthShort,
                _ => Self::MonthLong,
            },
            'd' => Self::Day { padded },
            'E' if count >= 4 => Self::WeekdayLong,
            'E' => Self::WeekdayShort,
            'H' => Self::Hour24 { padded },
            'h' => Self::Hour12 { padded },
            'm' => Self::Minute { padded },
            's' => Self::Second { padded },
            'S' => Self::Fraction {
                digits: count.min(9) as u8,
            },
            'a' => Self::AmPm,
            _ => return None,
        };
        Some(field)
    }

    fn is_time(&self) -> bool {
        matches!(
            self,
            Self::Hour24 { .. }
                | Self::Hour12 { .. }
                | Self::Minute { .. }
                | Self::Second { .. }
                | Self::Fraction { .. }
                | Self::AmPm
        )
    }

    fn is_name(&self) -> bool {
        matches!(
            self,
            Self::MonthShort | Self::MonthLong | Self::WeekdayShort | Self::WeekdayLong | Self::AmPm
        )
    }

    fn strftime(&self) -> &'static str {
        match self {
            Self::Year4 => "%Y",
            Self::Year2 => "%y",
            Self::MonthNumber { padded: true } => "%m",
            Self::MonthNumber { padded: false } => "%-m",
            Self::MonthShort => "%b",
            Self::MonthLong => "%B",
            Self::Day { padded: true } => "%d",
            Self::Day { padded: false } => "%-d",
            Self::WeekdayShort => "%a",
            Self::WeekdayLong => "%A",
            Self::Hour24 { padded: true } => "%H",
            Self::Hour24 { padded: false } => "%-H",
            Self::Hour12 { padded: true } => "%I",
            Self::Hour12 { padded: false } => "%-I",
            Self::Minute { padded: true } => "%M",
            Self::Minute { padded: false } => "%-M",
            Self::Second { padded: true } => "%S",
            Self::Second { padded: false } => "%-S",
            Self::Fraction { digits: 3 } => "%3f",
            Self::Fraction { digits: 6 } => "%6f",
            Self::Fraction { .. } => "%9f",
            Self::AmPm => "%p",
        }
    }

    /// Token in the widget runtime's date format, `None` for time fields.
    fn client_token(&self) -> Option<&'static str> {
        let token = match self {
            Self::Year4 => "yy",
            Self::Year2 => "y",
            Self::MonthNumber { padded: true } => "mm",
            Self::MonthNumber { padded: false } => "m",
            Self::MonthShort => "M",
            Self::MonthLong => "MM",
            Self::Day { padded: true } => "dd",
            Self::Day { padded: false } => "d",
            Self::WeekdayShort => "D",
            Self::WeekdayLong => "DD",
            _ => return None,
        };
        Some(token)
    }

    /// Input mask slots, `None` for textual fields.
    fn mask(&self) -> Option<String> {
        let mask = match self {
            Self::Year4 => "9999".to_string(),
            Self::Year2
            | Self::MonthNumber { .. }
            | Self::Day { .. }
            | Self::Hour24 { .. }
            | Self::Hour12 { .. }
            | Self::Minute { .. }
            | Self::Second { .. } => "99".to_string(),
            Self::Fraction { digits } => "9".repeat(*digits as usize),
            Self::AmPm => "aa".to_string(),
            Self::MonthShort | Self::MonthLong | Self::WeekdayShort | Self::WeekdayLong => {
                return None;
            }
        };
        Some(mask)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field { field: Field, source: String },
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    tokens: Vec<Token>,
}

impl DatePattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty, uses an unsupported letter,
    /// leaves a quote open or contains no fields at all.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let tokens = tokenize(pattern)?;
        if !tokens.iter().any(|t| matches!(t, Token::Field { .. })) {
            return Err(PatternError::NoFields {
                pattern: pattern.to_string(),
            });
        }
        let compiled = Self {
            source: pattern.to_string(),
            tokens,
        };
        trace!(pattern, strftime = %compiled.strftime(), "Compiled date pattern");
        Ok(compiled)
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the closest chrono format string.
    ///
    /// Fractions of 3, 6 or 9 digits map exactly; any other width shows as
    /// `%9f` although [`DatePattern::format`] prints the declared digits.
    pub fn strftime(&self) -> String {
        to_strftime(&self.tokens)
    }

    fn fields(&self) -> impl Iterator<Item = &Field> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Field { field, .. } => Some(field),
            Token::Literal(_) => None,
        })
    }

    /// Returns `true` if the pattern has any date field.
    pub fn has_date(&self) -> bool {
        self.fields().any(|f| !f.is_time())
    }

    /// Returns `true` if the pattern has any time-of-day field.
    pub fn has_time(&self) -> bool {
        self.fields().any(Field::is_time)
    }

    /// Returns `true` if the pattern shows seconds (or a fraction of them).
    pub fn has_seconds(&self) -> bool {
        self.fields()
            .any(|f| matches!(f, Field::Second { .. } | Field::Fraction { .. }))
    }

    /// Returns `true` if the pattern shows a fraction of a second.
    pub fn has_milliseconds(&self) -> bool {
        self.fields().any(|f| matches!(f, Field::Fraction { .. }))
    }

    /// Returns the kind of value this pattern parses to.
    pub fn kind(&self) -> TemporalKind {
        match (self.has_date(), self.has_time()) {
            (true, true) => TemporalKind::DateTime,
            (false, true) => TemporalKind::Time,
            _ => TemporalKind::Date,
        }
    }

    /// Parses text with English names into a value of [`DatePattern::kind`].
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Parse`] if the text does not match.
    pub fn parse(&self, text: &str) -> ConvertResult<DateValue> {
        self.parse_localized(text, Locale::POSIX)
    }

    /// Parses text written in `locale` into a value of [`DatePattern::kind`].
    ///
    /// Surrounding whitespace is ignored. Text produced by
    /// [`DatePattern::format`] with the same locale always parses back.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Parse`] if the text does not match.
    pub fn parse_localized(&self, text: &str, locale: Locale) -> ConvertResult<DateValue> {
        let text = text.trim();
        self.parse_fields(text, locale)
            .map_err(|e| ConvertError::parse(text, &self.source, e))
    }

    fn parse_fields(&self, text: &str, locale: Locale) -> ParseResult<DateValue> {
        let names = (locale != Locale::POSIX && self.fields().any(Field::is_name))
            .then(|| LocaleNames::new(locale));
        let mut parsed = Parsed::new();
        let mut rest = text;

        for token in &self.tokens {
            rest = match token {
                Token::Literal(literal) => parse_and_remainder(
                    &mut parsed,
                    rest,
                    StrftimeItems::new(&literal.replace('%', "%%")),
                )?,
                Token::Field {
                    field: Field::Fraction { .. },
                    ..
                } => parse_fraction(&mut parsed, rest)?,
                Token::Field { field, .. } => {
                    if let Some(names) = &names
                        && let Some(after) = names.strip(*field, rest, &mut parsed)?
                    {
                        after
                    } else {
                        parse_and_remainder(&mut parsed, rest, StrftimeItems::new(field.strftime()))?
                    }
                }
            };
        }
        if !rest.is_empty() {
            // reported by chrono as TooLong
            chrono::format::parse(&mut Parsed::new(), rest, StrftimeItems::new(""))?;
        }

        match self.kind() {
            TemporalKind::Date => parsed.to_naive_date().map(DateValue::Date),
            TemporalKind::DateTime => parsed
                .to_naive_datetime_with_offset(0)
                .map(DateValue::DateTime),
            TemporalKind::Time => parsed.to_naive_time().map(DateValue::Time),
        }
    }

    /// Formats a value.
    ///
    /// The value is first brought to its canonical date-time form, so a date
    /// formatted with a date-time pattern shows midnight. The locale only
    /// changes month/weekday names and AM/PM markers.
    pub fn format(&self, value: &DateValue, locale: Locale) -> String {
        let datetime = value.to_naive_datetime();
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field {
                    field: Field::Fraction { digits },
                    ..
                } => {
                    let nanos = format!("{:09}", datetime.nanosecond() % 1_000_000_000);
                    out.push_str(&nanos[..usize::from(*digits)]);
                }
                Token::Field { field, .. } => out.push_str(
                    &datetime
                        .and_utc()
                        .format_localized(field.strftime(), locale)
                        .to_string(),
                ),
            }
        }
        out
    }

    /// Converts to the date format understood by the widget runtime.
    ///
    /// Time fields and everything after the first of them are dropped.
    pub fn to_client_format(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Field { field, .. } => match field.client_token() {
                    Some(client) => out.push_str(client),
                    None => break,
                },
                Token::Literal(text) => {
                    if text.chars().any(|c| c.is_ascii_alphabetic()) {
                        out.push('\'');
                        out.push_str(&text.replace('\'', "''"));
                        out.push('\'');
                    } else {
                        out.push_str(text);
                    }
                }
            }
        }
        out.trim_end().to_string()
    }

    /// Converts to an input mask, `9` for each digit and `a` for each
    /// AM/PM letter.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::NotMaskable`] for month or weekday names.
    pub fn to_mask(&self) -> Result<String, PatternError> {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Field { field, source } => match field.mask() {
                    Some(mask) => out.push_str(&mask),
                    None => {
                        return Err(PatternError::NotMaskable {
                            pattern: self.source.clone(),
                            field: source.clone(),
                        });
                    }
                },
                Token::Literal(text) => out.push_str(text),
            }
        }
        Ok(out)
    }

    /// Returns the time-of-day portion of the pattern.
    ///
    /// Returns `None` if the pattern has no time fields. Leading literals
    /// between the date and time parts are dropped.
    pub fn time_part(&self) -> Option<DatePattern> {
        let first = self.tokens.iter().position(|t| match t {
            Token::Field { field, .. } => field.is_time(),
            Token::Literal(_) => false,
        })?;
        let tokens: Vec<Token> = self.tokens[first..].to_vec();
        let source = tokens.iter().map(token_source).collect::<String>();
        Some(Self { source, tokens })
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for DatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Parses a locale name such as `en_US` or `fr-FR`.
///
/// Returns `None` for names chrono does not know.
pub fn parse_locale(name: &str) -> Option<Locale> {
    let normalized = name.trim().replace('-', "_");
    if normalized.is_empty() {
        return None;
    }
    Locale::try_from(normalized.as_str()).ok()
}

/// Month, weekday and AM/PM names of one locale, lowercased and longest
/// first so that `mars` wins over `mar.`.
struct LocaleNames {
    months: Vec<(String, u32)>,
    weekdays: Vec<(String, Weekday)>,
    markers: Vec<(String, bool)>,
}

impl LocaleNames {
    fn new(locale: Locale) -> Self {
        let name = |datetime: NaiveDateTime, spec: &str| {
            datetime
                .and_utc()
                .format_localized(spec, locale)
                .to_string()
                .to_lowercase()
        };
        let anchor = anchor_date().and_time(NaiveTime::MIN);

        let months = (1..=12)
            .filter_map(|month| Some((anchor.with_month(month)?, month)))
            .flat_map(|(day, month)| [(name(day, "%B"), month), (name(day, "%b"), month)])
            .collect();
        let weekdays = anchor
            .date()
            .iter_days()
            .take(7)
            .map(|day| (day.and_time(NaiveTime::MIN), day.weekday()))
            .flat_map(|(day, weekday)| [(name(day, "%A"), weekday), (name(day, "%a"), weekday)])
            .collect();
        let markers = [(0, false), (12, true)]
            .into_iter()
            .filter_map(|(hour, pm)| Some((name(anchor.with_hour(hour)?, "%p"), pm)))
            .collect();

        Self {
            months: longest_first(months),
            weekdays: longest_first(weekdays),
            markers: longest_first(markers),
        }
    }

    /// Consumes a localized name for `field` at the start of `s`.
    ///
    /// Returns `Ok(None)` when no localized name matches.
    fn strip<'s>(
        &self,
        field: Field,
        s: &'s str,
        parsed: &mut Parsed,
    ) -> ParseResult<Option<&'s str>> {
        match field {
            Field::MonthShort | Field::MonthLong => match find_name(&self.months, s) {
                Some((rest, month)) => {
                    parsed.set_month(i64::from(month))?;
                    Ok(Some(rest))
                }
                None => Ok(None),
            },
            Field::WeekdayShort | Field::WeekdayLong => match find_name(&self.weekdays, s) {
                Some((rest, weekday)) => {
                    parsed.set_weekday(weekday)?;
                    Ok(Some(rest))
                }
                None => Ok(None),
            },
            Field::AmPm => match find_name(&self.markers, s) {
                Some((rest, pm)) => {
                    parsed.set_ampm(pm)?;
                    Ok(Some(rest))
                }
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

fn longest_first<T>(mut names: Vec<(String, T)>) -> Vec<(String, T)> {
    names.retain(|(name, _)| !name.is_empty());
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    names
}

fn find_name<'s, T: Copy>(names: &[(String, T)], s: &'s str) -> Option<(&'s str, T)> {
    names.iter().find_map(|(name, value)| {
        let head = s.get(..name.len())?;
        (head.to_lowercase() == *name).then(|| (&s[name.len()..], *value))
    })
}

/// Reads 1 to 9 fraction digits, scaled to nanoseconds.
fn parse_fraction<'s>(parsed: &mut Parsed, s: &'s str) -> ParseResult<&'s str> {
    let digits = s.bytes().take(9).take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        // no digits at all; chrono describes the failure
        return parse_and_remainder(parsed, s, StrftimeItems::new("%9f"));
    }
    let value = s[..digits]
        .bytes()
        .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));
    parsed.set_nanosecond(value * 10i64.pow(9 - digits as u32))?;
    Ok(&s[digits..])
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // '' outside a quote is an escaped quote
            if chars.get(i + 1) == Some(&'\'') {
                literal.push('\'');
                i += 2;
                continue;
            }
            let mut j = i + 1;
            loop {
                match chars.get(j) {
                    None => {
                        return Err(PatternError::UnterminatedQuote {
                            pattern: pattern.to_string(),
                        });
                    }
                    Some('\'') if chars.get(j + 1) == Some(&'\'') => {
                        literal.push('\'');
                        j += 2;
                    }
                    Some('\'') => break,
                    Some(other) => {
                        literal.push(*other);
                        j += 1;
                    }
                }
            }
            i = j + 1;
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i] == c {
                i += 1;
            }
            let count = i - start;
            let field =
                Field::from_letter(c, count).ok_or_else(|| PatternError::UnsupportedLetter {
                    pattern: pattern.to_string(),
                    letter: c,
                    position: start,
                })?;
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field {
                field,
                source: std::iter::repeat_n(c, count).collect(),
            });
        } else {
            literal.push(c);
            i += 1;
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn to_strftime(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Field { field, .. } => out.push_str(field.strftime()),
            Token::Literal(text) => out.push_str(&text.replace('%', "%%")),
        }
    }
    out
}

fn token_source(token: &Token) -> String {
    match token {
        Token::Field { source, .. } => source.clone(),
        Token::Literal(text) if text.chars().any(|c| c.is_ascii_alphabetic() || c == '\'') => {
            format!("'{}'", text.replace('\'', "''"))
        }
        Token::Literal(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pattern(p: &str) -> DatePattern {
        DatePattern::new(p).unwrap()
    }

    mod compile {
        use super::*;

        #[test]
        fn strftime_translation() {
            assert_eq!(pattern("yyyy-MM-dd").strftime(), "%Y-%m-%d");
            assert_eq!(pattern("d/M/yy").strftime(), "%-d/%-m/%y");
            assert_eq!(pattern("dd MMM yyyy").strftime(), "%d %b %Y");
            assert_eq!(pattern("EEEE, MMMM d").strftime(), "%A, %B %-d");
            assert_eq!(pattern("hh:mm a").strftime(), "%I:%M %p");
            assert_eq!(pattern("HH:mm:ss.SSS").strftime(), "%H:%M:%S.%3f");
        }

        #[test]
        fn quoted_literals() {
            assert_eq!(pattern("yyyy-MM-dd'T'HH:mm").strftime(), "%Y-%m-%dT%H:%M");
            assert_eq!(pattern("HH 'o''clock'").strftime(), "%H o'clock");
            assert_eq!(pattern("dd''MM").strftime(), "%d'%m");
        }

        #[test]
        fn percent_is_escaped() {
            assert_eq!(pattern("dd%MM").strftime(), "%d%%%m");
        }

        #[test]
        fn errors() {
            assert_eq!(DatePattern::new(""), Err(PatternError::Empty));
            assert!(matches!(
                DatePattern::new("yyyy-QQ"),
                Err(PatternError::UnsupportedLetter {
                    letter: 'Q',
                    position: 5,
                    ..
                })
            ));
            assert!(matches!(
                DatePattern::new("yyyy 'open"),
                Err(PatternError::UnterminatedQuote { .. })
            ));
            assert!(matches!(
                DatePattern::new("'only text'"),
                Err(PatternError::NoFields { .. })
            ));
        }

        #[test]
        fn kinds() {
            assert_eq!(pattern("yyyy-MM-dd").kind(), TemporalKind::Date);
            assert_eq!(pattern("yyyy-MM-dd HH:mm").kind(), TemporalKind::DateTime);
            assert_eq!(pattern("HH:mm").kind(), TemporalKind::Time);
        }

        #[test]
        fn field_presence() {
            let p = pattern("dd/MM/yyyy HH:mm");
            assert!(p.has_date());
            assert!(p.has_time());
            assert!(!p.has_seconds());
            assert!(!p.has_milliseconds());

            let p = pattern("HH:mm:ss.SSS");
            assert!(!p.has_date());
            assert!(p.has_seconds());
            assert!(p.has_milliseconds());
        }
    }

    mod parse_and_format {
        use super::*;

        #[test]
        fn date_only() {
            let p = pattern("yyyy-MM-dd");
            assert_eq!(p.parse("2024-01-10").unwrap(), DateValue::Date(date(2024, 1, 10)));
            assert_eq!(p.parse("  2024-01-10 ").unwrap(), DateValue::Date(date(2024, 1, 10)));
        }

        #[test]
        fn date_time() {
            let p = pattern("dd/MM/yyyy HH:mm");
            let expected = date(2024, 1, 10).and_hms_opt(14, 5, 0).unwrap();
            assert_eq!(p.parse("10/01/2024 14:05").unwrap(), DateValue::DateTime(expected));
        }

        #[test]
        fn twelve_hour_clock() {
            let p = pattern("MM/dd/yyyy hh:mm a");
            let expected = date(2024, 1, 10).and_hms_opt(14, 5, 0).unwrap();
            assert_eq!(p.parse("01/10/2024 02:05 PM").unwrap(), DateValue::DateTime(expected));
            assert_eq!(p.format(&DateValue::DateTime(expected), Locale::POSIX), "01/10/2024 02:05 PM");
        }

        #[test]
        fn time_only() {
            let p = pattern("HH:mm:ss");
            let expected = NaiveTime::from_hms_opt(8, 30, 15).unwrap();
            assert_eq!(p.parse("08:30:15").unwrap(), DateValue::Time(expected));
        }

        #[test]
        fn milliseconds() {
            let p = pattern("yyyy-MM-dd HH:mm:ss.SSS");
            let expected = date(2024, 1, 10).and_hms_milli_opt(8, 30, 15, 250).unwrap();
            let value = p.parse("2024-01-10 08:30:15.250").unwrap();
            assert_eq!(value, DateValue::DateTime(expected));
            assert_eq!(p.format(&value, Locale::POSIX), "2024-01-10 08:30:15.250");
        }

        #[test]
        fn mismatch_is_a_parse_error() {
            let p = pattern("yyyy-MM-dd");
            let err = p.parse("10/01/2024").unwrap_err();
            assert!(matches!(err, ConvertError::Parse { ref text, ref pattern, .. }
                if text == "10/01/2024" && pattern == "yyyy-MM-dd"));
        }

        #[test]
        fn impossible_date_is_rejected() {
            let p = pattern("yyyy-MM-dd");
            assert!(p.parse("2023-02-29").is_err());
        }

        #[test]
        fn date_formatted_with_time_pattern_shows_midnight() {
            let p = pattern("yyyy-MM-dd HH:mm");
            assert_eq!(
                p.format(&DateValue::Date(date(2024, 1, 10)), Locale::POSIX),
                "2024-01-10 00:00"
            );
        }

        #[test]
        fn month_names_follow_locale() {
            let p = pattern("d MMMM yyyy");
            let value = DateValue::Date(date(2024, 3, 5));
            assert_eq!(p.format(&value, Locale::en_US), "5 March 2024");
            assert_eq!(p.format(&value, Locale::fr_FR), "5 mars 2024");
        }

        #[test]
        fn localized_names_round_trip() {
            let patterns = ["d MMMM yyyy", "EEEE d MMMM yyyy", "dd MMM yyyy", "EEE dd/MM/yyyy"];
            for locale in [Locale::fr_FR, Locale::de_DE, Locale::en_US] {
                for p in patterns {
                    let p = pattern(p);
                    for month in 1..=12 {
                        let value = DateValue::Date(date(2024, month, 10));
                        let text = p.format(&value, locale);
                        assert_eq!(
                            p.parse_localized(&text, locale).unwrap(),
                            value,
                            "{:?} with {}",
                            text,
                            p
                        );
                    }
                }
            }
        }

        #[test]
        fn localized_names_ignore_case_and_accept_english() {
            let p = pattern("d MMMM yyyy");
            let expected = DateValue::Date(date(2024, 3, 5));
            assert_eq!(p.parse_localized("5 mars 2024", Locale::fr_FR).unwrap(), expected);
            assert_eq!(p.parse_localized("5 MARS 2024", Locale::fr_FR).unwrap(), expected);
            assert_eq!(p.parse_localized("5 March 2024", Locale::fr_FR).unwrap(), expected);
            assert!(p.parse("5 mars 2024").is_err());
        }

        #[test]
        fn wrong_weekday_is_rejected() {
            let p = pattern("EEEE d MMMM yyyy");
            assert!(p.parse_localized("lundi 5 mars 2024", Locale::fr_FR).is_err());
            assert!(p.parse_localized("mardi 5 mars 2024", Locale::fr_FR).is_ok());
        }

        #[test]
        fn fraction_digits_follow_pattern() {
            let time = |ms: u32| DateValue::Time(NaiveTime::from_hms_milli_opt(8, 30, 15, ms).unwrap());

            let p = pattern("HH:mm:ss.S");
            assert_eq!(p.to_mask().unwrap(), "99:99:99.9");
            assert_eq!(p.parse("08:30:15.1").unwrap(), time(100));
            assert_eq!(p.format(&time(100), Locale::POSIX), "08:30:15.1");
            assert_eq!(p.format(&time(999), Locale::POSIX), "08:30:15.9");

            let p = pattern("HH:mm:ss.SS");
            assert_eq!(p.parse("08:30:15.12").unwrap(), time(120));
            assert_eq!(p.format(&time(120), Locale::POSIX), "08:30:15.12");

            let p = pattern("HH:mm:ss.SSSS");
            let value = p.parse("08:30:15.1234").unwrap();
            assert_eq!(
                value,
                DateValue::Time(NaiveTime::from_hms_micro_opt(8, 30, 15, 123_400).unwrap())
            );
            assert_eq!(p.format(&value, Locale::POSIX), "08:30:15.1234");
        }

        #[test]
        fn fraction_width_is_lenient_but_not_empty() {
            let p = pattern("HH:mm:ss.SSS");
            assert_eq!(
                p.parse("08:30:15.5").unwrap(),
                DateValue::Time(NaiveTime::from_hms_milli_opt(8, 30, 15, 500).unwrap())
            );
            assert!(p.parse("08:30:15.").is_err());
            assert!(p.parse("08:30:15.1234567890").is_err());
        }

        #[test]
        fn trailing_text_is_rejected() {
            let p = pattern("yyyy-MM-dd");
            assert!(p.parse("2024-01-10 later").is_err());
        }

        #[test]
        fn english_names_parse() {
            let p = pattern("dd MMM yyyy");
            assert_eq!(p.parse("05 Mar 2024").unwrap(), DateValue::Date(date(2024, 3, 5)));
        }

        #[test]
        fn round_trip_is_stable() {
            let cases = [
                ("yyyy-MM-dd", "2024-02-29"),
                ("dd/MM/yy", "31/12/99"),
                ("d/M/yyyy", "5/3/2024"),
                ("MM/dd/yyyy hh:mm a", "12/31/2024 11:59 PM"),
                ("yyyy-MM-dd'T'HH:mm:ss", "2024-06-01T00:00:01"),
                ("HH:mm", "23:45"),
                ("EEE, dd MMM yyyy", "Wed, 10 Jan 2024"),
            ];
            for (p, text) in cases {
                let p = pattern(p);
                let first = p.parse(text).unwrap();
                let again = p.parse(&p.format(&first, Locale::POSIX)).unwrap();
                assert_eq!(first, again, "pattern {}", p);
            }
        }
    }

    mod conversions {
        use super::*;

        #[test]
        fn client_format() {
            assert_eq!(pattern("yyyy-MM-dd").to_client_format(), "yy-mm-dd");
            assert_eq!(pattern("d/M/yy").to_client_format(), "d/m/y");
            assert_eq!(pattern("EEEE, MMMM dd yyyy").to_client_format(), "DD, MM dd yy");
            assert_eq!(pattern("EEE dd MMM").to_client_format(), "D dd M");
            assert_eq!(pattern("dd/MM/yyyy HH:mm").to_client_format(), "dd/mm/yy");
            assert_eq!(pattern("yyyy-MM-dd'T'HH:mm").to_client_format(), "yy-mm-dd'T'");
        }

        #[test]
        fn mask() {
            assert_eq!(pattern("dd/MM/yyyy").to_mask().unwrap(), "99/99/9999");
            assert_eq!(pattern("MM/dd/yyyy hh:mm a").to_mask().unwrap(), "99/99/9999 99:99 aa");
            assert_eq!(pattern("HH:mm:ss.SSS").to_mask().unwrap(), "99:99:99.999");
        }

        #[test]
        fn textual_fields_cannot_be_masked() {
            let err = pattern("dd MMM yyyy").to_mask().unwrap_err();
            assert_eq!(
                err,
                PatternError::NotMaskable {
                    pattern: "dd MMM yyyy".to_string(),
                    field: "MMM".to_string(),
                }
            );
        }

        #[test]
        fn time_part() {
            let time = pattern("dd/MM/yyyy HH:mm:ss").time_part().unwrap();
            assert_eq!(time.as_str(), "HH:mm:ss");
            assert_eq!(time.kind(), TemporalKind::Time);
            assert!(pattern("dd/MM/yyyy").time_part().is_none());
        }
    }

    #[test]
    fn locales() {
        assert_eq!(parse_locale("en_US"), Some(Locale::en_US));
        assert_eq!(parse_locale("fr-FR"), Some(Locale::fr_FR));
        assert_eq!(parse_locale("xx_YY"), None);
        assert_eq!(parse_locale(""), None);
    }
}
