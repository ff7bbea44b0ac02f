//! [`NumericText`]-related definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Free-form text carrying a derivable numeric value, like a price tag
/// (`AED 2,500,000`) or an area (`1,450 sq ft`).
///
/// The numeric value is derived from the first digit run of the text, with
/// `,` treated as a thousands separator and `.` as a decimal point.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct NumericText(String);

impl NumericText {
    /// Maximum length of a [`NumericText`], in bytes.
    pub const MAX_LEN: usize = 128;

    /// Creates a new [`NumericText`] from the provided text, if it's valid.
    ///
    /// The text is trimmed, must be non-empty, at most [`MAX_LEN`] bytes
    /// long, and must contain a derivable numeric value.
    ///
    /// [`MAX_LEN`]: Self::MAX_LEN
    #[must_use]
    pub fn new<S: AsRef<str>>(text: S) -> Option<Self> {
        let text = text.as_ref().trim();
        Self::check(text).then(|| Self(text.into()))
    }

    /// Creates a new [`NumericText`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided text must be a valid [`NumericText`].
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked<S: Into<String>>(text: S) -> Self {
        Self(text.into())
    }

    /// Returns the numeric value derived from this text.
    #[expect(clippy::missing_panics_doc, reason = "checked on creation")]
    #[must_use]
    pub fn numeric(&self) -> Decimal {
        Self::derive(&self.0).expect("checked on creation")
    }

    /// Checks whether the provided text represents a valid [`NumericText`].
    fn check(text: &str) -> bool {
        !text.is_empty()
            && text.len() <= Self::MAX_LEN
            && Self::derive(text).is_some()
    }

    /// Derives the numeric value from the provided text, if any.
    fn derive(text: &str) -> Option<Decimal> {
        let start = text.find(|c: char| c.is_ascii_digit())?;
        let run: &str = text[start..]
            .split(|c: char| !c.is_ascii_digit() && c != ',' && c != '.')
            .next()?;
        let run = run.trim_end_matches([',', '.']);
        Decimal::from_str(&run.replace(',', "")).ok()
    }
}

impl FromStr for NumericText {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid numeric text")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Free-form text carrying a derivable numeric value, like
    /// `AED 2,500,000` or `1,450 sq ft`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type NumericText = super::NumericText;

    impl NumericText {
        fn to_output<S: ScalarValue>(t: &NumericText) -> Value<S> {
            Value::scalar(t.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `NumericText` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::new(s).ok_or_else(|| {
                        format!("Cannot parse `NumericText` input scalar: {s}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::NumericText;

    #[test]
    fn derives_price() {
        let price = NumericText::new("AED 2,500,000").unwrap();
        assert_eq!(price.numeric(), Decimal::from(2_500_000));
    }

    #[test]
    fn derives_area() {
        let area = NumericText::new("1,450 sq ft").unwrap();
        assert_eq!(area.numeric(), Decimal::from(1450));
    }

    #[test]
    fn derives_fractional() {
        let price = NumericText::new("$1,234.56 per month").unwrap();
        assert_eq!(price.numeric(), Decimal::new(123_456, 2));
    }

    #[test]
    fn ignores_trailing_separators() {
        let text = NumericText::new("2,500, negotiable").unwrap();
        assert_eq!(text.numeric(), Decimal::from(2500));
    }

    #[test]
    fn trims_text() {
        let text = NumericText::new("  750 sqm  ").unwrap();
        assert_eq!(text.as_ref(), "750 sqm");
    }

    #[test]
    fn rejects_numberless() {
        assert_eq!(NumericText::new("price on request"), None);
        assert_eq!(NumericText::new(""), None);
        assert_eq!(NumericText::new("   "), None);
    }

    #[test]
    fn rejects_too_long() {
        assert_eq!(NumericText::new("1".repeat(129)), None);
    }
}
