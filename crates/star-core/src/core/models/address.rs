use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALPHABET_LEN: usize = 26;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("'{0}' must start with one or more row letters")]
    MissingRow(String),
    #[error("'{0}' must end with a column number of 1 or more")]
    InvalidColumn(String),
    #[error("'{0}' is too large to index")]
    Overflow(String),
}

/// A zero-based well position on a plate.
///
/// The canonical text form is the row letters followed by the one-based column
/// number: row 0, column 0 is `"A1"`, row 26 is labelled `"AA"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellAddress {
    pub row: usize,
    pub col: usize,
}

impl WellAddress {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parses a well identifier into zero-based `(row, col)` indices.
    ///
    /// Row letters are case-insensitive and surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`AddressError`] when the input is empty, lacks row letters,
    /// has a missing, non-numeric or zero column, or overflows `usize`.
    pub fn parse(s: &str) -> Result<(usize, usize), AddressError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let split = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (letters, digits) = trimmed.split_at(split);

        if letters.is_empty() {
            return Err(AddressError::MissingRow(trimmed.to_string()));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::InvalidColumn(trimmed.to_string()));
        }

        let column: usize = digits
            .parse()
            .map_err(|_| AddressError::Overflow(trimmed.to_string()))?;
        if column == 0 {
            return Err(AddressError::InvalidColumn(trimmed.to_string()));
        }

        let row = letters
            .bytes()
            .try_fold(0usize, |acc, b| {
                let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
                acc.checked_mul(ALPHABET_LEN)?.checked_add(digit)
            })
            .ok_or_else(|| AddressError::Overflow(trimmed.to_string()))?;

        Ok((row - 1, column - 1))
    }

    /// Formats zero-based indices as a well identifier.
    pub fn format(row: usize, col: usize) -> String {
        let mut label = row_label(row);
        label.push_str(&(col as u128 + 1).to_string());
        label
    }
}

/// Returns the letter label of a zero-based row (`0 -> "A"`, `26 -> "AA"`).
pub fn row_label(row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = row;
    loop {
        letters.push(b'A' + (n % ALPHABET_LEN) as u8);
        if n < ALPHABET_LEN {
            break;
        }
        n = n / ALPHABET_LEN - 1;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

impl fmt::Display for WellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_label(self.row), self.col as u128 + 1)
    }
}

impl FromStr for WellAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = Self::parse(s)?;
        Ok(Self { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_single_letter_addresses() {
        assert_eq!(WellAddress::parse("A1"), Ok((0, 0)));
        assert_eq!(WellAddress::parse("H12"), Ok((7, 11)));
        assert_eq!(WellAddress::parse("L12"), Ok((11, 11)));
    }

    #[test]
    fn parse_is_case_insensitive_and_trims_whitespace() {
        assert_eq!(WellAddress::parse("b7"), Ok((1, 6)));
        assert_eq!(WellAddress::parse("  aa3 "), Ok((26, 2)));
    }

    #[test]
    fn parse_reads_multi_letter_rows() {
        assert_eq!(WellAddress::parse("Z1"), Ok((25, 0)));
        assert_eq!(WellAddress::parse("AA1"), Ok((26, 0)));
        assert_eq!(WellAddress::parse("AZ1"), Ok((51, 0)));
        assert_eq!(WellAddress::parse("BA1"), Ok((52, 0)));
        assert_eq!(WellAddress::parse("ZZ1"), Ok((701, 0)));
        assert_eq!(WellAddress::parse("AAA1"), Ok((702, 0)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(WellAddress::parse(""), Err(AddressError::Empty));
        assert_eq!(WellAddress::parse("   "), Err(AddressError::Empty));
        assert!(matches!(
            WellAddress::parse("12"),
            Err(AddressError::MissingRow(_))
        ));
        assert!(matches!(
            WellAddress::parse("-1"),
            Err(AddressError::MissingRow(_))
        ));
        assert!(matches!(
            WellAddress::parse("A"),
            Err(AddressError::InvalidColumn(_))
        ));
        assert!(matches!(
            WellAddress::parse("A0"),
            Err(AddressError::InvalidColumn(_))
        ));
        assert!(matches!(
            WellAddress::parse("A-3"),
            Err(AddressError::InvalidColumn(_))
        ));
        assert!(matches!(
            WellAddress::parse("A+3"),
            Err(AddressError::InvalidColumn(_))
        ));
        assert!(matches!(
            WellAddress::parse("A1B"),
            Err(AddressError::InvalidColumn(_))
        ));
        assert!(matches!(
            WellAddress::parse("Ä1"),
            Err(AddressError::MissingRow(_))
        ));
    }

    #[test]
    fn parse_reports_overflow_instead_of_wrapping() {
        assert!(matches!(
            WellAddress::parse("A99999999999999999999999"),
            Err(AddressError::Overflow(_))
        ));
        assert!(matches!(
            WellAddress::parse("ZZZZZZZZZZZZZZZZZZZZ1"),
            Err(AddressError::Overflow(_))
        ));
    }

    #[test]
    fn format_produces_canonical_labels() {
        assert_eq!(WellAddress::format(0, 0), "A1");
        assert_eq!(WellAddress::format(7, 11), "H12");
        assert_eq!(WellAddress::format(25, 4), "Z5");
        assert_eq!(WellAddress::format(26, 0), "AA1");
        assert_eq!(WellAddress::format(701, 9), "ZZ10");
        assert_eq!(WellAddress::format(702, 0), "AAA1");
    }

    #[test]
    fn row_label_matches_bijective_base_26() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(1), "B");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(27), "AB");
    }

    #[test]
    fn display_and_from_str_agree() {
        let address: WellAddress = "c4".parse().unwrap();
        assert_eq!(address, WellAddress::new(2, 3));
        assert_eq!(address.to_string(), "C4");
    }

    #[test]
    fn parse_inverts_format_over_a_large_grid() {
        for r in 0..500 {
            for c in 0..500 {
                assert_eq!(WellAddress::parse(&WellAddress::format(r, c)), Ok((r, c)));
            }
        }
    }
}
