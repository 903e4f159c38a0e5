use std::fmt;

/// Amounts are kept at full precision; rounding only happens when displaying.
/// Currency-agnostic: no symbol, no locale.
pub type Amount = f64;

/// Format an amount as a human-readable string with two decimals.
/// Example: 12.5 -> "12.50", -3.456 -> "-3.46"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse user input into an amount.
/// Surrounding whitespace is ignored. Zero and negative values are accepted,
/// non-finite values are not.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let value: Amount = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid number format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
