use crate::error::BillingError;

/// Derive the run's price per kWh from a header cell such as
/// `Elkostnad 2023: 2,34 kr/kWh`.
///
/// Takes the text after the first colon, keeps its first whitespace-separated
/// token, and reads it with a decimal comma.
pub fn parse_price(text: &str) -> Result<f64, BillingError> {
    let value = text
        .split(':')
        .nth(1)
        .ok_or_else(|| BillingError::PriceFormatError(text.to_string()))?;
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| BillingError::PriceFormatError(text.to_string()))?;
    let price: f64 = token
        .replace(',', ".")
        .parse()
        .map_err(|_| BillingError::PriceParseError(text.to_string()))?;

    if !price.is_finite() || price == 0.0 {
        return Err(BillingError::PriceParseError(text.to_string()));
    }
    Ok(price)
}
