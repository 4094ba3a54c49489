//! Common regex patterns for trade transcript extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// A plain number, read the way `parse_number` reads it: grouped thousands
/// (`1,234.56`, `1,234,567`, `1.234,56`) or a single separator taken as the
/// decimal point (`12.34`, `12,34`, `1,250`, `7`).
const NUMBER: &str = r"\d{1,3}(?:,\d{3})+\.\d+|\d{1,3}(?:,\d{3}){2,}|\d{1,3}(?:\.\d{3})+,\d+|\d+(?:[.,]\d+)?";

lazy_static! {
    // Five-decimal quote (1.10500)
    pub static ref PRICE_5DP: Regex = Regex::new(
        r"\b\d+\.\d{5}\b"
    ).unwrap();

    // Amount next to a currency marker: "-12.34 USD", "$ 15.20", "-$3", "7,50€"
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(&format!(
        r"(?P<sign>[+-])?(?:\$|€|\bUSD|\bEUR)\s?(?P<pre>[+-]?(?:{NUMBER}))|(?P<post>[+-]?(?:{NUMBER}))\s?(?:\$|€|USD\b|EUR\b)"
    )).unwrap();

    // A whole whitespace-delimited token that is only a number
    pub static ref NUMBER_TOKEN: Regex = Regex::new(&format!(
        r"^[+-]?(?:{NUMBER})$"
    )).unwrap();

    // First signed number in a line
    pub static ref SIGNED_NUMBER: Regex = Regex::new(
        r"[+-]?\d+(?:[.,]\d+)?"
    ).unwrap();

    // Instrument symbol (EURUSD)
    pub static ref SYMBOL: Regex = Regex::new(
        r"\b[A-Z]{6}\b"
    ).unwrap();

    // Trade side, sell is checked before buy
    pub static ref SELL: Regex = Regex::new(
        r"(?i)\bsell\b"
    ).unwrap();

    pub static ref BUY: Regex = Regex::new(
        r"(?i)\bbuy\b"
    ).unwrap();

    // Integer volume token with an optional lot unit glued on ("2", "2lots", "3лота")
    pub static ref VOLUME_TOKEN: Regex = Regex::new(
        r"(?i)^(\d+)(?:lots?|лот(?:а|ов)?)?$"
    ).unwrap();

    // Stop-loss marker: S/L, SL, stop loss, стоп-лосс, С/Л
    pub static ref STOP_LOSS: Regex = Regex::new(
        r"(?i)\bs\s*/\s*l\b|\bsl\b|\bstop[\s-]*loss\b|\bстоп[\s-]*лосс|\bс\s*/\s*л\b"
    ).unwrap();

    // Take-profit marker: T/P, TP, take profit, тейк-профит, Т/П
    pub static ref TAKE_PROFIT: Regex = Regex::new(
        r"(?i)\bt\s*/\s*p\b|\btp\b|\btake[\s-]*profit\b|\bтейк[\s-]*профит|\bт\s*/\s*п\b"
    ).unwrap();

    pub static ref SWAP: Regex = Regex::new(
        r"(?i)\bswaps?\b|\bсвоп"
    ).unwrap();

    pub static ref COMMISSION: Regex = Regex::new(
        r"(?i)\bcommissions?\b|\bкомисси"
    ).unwrap();

    // Order ticket (#123456)
    pub static ref ORDER_ID: Regex = Regex::new(
        r"#(\d+)"
    ).unwrap();

    // Platform timestamp (2024.01.15 10:30:00)
    pub static ref TIMESTAMP: Regex = Regex::new(
        r"\b\d{4}\.\d{2}\.\d{2} \d{2}:\d{2}:\d{2}\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_requires_five_decimals() {
        assert!(PRICE_5DP.is_match("1.10500"));
        assert!(!PRICE_5DP.is_match("1.1050"));
        assert!(!PRICE_5DP.is_match("1.105001"));
    }

    #[test]
    fn test_currency_marker_inside_symbol_is_ignored() {
        assert!(!CURRENCY_AMOUNT.is_match("EURUSD 1.10500"));
        assert!(!CURRENCY_AMOUNT.is_match("1.10500 USDJPY"));
        assert!(CURRENCY_AMOUNT.is_match("-12.34 USD"));
        assert!(CURRENCY_AMOUNT.is_match("$15"));
        assert!(CURRENCY_AMOUNT.is_match("7,50€"));
    }

    #[test]
    fn test_number_token_grouping() {
        for token in ["7", "-12.34", "12,34", "1,250", "1,234.56", "1,234,567", "1.234,56"] {
            assert!(NUMBER_TOKEN.is_match(token), "{token}");
        }
        assert!(!NUMBER_TOKEN.is_match("1,2,3"));
        assert!(!NUMBER_TOKEN.is_match("2024.01.15"));
    }

    #[test]
    fn test_currency_amount_takes_whole_number() {
        let caps = CURRENCY_AMOUNT.captures("Profit: 1,234,567.89 USD").unwrap();
        assert_eq!(&caps["post"], "1,234,567.89");

        let caps = CURRENCY_AMOUNT.captures("Profit: 1,250 USD").unwrap();
        assert_eq!(&caps["post"], "1,250");
    }

    #[test]
    fn test_markers_are_whole_words() {
        assert!(STOP_LOSS.is_match("S/L: 1.09000"));
        assert!(STOP_LOSS.is_match("Стоп-лосс 1.09000"));
        assert!(!STOP_LOSS.is_match("slippage 3"));
        assert!(TAKE_PROFIT.is_match("t / p 1.12000"));
        assert!(!TAKE_PROFIT.is_match("http"));
    }
}
