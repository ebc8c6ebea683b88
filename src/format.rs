//! Reply formatting.
//!
//! Every formatter is total over its provider result: failures and absent
//! data render as fixed strings, so the caller always has exactly one reply
//! to send. Formatting the same result twice yields byte-identical text.

use crate::providers::{CountryInfo, ProviderError, Rate, StockPoint};

pub const START_REPLY: &str = "Hi! I look up country info, exchange rates and stock quotes.\n\
    /country <CODE> - country info by two-letter code, e.g. /country US\n\
    /currency <dd/mm/yyyy> - Bank of Russia exchange rates for a date\n\
    /stock <TICKER> <from> <to> - daily stock quotes, dates as yyyy-mm-dd\n\
    /info - the list of commands";

pub const INFO_REPLY: &str = "Available commands:\n\
    /start - greeting\n\
    /info - this list of commands\n\
    /country <CODE> - country info by two-letter code, e.g. /country US\n\
    /currency <dd/mm/yyyy> - Bank of Russia exchange rates for a date\n\
    /stock <TICKER> <from> <to> - daily stock quotes, dates as yyyy-mm-dd";

pub const UNKNOWN_REPLY: &str = "Unknown command. Use /info to see the list of commands.";

const COUNTRY_NOT_FOUND: &str = "Country not found. Please try again.";
const RATES_FAILED: &str = "Could not fetch exchange rates. Check the date.";
const STOCK_FAILED: &str = "Could not fetch stock data. Check the ticker and dates.";

/// Render a country lookup. Absent records and provider errors both
/// collapse into the fixed not-found text.
pub fn country_reply(result: &Result<Option<CountryInfo>, ProviderError>) -> String {
    let Ok(Some(country)) = result else {
        return COUNTRY_NOT_FOUND.to_string();
    };

    let mut reply = format!(
        "Country: {}\nNative name: {}\nEmoji: {}\nCurrency: {}\nLanguages:\n",
        country.name, country.native, country.emoji, country.currency
    );
    for language in &country.languages {
        reply.push_str(&format!("- {} (code: {})\n", language.name, language.code));
    }
    reply
}

/// Render the exchange rates for one date. An empty result means the feed
/// had no data for the date and renders as the fixed failure text.
pub fn rates_reply(date: &str, result: &Result<Vec<Rate>, ProviderError>) -> String {
    let Ok(rates) = result else {
        return RATES_FAILED.to_string();
    };
    if rates.is_empty() {
        return RATES_FAILED.to_string();
    }

    let mut reply = format!("Exchange rates for {date}:\n");
    for rate in rates {
        reply.push_str(&format!("{}: {}\n", rate.name, rate.value));
    }
    reply
}

/// Render a stock series. Zero points is a valid (header-only) answer;
/// only provider errors render the fixed failure text.
pub fn stock_reply(
    ticker: &str,
    from: &str,
    to: &str,
    result: &Result<Vec<StockPoint>, ProviderError>,
) -> String {
    let Ok(points) = result else {
        return STOCK_FAILED.to_string();
    };

    let mut reply = format!("{ticker} quotes from {from} to {to}:\n");
    for point in points {
        reply.push_str(&format!(
            "Date: {} - Open: {}, Close: {}, High: {}, Low: {}, Volume: {}\n",
            point.t, point.o, point.c, point.h, point.l, point.v
        ));
    }
    reply
}
