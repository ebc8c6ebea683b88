//! Command relay: one inbound text in, exactly one reply string out.

use tracing::debug;

use crate::command::Command;
use crate::config::Config;
use crate::format;
use crate::providers::{CbrClient, CountriesClient, PolygonClient};

/// Owns the three provider clients. Stateless across messages, so one
/// instance is shared by every handler invocation.
pub struct Relay {
    countries: CountriesClient,
    rates: CbrClient,
    stocks: PolygonClient,
}

impl Relay {
    pub fn new(config: &Config) -> Self {
        Self {
            countries: CountriesClient::new(),
            rates: CbrClient::new(),
            stocks: PolygonClient::new(config.polygon_api_key.clone()),
        }
    }

    /// Produce the reply for one inbound message.
    ///
    /// Makes at most one provider call; every failure collapses into a
    /// fixed reply string, so there is always exactly one thing to send.
    pub async fn reply(&self, text: &str) -> String {
        let command = Command::parse(text);
        debug!("Parsed command: {command:?}");

        match command {
            Command::Start => format::START_REPLY.to_string(),
            Command::Info => format::INFO_REPLY.to_string(),
            Command::Country { code } => {
                let result = self.countries.lookup(&code).await;
                format::country_reply(&result)
            }
            Command::Currency { date } => {
                let result = self.rates.daily_rates(&date).await;
                format::rates_reply(&date, &result)
            }
            Command::Stock { ticker, from, to } => {
                let result = self.stocks.day_aggregates(&ticker, &from, &to).await;
                format::stock_reply(&ticker, &from, &to, &result)
            }
            Command::Unrecognized => format::UNKNOWN_REPLY.to_string(),
        }
    }
}
