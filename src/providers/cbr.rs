//! Daily exchange rates client for the Bank of Russia XML feed.
//!
//! The feed is one XML document per date with repeated `<Valute>` elements;
//! only the `<Name>` and `<Value>` children matter here. The document is
//! small and flat, so it is scanned with a simple state machine instead of
//! a full XML parser.

use tracing::debug;

use crate::providers::ProviderError;

const CBR_URL: &str = "http://www.cbr.ru/scripts/XML_daily.asp";

/// One currency quotation, both fields verbatim from the document
/// (values keep the feed's comma decimal separator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rate {
    pub name: String,
    pub value: String,
}

pub struct CbrClient {
    client: reqwest::Client,
}

impl CbrClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the quotations for one date (dd/mm/yyyy, passed through verbatim).
    ///
    /// An unknown or malformed date makes the feed answer with no `Valute`
    /// elements, which comes back as an empty vec.
    pub async fn daily_rates(&self, date: &str) -> Result<Vec<Rate>, ProviderError> {
        // The feed wants the slashes unencoded, so the URL is built by hand.
        let url = format!("{CBR_URL}?date_req={date}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        // text() decodes according to the Content-Type charset; the feed is
        // served as windows-1251.
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let rates = parse_rates(&body)?;
        debug!("CBR rates for {date}: {} quotations", rates.len());
        Ok(rates)
    }
}

/// Extract (Name, Value) pairs from every `<Valute>` element, in document
/// order. A `Valute` missing either child makes the whole document invalid.
fn parse_rates(xml: &str) -> Result<Vec<Rate>, ProviderError> {
    let mut rates = Vec::new();

    let mut in_valute = false;
    let mut name: Option<String> = None;
    let mut value: Option<String> = None;
    // Child element whose text is currently being captured.
    let mut capturing: Option<&'static str> = None;
    let mut text = String::new();

    let mut chars = xml.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let is_closing = chars.peek() == Some(&'/');
            if is_closing {
                chars.next(); // consume '/'
            }

            // Read tag name
            let mut tag = String::new();
            while let Some(&next) = chars.peek() {
                if next == '>' || next == ' ' || next == '/' {
                    break;
                }
                tag.push(next);
                chars.next();
            }

            // Skip attributes up to the end of the tag
            let mut is_self_closing = false;
            for next in chars.by_ref() {
                if next == '/' {
                    is_self_closing = true;
                }
                if next == '>' {
                    break;
                }
            }

            if is_closing {
                match tag.as_str() {
                    "Valute" => {
                        let rate = Rate {
                            name: name.take().ok_or_else(|| {
                                ProviderError::Parse("Valute without Name".to_string())
                            })?,
                            value: value.take().ok_or_else(|| {
                                ProviderError::Parse("Valute without Value".to_string())
                            })?,
                        };
                        rates.push(rate);
                        in_valute = false;
                    }
                    "Name" if capturing == Some("Name") => {
                        name = Some(text.clone());
                        capturing = None;
                        text.clear();
                    }
                    "Value" if capturing == Some("Value") => {
                        value = Some(text.clone());
                        capturing = None;
                        text.clear();
                    }
                    _ => {}
                }
            } else {
                match tag.as_str() {
                    "Valute" => {
                        in_valute = true;
                        name = None;
                        value = None;
                    }
                    "Name" if in_valute && !is_self_closing => {
                        capturing = Some("Name");
                        text.clear();
                    }
                    "Value" if in_valute && !is_self_closing => {
                        capturing = Some("Value");
                        text.clear();
                    }
                    _ => {}
                }
            }
        } else if capturing.is_some() {
            // Decode XML entities
            if c == '&' {
                let mut entity = String::new();
                while let Some(&next) = chars.peek() {
                    if next == ';' {
                        chars.next();
                        break;
                    }
                    entity.push(next);
                    chars.next();
                }
                match entity.as_str() {
                    "lt" => text.push('<'),
                    "gt" => text.push('>'),
                    "amp" => text.push('&'),
                    "quot" => text.push('"'),
                    "apos" => text.push('\''),
                    _ => {
                        // Unknown entity, include as-is
                        text.push('&');
                        text.push_str(&entity);
                        text.push(';');
                    }
                }
            } else {
                text.push(c);
            }
        }
    }

    if in_valute {
        return Err(ProviderError::Parse("unterminated Valute element".to_string()));
    }

    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rates_realistic_document() {
        let xml = r#"<?xml version="1.0" encoding="windows-1251"?>
<ValCurs Date="02.03.2022" name="Foreign Currency Market">
<Valute ID="R01010">
<NumCode>036</NumCode>
<CharCode>AUD</CharCode>
<Nominal>1</Nominal>
<Name>Австралийский доллар</Name>
<Value>66,7276</Value>
</Valute>
<Valute ID="R01235">
<NumCode>840</NumCode>
<CharCode>USD</CharCode>
<Nominal>1</Nominal>
<Name>Доллар США</Name>
<Value>91,7457</Value>
</Valute>
</ValCurs>"#;
        let rates = parse_rates(xml).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].name, "Австралийский доллар");
        assert_eq!(rates[0].value, "66,7276");
        assert_eq!(rates[1].name, "Доллар США");
        assert_eq!(rates[1].value, "91,7457");
    }

    #[test]
    fn test_parse_rates_preserves_document_order() {
        let xml = "<ValCurs>\
            <Valute><Name>US Dollar</Name><Value>90,00</Value></Valute>\
            <Valute><Name>Euro</Name><Value>98,00</Value></Valute>\
            </ValCurs>";
        let rates = parse_rates(xml).unwrap();
        assert_eq!(
            rates,
            vec![
                Rate { name: "US Dollar".to_string(), value: "90,00".to_string() },
                Rate { name: "Euro".to_string(), value: "98,00".to_string() },
            ]
        );
    }

    #[test]
    fn test_parse_rates_decodes_entities() {
        let xml = "<ValCurs><Valute><Name>Special &amp; Drawing &quot;Rights&quot;</Name><Value>1,0</Value></Valute></ValCurs>";
        let rates = parse_rates(xml).unwrap();
        assert_eq!(rates[0].name, "Special & Drawing \"Rights\"");
    }

    #[test]
    fn test_parse_rates_ignores_other_children() {
        // Name/Value outside a Valute must not be captured either.
        let xml = "<ValCurs><Name>not a rate</Name>\
            <Valute><CharCode>USD</CharCode><Name>Dollar</Name><Value>90,0</Value></Valute>\
            </ValCurs>";
        let rates = parse_rates(xml).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].name, "Dollar");
    }

    #[test]
    fn test_parse_rates_missing_value_is_error() {
        let xml = "<ValCurs><Valute><Name>Dollar</Name></Valute></ValCurs>";
        let err = parse_rates(xml).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_parse_rates_self_closing_name_is_error() {
        let xml = "<ValCurs><Valute><Name/><Value>90,0</Value></Valute></ValCurs>";
        assert!(parse_rates(xml).is_err());
    }

    #[test]
    fn test_parse_rates_truncated_document_is_error() {
        let xml = "<ValCurs><Valute><Name>Dollar</Name><Value>90,0</Value>";
        assert!(parse_rates(xml).is_err());
    }

    #[test]
    fn test_parse_rates_no_valutes_is_empty() {
        // The feed answers like this for dates it has no data for.
        let xml = r#"<ValCurs Date="01.01.1900" name="Foreign Currency Market"></ValCurs>"#;
        let rates = parse_rates(xml).unwrap();
        assert!(rates.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_daily_rates() {
        let client = CbrClient::new();
        let rates = client.daily_rates("02/03/2022").await.unwrap();
        assert!(!rates.is_empty());
        assert!(rates.iter().any(|r| r.name.contains("США")));
    }
}
