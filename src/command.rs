/// A parsed user command.
///
/// Parsing never fails: anything that isn't an exact match for one of the
/// known commands (including a known command with the wrong number of
/// arguments) is `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Info,
    /// `/country <CODE>` - two-letter code, uppercased here.
    Country { code: String },
    /// `/currency <dd/mm/yyyy>` - date passed through verbatim.
    Currency { date: String },
    /// `/stock <TICKER> <from> <to>` - dates in yyyy-mm-dd, all verbatim.
    Stock { ticker: String, from: String, to: String },
    Unrecognized,
}

impl Command {
    /// Parse raw message text into a command.
    ///
    /// The text is split on whitespace; the first token is matched
    /// case-insensitively, the rest must match the command's exact arity.
    pub fn parse(text: &str) -> Self {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return Command::Unrecognized;
        };

        match (first.to_lowercase().as_str(), &tokens[1..]) {
            ("/start", []) => Command::Start,
            ("/info", []) => Command::Info,
            ("/country", [code]) => Command::Country { code: code.to_uppercase() },
            ("/currency", [date]) => Command::Currency { date: (*date).to_string() },
            ("/stock", [ticker, from, to]) => Command::Stock {
                ticker: (*ticker).to_string(),
                from: (*from).to_string(),
                to: (*to).to_string(),
            },
            _ => Command::Unrecognized,
        }
    }
}
