use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated ticker symbols to watch instead of the default list.
    #[arg(long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,
}

impl Cli {
    /// The symbols to fetch; upper-cased, defaulting to [`crate::WATCHLIST`].
    pub fn watchlist(&self) -> Vec<String> {
        match &self.symbols {
            Some(symbols) => symbols
                .iter()
                .map(|symbol| symbol.trim().to_uppercase())
                .filter(|symbol| !symbol.is_empty())
                .collect(),
            None => crate::WATCHLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_defaults_to_fixed_symbols() {
        let cli = Cli { symbols: None };
        assert_eq!(cli.watchlist(), ["AAPL", "MSFT", "GOOGL", "AMZN"]);
    }

    #[test]
    fn watchlist_uppercases_overrides() {
        let cli = Cli {
            symbols: Some(vec!["nvda".to_string(), " tsla ".to_string()]),
        };
        assert_eq!(cli.watchlist(), ["NVDA", "TSLA"]);
    }
}
