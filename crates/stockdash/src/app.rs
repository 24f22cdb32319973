use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stockdash_client::prelude::Quote;

/// Shown when any quote in the batch fails; the underlying error is logged,
/// never rendered.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch stock data.";

/// Observable phases of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Ready,
    Errored(String),
}

/// Price sort applied to the table projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    None,
    Ascending,
    Descending,
}

/// Owned view state of the dashboard.
///
/// Mutated only through the transition methods below; everything the render
/// layer shows is derived from this struct on each draw.
pub struct App {
    pub phase: Phase,
    pub quotes: Vec<Quote>,
    pub search: String,
    pub sort: SortOrder,
    pub ticks: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            quotes: Vec::new(),
            search: String::new(),
            sort: SortOrder::None,
            ticks: 0,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Join point of the startup fetch: all quotes or a single error state.
    pub fn on_fetch_complete(&mut self, result: anyhow::Result<Vec<Quote>>) {
        match result {
            Ok(quotes) => {
                log::info!("Fetched {} quotes", quotes.len());
                self.quotes = quotes;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                log::error!("Error fetching stocks: {e:#}");
                self.quotes.clear();
                self.phase = Phase::Errored(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Advances the loading spinner.
    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Printable keys feed the search box, so the sort and quit controls
    /// live on non-printable keys.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up => self.sort = SortOrder::Ascending,
            KeyCode::Down => self.sort = SortOrder::Descending,
            KeyCode::Delete => self.sort = SortOrder::None,
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push(c);
            }
            _ => {}
        }
    }

    /// Table projection: case-insensitive symbol filter, then a stable price
    /// sort. Recomputed on every draw; insertion order is never lost.
    pub fn displayed(&self) -> Vec<&Quote> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<&Quote> = self
            .quotes
            .iter()
            .filter(|quote| quote.symbol.to_lowercase().contains(&needle))
            .collect();

        match self.sort {
            SortOrder::Ascending => rows.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::Descending => rows.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::None => {}
        }
        rows
    }

    /// Chart series: the unfiltered, unsorted quote list as (index, price).
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.quotes
            .iter()
            .enumerate()
            .map(|(i, quote)| (i as f64, quote.price))
            .collect()
    }

    /// X-axis labels parallel to [`App::chart_points`].
    pub fn chart_labels(&self) -> Vec<&str> {
        self.quotes.iter().map(|quote| quote.symbol.as_str()).collect()
    }

    /// Newest upstream quote time across the batch, for the status line.
    pub fn as_of(&self) -> Option<&str> {
        self.quotes
            .iter()
            .filter_map(|quote| quote.as_of.as_deref())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, price: f64, change_percent: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price,
            change_percent,
            as_of: None,
        }
    }

    fn ready_app() -> App {
        let mut app = App::new();
        app.on_fetch_complete(Ok(vec![
            quote("AAPL", 150.0, 2.0),
            quote("MSFT", 420.0, -0.5),
            quote("GOOGL", 180.0, 1.1),
            quote("AMZN", 180.0, 0.0),
        ]));
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn starts_loading() {
        let app = App::new();
        assert!(app.is_loading());
        assert!(app.quotes.is_empty());
    }

    #[test]
    fn successful_fetch_enters_ready() {
        let app = ready_app();
        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.quotes.len(), 4);
    }

    #[test]
    fn failed_fetch_blanks_the_dashboard() {
        let mut app = App::new();
        app.on_fetch_complete(Ok(vec![quote("AAPL", 150.0, 2.0)]));
        app.on_fetch_complete(Err(anyhow::anyhow!("connection refused")));
        assert_eq!(app.phase, Phase::Errored(FETCH_ERROR_MESSAGE.to_string()));
        assert!(app.quotes.is_empty());
        assert!(app.displayed().is_empty());
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut app = ready_app();
        app.search = "aapl".to_string();
        let rows = app.displayed();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "AAPL");
    }

    #[test]
    fn empty_search_matches_everything() {
        let app = ready_app();
        assert_eq!(app.displayed().len(), 4);
    }

    #[test]
    fn ascending_sort_is_monotonic() {
        let mut app = ready_app();
        app.sort = SortOrder::Ascending;
        let prices: Vec<f64> = app.displayed().iter().map(|q| q.price).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn descending_sort_is_monotonic() {
        let mut app = ready_app();
        app.sort = SortOrder::Descending;
        let prices: Vec<f64> = app.displayed().iter().map(|q| q.price).collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn sort_is_stable_for_equal_prices() {
        let mut app = ready_app();
        app.sort = SortOrder::Ascending;
        let symbols: Vec<&str> = app.displayed().iter().map(|q| q.symbol.as_str()).collect();
        // GOOGL and AMZN share a price; fetch order breaks the tie
        assert_eq!(symbols, ["AAPL", "GOOGL", "AMZN", "MSFT"]);
    }

    #[test]
    fn clearing_sort_restores_fetch_order() {
        let mut app = ready_app();
        app.on_key(press(KeyCode::Up));
        assert_eq!(app.sort, SortOrder::Ascending);
        app.on_key(press(KeyCode::Delete));
        assert_eq!(app.sort, SortOrder::None);
        let symbols: Vec<&str> = app.displayed().iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "GOOGL", "AMZN"]);
    }

    #[test]
    fn typing_edits_the_search_text() {
        let mut app = ready_app();
        app.on_key(press(KeyCode::Char('m')));
        app.on_key(press(KeyCode::Char('s')));
        assert_eq!(app.search, "ms");
        app.on_key(press(KeyCode::Backspace));
        assert_eq!(app.search, "m");
    }

    #[test]
    fn chart_ignores_filter_and_sort() {
        let mut app = ready_app();
        app.search = "aapl".to_string();
        app.sort = SortOrder::Descending;
        let points = app.chart_points();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], (0.0, 150.0));
        assert_eq!(app.chart_labels(), ["AAPL", "MSFT", "GOOGL", "AMZN"]);
    }

    #[test]
    fn escape_quits() {
        let mut app = ready_app();
        app.on_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
