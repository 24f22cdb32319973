use crate::app::{App, Phase};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Put the terminal into raw mode on the alternate screen.
pub fn init() -> io::Result<Tui> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Hand the terminal back to the shell.
pub fn restore() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.phase {
        Phase::Loading => draw_loading(frame, app),
        Phase::Errored(message) => draw_error(frame, message),
        Phase::Ready => draw_dashboard(frame, app),
    }
}

fn draw_loading(frame: &mut Frame, app: &App) {
    let spinner = SPINNER[app.ticks % SPINNER.len()];
    let message = Paragraph::new(format!("{spinner} Fetching stock data ..."))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Blue));
    frame.render_widget(message, centered_line(frame.area()));
}

fn draw_error(frame: &mut Frame, message: &str) {
    let error = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(error, centered_line(frame.area()));
}

fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // title
            Constraint::Length(3),  // search bar
            Constraint::Length(1),  // key help
            Constraint::Min(6),     // table
            Constraint::Length(14), // chart
            Constraint::Length(1),  // status
        ])
        .split(frame.area());

    let title = Paragraph::new("Stock Price Dashboard")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    let search = Paragraph::new(app.search.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search by Symbol"),
    );
    frame.render_widget(search, chunks[1]);

    let help = Paragraph::new("type to filter | Up/Down sort by price | Del clear sort | Esc quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    draw_table(frame, app, chunks[3]);
    draw_chart(frame, app, chunks[4]);

    let status = match app.as_of() {
        Some(as_of) => format!("{} quotes | as of {as_of}", app.quotes.len()),
        None => format!("{} quotes", app.quotes.len()),
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Symbol", "Price", "Change %"])
        .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD));

    let rows = app.displayed().into_iter().map(|quote| {
        Row::new(vec![
            Cell::from(quote.symbol.clone()),
            Cell::from(format_price(quote.price)),
            Cell::from(format_change(quote.change_percent))
                .style(change_style(quote.change_percent)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Quotes"));
    frame.render_widget(table, area);
}

fn draw_chart(frame: &mut Frame, app: &App, area: Rect) {
    let points = app.chart_points();
    if points.is_empty() {
        frame.render_widget(
            Block::default().borders(Borders::ALL).title("Stock Prices"),
            area,
        );
        return;
    }

    let lo = points.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let hi = points
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * 0.05).max(1.0);
    let y_bounds = [lo - pad, hi + pad];

    let datasets = vec![Dataset::default()
        .name("Stock Prices ($)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let x_labels: Vec<Span> = app.chart_labels().into_iter().map(Span::from).collect();
    let y_labels: Vec<Span> = [y_bounds[0], (y_bounds[0] + y_bounds[1]) / 2.0, y_bounds[1]]
        .iter()
        .map(|value| Span::from(format!("{value:.0}")))
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Stock Prices"))
        .x_axis(
            Axis::default()
                .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(y_labels)
                .title("Price ($)"),
        );
    frame.render_widget(chart, area);
}

/// One-line rect in the vertical middle of `area`, for centered messages.
fn centered_line(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Percentage(50),
        ])
        .split(area);
    chunks[1]
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn format_change(change: f64) -> String {
    format!("{change:.2}%")
}

fn change_style(change: f64) -> Style {
    if change >= 0.0 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_render_with_currency_prefix() {
        assert_eq!(format_price(150.0), "$150.00");
        assert_eq!(format_price(0.5), "$0.50");
    }

    #[test]
    fn changes_render_to_two_decimals() {
        assert_eq!(format_change(2.0), "2.00%");
        assert_eq!(format_change(-0.456), "-0.46%");
    }

    #[test]
    fn zero_change_styles_positive() {
        assert_eq!(change_style(0.0).fg, Some(Color::Green));
        assert_eq!(change_style(-0.01).fg, Some(Color::Red));
    }
}
