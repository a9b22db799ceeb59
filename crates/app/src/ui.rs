//! Ratatui layout and widget rendering for the dashboard page.
//!
//! Rendering is a pure projection of the [`DashboardView`]; no state is
//! mutated and no queries are issued from here.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use bestellblick::{
    orders::OrderRow,
    products::Product,
    view::{DashboardView, Section},
};

use crate::app::{App, Phase};

/// Fixed accent hue for the stock bars.
const ACCENT: Color = Color::Blue;

/// Chart section height in terminal rows.
const CHART_HEIGHT: u16 = 12;

/// Draw the whole page for the current application state.
pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    match app.phase() {
        Phase::Init => draw_connecting(frame),
        Phase::Ready { view, .. } => draw_dashboard(frame, view, app.refresh_label().as_deref()),
        Phase::Halted { message } => draw_connection_error(frame, message),
    }
}

fn draw_connecting(frame: &mut Frame<'_>) {
    let text = Paragraph::new("Verbindung wird aufgebaut …")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, frame.area());
}

/// Single connection-error screen; nothing else renders below it.
fn draw_connection_error(frame: &mut Frame<'_>, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "[r] erneut verbinden   [q] beenden",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(text, frame.area());
}

/// Full dashboard: title, sidebar beside the two tables, chart, footer.
fn draw_dashboard(frame: &mut Frame<'_>, view: &DashboardView, refresh_label: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title
            Constraint::Min(10),              // Sidebar and tables
            Constraint::Length(CHART_HEIGHT), // Chart
            Constraint::Length(1),            // Footer
        ])
        .split(frame.area());

    draw_title(frame, chunks[0]);
    draw_main(frame, chunks[1], view, refresh_label);
    draw_chart(frame, chunks[2], view);
    draw_footer(frame, chunks[3]);
}

fn draw_title(frame: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(Span::styled(
        "📦 Live Bestell-Dashboard",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, area);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect) {
    let footer = Paragraph::new(Span::styled(
        "Datenquelle: Supabase (AWS Ireland) | Automatisierung: Make.com",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(footer, area);
}

fn draw_main(frame: &mut Frame<'_>, area: Rect, view: &DashboardView, refresh_label: Option<&str>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26), // Sidebar
            Constraint::Fill(1),    // Inventory, the narrow column
            Constraint::Fill(2),    // History, the wide column
        ])
        .split(area);

    draw_sidebar(frame, columns[0], refresh_label);
    draw_inventory(frame, columns[1], &view.inventory);
    draw_history(frame, columns[2], view);
}

fn draw_sidebar(frame: &mut Frame<'_>, area: Rect, refresh_label: Option<&str>) {
    let dim = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            "Einstellungen",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![Span::styled("[r] ", key), Span::raw("Daten aktualisieren")]),
        Line::from(vec![Span::styled("[q] ", key), Span::raw("Beenden")]),
        Line::raw(""),
        Line::from(Span::styled("────────────────────", dim)),
        Line::from(vec![
            Span::raw("Server-Region: "),
            Span::styled("Irland (EU)", Style::default().add_modifier(Modifier::BOLD)),
        ]),
    ];

    if let Some(label) = refresh_label {
        lines.push(Line::from(Span::styled(label.to_string(), dim)));
    }

    let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(sidebar, area);
}

fn draw_inventory(frame: &mut Frame<'_>, area: Rect, section: &Section<Vec<Product>>) {
    let block = Block::default().borders(Borders::ALL).title(" 📊 Lagerbestand ");

    match section {
        Section::Loaded(products) => {
            let header = Row::new(["SKU", "Produktname", "Bestand"])
                .style(Style::default().add_modifier(Modifier::BOLD));

            let rows = products.iter().map(|product| {
                Row::new(vec![
                    Cell::from(product.sku.clone()),
                    Cell::from(product.name.clone()),
                    Cell::from(Text::from(product.stock.to_string()).right_aligned()),
                ])
            });

            let table = Table::new(
                rows,
                [
                    Constraint::Length(10),
                    Constraint::Fill(1),
                    Constraint::Length(7),
                ],
            )
            .header(header)
            .block(block);

            frame.render_widget(table, area);
        }
        // An empty inventory renders no table and no message.
        Section::Empty => frame.render_widget(block, area),
        Section::Failed(err) => {
            let message = format!("Fehler beim Laden der Produkte: {err}");
            draw_section_error(frame, area, block, &message);
        }
    }
}

fn draw_history(frame: &mut Frame<'_>, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 📜 Bestell-Historie ");

    match &view.history {
        Section::Loaded(rows) => draw_history_table(frame, area, block, rows, view.skipped_orders),
        Section::Empty => {
            let info = Paragraph::new("Noch keine Bestellungen in der Datenbank.")
                .style(Style::default().fg(Color::Cyan))
                .block(block);
            frame.render_widget(info, area);
        }
        Section::Failed(err) => {
            let message = format!("Fehler beim Laden der Bestellungen: {err}");
            draw_section_error(frame, area, block, &message);
        }
    }
}

fn draw_history_table(
    frame: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    rows: &[OrderRow],
    skipped: usize,
) {
    let (table_area, note_area) = if skipped > 0 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);
        (split[0], Some(split[1]))
    } else {
        (area, None)
    };

    let header = Row::new(["Datum", "Kunde", "Produkt", "SKU", "Menge"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.date.clone()),
            Cell::from(row.customer.clone()),
            Cell::from(row.product.clone()),
            Cell::from(row.sku.clone()),
            Cell::from(Text::from(row.quantity.to_string()).right_aligned()),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(15),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, table_area);

    if let Some(note_area) = note_area {
        let note = Paragraph::new(format!(
            "({skipped} Zeilen ohne Produktbezug übersprungen)"
        ))
        .style(Style::default().fg(Color::Yellow));
        frame.render_widget(note, note_area);
    }
}

fn draw_section_error(frame: &mut Frame<'_>, area: Rect, block: Block<'_>, message: &str) {
    let text = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(text, area);
}

fn draw_chart(frame: &mut Frame<'_>, area: Rect, view: &DashboardView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 📈 Bestandsübersicht (Menge im Lager) ");

    match view.chart_bars() {
        Some(data) => {
            let bars: Vec<Bar<'_>> = data
                .iter()
                .map(|(name, stock)| {
                    Bar::default()
                        .value(*stock)
                        .label(Line::from(name.clone()))
                        .text_value(stock.to_string())
                        .style(Style::default().fg(ACCENT))
                        .value_style(Style::default().fg(Color::Black).bg(ACCENT))
                })
                .collect();

            let chart = BarChart::default()
                .data(BarGroup::default().bars(&bars))
                .bar_width(bar_width(area.width, data.len()))
                .bar_gap(2)
                .block(block);

            frame.render_widget(chart, area);
        }
        None => {
            let info = Paragraph::new("Keine Daten für das Diagramm verfügbar.")
                .style(Style::default().fg(Color::Cyan))
                .block(block);
            frame.render_widget(info, area);
        }
    }
}

/// Bar width that spreads the bars over the available row, clamped to a
/// readable range so labels stay legible.
fn bar_width(total: u16, bars: usize) -> u16 {
    let count = u16::try_from(bars.max(1)).unwrap_or(u16::MAX);
    (total / count).saturating_sub(2).clamp(5, 14)
}
