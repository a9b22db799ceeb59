//! One-shot plain-text rendering of the dashboard.
//!
//! For headless use (cron jobs, CI checks): one render pass, written to
//! stdout with the same sections, messages, and section-scoped error
//! handling as the interactive page.

use std::io::{self, Write};

use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};

use bestellblick::{
    cache::QueryCache,
    client::RestClient,
    config::Config,
    view::{DashboardView, Section, render_pass},
};

/// Width of the textual stock bars in the overview section.
const BAR_WIDTH: u64 = 30;

/// Run one render pass and print it to stdout.
///
/// # Errors
///
/// Returns a display-ready message on connection failure or when stdout
/// cannot be written. Query failures print inline like the interactive
/// dashboard and are not fatal.
pub fn run(config: &Config) -> Result<(), String> {
    let client =
        RestClient::connect(config).map_err(|err| format!("Verbindungsfehler: {err}"))?;

    let mut cache = QueryCache::new();
    let view = render_pass(&client, &mut cache);

    let stdout = io::stdout();
    write_view(&mut stdout.lock(), &view).map_err(|err| format!("Ausgabefehler: {err}"))
}

/// Write the full dashboard text to `out`.
///
/// # Errors
///
/// Returns an error when `out` cannot be written.
pub fn write_view(out: &mut impl Write, view: &DashboardView) -> io::Result<()> {
    writeln!(out, "📦 Live Bestell-Dashboard")?;

    writeln!(out, "\n📊 Lagerbestand")?;
    match &view.inventory {
        Section::Loaded(products) => {
            let mut builder = Builder::default();
            builder.push_record(["SKU", "Produktname", "Bestand"]);
            for product in products {
                builder.push_record([
                    product.sku.clone(),
                    product.name.clone(),
                    product.stock.to_string(),
                ]);
            }
            writeln!(out, "{}", styled(builder))?;
        }
        // An empty inventory prints no table and no message.
        Section::Empty => {}
        Section::Failed(err) => writeln!(out, "Fehler beim Laden der Produkte: {err}")?,
    }

    writeln!(out, "\n📜 Bestell-Historie")?;
    match &view.history {
        Section::Loaded(rows) => {
            let mut builder = Builder::default();
            builder.push_record(["Datum", "Kunde", "Produkt", "SKU", "Menge"]);
            for row in rows {
                builder.push_record([
                    row.date.clone(),
                    row.customer.clone(),
                    row.product.clone(),
                    row.sku.clone(),
                    row.quantity.to_string(),
                ]);
            }
            writeln!(out, "{}", styled(builder))?;

            if view.skipped_orders > 0 {
                writeln!(
                    out,
                    "({} Zeilen ohne Produktbezug übersprungen)",
                    view.skipped_orders
                )?;
            }
        }
        Section::Empty => writeln!(out, "Noch keine Bestellungen in der Datenbank.")?,
        Section::Failed(err) => writeln!(out, "Fehler beim Laden der Bestellungen: {err}")?,
    }

    writeln!(out, "\n📈 Bestandsübersicht")?;
    match view.chart_bars() {
        Some(bars) => {
            let max = bars.iter().map(|(_, stock)| *stock).max().unwrap_or(0);

            let mut builder = Builder::default();
            builder.push_record(["Produkt", "", "Menge im Lager"]);
            for (name, stock) in &bars {
                builder.push_record([name.clone(), stock_bar(*stock, max), stock.to_string()]);
            }
            writeln!(out, "{}", styled(builder))?;
        }
        None => writeln!(out, "Keine Daten für das Diagramm verfügbar.")?,
    }

    writeln!(out, "\nDatenquelle: Supabase (AWS Ireland) | Automatisierung: Make.com")
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::last(), Alignment::right());

    table.to_string()
}

fn stock_bar(stock: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }

    let filled = usize::try_from(stock.saturating_mul(BAR_WIDTH) / max).unwrap_or(0);
    "█".repeat(filled)
}
