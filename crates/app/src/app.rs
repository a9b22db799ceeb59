//! Interactive terminal dashboard.
//!
//! One render pass per refresh trigger, following the page model of the
//! original dashboard: connect once, resolve both queries through the
//! result cache, and describe the page. The event loop only reacts to the
//! refresh and quit keys; there are no background tasks and no timers.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::SetTitle,
};
use jiff::Zoned;
use ratatui::DefaultTerminal;

use bestellblick::{
    cache::QueryCache,
    client::RestClient,
    config::Config,
    view::{DashboardView, render_pass},
};

/// Poll interval for input events between renders.
const TICK: Duration = Duration::from_millis(250);

/// Terminal window title.
const TITLE: &str = "📦 Bestell-Dashboard";

/// Page-level state machine: `Init` connects, `Ready` renders the sections,
/// `Halted` shows the single connection error and nothing else. The refresh
/// key re-enters `Init` from the halted state, like a page reload.
pub(crate) enum Phase {
    /// Not yet connected.
    Init,

    /// Connected; the view is the last completed render pass.
    Ready {
        /// Long-lived per-session database handle.
        client: RestClient,

        /// Description of the current page.
        view: DashboardView,
    },

    /// Connection failed; only the error message renders.
    Halted {
        /// Display-ready error message.
        message: String,
    },
}

/// Dashboard application state.
pub struct App {
    config: Config,
    cache: QueryCache,
    phase: Phase,
    last_refresh: Option<Zoned>,
    should_quit: bool,
}

impl App {
    /// New dashboard in the initial state; nothing fetched yet.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cache: QueryCache::new(),
            phase: Phase::Init,
            last_refresh: None,
            should_quit: false,
        }
    }

    pub(crate) fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Sidebar line with the wall-clock time of the last completed pass.
    pub(crate) fn refresh_label(&self) -> Option<String> {
        self.last_refresh
            .as_ref()
            .map(|at| format!("Stand: {}", at.strftime("%H:%M:%S")))
    }

    /// Connect and run the first render pass.
    fn enter(&mut self) {
        match RestClient::connect(&self.config) {
            Ok(client) => {
                let view = render_pass(&client, &mut self.cache);
                self.last_refresh = Some(Zoned::now());
                self.phase = Phase::Ready { client, view };
            }
            Err(err) => {
                self.phase = Phase::Halted {
                    message: format!("Verbindungsfehler: {err}"),
                };
            }
        }
    }

    /// Rerun the render pass on the existing connection.
    fn rerender(&mut self) {
        if let Phase::Ready { client, view } = &mut self.phase {
            *view = render_pass(client, &mut self.cache);
            self.last_refresh = Some(Zoned::now());
        }
    }

    /// The refresh control: drop every cached result and rerun the page.
    /// From the halted state this retries the connection instead.
    fn refresh(&mut self) {
        self.cache.clear();

        if matches!(self.phase, Phase::Ready { .. }) {
            self.rerender();
        } else {
            self.enter();
        }
    }

    /// Drive the dashboard until the user quits.
    ///
    /// # Errors
    ///
    /// Returns a display-ready message when the terminal cannot be driven.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> Result<(), String> {
        self.enter();

        while !self.should_quit {
            terminal
                .draw(|frame| crate::ui::draw(frame, &self))
                .map_err(|err| format!("Terminalfehler: {err}"))?;

            self.handle_events()?;
        }

        Ok(())
    }

    fn handle_events(&mut self) -> Result<(), String> {
        let ready = event::poll(TICK).map_err(|err| format!("Eingabefehler: {err}"))?;
        if !ready {
            return Ok(());
        }

        let happened = event::read().map_err(|err| format!("Eingabefehler: {err}"))?;
        if let Event::Key(key) = happened {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('r') => self.refresh(),
                _ => {}
            }
        }

        Ok(())
    }
}

/// Run the interactive dashboard on the current terminal.
///
/// # Errors
///
/// Returns a display-ready message when the terminal cannot be driven.
pub fn run(config: Config) -> Result<(), String> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), SetTitle(TITLE)).ok();

    let result = App::new(config).run(&mut terminal);

    ratatui::restore();

    result
}
