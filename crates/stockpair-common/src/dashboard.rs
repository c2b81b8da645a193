use crate::figure::{self, FigureSpec};
use crate::query::filter;
use crate::schema::{ChartMode, Selection};
use crate::table::PriceTable;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Dashboard: the page's event handler, free of any UI framework
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// What the page's widgets offer, and what they start on.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Controls {
    pub symbols: Vec<String>,
    pub years: Vec<i32>,
    pub modes: Vec<ChartMode>,
    pub defaults: Selection,
}

/// Shares one read-only [`PriceTable`] between every handler.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Arc<PriceTable>,
}

impl Dashboard {
    pub fn new(table: Arc<PriceTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// First symbol, second symbol, first year, price mode.
    ///
    /// A single-symbol table compares that symbol with itself; an empty
    /// table yields blank symbols and year 0, which match nothing.
    pub fn initial_selection(&self) -> Selection {
        let symbols = self.table.distinct_symbols();
        let symbol_a = symbols.first().cloned().unwrap_or_default();
        let symbol_b = symbols.get(1).cloned().unwrap_or_else(|| symbol_a.clone());
        Selection {
            symbol_a,
            symbol_b,
            year: self.table.distinct_years().first().copied().unwrap_or_default(),
            mode: ChartMode::default(),
        }
    }

    pub fn controls(&self) -> Controls {
        Controls {
            symbols: self.table.distinct_symbols().to_vec(),
            years: self.table.distinct_years().to_vec(),
            modes: ChartMode::ALL.to_vec(),
            defaults: self.initial_selection(),
        }
    }

    /// Recomputes the chart for `selection`: one query per symbol, then the
    /// figure.
    pub fn on_selection_changed(&self, selection: &Selection) -> FigureSpec {
        let Selection {
            symbol_a,
            symbol_b,
            year,
            mode,
        } = selection;

        for symbol in [symbol_a, symbol_b] {
            if !self.table.contains_symbol(symbol) {
                debug!("[{symbol}] not in dataset; charting an empty series");
            }
        }

        let series_a = filter(&self.table, symbol_a, *year);
        let series_b = filter(&self.table, symbol_b, *year);
        trace!(
            "[{symbol_a}] {} rows vs [{symbol_b}] {} rows in {year} ({mode})",
            series_a.len(),
            series_b.len(),
        );

        figure::build(&series_a, &series_b, symbol_a, symbol_b, *mode)
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// Showing the figure of the current selection
    Idle,

    /// Inside a selection change
    Recomputing,
}

/// One user's view: the widget-held selection and the chart on display.
#[derive(Debug, Clone)]
pub struct Session {
    dashboard: Dashboard,
    selection: Selection,
    figure: FigureSpec,
    state: ShellState,
}

impl Session {
    /// Starts on the default selection, already rendered.
    pub fn new(dashboard: Dashboard) -> Self {
        let selection = dashboard.initial_selection();
        let figure = dashboard.on_selection_changed(&selection);
        Self {
            dashboard,
            selection,
            figure,
            state: ShellState::Idle,
        }
    }

    /// Replaces the selection and the displayed figure in one full cycle.
    pub fn apply(&mut self, selection: Selection) -> &FigureSpec {
        self.state = ShellState::Recomputing;
        trace!("recomputing for {selection:?}");
        self.figure = self.dashboard.on_selection_changed(&selection);
        self.selection = selection;
        self.state = ShellState::Idle;
        &self.figure
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn figure(&self) -> &FigureSpec {
        &self.figure
    }

    pub fn state(&self) -> ShellState {
        self.state
    }
}
