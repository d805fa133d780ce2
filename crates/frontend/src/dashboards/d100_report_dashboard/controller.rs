use contracts::domain::a001_report::{normalize, FilterCriteria, Report, Series};
use contracts::enums::{ChartKind, ExportFormat};

use super::api::FetchError;
use super::chart::{render, ChartSurface};
use super::export::{ExportDispatcher, ExportOpener};
use super::store::ReportStore;

/// Which report, if any, the user has activated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(i64),
}

impl SelectionState {
    pub fn selected_id(&self) -> Option<i64> {
        match self {
            SelectionState::Unselected => None,
            SelectionState::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected_id() == Some(id)
    }

    /// Returns `true` on a transition; re-selecting the current report is a no-op
    pub fn select(&mut self, id: i64) -> bool {
        if self.is_selected(id) {
            return false;
        }
        *self = SelectionState::Selected(id);
        true
    }

    pub fn clear(&mut self) -> bool {
        if *self == SelectionState::Unselected {
            return false;
        }
        *self = SelectionState::Unselected;
        true
    }
}

/// Identity of one render cycle: the selected report at a given data
/// revision. The chart is redrawn only when this changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderKey {
    pub report_id: i64,
    pub revision: u64,
}

/// Everything the renderer needs for the selected report
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub report_id: i64,
    pub kind: String,
    pub title: String,
    pub series: Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Same selection, same data: nothing was done
    Unchanged,
    Drawn(ChartKind),
    /// Selected report has a kind we cannot draw
    Unsupported,
    /// No selection; the surface was cleared
    Cleared,
}

/// Orchestrates the report store, selection, chart rendering and export.
///
/// The selected report is kept as a snapshot taken when it was selected
/// and refreshed whenever a fetch returns the same id. A fetch that no
/// longer lists it leaves both the selection and the snapshot in place.
#[derive(Debug)]
pub struct DashboardController<O> {
    store: ReportStore,
    selection: SelectionState,
    selected: Option<Report>,
    revision: u64,
    last_rendered: Option<Option<RenderKey>>,
    exporter: ExportDispatcher<O>,
}

impl<O: ExportOpener> DashboardController<O> {
    pub fn new(exporter: ExportDispatcher<O>) -> Self {
        Self {
            store: ReportStore::new(),
            selection: SelectionState::Unselected,
            selected: None,
            revision: 0,
            last_rendered: None,
            exporter,
        }
    }

    pub fn reports(&self) -> &[Report] {
        self.store.reports()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.store.criteria()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn exporter(&self) -> &ExportDispatcher<O> {
        &self.exporter
    }

    // ------------------------------------------------------------------
    // Filters and fetching
    // ------------------------------------------------------------------

    /// Returns `true` when the criteria changed and a re-fetch is due
    pub fn set_kind_filter(&mut self, code: &str) -> bool {
        self.store.set_kind_filter(code)
    }

    /// Returns `true` when the criteria changed and a re-fetch is due
    pub fn set_date_filter(&mut self, date: &str) -> bool {
        self.store.set_date_filter(date)
    }

    /// Apply a completed fetch. The selection is never touched here.
    pub fn apply_fetch(&mut self, outcome: Result<Vec<Report>, FetchError>) -> bool {
        if !self.store.apply(outcome) {
            return false;
        }
        if let Some(id) = self.selection.selected_id() {
            if let Some(fresh) = self.store.find(id) {
                self.selected = Some(fresh.clone());
                self.revision = self.store.generation();
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Activate a report card. Ids not in the current list are ignored.
    pub fn select(&mut self, id: i64) -> bool {
        if self.selection.is_selected(id) {
            return false;
        }
        let Some(report) = self.store.find(id) else {
            log::warn!("Ignoring selection of unknown report {}", id);
            return false;
        };
        self.selected = Some(report.clone());
        self.revision = self.store.generation();
        self.selection.select(id)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selected = None;
        self.selection.clear()
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render_key(&self) -> Option<RenderKey> {
        self.selected.as_ref().map(|report| RenderKey {
            report_id: report.id,
            revision: self.revision,
        })
    }

    /// Normalize the selected report into renderer input
    pub fn chart_request(&self) -> Option<ChartRequest> {
        self.selected.as_ref().map(|report| ChartRequest {
            report_id: report.id,
            kind: report.kind.clone(),
            title: report.title.clone(),
            series: normalize(&report.result),
        })
    }

    /// Run a render cycle if the selection or its data changed since the
    /// last one.
    pub fn render_selected<S>(&mut self, surface: &mut S) -> RenderOutcome
    where
        S: ChartSurface + ?Sized,
    {
        let key = self.render_key();
        if self.last_rendered == Some(key) {
            return RenderOutcome::Unchanged;
        }
        self.last_rendered = Some(key);

        match self.chart_request() {
            None => {
                surface.clear();
                RenderOutcome::Cleared
            }
            Some(request) => {
                surface.clear();
                match render(surface, &request.series, &request.kind, &request.title) {
                    Some(kind) => RenderOutcome::Drawn(kind),
                    None => RenderOutcome::Unsupported,
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Export the selected report. Without a selection nothing is issued.
    pub fn export(&self, format: ExportFormat) -> bool {
        self.exporter.export_selection(&self.selection, format)
    }
}
