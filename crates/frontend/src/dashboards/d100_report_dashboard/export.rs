use contracts::enums::ExportFormat;
use thiserror::Error;

use super::api::export_url;
use super::controller::SelectionState;
use crate::shared::api_utils::api_base;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No window object")]
    NoWindow,

    #[error("Failed to open export: {0}")]
    Open(String),
}

/// Starts a download in a new, independent browsing context
pub trait ExportOpener {
    fn open(&self, url: &str) -> Result<(), ExportError>;
}

/// Opens export URLs with `window.open(url, "_blank")`
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowOpener;

impl ExportOpener for WindowOpener {
    fn open(&self, url: &str) -> Result<(), ExportError> {
        let window = web_sys::window().ok_or(ExportError::NoWindow)?;
        window
            .open_with_url_and_target(url, "_blank")
            .map_err(|e| ExportError::Open(format!("{:?}", e)))?;
        Ok(())
    }
}

/// Builds export requests and hands them to the opener.
///
/// Fire-and-forget: the response is never awaited or inspected, and no
/// dashboard state is touched.
#[derive(Debug, Clone)]
pub struct ExportDispatcher<O> {
    base: String,
    opener: O,
}

impl ExportDispatcher<WindowOpener> {
    pub fn for_window() -> Self {
        Self::new(api_base(), WindowOpener)
    }
}

impl<O: ExportOpener> ExportDispatcher<O> {
    pub fn new(base: impl Into<String>, opener: O) -> Self {
        Self {
            base: base.into(),
            opener,
        }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Open the export of one report. Returns `true` when a request was
    /// issued; opener failures are logged and swallowed.
    pub fn export_report(&self, report_id: i64, format: ExportFormat) -> bool {
        let url = export_url(&self.base, report_id, format);
        log::info!("Exporting report {} as {}: {}", report_id, format, url);
        match self.opener.open(&url) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Export of report {} failed: {}", report_id, err);
                false
            }
        }
    }

    /// Export the selected report; a no-op without a selection
    pub fn export_selection(&self, selection: &SelectionState, format: ExportFormat) -> bool {
        match selection.selected_id() {
            Some(id) => self.export_report(id, format),
            None => {
                log::debug!("Export {} ignored: no report selected", format);
                false
            }
        }
    }
}
