use crate::{comparison_renderer::ComparisonView, result_presenter::ResultPanel};

/// Everything outside the map that an operation may show or hide.
#[derive(Debug, Default)]
pub struct ViewState {
    pub result: Option<ResultPanel>,
    /// The step log section
    pub calculation_visible: bool,
    pub comparison: Option<ComparisonView>,
    pub status: Option<String>,
    busy: bool,
    alerts: Vec<String>,
}

impl ViewState {
    pub fn hide_results(&mut self) {
        self.result = None;
        self.calculation_visible = false;
        self.comparison = None;
    }

    pub fn begin_busy(&mut self, status: impl Into<String>) {
        self.busy = true;
        self.status = Some(status.into());
    }

    pub fn end_busy(&mut self) {
        self.busy = false;
        self.status = None;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drains pending alerts, oldest first.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
