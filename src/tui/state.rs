use crate::engine::{compute, Inputs, Results};
use crate::export;
use crate::fields::FieldKey;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

const MAX_LOGS: usize = 200;

/// Snapshot published to the form after every change.
#[derive(Debug, Clone)]
pub struct AppState {
    pub inputs: Inputs,
    pub results: Results,
    pub last_export: Option<PathBuf>,
    pub logs: VecDeque<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl AppState {
    pub fn new(inputs: Inputs) -> Self {
        let results = compute(&inputs);
        Self {
            inputs,
            results,
            last_export: None,
            logs: VecDeque::with_capacity(MAX_LOGS),
        }
    }

    /// Apply text entered for a field and recompute. Returns false when the
    /// value was rejected (unknown choice) and nothing changed.
    pub fn set_field(&mut self, key: FieldKey, raw: &str) -> bool {
        if !key.apply(&mut self.inputs, raw) {
            self.push_log("WARN", format!("{}: unknown option '{}'", key.label(), raw));
            return false;
        }
        self.recompute();
        true
    }

    pub fn cycle_field(&mut self, key: FieldKey) {
        key.cycle(&mut self.inputs);
        self.recompute();
    }

    pub fn reset(&mut self, inputs: Inputs) {
        self.inputs = inputs;
        self.recompute();
        self.push_log("INFO", "scenario reset".to_string());
    }

    /// Replace the results wholesale from the current inputs.
    fn recompute(&mut self) {
        let previous = self.results.decision;
        self.results = compute(&self.inputs);
        tracing::debug!(
            decision = self.results.decision.label(),
            roi_pct = self.results.roi_pct,
            breakeven = self.results.breakeven.label(),
            "projection recomputed"
        );
        if self.results.decision != previous {
            tracing::info!(
                from = previous.label(),
                to = self.results.decision.label(),
                "decision changed"
            );
            self.push_log(
                self.results.decision.label(),
                format!("decision {} -> {}", previous.label(), self.results.decision.label()),
            );
        }
    }

    /// Write the current snapshot as CSV into `dir`. Failures are logged
    /// and shown in the activity pane; the form keeps running.
    pub fn export_to(&mut self, dir: &Path, date: NaiveDate) {
        match export::write_export(dir, &self.inputs, &self.results, date) {
            Ok(path) => {
                self.push_log("EXPORT", format!("wrote {}", path.display()));
                self.last_export = Some(path);
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "export failed");
                self.push_log("ERROR", format!("export failed: {e:#}"));
            }
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Breakeven, Decision, Segment};

    #[test]
    fn test_new_state_has_results_for_inputs() {
        let state = AppState::new(Inputs::default());
        assert_eq!(state.results, compute(&Inputs::default()));
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_set_field_recomputes_wholesale() {
        let mut state = AppState::new(Inputs::default());
        assert_eq!(state.results.decision, Decision::Go);

        assert!(state.set_field(FieldKey::AverageSellingPrice, "0"));
        assert_eq!(state.inputs.average_selling_price, 0.0);
        assert_eq!(state.results, compute(&state.inputs));
        assert_eq!(state.results.breakeven, Breakeven::Beyond);
        assert_eq!(state.results.decision, Decision::NoGo);
        let last = state.logs.back().unwrap();
        assert_eq!(last.message, "decision GO -> NO GO");
    }

    #[test]
    fn test_unparseable_number_becomes_zero() {
        let mut state = AppState::new(Inputs::default());
        assert!(state.set_field(FieldKey::FixedHeadcountCost, "lots"));
        assert_eq!(state.inputs.fixed_headcount_cost, 0.0);
        assert!((state.results.year1.costs - 450_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejected_choice_leaves_state() {
        let mut state = AppState::new(Inputs::default());
        let before = state.inputs.clone();
        assert!(!state.set_field(FieldKey::Segment, "Government"));
        assert_eq!(state.inputs, before);
        assert_eq!(state.logs.back().unwrap().level, "WARN");
    }

    #[test]
    fn test_cycle_and_reset() {
        let mut state = AppState::new(Inputs::default());
        state.cycle_field(FieldKey::Segment);
        assert_eq!(state.inputs.segment, Segment::MidMarket);
        state.reset(Inputs::default());
        assert_eq!(state.inputs, Inputs::default());
        assert_eq!(state.logs.back().unwrap().message, "scenario reset");
    }

    #[test]
    fn test_export_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(Inputs::default());
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        state.export_to(dir.path(), date);
        let path = state.last_export.clone().unwrap();
        assert!(path.ends_with("market-entry-calculator-2026-01-02.csv"));
        assert!(path.exists());
        assert_eq!(state.logs.back().unwrap().level, "EXPORT");
    }

    #[test]
    fn test_export_failure_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the export directory should be
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let mut state = AppState::new(Inputs::default());
        state.export_to(&blocker, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert!(state.last_export.is_none());
        let last = state.logs.back().unwrap();
        assert_eq!(last.level, "ERROR");
        assert!(last.message.starts_with("export failed"));
    }

    #[test]
    fn test_log_is_bounded() {
        let mut state = AppState::new(Inputs::default());
        for i in 0..250 {
            state.push_log("INFO", format!("entry {i}"));
        }
        assert_eq!(state.logs.len(), 200);
        assert_eq!(state.logs.front().unwrap().message, "entry 50");
    }
}
