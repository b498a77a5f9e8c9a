//! Typed helpers for the events the calculator UI emits.
//!
//! Each `*_event` function only shapes an [`EventRecord`]; the matching
//! `track_*` function sends it through the page-wide tracker.

use crate::analytics::track_record;
use crate::event::EventRecord;
use std::cell::Cell;

pub const CATEGORY_NAVIGATION: &str = "navigation";
pub const CATEGORY_CALCULATOR: &str = "calculator";
pub const CATEGORY_DATA: &str = "data";
pub const CATEGORY_ENGAGEMENT: &str = "engagement";

thread_local! {
    static INTERACTION_TRACKED: Cell<bool> = const { Cell::new(false) };
}

/// Emit through the global tracker, dropping records that failed to build.
fn emit(record: Option<EventRecord>) {
    if let Some(record) = record {
        track_record(&record);
    }
}

pub fn tab_navigation_event(tab: &str) -> Option<EventRecord> {
    EventRecord::new("tab_change", CATEGORY_NAVIGATION)
        .ok()
        .map(|r| r.with_label(tab))
}

pub fn formula_selection_event(formula: &str) -> Option<EventRecord> {
    EventRecord::new("formula_select", CATEGORY_CALCULATOR)
        .ok()
        .map(|r| r.with_label(formula))
}

/// Carries both custom dimensions so they land in their mapped slots.
pub fn measurement_selection_event(measurement_type: &str, scaling_method: &str) -> Option<EventRecord> {
    EventRecord::new("measurement_select", CATEGORY_CALCULATOR)
        .ok()
        .map(|r| {
            r.with_label(format!("{}/{}", measurement_type, scaling_method))
                .with_property("measurement_type", measurement_type)
                .with_property("scaling_method", scaling_method)
        })
}

pub fn export_event(format: &str, item_count: usize) -> Option<EventRecord> {
    EventRecord::new("export", CATEGORY_DATA)
        .ok()
        .map(|r| r.with_label(format).with_value(item_count as f64))
}

pub fn first_interaction_event() -> Option<EventRecord> {
    EventRecord::new("controls_used", CATEGORY_ENGAGEMENT).ok()
}

pub fn track_tab_navigation(tab: &str) {
    emit(tab_navigation_event(tab));
}

pub fn track_formula_selection(formula: &str) {
    emit(formula_selection_event(formula));
}

pub fn track_measurement_selection(measurement_type: &str, scaling_method: &str) {
    emit(measurement_selection_event(measurement_type, scaling_method));
}

pub fn track_export(format: &str, item_count: usize) {
    emit(export_event(format, item_count));
}

/// Returns true the first time it is called in this session.
fn claim_first_interaction() -> bool {
    INTERACTION_TRACKED.with(|tracked| !tracked.replace(true))
}

/// Only the first interaction per session is reported.
pub fn track_first_interaction() {
    if claim_first_interaction() {
        emit(first_interaction_event());
    }
}
