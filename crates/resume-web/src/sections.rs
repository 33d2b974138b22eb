use crate::constants::{SECTION_FOCUSED_CLASS, SECTION_IN_VIEW_CLASS};
use crate::dom::set_class;
use resume_core::{Observation, SectionTracker, VisibilitySource};
use web_sys as web;

/// Reflect an observation on the section elements.
pub fn apply<V: VisibilitySource>(
    document: &web::Document,
    tracker: &SectionTracker<V>,
    obs: &Observation,
) {
    for id in obs.first_entries.iter().filter_map(|&i| tracker.id(i)) {
        set_class(document, id, SECTION_IN_VIEW_CLASS, true);
    }
    if !obs.active_changed() {
        return;
    }
    if let Some(prev) = obs.previous_active.and_then(|i| tracker.id(i)) {
        set_class(document, prev, SECTION_FOCUSED_CLASS, false);
    }
    if let Some(active) = obs.active.and_then(|i| tracker.id(i)) {
        set_class(document, active, SECTION_FOCUSED_CLASS, true);
    }
}

/// Drop focus styling on teardown; `section-in-view` stays.
pub fn clear_focus<V: VisibilitySource>(document: &web::Document, tracker: &SectionTracker<V>) {
    if let Some(active) = tracker.active() {
        set_class(document, active, SECTION_FOCUSED_CLASS, false);
    }
}
