use crate::console::ports::{Button, Field, Indicator, UiPorts};
use crate::console::presenter::{Anchor, Placement, RenderedEntry};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Value(Field, String),
    Enabled(Button, bool),
    Visible(Indicator, bool),
}

#[derive(Default)]
struct State {
    values: HashMap<Field, String>,
    options: HashMap<Field, Vec<(String, String)>>,
    disabled: HashSet<Button>,
    visible: HashSet<Indicator>,
    entries: Vec<(RenderedEntry, Placement)>,
    active: BTreeSet<Anchor>,
    scroll_refreshes: usize,
    events: Vec<UiEvent>,
}

/// In-memory surface that remembers every call made through [`UiPorts`].
#[derive(Default)]
pub struct RecordingUi {
    state: Mutex<State>,
}

impl RecordingUi {
    /// Types into a field without recording an event.
    pub fn fill(&self, field: Field, value: &str) {
        self.state.lock().values.insert(field, value.to_string());
    }

    pub fn field(&self, field: Field) -> String {
        self.state
            .lock()
            .values
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    pub fn options(&self, field: Field) -> Vec<(String, String)> {
        self.state
            .lock()
            .options
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    pub fn enabled(&self, button: Button) -> bool {
        !self.state.lock().disabled.contains(&button)
    }

    pub fn visible(&self, indicator: Indicator) -> bool {
        self.state.lock().visible.contains(&indicator)
    }

    pub fn entries(&self) -> Vec<RenderedEntry> {
        self.state
            .lock()
            .entries
            .iter()
            .map(|(e, _)| e.clone())
            .collect()
    }

    pub fn placements(&self) -> Vec<Placement> {
        self.state.lock().entries.iter().map(|(_, p)| *p).collect()
    }

    pub fn active_anchors(&self) -> Vec<Anchor> {
        self.state.lock().active.iter().copied().collect()
    }

    pub fn scroll_refreshes(&self) -> usize {
        self.state.lock().scroll_refreshes
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.state.lock().events.clone()
    }
}

impl UiPorts for RecordingUi {
    fn value(&self, field: Field) -> String {
        self.field(field)
    }

    fn set_value(&self, field: Field, value: &str) {
        let mut state = self.state.lock();
        state.values.insert(field, value.to_string());
        state.events.push(UiEvent::Value(field, value.to_string()));
    }

    fn add_option(&self, field: Field, value: &str, label: &str) {
        self.state
            .lock()
            .options
            .entry(field)
            .or_default()
            .push((value.to_string(), label.to_string()));
    }

    fn set_enabled(&self, button: Button, enabled: bool) {
        let mut state = self.state.lock();
        if enabled {
            state.disabled.remove(&button);
        } else {
            state.disabled.insert(button);
        }
        state.events.push(UiEvent::Enabled(button, enabled));
    }

    fn set_visible(&self, indicator: Indicator, visible: bool) {
        let mut state = self.state.lock();
        if visible {
            state.visible.insert(indicator);
        } else {
            state.visible.remove(&indicator);
        }
        state.events.push(UiEvent::Visible(indicator, visible));
    }

    fn append_entry(&self, entry: &RenderedEntry, placement: Placement) {
        self.state.lock().entries.push((entry.clone(), placement));
    }

    fn set_nav_active(&self, anchor: &Anchor, active: bool) {
        let mut state = self.state.lock();
        if active {
            state.active.insert(*anchor);
        } else {
            state.active.remove(anchor);
        }
    }

    fn refresh_scroll_tracking(&self) {
        self.state.lock().scroll_refreshes += 1;
    }
}
