use ansi_term::Colour::{Green, Red};
use ansi_term::Style;
use cdn_console_common::console::{
    Anchor, Button, Field, Indicator, Placement, RenderedEntry, UiPorts,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

#[derive(Default)]
struct State {
    values: HashMap<Field, String>,
    options: HashMap<Field, Vec<String>>,
    disabled: HashSet<Button>,
}

/// Line-oriented surface. Log entries are printed as they are appended.
pub struct TerminalUi {
    state: Mutex<State>,
    out: Mutex<Box<dyn Write + Send>>,
    colored: bool,
}

impl TerminalUi {
    pub fn stdout(colored: bool) -> Self {
        Self::new(Box::new(io::stdout()), colored)
    }

    pub fn new(out: Box<dyn Write + Send>, colored: bool) -> Self {
        TerminalUi {
            state: Default::default(),
            out: Mutex::new(out),
            colored,
        }
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        !self.state.lock().disabled.contains(&button)
    }

    pub fn options(&self, field: Field) -> Vec<String> {
        self.state
            .lock()
            .options
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn header_style(&self, header: &str) -> Style {
        if !self.colored {
            Style::new()
        } else if header.contains("Error") {
            Red.bold()
        } else {
            Green.bold()
        }
    }

    fn print(&self, entry: &RenderedEntry) -> io::Result<()> {
        let mut out = self.out.lock();

        writeln!(
            out,
            "{} [{}]",
            self.header_style(&entry.header).paint(entry.header.as_str()),
            entry.anchor
        )?;
        if !entry.detail_text.is_empty() {
            writeln!(out, "{}", entry.detail_text)?;
        }
        if let Some(payload) = &entry.payload_text {
            writeln!(out, "{}", payload)?;
        }
        writeln!(out)?;

        out.flush()
    }
}

impl UiPorts for TerminalUi {
    fn value(&self, field: Field) -> String {
        self.state
            .lock()
            .values
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn set_value(&self, field: Field, value: &str) {
        self.state.lock().values.insert(field, value.to_string());
    }

    fn add_option(&self, field: Field, value: &str, _label: &str) {
        let mut state = self.state.lock();

        // a selector shows its first option until something else is picked
        state
            .values
            .entry(field)
            .or_insert_with(|| value.to_string());
        state
            .options
            .entry(field)
            .or_default()
            .push(value.to_string());
    }

    fn set_enabled(&self, button: Button, enabled: bool) {
        let mut state = self.state.lock();
        if enabled {
            state.disabled.remove(&button);
        } else {
            state.disabled.insert(button);
        }
    }

    fn set_visible(&self, indicator: Indicator, visible: bool) {
        if visible {
            debug!("{:?} shown", indicator);
        } else {
            debug!("{:?} hidden", indicator);
        }
    }

    fn append_entry(&self, entry: &RenderedEntry, _placement: Placement) {
        if let Err(e) = self.print(entry) {
            warn!("could not print log entry {}: {}", entry.anchor, e);
        }
    }

    fn set_nav_active(&self, anchor: &Anchor, active: bool) {
        trace!("{} active={}", anchor, active);
    }

    fn refresh_scroll_tracking(&self) {}
}
