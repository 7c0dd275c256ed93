use crate::console::presenter::{Anchor, Placement, RenderedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CreateDistribution,
    CreatePaths,
    GetDistribution,
    GetInvalidationId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    CreateInvalidation,
    GetInvalidation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Loading,
}

/// Everything the console needs from the surface it is drawn on.
///
/// Implementations use interior mutability: handlers run concurrently and share one
/// surface. No method may call back into the console.
pub trait UiPorts: Send + Sync {
    fn value(&self, field: Field) -> String;

    fn set_value(&self, field: Field, value: &str);

    /// Adds an option to a selection field.
    fn add_option(&self, field: Field, value: &str, label: &str);

    fn set_enabled(&self, button: Button, enabled: bool);

    fn set_visible(&self, indicator: Indicator, visible: bool);

    /// Inserts the navigation link and the detail block of a new log entry.
    fn append_entry(&self, entry: &RenderedEntry, placement: Placement);

    fn set_nav_active(&self, anchor: &Anchor, active: bool);

    /// Re-evaluates which navigation link matches the visible part of the detail view.
    fn refresh_scroll_tracking(&self);
}
