use crate::config_core::NavOrder;
use crate::console::ports::UiPorts;
use maud::{html, Markup, PreEscaped};
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

pub const ANCHOR_PREFIX: &str = "item-";

/// Stable identifier of a log entry, used as the navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor(u64);

impl Anchor {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ANCHOR_PREFIX, self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("malformed anchor `{0}`")]
pub struct MalformedAnchor(String);

impl FromStr for Anchor {
    type Err = MalformedAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches('#')
            .strip_prefix(ANCHOR_PREFIX)
            .and_then(|seq| seq.parse().ok())
            .map(Anchor)
            .ok_or_else(|| MalformedAnchor(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
}

impl NavOrder {
    pub fn placement(self) -> Placement {
        match self {
            NavOrder::MostRecentFirst => Placement::Top,
            NavOrder::InsertionOrder => Placement::Bottom,
        }
    }
}

/// Body text of a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Empty,
    Message(String),
    /// Labelled values, one per line.
    Fields(Vec<(&'static str, String)>),
}

impl Detail {
    pub fn to_html(&self) -> String {
        match self {
            Detail::Empty => String::new(),
            Detail::Message(message) => html! { (message) }.into_string(),
            Detail::Fields(fields) => html! {
                @for (label, value) in fields {
                    b { (label) ":" } " " (value) br;
                }
            }
            .into_string(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Detail::Empty => String::new(),
            Detail::Message(message) => message.clone(),
            Detail::Fields(fields) => fields
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    seq: u64,
    header: String,
    detail: Detail,
    payload: Option<Value>,
}

impl LogEntry {
    pub fn anchor(&self) -> Anchor {
        Anchor(self.seq)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn render(&self) -> RenderedEntry {
        RenderedEntry {
            anchor: self.anchor(),
            header: self.header.clone(),
            detail_html: self.detail.to_html(),
            detail_text: self.detail.to_text(),
            payload_text: self.payload.as_ref().map(|p| {
                serde_json::to_string_pretty(p).unwrap_or_else(|_| p.to_string())
            }),
        }
    }
}

/// A log entry prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntry {
    pub anchor: Anchor,
    pub header: String,
    /// Trusted HTML built by the console.
    pub detail_html: String,
    pub detail_text: String,
    /// Pretty-printed payload, two-space indent. Plain text, not HTML.
    pub payload_text: Option<String>,
}

impl RenderedEntry {
    pub fn nav_markup(&self, active: bool) -> Markup {
        let href = format!("#{}", self.anchor);
        let class = if active {
            "list-group-item list-group-item-action active"
        } else {
            "list-group-item list-group-item-action"
        };

        html! {
            a class=(class) href=(href) { (self.header) }
        }
    }

    pub fn detail_markup(&self) -> Markup {
        html! {
            h4 id=(self.anchor.to_string()) { (self.header) }
            p { (PreEscaped(self.detail_html.as_str())) }
            pre {
                @if let Some(payload) = &self.payload_text {
                    (payload)
                }
            }
        }
    }
}

/// Append-only record of every operation. Owns the sequence counter.
#[derive(Debug, Default)]
pub struct OperationLog {
    next_seq: u64,
    entries: Vec<LogEntry>,
    active: Option<Anchor>,
}

impl OperationLog {
    /// Returns the new entry and the anchor that was active before it.
    pub fn push(
        &mut self,
        header: String,
        detail: Detail,
        payload: Option<Value>,
    ) -> (&LogEntry, Option<Anchor>) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.push(LogEntry {
            seq,
            header,
            detail,
            payload,
        });
        let previous = self.active.replace(Anchor(seq));

        (&self.entries[self.entries.len() - 1], previous)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<Anchor> {
        self.active
    }
}

pub struct Presenter {
    ports: Arc<dyn UiPorts>,
    order: NavOrder,
    log: Mutex<OperationLog>,
}

impl Presenter {
    pub fn new(ports: Arc<dyn UiPorts>, order: NavOrder) -> Self {
        Presenter {
            ports,
            order,
            log: Mutex::new(OperationLog::default()),
        }
    }

    /// Records an operation and draws it as the active entry.
    pub fn append(&self, header: &str, detail: Detail, payload: Option<Value>) -> Anchor {
        let header = format!(
            "{} : {}",
            header,
            humantime::format_rfc3339_seconds(SystemTime::now())
        );

        // held while drawing so the surface sees entries in log order
        let mut log = self.log.lock();
        let (entry, previous) = log.push(header, detail, payload);
        let rendered = entry.render();

        if let Some(previous) = previous {
            self.ports.set_nav_active(&previous, false);
        }
        self.ports.append_entry(&rendered, self.order.placement());
        self.ports.set_nav_active(&rendered.anchor, true);
        self.ports.refresh_scroll_tracking();

        debug!("log entry {} `{}`", rendered.anchor, rendered.header);

        rendered.anchor
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.log.lock().entries().to_vec()
    }

    pub fn active(&self) -> Option<Anchor> {
        self.log.lock().active()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::console::testing::RecordingUi;
    use serde_json::json;

    fn presenter(order: NavOrder) -> (Arc<RecordingUi>, Presenter) {
        let ui = Arc::new(RecordingUi::default());
        let presenter = Presenter::new(ui.clone(), order);
        (ui, presenter)
    }

    #[test]
    fn anchors_increase_and_latest_is_active() {
        let (ui, presenter) = presenter(NavOrder::MostRecentFirst);

        let first = presenter.append("Create", Detail::Empty, Some(json!({"id": "I1"})));
        let second = presenter.append("Get", Detail::Empty, Some(json!({"id": "I1"})));

        assert!(second.seq() > first.seq());
        assert_eq!(first.to_string(), "item-0");
        assert_eq!(second.to_string(), "item-1");
        assert_eq!(presenter.active(), Some(second));
        assert_eq!(ui.active_anchors(), vec![second]);
        assert_eq!(ui.scroll_refreshes(), 2);
    }

    #[test]
    fn anchor_parses_from_fragment() {
        assert_eq!("item-7".parse::<Anchor>().unwrap().seq(), 7);
        assert_eq!("#item-12".parse::<Anchor>().unwrap().seq(), 12);
        assert!("item-".parse::<Anchor>().is_err());
        assert!("entry-1".parse::<Anchor>().is_err());
    }

    #[test]
    fn header_carries_timestamp() {
        let (_ui, presenter) = presenter(NavOrder::MostRecentFirst);

        presenter.append(
            "Create Error",
            Detail::Message("Paths is empty".to_string()),
            None,
        );

        let entries = presenter.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].header().starts_with("Create Error : "));
        assert!(entries[0].payload().is_none());
    }

    #[test]
    fn placement_follows_order() {
        let (ui, presenter_recent) = presenter(NavOrder::MostRecentFirst);
        presenter_recent.append("Get", Detail::Empty, None);
        assert_eq!(ui.placements(), vec![Placement::Top]);

        let (ui, presenter_insertion) = presenter(NavOrder::InsertionOrder);
        presenter_insertion.append("Get", Detail::Empty, None);
        assert_eq!(ui.placements(), vec![Placement::Bottom]);
    }

    #[test]
    fn payload_text_round_trips() {
        let (ui, presenter) = presenter(NavOrder::MostRecentFirst);
        let payload = json!({
            "id": "I2J0I21PCUYOIK",
            "status": "InProgress",
            "createTime": "2021-06-03T18:01:02Z",
            "paths": ["/a", "/b/*", "/ümlaut"],
            "nested": {"n": 1.5, "flag": false, "none": null},
        });

        presenter.append("Create", Detail::Empty, Some(payload.clone()));

        let rendered = ui.entries().pop().unwrap();
        let text = rendered.payload_text.unwrap();
        assert!(text.contains("\n  \"id\""));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn error_message_payload_is_json_string() {
        let (ui, presenter) = presenter(NavOrder::MostRecentFirst);

        presenter.append(
            "Get Error",
            Detail::Empty,
            Some(Value::String("Forbidden".to_string())),
        );

        let rendered = ui.entries().pop().unwrap();
        assert_eq!(rendered.payload_text.as_deref(), Some("\"Forbidden\""));
    }

    #[test]
    fn markup_escapes_payload_but_not_detail() {
        let entry = LogEntry {
            seq: 7,
            header: "Get : now".to_string(),
            detail: Detail::Fields(vec![("Distribution", "www".to_string())]),
            payload: Some(Value::String("<script>".to_string())),
        }
        .render();

        let detail = entry.detail_markup().into_string();
        assert!(detail.contains(r#"<h4 id="item-7">Get : now</h4>"#));
        assert!(detail.contains("<p><b>Distribution:</b> www<br></p>"));
        assert!(detail.contains("&lt;script&gt;"));

        let nav = entry.nav_markup(true).into_string();
        assert!(nav.contains(r##"href="#item-7""##));
        assert!(nav.contains("active"));
        assert!(!entry.nav_markup(false).into_string().contains("active"));
    }

    #[test]
    fn detail_renderings() {
        let fields = Detail::Fields(vec![
            ("Distribution", "<www>".to_string()),
            ("Paths", "/a,/b".to_string()),
        ]);

        assert_eq!(
            fields.to_html(),
            "<b>Distribution:</b> &lt;www&gt;<br><b>Paths:</b> /a,/b<br>"
        );
        assert_eq!(fields.to_text(), "Distribution: <www>\nPaths: /a,/b");
        assert_eq!(
            Detail::Message("a & b".to_string()).to_html(),
            "a &amp; b"
        );
        assert_eq!(Detail::Empty.to_html(), "");
    }

    #[test]
    fn log_reports_previous_active() {
        let mut log = OperationLog::default();

        let (_, previous) = log.push("a".to_string(), Detail::Empty, None);
        assert_eq!(previous, None);
        let (entry, previous) = log.push("b".to_string(), Detail::Empty, None);
        assert_eq!(entry.anchor(), Anchor(1));
        assert_eq!(previous, Some(Anchor(0)));
        assert_eq!(log.entries().len(), 2);
    }
}
