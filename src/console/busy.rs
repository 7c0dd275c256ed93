use crate::console::ports::{Indicator, UiPorts};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

struct BusyInner {
    ports: Arc<dyn UiPorts>,
    indicator: Indicator,
    holders: Mutex<usize>,
}

/// Reference-counted visibility of a shared indicator.
///
/// The indicator is shown when the first guard is taken and hidden when the last one is
/// dropped, so overlapping operations never hide it under each other.
#[derive(Clone)]
pub struct BusyIndicator {
    inner: Arc<BusyInner>,
}

impl BusyIndicator {
    pub fn new(ports: Arc<dyn UiPorts>, indicator: Indicator) -> Self {
        BusyIndicator {
            inner: Arc::new(BusyInner {
                ports,
                indicator,
                holders: Mutex::new(0),
            }),
        }
    }

    pub fn acquire(&self) -> BusyGuard {
        let mut holders = self.inner.holders.lock();
        *holders += 1;
        trace!("{:?} holders: {}", self.inner.indicator, *holders);
        if *holders == 1 {
            self.inner.ports.set_visible(self.inner.indicator, true);
        }

        BusyGuard {
            owner: self.clone(),
        }
    }

    pub fn is_busy(&self) -> bool {
        *self.inner.holders.lock() > 0
    }

    fn release(&self) {
        let mut holders = self.inner.holders.lock();
        *holders = holders.saturating_sub(1);
        trace!("{:?} holders: {}", self.inner.indicator, *holders);
        if *holders == 0 {
            self.inner.ports.set_visible(self.inner.indicator, false);
        }
    }
}

#[must_use = "the indicator is released when the guard is dropped"]
pub struct BusyGuard {
    owner: BusyIndicator,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.owner.release();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::console::testing::{RecordingUi, UiEvent};

    #[test]
    fn nested_guards_toggle_once() {
        let ui = Arc::new(RecordingUi::default());
        let busy = BusyIndicator::new(ui.clone(), Indicator::Loading);

        let first = busy.acquire();
        let second = busy.acquire();
        assert!(ui.visible(Indicator::Loading));

        drop(first);
        assert!(ui.visible(Indicator::Loading));
        assert!(busy.is_busy());

        drop(second);
        assert!(!ui.visible(Indicator::Loading));
        assert!(!busy.is_busy());

        assert_eq!(
            ui.events(),
            vec![
                UiEvent::Visible(Indicator::Loading, true),
                UiEvent::Visible(Indicator::Loading, false),
            ]
        );
    }

    #[test]
    fn reacquire_after_idle_shows_again() {
        let ui = Arc::new(RecordingUi::default());
        let busy = BusyIndicator::new(ui.clone(), Indicator::Loading);

        drop(busy.acquire());
        drop(busy.acquire());

        assert_eq!(ui.events().len(), 4);
    }
}
