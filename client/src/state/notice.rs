//! App-wide notice banner state.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use leptos::prelude::*;
use session::Notice;

/// How long a success notice stays up before it is dismissed.
pub const SUCCESS_DISMISS_MS: u32 = 4_000;

/// A notice together with the id it was shown under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shown {
    pub id: u64,
    pub notice: Notice,
}

/// Currently displayed notice, if any. `Copy`, so pages capture it freely.
#[derive(Clone, Copy, Debug)]
pub struct NoticeState {
    current: RwSignal<Option<Shown>>,
    next_id: StoredValue<u64>,
}

impl Default for NoticeState {
    fn default() -> Self {
        Self { current: RwSignal::new(None), next_id: StoredValue::new(0) }
    }
}

impl NoticeState {
    /// Replace whatever is shown. Returns the id used for [`Self::dismiss`].
    pub fn show(&self, notice: Notice) -> u64 {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Shown { id, notice }));
        id
    }

    /// Dismiss the notice shown under `id`; newer notices are left alone.
    pub fn dismiss(&self, id: u64) {
        if self.current.with_untracked(|shown| shown.as_ref().is_some_and(|s| s.id == id)) {
            self.current.set(None);
        }
    }

    /// Tracked read of the current notice.
    pub fn current(&self) -> Option<Shown> {
        self.current.get()
    }
}

/// The app-wide notice state.
///
/// # Panics
///
/// Panics when called outside the [`crate::app::App`] tree.
pub fn use_notice() -> NoticeState {
    expect_context::<NoticeState>()
}
