use tokio::sync::watch;

use crate::GroupBy;

/// Holds the chosen grouping key and notifies subscribers when it changes.
#[derive(Debug)]
pub struct Selection {
    current: watch::Sender<GroupBy>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(GroupBy::default())
    }
}

impl Selection {
    #[must_use]
    pub fn new(initial: GroupBy) -> Self {
        let (current, _) = watch::channel(initial);
        Self { current }
    }

    #[must_use]
    pub fn current(&self) -> GroupBy {
        *self.current.borrow()
    }

    /// Returns `true` if the key differed from the current one.
    pub fn select(&self, group_by: GroupBy) -> bool {
        let changed = self.current.send_if_modified(|current| {
            if *current == group_by {
                false
            } else {
                *current = group_by;
                true
            }
        });
        if changed {
            tracing::info!(%group_by, "selection changed");
        }
        changed
    }

    /// Unrecognized values leave the selection untouched.
    pub fn select_str(&self, value: &str) -> bool {
        match value.parse::<GroupBy>() {
            Ok(group_by) => self.select(group_by),
            Err(_) => {
                tracing::debug!(value, "ignoring unrecognized grouping key");
                false
            }
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GroupBy> {
        self.current.subscribe()
    }
}
