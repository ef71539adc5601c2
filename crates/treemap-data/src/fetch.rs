use std::sync::Arc;

use tokio::sync::watch;
use tracing::instrument;

use crate::{GroupBy, Source, TreeNode};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<TreeNode>),
    Failed(String),
}

impl FetchState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

/// What subscribers see: the state of the most recently initiated fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Number of the latest `load_for` call, 0 before the first one.
    pub seq: u64,
    /// `None` until the first call, or when the latest key was invalid.
    pub group_by: Option<GroupBy>,
    pub state: FetchState,
}

/// Turns grouping keys into requests and publishes their outcome.
///
/// Every call gets a sequence number. A response is applied only while its
/// call is still the latest one, so a slow, superseded request can never
/// overwrite the state of a newer one. Clones share the same state.
pub struct FetchController<S> {
    source: Arc<S>,
    snapshot: Arc<watch::Sender<Snapshot>>,
}

impl<S> Clone for FetchController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<S: Source> FetchController<S> {
    pub fn new(source: S) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::default());
        Self {
            source: Arc::new(source),
            snapshot: Arc::new(snapshot),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        self.snapshot.borrow().state.clone()
    }

    /// Fetches data for a raw grouping key.
    ///
    /// Returns the terminal state when it was applied, `None` when a newer
    /// call superseded this one before its response arrived.
    #[instrument(skip(self))]
    pub async fn load_for(&self, key: &str) -> Option<FetchState> {
        match key.parse::<GroupBy>() {
            Ok(group_by) => self.load(group_by).await,
            Err(error) => {
                tracing::warn!(%error, "refusing to fetch");
                let state = FetchState::Failed(error.to_string());
                self.begin(None, state.clone());
                Some(state)
            }
        }
    }

    pub async fn load(&self, group_by: GroupBy) -> Option<FetchState> {
        let seq = self.begin(Some(group_by), FetchState::Loading);
        self.complete(seq, group_by).await
    }

    /// Loads the current selection, then again on every change, until the
    /// selection is dropped. Each fetch runs on its own task, but its
    /// sequence number is taken here, in the order the changes were seen.
    pub async fn follow(self, mut selection: watch::Receiver<GroupBy>) {
        loop {
            let group_by = *selection.borrow_and_update();
            let seq = self.begin(Some(group_by), FetchState::Loading);
            let controller = self.clone();
            tokio::spawn(async move {
                controller.complete(seq, group_by).await;
            });

            if selection.changed().await.is_err() {
                tracing::debug!("selection dropped, no longer following");
                break;
            }
        }
    }

    async fn complete(&self, seq: u64, group_by: GroupBy) -> Option<FetchState> {
        let state = match self.source.fetch(group_by).await {
            Ok(nodes) => FetchState::Success(nodes),
            Err(error) => {
                tracing::warn!(%error, kind = ?error.kind(), seq, "fetch failed");
                FetchState::Failed(error.to_string())
            }
        };

        let applied = self.finish(seq, state);
        if applied.is_none() {
            tracing::debug!(seq, %group_by, "discarding superseded response");
        }
        applied
    }

    fn begin(&self, group_by: Option<GroupBy>, state: FetchState) -> u64 {
        let mut seq = 0;
        self.snapshot.send_modify(|snapshot| {
            snapshot.seq += 1;
            snapshot.group_by = group_by;
            snapshot.state = state;
            seq = snapshot.seq;
        });
        seq
    }

    fn finish(&self, seq: u64, state: FetchState) -> Option<FetchState> {
        let mut applied = None;
        self.snapshot.send_if_modified(|snapshot| {
            if snapshot.seq == seq {
                applied = Some(state.clone());
                snapshot.state = state;
                true
            } else {
                false
            }
        });
        applied
    }
}
