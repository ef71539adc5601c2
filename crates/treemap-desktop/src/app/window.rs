mod bottom_bar;
mod top_bar;

use eframe::egui::{CentralPanel, Context, TopBottomPanel, Ui};
use tokio::sync::watch;
use treemap_data::{FetchState, Selection, Snapshot};

use crate::Theme;
use crate::widgets::{self, Status, TreemapStyle};

pub struct State {
    pub selection: Selection,
    pub theme: Theme,
    pub style: TreemapStyle,
    pub endpoint: String,
    snapshot: watch::Receiver<Snapshot>,
}

impl State {
    #[must_use]
    pub fn new(
        selection: Selection,
        snapshot: watch::Receiver<Snapshot>,
        endpoint: String,
        style: TreemapStyle,
    ) -> Self {
        Self {
            selection,
            theme: Theme::default(),
            style,
            endpoint,
            snapshot,
        }
    }

    /// Latest published fetch, read once per frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }
}

pub fn render(ctx: &Context, state: &mut State) {
    let snapshot = state.snapshot();

    TopBottomPanel::top("top_bar").show(ctx, |ui| top_bar::ui(ui, state, &snapshot));
    TopBottomPanel::bottom("bottom_bar").show(ctx, |ui| bottom_bar::ui(ui, state, &snapshot));
    CentralPanel::default().show(ctx, |ui| central_pane_ui(ui, state, &snapshot.state));
}

fn central_pane_ui(ui: &mut Ui, state: &State, fetch: &FetchState) {
    match fetch {
        FetchState::Idle | FetchState::Loading => widgets::status_ui(ui, &Status::Loading),
        FetchState::Failed(message) => widgets::status_ui(ui, &Status::Failed(message)),
        FetchState::Success(nodes) if nodes.is_empty() => widgets::status_ui(ui, &Status::Empty),
        FetchState::Success(nodes) => {
            widgets::treemap_ui(ui, nodes, &state.style);
        }
    }
}
