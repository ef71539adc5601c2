pub mod window;

use eframe::egui::{Context, FontDefinitions};
use eframe::{self, CreationContext};
use tokio::{runtime::Handle, sync::watch};
use treemap_data::{FetchController, Selection, Snapshot, Source};

use crate::widgets::TreemapStyle;

pub use self::window::State;

pub struct App {
    state: State,
}

impl App {
    /// Starts following the selection on `runtime`. Background tasks stop
    /// once the app is dropped.
    #[must_use]
    pub fn new<S: Source>(
        cc: &CreationContext<'_>,
        runtime: &Handle,
        source: S,
        endpoint: String,
        style: TreemapStyle,
    ) -> Self {
        let mut fonts = FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let selection = Selection::default();
        let controller = FetchController::new(source);
        let state = State::new(selection, controller.subscribe(), endpoint, style);
        cc.egui_ctx.set_visuals(state.theme.into());

        runtime.spawn(repaint_on_change(cc.egui_ctx.clone(), controller.subscribe()));
        runtime.spawn(controller.follow(state.selection.subscribe()));

        Self { state }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        window::render(ctx, &mut self.state);
    }
}

async fn repaint_on_change(ctx: Context, mut snapshot: watch::Receiver<Snapshot>) {
    while snapshot.changed().await.is_ok() {
        ctx.request_repaint();
    }
}
