use eframe::egui::{Align, Button, ComboBox, Layout, Ui};
use treemap_data::{GroupBy, Snapshot};

use crate::app::State;

pub fn ui(ui: &mut Ui, state: &mut State, snapshot: &Snapshot) {
    ui.horizontal(|ui| {
        group_by_ui(ui, state);
        if snapshot.state.is_loading() {
            ui.spinner();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            dark_light_mode_switch_ui(ui, state);
            ui.separator();
        });
    });
}

fn group_by_ui(ui: &mut Ui, state: &State) {
    let current = state.selection.current();
    let mut selected = current;

    ui.label("Group by");
    ComboBox::from_id_salt("group_by")
        .selected_text(current.label())
        .show_ui(ui, |ui| {
            for group_by in GroupBy::ALL {
                ui.selectable_value(&mut selected, group_by, group_by.label());
            }
        });

    if selected != current {
        state.selection.select(selected);
    }
}

fn dark_light_mode_switch_ui(ui: &mut Ui, state: &mut State) {
    if ui
        .add(Button::new(state.theme.switch_icon()).frame(false))
        .on_hover_text(state.theme.switch_hover_text())
        .clicked()
    {
        state.theme = state.theme.toggled();
        ui.ctx().set_visuals(state.theme.into());
    }
}
