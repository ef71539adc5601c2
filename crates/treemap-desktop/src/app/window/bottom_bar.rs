use eframe::egui::{Align, Layout, RichText, Ui};
use treemap_data::{FetchState, Snapshot, TreeNode};

use crate::app::State;

pub fn ui(ui: &mut Ui, state: &State, snapshot: &Snapshot) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&state.endpoint).weak());

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(status(snapshot));
            if snapshot.seq > 0 {
                ui.separator();
                ui.label(RichText::new(format!("request #{}", snapshot.seq)).weak());
            }
        });
    });
}

fn status(snapshot: &Snapshot) -> String {
    let group = snapshot
        .group_by
        .map(|group_by| group_by.label())
        .unwrap_or("-");
    match &snapshot.state {
        FetchState::Idle => "idle".to_string(),
        FetchState::Loading => format!("loading by {group}"),
        FetchState::Success(nodes) => {
            format!(
                "{} groups, {} accounts by {group}",
                nodes.len(),
                leaves(nodes)
            )
        }
        FetchState::Failed(_) => "failed".to_string(),
    }
}

fn leaves(nodes: &[TreeNode]) -> usize {
    nodes
        .iter()
        .map(|node| {
            if node.is_leaf() {
                1
            } else {
                leaves(node.children())
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use treemap_data::GroupBy;

    use super::*;

    #[test]
    fn describes_each_state() {
        let mut snapshot = Snapshot::default();
        assert_eq!(status(&snapshot), "idle");

        snapshot.group_by = Some(GroupBy::Currency);
        snapshot.state = FetchState::Loading;
        assert_eq!(status(&snapshot), "loading by Currency");

        snapshot.state = FetchState::Success(vec![
            TreeNode::branch(
                "USD",
                vec![TreeNode::leaf("AccNo1", 10.0), TreeNode::leaf("AccNo2", 12.0)],
            ),
            TreeNode::branch("EUR", vec![TreeNode::leaf("AccNo3", 30.0)]),
        ]);
        assert_eq!(status(&snapshot), "2 groups, 3 accounts by Currency");

        snapshot.state = FetchState::Failed("Network response was not ok".to_string());
        assert_eq!(status(&snapshot), "failed");
    }
}
