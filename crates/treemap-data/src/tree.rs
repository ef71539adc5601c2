use serde::{Deserialize, Serialize};

/// One cell of the treemap: a named leaf weight or a named group of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: String,
    pub data: TreeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeData {
    Leaf(f64),
    Branch(Vec<TreeNode>),
}

impl TreeNode {
    pub fn leaf(key: impl Into<String>, weight: f64) -> Self {
        Self {
            key: key.into(),
            data: TreeData::Leaf(weight),
        }
    }

    pub fn branch(key: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            key: key.into(),
            data: TreeData::Branch(children),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.data, TreeData::Leaf(_))
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        match &self.data {
            TreeData::Leaf(_) => &[],
            TreeData::Branch(children) => children,
        }
    }

    /// Leaf value, or the sum of all leaves below a branch.
    #[must_use]
    pub fn weight(&self) -> f64 {
        match &self.data {
            TreeData::Leaf(weight) => *weight,
            TreeData::Branch(children) => children.iter().map(TreeNode::weight).sum(),
        }
    }

    /// Number of levels including this one; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_nodes() {
        let nodes: Vec<TreeNode> = serde_json::from_str(
            r#"[
                {"key": "USA", "data": [{"key": "AccNo1", "data": 20}]},
                {"key": "ENGLAND", "data": [
                    {"key": "AccNo1", "data": [{"key": "AccNo8", "data": 15}, {"key": "AccNo9", "data": 15}]},
                    {"key": "AccNo2", "data": 15.5}
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            nodes[0],
            TreeNode::branch("USA", vec![TreeNode::leaf("AccNo1", 20.0)])
        );
        assert_eq!(nodes[1].depth(), 3);
        assert!((nodes[1].weight() - 45.5).abs() < f64::EPSILON);
        assert!(!nodes[1].is_leaf());
        assert!(nodes[1].children()[1].is_leaf());
    }

    #[test]
    fn rejects_non_conforming_shapes() {
        for body in [
            r#"[{"key": "USA", "data": "20"}]"#,
            r#"[{"data": 20}]"#,
            r#"[{"key": "USA", "data": {"key": "AccNo1"}}]"#,
            r#"[{"key": "USA", "data": [{"key": "AccNo1", "data": null}]}]"#,
            r#"{"key": "USA", "data": 20}"#,
        ] {
            assert!(
                serde_json::from_str::<Vec<TreeNode>>(body).is_err(),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn empty_branch_weighs_nothing() {
        let node = TreeNode::branch("EMPTY", vec![]);
        assert_eq!(node.depth(), 1);
        assert!(node.weight().abs() < f64::EPSILON);
    }
}
