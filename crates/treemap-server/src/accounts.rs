use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use treemap_data::{GroupBy, TreeNode};

use crate::Error;

const SAMPLE: &str = include_str!("../assets/accounts.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_no: String,
    pub account_country: String,
    pub account_ccy: String,
}

impl Account {
    fn dimension(&self, group_by: GroupBy) -> &str {
        match group_by {
            GroupBy::Country => &self.account_country,
            GroupBy::Currency => &self.account_ccy,
        }
    }
}

#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
#[allow(clippy::missing_errors_doc)]
pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<Account>, Error> {
    let file = std::fs::File::open(path)?;
    let accounts: Vec<Account> = serde_json::from_reader(file)?;
    tracing::info!(accounts = accounts.len(), "loaded accounts");
    Ok(accounts)
}

/// Accounts bundled with the server, used when no file is configured.
#[must_use]
pub fn sample() -> Vec<Account> {
    serde_json::from_str(SAMPLE).expect("bundled accounts are valid")
}

/// One branch per distinct value of the dimension, sorted by that value,
/// each holding a leaf per account. Weights are random in `10..60`.
pub fn group<R: Rng>(accounts: &[Account], group_by: GroupBy, rng: &mut R) -> Vec<TreeNode> {
    let mut groups: BTreeMap<&str, Vec<&Account>> = BTreeMap::new();
    for account in accounts {
        groups
            .entry(account.dimension(group_by))
            .or_default()
            .push(account);
    }

    groups
        .into_iter()
        .map(|(key, accounts)| {
            let leaves = accounts
                .into_iter()
                .map(|account| {
                    TreeNode::leaf(&account.account_no, f64::from(rng.gen_range(10_u32..60)))
                })
                .collect();
            TreeNode::branch(key, leaves)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn account(no: &str, country: &str, ccy: &str) -> Account {
        Account {
            account_no: no.to_string(),
            account_country: country.to_string(),
            account_ccy: ccy.to_string(),
        }
    }

    fn accounts() -> Vec<Account> {
        vec![
            account("AccNo1", "USA", "USD"),
            account("AccNo2", "INDIA", "INR"),
            account("AccNo3", "USA", "EUR"),
            account("AccNo4", "INDIA", "USD"),
        ]
    }

    fn shape(nodes: &[TreeNode]) -> Vec<(String, Vec<String>)> {
        nodes
            .iter()
            .map(|node| {
                (
                    node.key.clone(),
                    node.children().iter().map(|leaf| leaf.key.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn groups_by_country() {
        let nodes = group(&accounts(), GroupBy::Country, &mut StdRng::seed_from_u64(1));
        assert_eq!(
            shape(&nodes),
            vec![
                ("INDIA".to_string(), vec!["AccNo2".to_string(), "AccNo4".to_string()]),
                ("USA".to_string(), vec!["AccNo1".to_string(), "AccNo3".to_string()]),
            ]
        );
    }

    #[test]
    fn groups_by_currency() {
        let nodes = group(&accounts(), GroupBy::Currency, &mut StdRng::seed_from_u64(1));
        let keys = nodes.iter().map(|node| node.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["EUR", "INR", "USD"]);
        assert_eq!(nodes[2].children().len(), 2);
    }

    #[test]
    fn weights_stay_in_range() {
        let nodes = group(&sample(), GroupBy::Currency, &mut StdRng::seed_from_u64(7));
        for leaf in nodes.iter().flat_map(TreeNode::children) {
            assert!(leaf.is_leaf());
            assert!((10.0..60.0).contains(&leaf.weight()), "{}", leaf.weight());
        }
    }

    #[test]
    fn same_seed_same_weights() {
        let first = group(&sample(), GroupBy::Country, &mut StdRng::seed_from_u64(3));
        let second = group(&sample(), GroupBy::Country, &mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);
    }

    #[test]
    fn loads_accounts_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(file.as_file(), &accounts()).unwrap();
        assert_eq!(load(file.path()).unwrap(), accounts());
    }

    #[test]
    fn rejects_malformed_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"[{"account_no": "AccNo1"}]"#).unwrap();
        assert!(matches!(load(file.path()), Err(Error::Json(_))));
    }
}
