//! Milestone payloads exchanged with the escrow.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// A batch of milestones in column form, as accepted by `set_milestones`.
///
/// All five columns are positionally aligned: entry `i` of every column
/// describes the milestone at `indices[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneBatch {
    pub indices: Vec<u32>,
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub amounts: Vec<String>,
    pub deadlines: Vec<NaiveDate>,
}

impl MilestoneBatch {
    /// Returns the common column length, or `None` if the columns disagree.
    pub fn len(&self) -> Option<usize> {
        let n = self.indices.len();
        let aligned = self.titles.len() == n
            && self.descriptions.len() == n
            && self.amounts.len() == n
            && self.deadlines.len() == n;
        aligned.then_some(n)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Zips the columns back into records. Trailing entries of longer
    /// columns are dropped, so check [`MilestoneBatch::len`] first.
    pub fn records(&self) -> Vec<MilestoneRecord> {
        self.indices
            .iter()
            .zip(&self.titles)
            .zip(&self.descriptions)
            .zip(&self.amounts)
            .zip(&self.deadlines)
            .map(
                |((((index, title), description), amount), deadline)| MilestoneRecord {
                    index: *index,
                    title: title.clone(),
                    description: description.clone(),
                    amount: amount.clone(),
                    deadline: *deadline,
                },
            )
            .collect()
    }
}

/// A single milestone as stored by the escrow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRecord {
    pub index: u32,
    pub title: String,
    pub description: String,
    pub amount: String,
    pub deadline: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn len_detects_misaligned_columns() {
        let mut batch = MilestoneBatch {
            indices: vec![0, 1],
            titles: vec!["a".into(), "b".into()],
            descriptions: vec![String::new(), String::new()],
            amounts: vec!["1".into(), "2".into()],
            deadlines: vec![day(1), day(2)],
        };
        assert_eq!(batch.len(), Some(2));

        batch.amounts.pop();
        assert_eq!(batch.len(), None);
        assert!(!batch.is_empty());
    }

    #[test]
    fn default_batch_is_empty() {
        assert!(MilestoneBatch::default().is_empty());
        assert!(MilestoneBatch::default().records().is_empty());
    }

    #[test]
    fn records_pair_up_columns_by_position() {
        let batch = MilestoneBatch {
            indices: vec![0, 1],
            titles: vec!["Design".into(), String::new()],
            descriptions: vec!["mockups".into(), String::new()],
            amounts: vec![String::new(), "0.5".into()],
            deadlines: vec![day(8), day(9)],
        };
        let records = batch.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Design");
        assert_eq!(records[0].description, "mockups");
        assert_eq!(records[1].index, 1);
        assert_eq!(records[1].amount, "0.5");
        assert_eq!(records[1].deadline, day(9));
    }
}
