//! Aggregation of a filtered result set

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::asset::AssetRecord;

/// A distinct (locode, reference number) pair of a filtered result set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocodeReference {
    pub locode: String,
    pub reference_number: Option<String>,
}

/// Counts and distinct-value sets of a filtered result set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregatedSummary {
    /// Number of filtered records
    pub total: usize,
    /// Distinct reference numbers; a NULL reference is kept as its own `None` entry
    pub reference_numbers: BTreeSet<Option<String>>,
    /// Distinct pairs with a locode, sorted by reference number then locode
    pub locode_references: Vec<LocodeReference>,
    /// Number of distinct locodes among `locode_references`
    pub distinct_locodes: usize,
}

impl AggregatedSummary {
    /// Summarise filtered records.
    ///
    /// Only a NULL locode keeps a record out of the pair list. Reference
    /// numbers are taken as stored, so NULL and `""` stay distinct values.
    pub fn from_records(records: &[AssetRecord]) -> Self {
        let reference_numbers: BTreeSet<Option<String>> =
            records.iter().map(|r| r.reference_number.clone()).collect();

        // Ordered by reference number first, then locode
        let pairs: BTreeSet<(Option<String>, String)> = records
            .iter()
            .filter_map(|r| {
                let locode = r.locode.as_ref()?;
                Some((r.reference_number.clone(), locode.clone()))
            })
            .collect();

        let distinct_locodes = pairs
            .iter()
            .map(|(_, locode)| locode.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let locode_references = pairs
            .into_iter()
            .map(|(reference_number, locode)| LocodeReference { locode, reference_number })
            .collect();

        Self {
            total: records.len(),
            reference_numbers,
            locode_references,
            distinct_locodes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
