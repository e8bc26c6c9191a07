//! Identifiers of the most-connected ("hub") nodes in the network

use std::collections::HashSet;

use crate::error::{HealthError, HealthResult};

/// Fixed set of hub node ids, chosen once per network and shared read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubNodes {
    ids: Vec<usize>,
    lookup: HashSet<usize>,
}

impl HubNodes {
    /// Pick the `count` nodes with the highest degree
    ///
    /// `degrees[i]` is the degree of node `i`. Ties go to the lower id so the
    /// selection is deterministic.
    pub fn from_degrees(degrees: &[usize], count: usize) -> HealthResult<Self> {
        if count == 0 || count > degrees.len() {
            return Err(HealthError::Config(format!(
                "cannot pick {} hubs from {} nodes",
                count,
                degrees.len()
            )));
        }

        let mut order: Vec<usize> = (0..degrees.len()).collect();
        order.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]).then(a.cmp(&b)));
        order.truncate(count);

        Ok(Self::from_ids(order))
    }

    /// Use an explicit list of hub ids (duplicates are dropped)
    pub fn from_ids(ids: Vec<usize>) -> Self {
        let mut lookup = HashSet::with_capacity(ids.len());
        let ids = ids.into_iter().filter(|id| lookup.insert(*id)).collect();
        Self { ids, lookup }
    }

    pub fn contains(&self, node: usize) -> bool {
        self.lookup.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Hub ids, most connected first when built from degrees
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }
}
