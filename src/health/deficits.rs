//! Live deficit counters and the frailty index derived from them

use serde::{Deserialize, Serialize};

use crate::error::{HealthError, HealthResult};

/// Frailty index over all nodes (`tot`) and over the hub nodes (`hub`, a.k.a. FI30)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrailtyIndex {
    pub tot: f64,
    pub hub: f64,
}

impl FrailtyIndex {
    /// Fully healthy: no node damaged
    pub const HEALTHY: FrailtyIndex = FrailtyIndex { tot: 0.0, hub: 0.0 };

    /// Fraction of damaged nodes overall and among the hubs
    pub fn from_counts(
        deficits_tot: u32,
        node_count: u32,
        deficits_hub: u32,
        hub_count: u32,
    ) -> HealthResult<Self> {
        if node_count == 0 || hub_count == 0 {
            return Err(HealthError::InvalidNodeCount);
        }
        Ok(Self {
            tot: f64::from(deficits_tot) / f64::from(node_count),
            hub: f64::from(deficits_hub) / f64::from(hub_count),
        })
    }

    /// Health-adjusted weights `(1 - FItot, 1 - FI30)` used for QALY
    pub fn quality_weights(&self) -> (f64, f64) {
        (1.0 - self.tot, 1.0 - self.hub)
    }
}

/// Damaged-node counts for one individual; only ever grow during a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeficitCounters {
    node_count: u32,
    hub_count: u32,
    deficits_tot: u32,
    deficits_hub: u32,
}

impl DeficitCounters {
    pub fn new(node_count: u32, hub_count: u32) -> Self {
        Self {
            node_count,
            hub_count,
            deficits_tot: 0,
            deficits_hub: 0,
        }
    }

    pub fn deficits_tot(&self) -> u32 {
        self.deficits_tot
    }

    pub fn deficits_hub(&self) -> u32 {
        self.deficits_hub
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn hub_count(&self) -> u32 {
        self.hub_count
    }

    /// Undamaged nodes left in the network
    pub fn undamaged(&self) -> u32 {
        self.node_count - self.deficits_tot
    }

    /// Record one newly damaged node
    pub fn damage(&mut self, is_hub: bool) -> HealthResult<()> {
        let tot = self.deficits_tot.checked_add(1).ok_or(HealthError::DeficitsOutOfRange {
            counter: "total",
            value: u32::MAX,
            limit: self.node_count,
        })?;
        let hub = self
            .deficits_hub
            .checked_add(u32::from(is_hub))
            .ok_or(HealthError::DeficitsOutOfRange {
                counter: "hub",
                value: u32::MAX,
                limit: self.hub_count,
            })?;
        self.set(tot, hub)
    }

    /// Replace both counts, rejecting decreases and out-of-range values
    pub fn set(&mut self, deficits_tot: u32, deficits_hub: u32) -> HealthResult<()> {
        if deficits_tot > self.node_count {
            return Err(HealthError::DeficitsOutOfRange {
                counter: "total",
                value: deficits_tot,
                limit: self.node_count,
            });
        }
        let hub_limit = self.hub_count.min(deficits_tot);
        if deficits_hub > hub_limit {
            return Err(HealthError::DeficitsOutOfRange {
                counter: "hub",
                value: deficits_hub,
                limit: hub_limit,
            });
        }
        if deficits_tot < self.deficits_tot {
            return Err(HealthError::DeficitsDecreased {
                counter: "total",
                current: self.deficits_tot,
                requested: deficits_tot,
            });
        }
        if deficits_hub < self.deficits_hub {
            return Err(HealthError::DeficitsDecreased {
                counter: "hub",
                current: self.deficits_hub,
                requested: deficits_hub,
            });
        }

        self.deficits_tot = deficits_tot;
        self.deficits_hub = deficits_hub;
        Ok(())
    }

    /// Current frailty index
    pub fn frailty(&self) -> HealthResult<FrailtyIndex> {
        FrailtyIndex::from_counts(self.deficits_tot, self.node_count, self.deficits_hub, self.hub_count)
    }

    pub fn reset(&mut self) {
        self.deficits_tot = 0;
        self.deficits_hub = 0;
    }
}
