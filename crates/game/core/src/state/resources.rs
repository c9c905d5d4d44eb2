//! Replicated ledger of gatherable resource points.
//!
//! Each arena detail (a tree, an ore vein, ...) registers one record per
//! resource it yields. The ledger is a fixed-capacity list so it can be
//! replicated as a single struct; appends past the capacity fail.

use arrayvec::ArrayVec;

use super::common::{Name, name};
use crate::config::CombatConfig;

/// One tracked resource yield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedResource {
    /// Unique id of the detail that owns this yield.
    pub id: u32,
    /// Gather action that harvests it (e.g. `chop`).
    pub action: Name,
    pub resource: Name,
    pub stored: i32,
}

/// A resource-bearing detail placed in the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDetail {
    pub unique_id: u32,
    pub resources: Vec<ResourceYield>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceYield {
    pub gather_type: String,
    pub resource_id: String,
    pub amount: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("tracked resource ledger is full ({capacity} records)")]
    Full { capacity: usize },

    #[error("resource index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("resource name `{0}` is too long")]
    NameTooLong(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedResources {
    resources: ArrayVec<TrackedResource, { CombatConfig::MAX_TRACKED_RESOURCES }>,
}

impl TrackedResources {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedResource> {
        self.resources.iter()
    }

    /// Finds the record for a detail and gather action.
    pub fn find(&self, unique_id: u32, gather: &str) -> Option<(usize, &TrackedResource)> {
        self.resources
            .iter()
            .enumerate()
            .find(|(_, r)| r.id == unique_id && r.action.as_str() == gather)
    }

    /// Returns the record, or an empty record (`stored = 0`) when untracked.
    pub fn get_resource(&self, unique_id: u32, gather: &str) -> TrackedResource {
        self.find(unique_id, gather)
            .map(|(_, r)| *r)
            .unwrap_or_default()
    }

    /// Overwrites the record at `index`.
    pub fn modify_stored(
        &mut self,
        index: usize,
        record: TrackedResource,
    ) -> Result<(), ResourceError> {
        let len = self.resources.len();
        let slot = self
            .resources
            .get_mut(index)
            .ok_or(ResourceError::IndexOutOfBounds { index, len })?;
        *slot = record;
        Ok(())
    }

    /// Tracks every yield of `detail`.
    ///
    /// All-or-nothing: nothing is appended if any yield would overflow the
    /// ledger or carries an over-long name. Returns the number of records added.
    pub fn add_detail(&mut self, detail: &ResourceDetail) -> Result<usize, ResourceError> {
        if self.resources.len() + detail.resources.len() > self.resources.capacity() {
            return Err(ResourceError::Full {
                capacity: self.resources.capacity(),
            });
        }

        let records = detail
            .resources
            .iter()
            .map(|y| {
                Ok(TrackedResource {
                    id: detail.unique_id,
                    action: name(&y.gather_type)
                        .map_err(|_| ResourceError::NameTooLong(y.gather_type.clone()))?,
                    resource: name(&y.resource_id)
                        .map_err(|_| ResourceError::NameTooLong(y.resource_id.clone()))?,
                    stored: y.amount,
                })
            })
            .collect::<Result<Vec<_>, ResourceError>>()?;

        let added = records.len();
        self.resources.extend(records);
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(unique_id: u32, yields: &[(&str, &str, i32)]) -> ResourceDetail {
        ResourceDetail {
            unique_id,
            resources: yields
                .iter()
                .map(|(gather, resource, amount)| ResourceYield {
                    gather_type: gather.to_string(),
                    resource_id: resource.to_string(),
                    amount: *amount,
                })
                .collect(),
        }
    }

    #[test]
    fn tracks_and_updates_yields() {
        let mut ledger = TrackedResources::default();
        let added = ledger
            .add_detail(&detail(7, &[("chop", "wood", 12), ("forage", "berries", 3)]))
            .unwrap();
        assert_eq!(added, 2);

        let (index, record) = ledger.find(7, "forage").unwrap();
        let mut record = *record;
        record.stored -= 1;
        ledger.modify_stored(index, record).unwrap();

        assert_eq!(ledger.get_resource(7, "forage").stored, 2);
        assert_eq!(ledger.get_resource(7, "chop").stored, 12);
    }

    #[test]
    fn untracked_resource_reads_as_empty() {
        let ledger = TrackedResources::default();
        let record = ledger.get_resource(1, "mine");
        assert_eq!(record.stored, 0);
        assert!(ledger.find(1, "mine").is_none());
    }

    #[test]
    fn detail_without_yields_adds_nothing() {
        let mut ledger = TrackedResources::default();
        assert_eq!(ledger.add_detail(&detail(1, &[])).unwrap(), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn overflow_is_rejected_atomically() {
        let mut ledger = TrackedResources::default();
        for id in 0..(CombatConfig::MAX_TRACKED_RESOURCES as u32 - 1) {
            ledger.add_detail(&detail(id, &[("chop", "wood", 1)])).unwrap();
        }

        let err = ledger
            .add_detail(&detail(999, &[("chop", "wood", 1), ("mine", "ore", 1)]))
            .unwrap_err();
        assert_eq!(
            err,
            ResourceError::Full {
                capacity: CombatConfig::MAX_TRACKED_RESOURCES
            }
        );
        assert_eq!(ledger.len(), CombatConfig::MAX_TRACKED_RESOURCES - 1);
    }

    #[test]
    fn out_of_bounds_modify_fails() {
        let mut ledger = TrackedResources::default();
        let err = ledger
            .modify_stored(3, TrackedResource::default())
            .unwrap_err();
        assert_eq!(err, ResourceError::IndexOutOfBounds { index: 3, len: 0 });
    }
}
