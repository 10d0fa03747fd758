//! Result store shared by all statistic units during one run
//!
//! The store maps a key to a value of any type. Every key belongs to the unit
//! that created it, and units only ever see the store through a [`Namespace`]
//! bound to their own name, so one unit can never read or clobber another
//! unit's accumulators.
//!
//! # Example
//!
//! ```
//! use peoplestats::stats::store::ResultStore;
//!
//! let mut store = ResultStore::new();
//! {
//!     let mut ns = store.namespace("eye-color-count");
//!     ns.insert("count", 0u64).unwrap();
//!     *ns.get_mut::<u64>("count").unwrap() += 1;
//! }
//! assert_eq!(store.get::<u64>("count"), Some(&1));
//! assert_eq!(store.owner("count"), Some("eye-color-count"));
//! ```

use crate::error::StatsError;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;

struct Slot {
    owner: String,
    value: Box<dyn Any>,
}

/// Keyed store of per-unit accumulators and final values
#[derive(Default)]
pub struct ResultStore {
    slots: IndexMap<String, Slot>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle restricted to the keys owned by `unit`
    pub fn namespace<'a>(&'a mut self, unit: &'a str) -> Namespace<'a> {
        Namespace { store: self, unit }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Unit that owns `key`, if the key exists
    pub fn owner(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(|slot| slot.owner.as_str())
    }

    /// Read a value after the run, regardless of owner
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.slots.get(key).and_then(|slot| slot.value.downcast_ref())
    }

    /// Keys created by `unit`, in creation order
    pub fn keys_of<'a>(&'a self, unit: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.slots
            .iter()
            .filter(move |(_, slot)| slot.owner == unit)
            .map(|(key, _)| key.as_str())
    }
}

impl fmt::Debug for ResultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(key, slot)| (key, &slot.owner)))
            .finish()
    }
}

/// A unit's view of the [`ResultStore`]
pub struct Namespace<'a> {
    store: &'a mut ResultStore,
    unit: &'a str,
}

impl<'a> Namespace<'a> {
    /// Name of the owning unit
    pub fn unit(&self) -> &str {
        self.unit
    }

    /// Create or reset a key owned by this unit
    pub fn insert<T: 'static>(&mut self, key: &str, value: T) -> Result<(), StatsError> {
        let unit = self.unit;
        if let Some(slot) = self.store.slots.get_mut(key) {
            if slot.owner != unit {
                return Err(collision(key, &slot.owner, unit));
            }
            slot.value = Box::new(value);
            return Ok(());
        }
        self.store.slots.insert(
            key.to_string(),
            Slot {
                owner: self.unit.to_string(),
                value: Box::new(value),
            },
        );
        Ok(())
    }

    pub fn get<T: 'static>(&self, key: &str) -> Result<&T, StatsError> {
        let slot = self.owned(key)?;
        slot.value
            .downcast_ref()
            .ok_or_else(|| self.type_error(key))
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Result<&mut T, StatsError> {
        let unit = self.unit;
        let slot = match self.store.slots.get_mut(key) {
            Some(slot) if slot.owner == unit => slot,
            Some(slot) => return Err(collision(key, &slot.owner, unit)),
            None => {
                return Err(StatsError::MissingSlot {
                    unit: unit.to_string(),
                    key: key.to_string(),
                })
            }
        };
        slot.value.downcast_mut().ok_or_else(|| StatsError::SlotType {
            unit: unit.to_string(),
            key: key.to_string(),
        })
    }

    fn owned(&self, key: &str) -> Result<&Slot, StatsError> {
        match self.store.slots.get(key) {
            Some(slot) if slot.owner == self.unit => Ok(slot),
            Some(slot) => Err(collision(key, &slot.owner, self.unit)),
            None => Err(StatsError::MissingSlot {
                unit: self.unit.to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn type_error(&self, key: &str) -> StatsError {
        StatsError::SlotType {
            unit: self.unit.to_string(),
            key: key.to_string(),
        }
    }
}

fn collision(key: &str, owner: &str, requested_by: &str) -> StatsError {
    StatsError::KeyCollision {
        key: key.to_string(),
        owner: owner.to_string(),
        requested_by: requested_by.to_string(),
    }
}
