//! Residency ("translation") Table.
//!
//! A fully associative record of the huge pages currently held in fast
//! memory, one slot per huge page of capacity. A hit sets the slot's CLOCK
//! reference bit; migrating into a full table evicts by second-chance sweep.
//! Only tags are tracked, never page contents.

use tracing::debug;

use super::policies::{ClockPolicy, ReplacementPolicy};
use crate::common::AddressLayout;

/// A single fast-memory slot. Its reference bit lives in the CLOCK policy.
#[derive(Clone, Copy, Debug, Default)]
struct ResidencyEntry {
    /// Residency tag (huge page number).
    tag: u64,
    /// Slot holds a resident huge page.
    valid: bool,
}

/// Bytes one slot occupies, entry plus CLOCK reference bit.
pub(crate) const SLOT_BYTES: usize = size_of::<ResidencyEntry>() + size_of::<bool>();

/// Outcome of a migration into fast memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigrationRecord {
    /// Slot now holding the huge page.
    pub slot: usize,
    /// Residency tag of the migrated huge page.
    pub tag: u64,
    /// Residency tag evicted to make room, if the table was full.
    pub evicted_tag: Option<u64>,
    /// The huge page was already resident; nothing changed.
    pub already_resident: bool,
}

/// Fully-associative fast-memory residency table.
#[derive(Debug)]
pub struct ResidencyTable {
    entries: Vec<ResidencyEntry>,
    layout: AddressLayout,
    policy: ClockPolicy,
}

impl ResidencyTable {
    /// Creates an empty table with `capacity` huge-page slots.
    pub fn new(capacity: usize, layout: AddressLayout) -> Self {
        Self {
            entries: vec![ResidencyEntry::default(); capacity],
            layout,
            policy: ClockPolicy::new(capacity),
        }
    }

    /// Number of huge-page slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of slots holding a resident huge page.
    pub fn occupancy(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// Current CLOCK hand position.
    pub const fn hand(&self) -> usize {
        self.policy.hand()
    }

    /// Looks up `addr`'s huge page, setting its reference bit on a hit.
    ///
    /// # Returns
    ///
    /// `true` if the huge page is resident in fast memory.
    pub fn lookup(&mut self, addr: u64) -> bool {
        match self.find(self.layout.residency_tag(addr)) {
            Some(slot) => {
                self.policy.update(0, slot);
                true
            }
            None => false,
        }
    }

    /// Whether `addr`'s huge page is resident, without touching the reference bit.
    pub fn contains(&self, addr: u64) -> bool {
        self.find(self.layout.residency_tag(addr)).is_some()
    }

    /// Reference bit of the slot holding `addr`'s huge page, `None` if not resident.
    pub fn is_referenced(&self, addr: u64) -> Option<bool> {
        self.find(self.layout.residency_tag(addr))
            .map(|slot| self.policy.is_referenced(slot))
    }

    /// Residency tags of every slot in slot order, `None` for empty slots.
    pub fn resident_tags(&self) -> Vec<Option<u64>> {
        self.entries
            .iter()
            .map(|e| e.valid.then_some(e.tag))
            .collect()
    }

    /// Makes `addr`'s huge page resident.
    ///
    /// An empty slot is used when one exists; otherwise CLOCK picks the
    /// victim. The installed slot starts with its reference bit clear. A page
    /// that is already resident is left untouched so that no tag ever
    /// occupies two slots.
    pub fn migrate(&mut self, addr: u64) -> MigrationRecord {
        let tag = self.layout.residency_tag(addr);

        if let Some(slot) = self.find(tag) {
            return MigrationRecord {
                slot,
                tag,
                evicted_tag: None,
                already_resident: true,
            };
        }

        let (slot, evicted_tag) = match self.entries.iter().position(|e| !e.valid) {
            Some(slot) => (slot, None),
            None => {
                let slot = self.policy.get_victim(0);
                let evicted = self.entries[slot].tag;
                debug!(slot, evicted_tag = evicted, hand = self.policy.hand(), "residency eviction");
                (slot, Some(evicted))
            }
        };

        self.entries[slot] = ResidencyEntry { tag, valid: true };
        self.policy.fill(0, slot);

        MigrationRecord {
            slot,
            tag,
            evicted_tag,
            already_resident: false,
        }
    }

    fn find(&self, tag: u64) -> Option<usize> {
        let mut matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.valid && e.tag == tag)
            .map(|(slot, _)| slot);
        let slot = matches.next();
        debug_assert!(matches.next().is_none(), "residency tag {tag:#x} held by two slots");
        slot
    }
}
