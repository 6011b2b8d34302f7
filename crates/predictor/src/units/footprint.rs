//! Footprint Table.
//!
//! A set-associative table with one entry per tracked huge page. Each entry
//! records which small pages of its huge page have been touched since the
//! entry was created. Entries within a set are ordered most- to
//! least-recently used, way 0 always holding the MRU entry.
//!
//! The table only sees addresses that missed in fast memory. Once an entry's
//! touched count rises above the migration bar it is invalidated and the
//! caller migrates the huge page; the table never touches the residency table
//! itself.

use tracing::debug;

use super::policies::{NmruPolicy, ReplacementPolicy};
use crate::common::{AddressLayout, RandomSource};

const WORD_BITS: usize = u64::BITS as usize;

/// Bytes one entry occupies when tracking `sub_pages` small pages.
pub(crate) const fn entry_bytes(sub_pages: usize) -> usize {
    size_of::<FootprintEntry>() + sub_pages.div_ceil(WORD_BITS) * size_of::<u64>()
}

/// One tracked huge page.
#[derive(Clone, Debug, Default)]
pub struct FootprintEntry {
    tag: u64,
    valid: bool,
    /// One bit per small page, packed into 64-bit words.
    touched: Vec<u64>,
    /// Cached popcount of `touched`.
    touched_count: usize,
}

impl FootprintEntry {
    fn empty(sub_pages: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            touched: vec![0; sub_pages.div_ceil(WORD_BITS)],
            touched_count: 0,
        }
    }

    /// Footprint tag of the tracked huge page.
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Whether this slot holds a live entry.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of distinct small pages touched.
    pub const fn touched_count(&self) -> usize {
        self.touched_count
    }

    /// Whether small page `offset` has been touched.
    pub fn is_touched(&self, offset: usize) -> bool {
        self.touched
            .get(offset / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (offset % WORD_BITS)) != 0)
    }

    /// Marks `offset` touched, returning `true` if it was not touched before.
    fn touch(&mut self, offset: usize) -> bool {
        let word = &mut self.touched[offset / WORD_BITS];
        let bit = 1u64 << (offset % WORD_BITS);
        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.touched_count += 1;
        true
    }

    /// Reinitialises the slot for a new huge page with a single touched small page.
    fn reset(&mut self, tag: u64, offset: usize) {
        self.tag = tag;
        self.valid = true;
        self.touched.fill(0);
        self.touched_count = 0;
        let _ = self.touch(offset);
    }
}

/// Result of recording one fast-memory miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FootprintOutcome {
    /// The huge page was not tracked; a slot was allocated for it.
    Allocated {
        /// Footprint tag of the valid entry that was evicted, if any.
        evicted_tag: Option<u64>,
    },
    /// The huge page was tracked and stays below the migration bar.
    Touched {
        /// Whether this small page was touched for the first time.
        newly_touched: bool,
    },
    /// The touched count rose above the migration bar; the entry was
    /// invalidated and the huge page must be migrated.
    ThresholdCrossed {
        /// Touched count at the moment of crossing.
        touched: usize,
    },
}

/// Set-associative footprint table.
#[derive(Debug)]
pub struct FootprintTable {
    /// Flat `sets × ways` storage; set `s` occupies `[s * ways, (s + 1) * ways)`.
    entries: Vec<FootprintEntry>,
    sets: usize,
    ways: usize,
    layout: AddressLayout,
    /// Largest touched count that does not yet trigger migration.
    migrate_above: usize,
    policy: NmruPolicy,
}

impl FootprintTable {
    /// Creates an empty footprint table.
    ///
    /// # Arguments
    ///
    /// * `sets` - Number of sets (`2^I` for the layout's index width).
    /// * `ways` - Associativity.
    /// * `layout` - Address layout shared with the predictor.
    /// * `migrate_above` - Touched counts strictly above this trigger migration.
    /// * `rng` - Owned random source for nMRU victim selection.
    pub fn new(
        sets: usize,
        ways: usize,
        layout: AddressLayout,
        migrate_above: usize,
        rng: RandomSource,
    ) -> Self {
        let sub_pages = layout.sub_pages();
        Self {
            entries: vec![FootprintEntry::empty(sub_pages); sets * ways],
            sets,
            ways,
            layout,
            migrate_above,
            policy: NmruPolicy::new(ways, rng),
        }
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Touched counts strictly above this value trigger migration.
    pub const fn migrate_above(&self) -> usize {
        self.migrate_above
    }

    /// Records a touch of `addr`, which must currently be absent from fast memory.
    ///
    /// A tracked huge page has its small page marked and is promoted to way 0,
    /// unless its touched count now exceeds the migration bar, in which case
    /// the entry is invalidated and `ThresholdCrossed` is returned. An
    /// untracked huge page is allocated at way 0: the first invalid way is
    /// reused if any, otherwise a random non-MRU way is evicted, and the
    /// former MRU entry moves into the freed way.
    pub fn record_access(&mut self, addr: u64) -> FootprintOutcome {
        let set = self.layout.footprint_index(addr);
        let tag = self.layout.footprint_tag(addr);
        let offset = self.layout.small_page_offset(addr);
        let base = set * self.ways;

        let hit_way = self.entries[base..base + self.ways]
            .iter()
            .position(|e| e.valid && e.tag == tag);

        if let Some(way) = hit_way {
            let entry = &mut self.entries[base + way];
            let newly_touched = entry.touch(offset);
            if entry.touched_count > self.migrate_above {
                entry.valid = false;
                return FootprintOutcome::ThresholdCrossed {
                    touched: entry.touched_count,
                };
            }
            self.entries[base..=base + way].rotate_right(1);
            self.policy.update(set, 0);
            return FootprintOutcome::Touched { newly_touched };
        }

        let free_way = self.entries[base..base + self.ways]
            .iter()
            .position(|e| !e.valid);
        let (victim, evicted_tag) = match free_way {
            Some(way) => (way, None),
            None => {
                let way = self.policy.get_victim(set);
                let evicted = self.entries[base + way].tag;
                debug!(set, way, evicted_tag = evicted, "footprint table eviction");
                (way, Some(evicted))
            }
        };

        // Old MRU moves into the victim's way; the victim's storage is recycled at way 0.
        self.entries.swap(base, base + victim);
        self.entries[base].reset(tag, offset);
        self.policy.fill(set, 0);

        FootprintOutcome::Allocated { evicted_tag }
    }

    /// Returns the valid entry tracking `addr`'s huge page, without side effects.
    pub fn lookup_entry(&self, addr: u64) -> Option<&FootprintEntry> {
        let set = self.layout.footprint_index(addr);
        let tag = self.layout.footprint_tag(addr);
        self.set_entries(set).iter().find(|e| e.valid && e.tag == tag)
    }

    /// Tags of a set in MRU-to-LRU order, `None` for invalid ways.
    pub fn set_tags(&self, set: usize) -> Vec<Option<u64>> {
        self.set_entries(set)
            .iter()
            .map(|e| e.valid.then_some(e.tag))
            .collect()
    }

    /// Number of valid entries in `set`.
    pub fn valid_in_set(&self, set: usize) -> usize {
        self.set_entries(set).iter().filter(|e| e.valid).count()
    }

    /// Number of valid entries in the whole table.
    pub fn occupancy(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    fn set_entries(&self, set: usize) -> &[FootprintEntry] {
        let base = set * self.ways;
        &self.entries[base..base + self.ways]
    }
}
