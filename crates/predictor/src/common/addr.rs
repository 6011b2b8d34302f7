//! Address decomposition.
//!
//! A flat 64-bit address is split into bit fields that identify the huge page
//! it belongs to and the small page touched within it:
//!
//! ```text
//!  63                 H+I            H               12            0
//! +--------------------+-------------+----------------+-------------+
//! |   footprint tag    |  fp index   | sub-page offset| byte offset |
//! +--------------------+-------------+----------------+-------------+
//! |          residency tag           |
//! +----------------------------------+
//! ```
//!
//! `H` is the huge-page offset width and `I` the footprint-table index width.
//! Every extraction is total over all 64-bit inputs.

use super::constants::{ADDR_BITS, SMALL_PAGE_SHIFT};

/// Bit-field layout of an address for a given huge-page size and footprint-table geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    huge_page_bits: u32,
    index_bits: u32,
}

impl AddressLayout {
    /// Creates a layout.
    ///
    /// # Arguments
    ///
    /// * `huge_page_bits` - log2 of the huge-page size in bytes (`H`, at least 12).
    /// * `index_bits` - log2 of the number of footprint-table sets (`I`).
    ///
    /// The caller guarantees `12 <= H` and `H + I <= 64`; [`PredictorConfig::validate`]
    /// enforces both.
    ///
    /// [`PredictorConfig::validate`]: crate::config::PredictorConfig::validate
    pub const fn new(huge_page_bits: u32, index_bits: u32) -> Self {
        debug_assert!(huge_page_bits >= SMALL_PAGE_SHIFT);
        debug_assert!(huge_page_bits + index_bits <= ADDR_BITS);
        Self {
            huge_page_bits,
            index_bits,
        }
    }

    /// Returns the huge-page offset width `H`.
    #[inline(always)]
    pub const fn huge_page_bits(&self) -> u32 {
        self.huge_page_bits
    }

    /// Returns the footprint-table index width `I`.
    #[inline(always)]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Number of small pages in one huge page (`2^(H-12)`).
    pub const fn sub_pages(&self) -> usize {
        1 << (self.huge_page_bits - SMALL_PAGE_SHIFT)
    }

    /// Bits `[12, H)`: which small page within the huge page was touched.
    #[inline(always)]
    pub const fn small_page_offset(&self, addr: u64) -> usize {
        field(addr, SMALL_PAGE_SHIFT, self.huge_page_bits) as usize
    }

    /// Bits `[H, H+I)`: the footprint-table set.
    #[inline(always)]
    pub const fn footprint_index(&self, addr: u64) -> usize {
        field(addr, self.huge_page_bits, self.huge_page_bits + self.index_bits) as usize
    }

    /// Bits `[H+I, 64)`: identifies the huge page within its footprint-table set.
    #[inline(always)]
    pub const fn footprint_tag(&self, addr: u64) -> u64 {
        field(addr, self.huge_page_bits + self.index_bits, ADDR_BITS)
    }

    /// Bits `[H, 64)`: identifies the huge page globally.
    #[inline(always)]
    pub const fn residency_tag(&self, addr: u64) -> u64 {
        field(addr, self.huge_page_bits, ADDR_BITS)
    }

    /// Base byte address of the huge page with the given residency tag.
    pub const fn huge_page_base(&self, residency_tag: u64) -> u64 {
        match residency_tag.checked_shl(self.huge_page_bits) {
            Some(base) => base,
            None => 0,
        }
    }
}

/// Extracts bits `[lo, hi)` of `addr`. Empty or out-of-range fields read as zero.
#[inline(always)]
const fn field(addr: u64, lo: u32, hi: u32) -> u64 {
    if lo >= hi || lo >= ADDR_BITS {
        return 0;
    }
    let width = hi - lo;
    let shifted = addr >> lo;
    if width >= ADDR_BITS {
        shifted
    } else {
        shifted & ((1 << width) - 1)
    }
}
