//! Lookup tables over 13-bit rank masks.
//!
//! Every table has one entry per possible mask (8192). They are built once,
//! on first use, and only read afterwards.

use once_cell::sync::Lazy;

pub const RANK_MASKS: usize = 1 << 13;

/// A-2-3-4-5.
pub const WHEEL: u16 = 0b1_0000_0000_1111;
const FIVE_BIT: u16 = 1 << 3;

pub struct Tables {
    /// The mask itself when it holds five or more ranks, else 0.
    pub flush: Box<[u16]>,
    /// Bit of the best straight's high card, or 0 when there is no straight.
    pub straight: Box<[u16]>,
    /// `top[n - 1][mask]` keeps the `n` highest bits of `mask` (n in 1..=5).
    pub top: [Box<[u16]>; 5],
}

pub static TABLES: Lazy<Tables> = Lazy::new(Tables::build);

impl Tables {
    fn build() -> Self {
        let masks = || (0..RANK_MASKS).map(|m| m as u16);
        Self {
            flush: masks().map(flush_entry).collect(),
            straight: masks().map(straight_entry).collect(),
            top: std::array::from_fn(|n| masks().map(|m| top_bits(m, n + 1)).collect()),
        }
    }

    #[inline]
    #[must_use]
    pub fn top(&self, n: usize, mask: u16) -> u16 {
        self.top[n - 1][usize::from(mask & 0x1FFF)]
    }
}

fn flush_entry(mask: u16) -> u16 {
    if mask.count_ones() >= 5 { mask } else { 0 }
}

fn straight_entry(mask: u16) -> u16 {
    let run = mask & (mask >> 1) & (mask >> 2) & (mask >> 3) & (mask >> 4);
    if run != 0 {
        // `run` marks the low card of each five-long run.
        let low = 15 - run.leading_zeros();
        return 1 << (low + 4);
    }
    if mask & WHEEL == WHEEL {
        return FIVE_BIT;
    }
    0
}

fn top_bits(mut mask: u16, n: usize) -> u16 {
    while mask.count_ones() as usize > n {
        mask &= mask - 1;
    }
    mask
}
