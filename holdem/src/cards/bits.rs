//! Bit deposit: scatter the low bits of `src` onto the set bits of `mask`.
//!
//! `deposit(1 << k, mask)` is the k-th lowest set bit of `mask`, which is how
//! decks pick a card by index without walking them.

/// Portable bit deposit. Walks the set bits of `mask` from the lowest one.
#[must_use]
pub const fn deposit_portable(mut src: u64, mask: u64) -> u64 {
    let mut result = 0;
    let mut m = mask;
    while m != 0 {
        let lowest = m & m.wrapping_neg();
        if src & 1 != 0 {
            result |= lowest;
        }
        src >>= 1;
        m &= m - 1;
    }
    result
}

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
#[must_use]
pub fn deposit(src: u64, mask: u64) -> u64 {
    // SAFETY: this item only exists when BMI2 is enabled for the build target.
    unsafe { core::arch::x86_64::_pdep_u64(src, mask) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
#[must_use]
pub fn deposit(src: u64, mask: u64) -> u64 {
    deposit_portable(src, mask)
}

/// The `k`-th lowest set bit of `mask`, or 0 if `mask` has `k` or fewer bits.
#[inline]
#[must_use]
pub fn nth_set_bit(mask: u64, k: u32) -> u64 {
    if k >= 64 {
        return 0;
    }
    deposit(1 << k, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_portable_basic() {
        assert_eq!(deposit_portable(0b1, 0b1010), 0b0010);
        assert_eq!(deposit_portable(0b10, 0b1010), 0b1000);
        assert_eq!(deposit_portable(0b11, 0b1010), 0b1010);
        assert_eq!(deposit_portable(0b111, 0), 0);
    }

    #[test]
    fn test_deposit_matches_portable() {
        let masks = [0u64, 1, 0xF0F0, 0xF_FFFF_FFFF_FFFF, 0x8000_0000_0000_0001, 0x5555_5555];
        for &mask in &masks {
            for src in [0u64, 1, 2, 0b1011, 0xFFFF, u64::MAX] {
                assert_eq!(deposit(src, mask), deposit_portable(src, mask));
            }
        }
    }

    #[test]
    fn test_nth_set_bit() {
        let mask = 0b1011_0000u64;
        assert_eq!(nth_set_bit(mask, 0), 0b0001_0000);
        assert_eq!(nth_set_bit(mask, 1), 0b0010_0000);
        assert_eq!(nth_set_bit(mask, 2), 0b1000_0000);
        assert_eq!(nth_set_bit(mask, 3), 0);
        assert_eq!(nth_set_bit(mask, 64), 0);
    }
}
