//! Storage arithmetic for values bounded by an invariant of the caller.
use alloy_primitives::Uint;
use alloy_sol_types::sol_data::{IntBitCount, SupportedInt};
use stylus_sdk::storage::StorageUint;

/// Adds a value to a storage slot without an overflow check.
pub(crate) trait AddAssignUnchecked<T> {
    /// Adds `rhs` to `self`. The caller guarantees the sum fits.
    fn add_assign_unchecked(&mut self, rhs: T);
}

impl<const B: usize, const L: usize> AddAssignUnchecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn add_assign_unchecked(&mut self, rhs: Uint<B, L>) {
        let sum = self.get() + rhs;
        self.set(sum);
    }
}

/// Subtracts a value from a storage slot without an underflow check.
pub(crate) trait SubAssignUnchecked<T> {
    /// Subtracts `rhs` from `self`. The caller guarantees `rhs <= self`.
    fn sub_assign_unchecked(&mut self, rhs: T);
}

impl<const B: usize, const L: usize> SubAssignUnchecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn sub_assign_unchecked(&mut self, rhs: Uint<B, L>) {
        let difference = self.get() - rhs;
        self.set(difference);
    }
}
