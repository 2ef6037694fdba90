//! Storage arithmetic that reverts on overflow.
use alloy_primitives::Uint;
use alloy_sol_types::sol_data::{IntBitCount, SupportedInt};
use stylus_sdk::storage::StorageUint;

/// Adds a value to a storage slot, panicking with `msg` on overflow.
pub(crate) trait AddAssignChecked<T> {
    /// Adds `rhs` to `self`. A panic reverts the whole call.
    fn add_assign_checked(&mut self, rhs: T, msg: &str);
}

impl<const B: usize, const L: usize> AddAssignChecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn add_assign_checked(&mut self, rhs: Uint<B, L>, msg: &str) {
        let sum = self.get().checked_add(rhs).expect(msg);
        self.set(sum);
    }
}
