//! Atomic write batches.

use tally_types::SlotAddr;

/// The writes of one entity-manager transition, committed all-or-nothing.
///
/// `create` entries carry create-if-absent semantics: the whole batch fails
/// if any target slot is occupied at commit time. `update` entries replace
/// the bytes of a slot that must already exist (counter increments ride in
/// the same batch as the record creation they accompany, preserving the
/// no-partial-effect invariant).
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    creates: Vec<(SlotAddr, Vec<u8>)>,
    updates: Vec<(SlotAddr, Vec<u8>)>,
}

impl WriteBatch {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the creation of a fresh slot.
    pub fn create(&mut self, addr: SlotAddr, bytes: Vec<u8>) -> &mut Self {
        self.creates.push((addr, bytes));
        self
    }

    /// Queue the replacement of an existing slot's bytes.
    pub fn update(&mut self, addr: SlotAddr, bytes: Vec<u8>) -> &mut Self {
        self.updates.push((addr, bytes));
        self
    }

    /// Queued create entries, in insertion order.
    #[must_use]
    pub fn creates(&self) -> &[(SlotAddr, Vec<u8>)] {
        &self.creates
    }

    /// Queued update entries, in insertion order.
    #[must_use]
    pub fn updates(&self) -> &[(SlotAddr, Vec<u8>)] {
        &self.updates
    }

    /// Whether the batch carries no writes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty()
    }

    /// Consume the batch into its `(creates, updates)` vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<(SlotAddr, Vec<u8>)>, Vec<(SlotAddr, Vec<u8>)>) {
        (self.creates, self.updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_preserves_insertion_order() {
        let a = SlotAddr::from_bytes([1; 32]);
        let b = SlotAddr::from_bytes([2; 32]);
        let mut batch = WriteBatch::new();
        batch.create(a, vec![1]).update(b, vec![2]);
        assert_eq!(batch.creates().len(), 1);
        assert_eq!(batch.updates().len(), 1);
        assert!(!batch.is_empty());
        let (creates, updates) = batch.into_parts();
        assert_eq!(creates[0].0, a);
        assert_eq!(updates[0].0, b);
    }
}
