//! Outgoing packet tracking.
//!
//! Every packet handed to the radio is registered here under the host's
//! sequence identifier; the slot number travels with the transmission and
//! comes back in the radio's completion callback, at which point the
//! identifier is resolved for the confirmation frame.
//!
//! The table is fixed-capacity and positional: no dynamic allocation after
//! construction, O(1) bookkeeping, suitable for a resource-constrained
//! host. A naive ring would overwrite the oldest identifier when sends
//! outran confirmations, silently corrupting the correlation; here a full
//! table refuses the registration instead, so a sequence identifier is
//! never aliased while its send is in flight. A rotating cursor starts the
//! free-slot search, which keeps slot numbers cycling rather than pinning
//! every burst to slot zero.

use crate::GatewayError;

/// A position in the outgoing packet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub(crate) usize);

impl Slot {
    /// The table index this slot refers to.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Fixed-capacity table of in-flight sequence identifiers.
#[derive(Debug)]
pub struct PendingTable {
    slots: Vec<Option<u8>>,
    cursor: usize,
    in_flight: usize,
}

impl PendingTable {
    /// Create a table with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "pending table capacity must be nonzero");
        PendingTable {
            slots: vec![None; capacity],
            cursor: 0,
            in_flight: 0,
        }
    }

    /// Register a sequence identifier, claiming the next free slot.
    ///
    /// Returns [`GatewayError::PendingFull`] when every slot holds an
    /// unconfirmed send.
    pub fn register(&mut self, seq_id: u8) -> Result<Slot, GatewayError> {
        if self.in_flight == self.slots.len() {
            return Err(GatewayError::PendingFull {
                capacity: self.slots.len(),
            });
        }

        // A free slot exists; search from the cursor so indices rotate.
        let mut idx = self.cursor;
        while self.slots[idx].is_some() {
            idx = (idx + 1) % self.slots.len();
        }

        self.slots[idx] = Some(seq_id);
        self.cursor = (idx + 1) % self.slots.len();
        self.in_flight += 1;
        Ok(Slot(idx))
    }

    /// Take the sequence identifier out of a slot, freeing it.
    ///
    /// Returns `None` for a slot with nothing in flight (out of range, or
    /// already completed).
    pub fn complete(&mut self, slot: Slot) -> Option<u8> {
        let seq_id = self.slots.get_mut(slot.0)?.take()?;
        self.in_flight -= 1;
        Some(seq_id)
    }

    /// Number of sends currently awaiting confirmation.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.in_flight == self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_complete_round_trip() {
        let mut table = PendingTable::new(16);
        let slot = table.register(0x42).unwrap();
        assert_eq!(table.in_flight(), 1);
        assert_eq!(table.complete(slot), Some(0x42));
        assert_eq!(table.in_flight(), 0);
    }

    #[test]
    fn test_full_table_refuses_registration() {
        let mut table = PendingTable::new(4);
        for i in 0..4 {
            table.register(i).unwrap();
        }
        assert!(table.is_full());
        assert_eq!(
            table.register(99),
            Err(GatewayError::PendingFull { capacity: 4 })
        );
        // Each registered identifier is still intact.
        for i in 0..4 {
            assert_eq!(table.complete(Slot(i as usize)), Some(i));
        }
    }

    #[test]
    fn test_slot_reused_only_after_completion() {
        let mut table = PendingTable::new(2);
        let a = table.register(1).unwrap();
        let _b = table.register(2).unwrap();
        assert!(table.register(3).is_err());

        assert_eq!(table.complete(a), Some(1));
        let c = table.register(3).unwrap();
        assert_eq!(c, a);
        assert_eq!(table.complete(c), Some(3));
    }

    #[test]
    fn test_slots_rotate() {
        let mut table = PendingTable::new(4);
        let a = table.register(1).unwrap();
        assert_eq!(table.complete(a), Some(1));
        // The cursor has moved on; the next registration takes a new index
        // even though slot 0 is free again.
        let b = table.register(2).unwrap();
        assert_ne!(a, b);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn test_complete_empty_or_bogus_slot() {
        let mut table = PendingTable::new(4);
        assert_eq!(table.complete(Slot(0)), None);
        assert_eq!(table.complete(Slot(100)), None);

        let slot = table.register(7).unwrap();
        assert_eq!(table.complete(slot), Some(7));
        // Double completion yields nothing.
        assert_eq!(table.complete(slot), None);
        assert_eq!(table.in_flight(), 0);
    }

    #[test]
    fn test_duplicate_seq_ids_coexist() {
        // The identifier is opaque; the host may reuse it while an earlier
        // send is still in flight, and the slots keep them apart.
        let mut table = PendingTable::new(4);
        let a = table.register(5).unwrap();
        let b = table.register(5).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.complete(b), Some(5));
        assert_eq!(table.complete(a), Some(5));
    }
}
