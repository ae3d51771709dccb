//! Identifier generation for layout elements

use uuid::Uuid;

/// Source of unique identifiers for report elements
///
/// Identifiers only serve as traceability metadata in the layout document.
/// They carry no meaning for geometry or field binding.
pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random version 4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counter-based identifiers: 00000000-0000-0000-0000-000000000001, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u128 {
        self.issued
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.issued += 1;
        Uuid::from_u128(self.issued)
    }
}
