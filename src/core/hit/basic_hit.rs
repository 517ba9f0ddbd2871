use std::fmt;

use crate::core::common::types::{
    is_document_id_valid, is_section_id_valid, DocumentId, SectionId, DOCUMENT_ID_BITS, INVALID_DOCUMENT_ID,
    SECTION_ID_BITS,
};

pub type BasicHitValue = u32;

const DOCUMENT_FIELD_MASK: BasicHitValue = (1 << DOCUMENT_ID_BITS) - 1;
const SECTION_FIELD_OFFSET: u32 = DOCUMENT_ID_BITS;
const SECTION_FIELD_MASK: BasicHitValue = (1 << SECTION_ID_BITS) - 1;
const USED_BITS: u32 = SECTION_FIELD_OFFSET + SECTION_ID_BITS;

/// Document ids are stored inverted so that a larger document id encodes to a smaller value.
/// The inversion is biased by one, zero is left for [`INVALID_DOCUMENT_ID`].
#[inline]
pub(crate) const fn invert_document_id(document_id: DocumentId) -> u32 {
    INVALID_DOCUMENT_ID.wrapping_sub(document_id)
}

#[inline]
pub(crate) const fn restore_document_id(inverted: u32) -> DocumentId {
    INVALID_DOCUMENT_ID.wrapping_sub(inverted)
}

/// A `(section_id, document_id)` key packed into 32 bits.
///
/// Layout (most significant first):
/// - 4 unused bits, always zero.
/// - `section_id` (6 bits).
/// - inverted `document_id` (22 bits).
///
/// Sorting the raw values orders hits by section ascending, then document descending.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasicHit {
    value: BasicHitValue,
}

impl BasicHit {
    /// Decodes to [`INVALID_DOCUMENT_ID`] in section 0. Any valid value is `>=` it, so it can be used as the
    /// probe for a lower bound search over sorted values.
    pub const INVALID_VALUE: BasicHitValue = 0;

    /// Out of range ids produce [`BasicHit::INVALID_VALUE`], check [`BasicHit::is_valid`] before use.
    pub fn new(section_id: SectionId, document_id: DocumentId) -> Self {
        if !is_section_id_valid(section_id) || !is_document_id_valid(document_id) {
            return Self::default();
        }
        let value = ((section_id as BasicHitValue) << SECTION_FIELD_OFFSET) | invert_document_id(document_id);
        Self { value }
    }

    pub const fn from_value(value: BasicHitValue) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> BasicHitValue {
        self.value
    }

    pub fn document_id(&self) -> DocumentId {
        restore_document_id(self.value & DOCUMENT_FIELD_MASK)
    }

    pub fn section_id(&self) -> SectionId {
        ((self.value >> SECTION_FIELD_OFFSET) & SECTION_FIELD_MASK) as SectionId
    }

    pub fn is_valid(&self) -> bool {
        self.value >> USED_BITS == 0 && self.value & DOCUMENT_FIELD_MASK != 0
    }
}

impl Default for BasicHit {
    fn default() -> Self {
        Self { value: Self::INVALID_VALUE }
    }
}

impl fmt::Debug for BasicHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "BasicHit(invalid:{:#x})", self.value);
        }
        write!(f, "BasicHit(section:{}, doc:{})", self.section_id(), self.document_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::types::{MAX_DOCUMENT_ID, MAX_SECTION_ID, MIN_DOCUMENT_ID, MIN_SECTION_ID};

    const SOME_DOCUMENT_ID: DocumentId = 24;
    const SOME_SECTION_ID: SectionId = 5;

    #[test]
    fn test_accessors() {
        let hit = BasicHit::new(SOME_SECTION_ID, SOME_DOCUMENT_ID);
        assert_eq!(hit.document_id(), SOME_DOCUMENT_ID);
        assert_eq!(hit.section_id(), SOME_SECTION_ID);
    }

    #[test]
    fn test_invalid() {
        let default_invalid = BasicHit::default();
        assert!(!default_invalid.is_valid());
        // The invalid value decodes to an invalid document id.
        assert_eq!(default_invalid.document_id(), INVALID_DOCUMENT_ID);
        assert_eq!(default_invalid.section_id(), MIN_SECTION_ID);

        assert!(!BasicHit::new(MAX_SECTION_ID + 1, SOME_DOCUMENT_ID).is_valid());
        assert!(!BasicHit::new(SOME_SECTION_ID, INVALID_DOCUMENT_ID).is_valid());
        assert!(!BasicHit::new(SOME_SECTION_ID, DocumentId::MAX).is_valid());
        // Unused high bits set.
        assert!(!BasicHit::from_value(BasicHitValue::MAX).is_valid());
    }

    #[test]
    fn test_valid() {
        for (section_id, document_id) in [
            (SOME_SECTION_ID, MAX_DOCUMENT_ID),
            (MAX_SECTION_ID, SOME_DOCUMENT_ID),
            (SOME_SECTION_ID, MIN_DOCUMENT_ID),
            (MIN_SECTION_ID, SOME_DOCUMENT_ID),
            (MAX_SECTION_ID, MAX_DOCUMENT_ID),
            (MIN_SECTION_ID, MIN_DOCUMENT_ID),
        ] {
            let hit = BasicHit::new(section_id, document_id);
            assert!(hit.is_valid(), "{:?}", hit);
            assert_eq!(hit.section_id(), section_id);
            assert_eq!(hit.document_id(), document_id);
        }

        // The smallest valid value must not sort before the invalid probe value.
        let smallest_hit = BasicHit::new(MIN_SECTION_ID, MAX_DOCUMENT_ID);
        assert!(smallest_hit.is_valid());
        assert!(smallest_hit.value() >= BasicHit::INVALID_VALUE);
    }

    #[test]
    fn test_comparison() {
        let hit = BasicHit::new(1, 243);
        let higher_document_id_hit = BasicHit::new(1, 2409);
        let higher_section_id_hit = BasicHit::new(15, 243);

        let mut hits = vec![hit, higher_document_id_hit, higher_section_id_hit];
        hits.sort();
        assert_eq!(hits, vec![higher_document_id_hit, hit, higher_section_id_hit]);
    }

    #[test]
    fn test_section_dominates_document() {
        let low_section = BasicHit::new(2, MIN_DOCUMENT_ID);
        let high_section = BasicHit::new(3, MAX_DOCUMENT_ID);
        assert!(low_section < high_section);
    }
}
