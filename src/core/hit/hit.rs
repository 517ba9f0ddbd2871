use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::common::types::{
    is_document_id_valid, is_section_id_valid, DocumentId, SectionId, TermFrequency, DEFAULT_TERM_FREQUENCY,
    DOCUMENT_ID_BITS, SECTION_ID_BITS,
};
use crate::core::hit::basic_hit::{invert_document_id, restore_document_id};

pub type HitValue = u64;

// Flag bits, lowest priority first.
const IN_PREFIX_SECTION_BIT: u32 = 0;
const PREFIX_HIT_BIT: u32 = 1;
const HAS_TERM_FREQUENCY_BIT: u32 = 2;
const NUM_FLAGS: u32 = 3;

const DOCUMENT_FIELD_OFFSET: u32 = NUM_FLAGS;
const DOCUMENT_FIELD_MASK: HitValue = (1 << DOCUMENT_ID_BITS) - 1;
const SECTION_FIELD_OFFSET: u32 = DOCUMENT_FIELD_OFFSET + DOCUMENT_ID_BITS;
const SECTION_FIELD_MASK: HitValue = (1 << SECTION_ID_BITS) - 1;
const USED_BITS: u32 = SECTION_FIELD_OFFSET + SECTION_ID_BITS;

/// One posting: a term occurred in `section_id` of `document_id`.
///
/// The value packs, most significant first:
/// - 33 unused bits, always zero.
/// - `section_id` (6 bits).
/// - inverted `document_id` (22 bits), so larger document ids sort first.
/// - `has_term_frequency`, `is_prefix_hit`, `is_in_prefix_section` (1 bit each).
///
/// The term frequency itself travels next to the value. Only whether it is present is part of
/// the ordering, so [`Ord`] and [`Eq`] look at [`Hit::value`] alone.
#[derive(Clone, Copy)]
pub struct Hit {
    value: HitValue,
    term_frequency: TermFrequency,
}

impl Hit {
    pub const INVALID_VALUE: HitValue = HitValue::MAX;

    /// Probe used for lower bound searches: no valid hit sorts before it.
    pub const MAX_DOCUMENT_ID_SORT_VALUE: HitValue = 0;

    /// Out of range ids produce [`Hit::INVALID_VALUE`], check [`Hit::is_valid`] before use.
    pub fn new(
        section_id: SectionId,
        document_id: DocumentId,
        term_frequency: TermFrequency,
        is_in_prefix_section: bool,
        is_prefix_hit: bool,
    ) -> Self {
        if !is_section_id_valid(section_id) || !is_document_id_valid(document_id) {
            return Self::default();
        }
        let has_term_frequency = term_frequency != DEFAULT_TERM_FREQUENCY;
        let value = ((section_id as HitValue) << SECTION_FIELD_OFFSET)
            | ((invert_document_id(document_id) as HitValue) << DOCUMENT_FIELD_OFFSET)
            | ((has_term_frequency as HitValue) << HAS_TERM_FREQUENCY_BIT)
            | ((is_prefix_hit as HitValue) << PREFIX_HIT_BIT)
            | ((is_in_prefix_section as HitValue) << IN_PREFIX_SECTION_BIT);
        Self { value, term_frequency }
    }

    /// A hit in an ordinary section that is not a prefix hit.
    pub fn exact(section_id: SectionId, document_id: DocumentId, term_frequency: TermFrequency) -> Self {
        Self::new(section_id, document_id, term_frequency, false, false)
    }

    pub fn from_value(value: HitValue) -> Self {
        Self { value, term_frequency: DEFAULT_TERM_FREQUENCY }
    }

    pub fn from_value_and_term_frequency(value: HitValue, term_frequency: TermFrequency) -> Self {
        Self { value, term_frequency }
    }

    pub fn value(&self) -> HitValue {
        self.value
    }

    pub fn document_id(&self) -> DocumentId {
        restore_document_id(((self.value >> DOCUMENT_FIELD_OFFSET) & DOCUMENT_FIELD_MASK) as u32)
    }

    pub fn section_id(&self) -> SectionId {
        ((self.value >> SECTION_FIELD_OFFSET) & SECTION_FIELD_MASK) as SectionId
    }

    pub fn term_frequency(&self) -> TermFrequency {
        self.term_frequency
    }

    pub fn has_term_frequency(&self) -> bool {
        self.flag(HAS_TERM_FREQUENCY_BIT)
    }

    pub fn is_prefix_hit(&self) -> bool {
        self.flag(PREFIX_HIT_BIT)
    }

    pub fn is_in_prefix_section(&self) -> bool {
        self.flag(IN_PREFIX_SECTION_BIT)
    }

    pub fn is_valid(&self) -> bool {
        self.value != Self::INVALID_VALUE
            && self.value >> USED_BITS == 0
            && (self.value >> DOCUMENT_FIELD_OFFSET) & DOCUMENT_FIELD_MASK != 0
    }

    /// Same document and section, flags and term frequency ignored.
    pub fn equals_document_id_and_section_id(&self, other: &Hit) -> bool {
        (self.value >> DOCUMENT_FIELD_OFFSET) == (other.value >> DOCUMENT_FIELD_OFFSET)
    }

    /// Copy of this hit recorded on behalf of a longer term sharing this prefix.
    pub fn to_prefix_hit(&self) -> Hit {
        Hit {
            value: self.value | (1 << PREFIX_HIT_BIT),
            term_frequency: self.term_frequency,
        }
    }

    /// Copy with another term frequency, `has_term_frequency` follows the new value.
    pub fn with_term_frequency(&self, term_frequency: TermFrequency) -> Hit {
        let has_term_frequency = (term_frequency != DEFAULT_TERM_FREQUENCY) as HitValue;
        let value = (self.value & !(1 << HAS_TERM_FREQUENCY_BIT)) | (has_term_frequency << HAS_TERM_FREQUENCY_BIT);
        Hit { value, term_frequency }
    }

    #[inline]
    fn flag(&self, bit: u32) -> bool {
        (self.value >> bit) & 1 == 1
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self { value: Self::INVALID_VALUE, term_frequency: DEFAULT_TERM_FREQUENCY }
    }
}

impl PartialEq for Hit {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Hit {}

impl Ord for Hit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Hit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Hit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Hit(invalid:{:#x})", self.value);
        }
        write!(
            f,
            "Hit(section:{}, doc:{}, tf:{}, prefix_section:{}, prefix_hit:{})",
            self.section_id(),
            self.document_id(),
            self.term_frequency,
            self.is_in_prefix_section(),
            self.is_prefix_hit()
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::core::common::types::{
        INVALID_DOCUMENT_ID, MAX_DOCUMENT_ID, MAX_SECTION_ID, MIN_DOCUMENT_ID, MIN_SECTION_ID,
    };

    const SOME_DOCUMENT_ID: DocumentId = 24;
    const SOME_SECTION_ID: SectionId = 5;
    const SOME_TERM_FREQUENCY: TermFrequency = 57;

    #[test]
    fn test_has_term_frequency_flag() {
        let h1 = Hit::exact(SOME_SECTION_ID, SOME_DOCUMENT_ID, DEFAULT_TERM_FREQUENCY);
        assert!(!h1.has_term_frequency());
        assert_eq!(h1.term_frequency(), DEFAULT_TERM_FREQUENCY);

        let h2 = Hit::exact(SOME_SECTION_ID, SOME_DOCUMENT_ID, SOME_TERM_FREQUENCY);
        assert!(h2.has_term_frequency());
        assert_eq!(h2.term_frequency(), SOME_TERM_FREQUENCY);
    }

    #[test]
    fn test_prefix_flags() {
        let h1 = Hit::exact(SOME_SECTION_ID, SOME_DOCUMENT_ID, DEFAULT_TERM_FREQUENCY);
        assert!(!h1.is_prefix_hit());
        assert!(!h1.is_in_prefix_section());

        let h2 = Hit::new(SOME_SECTION_ID, SOME_DOCUMENT_ID, DEFAULT_TERM_FREQUENCY, false, true);
        assert!(h2.is_prefix_hit());
        assert!(!h2.is_in_prefix_section());

        let h3 = Hit::new(SOME_SECTION_ID, SOME_DOCUMENT_ID, DEFAULT_TERM_FREQUENCY, true, false);
        assert!(!h3.is_prefix_hit());
        assert!(h3.is_in_prefix_section());

        let h4 = h3.to_prefix_hit();
        assert!(h4.is_prefix_hit());
        assert!(h4.is_in_prefix_section());
        assert!(h4.equals_document_id_and_section_id(&h3));
    }

    #[test]
    fn test_accessors() {
        let hit = Hit::new(SOME_SECTION_ID, SOME_DOCUMENT_ID, SOME_TERM_FREQUENCY, true, true);
        assert_eq!(hit.document_id(), SOME_DOCUMENT_ID);
        assert_eq!(hit.section_id(), SOME_SECTION_ID);
        assert_eq!(hit.term_frequency(), SOME_TERM_FREQUENCY);
    }

    #[test]
    fn test_valid() {
        assert!(!Hit::default().is_valid());
        assert!(!Hit::from_value(Hit::INVALID_VALUE).is_valid());
        assert!(Hit::from_value(65372).is_valid());

        assert!(Hit::exact(SOME_SECTION_ID, MAX_DOCUMENT_ID, SOME_TERM_FREQUENCY).is_valid());
        assert!(Hit::exact(MAX_SECTION_ID, SOME_DOCUMENT_ID, SOME_TERM_FREQUENCY).is_valid());
        assert!(Hit::exact(SOME_SECTION_ID, MIN_DOCUMENT_ID, SOME_TERM_FREQUENCY).is_valid());
        assert!(Hit::exact(MIN_SECTION_ID, SOME_DOCUMENT_ID, SOME_TERM_FREQUENCY).is_valid());

        // The smallest valid hit has no flags and the largest document id.
        let smallest_hit = Hit::exact(MIN_SECTION_ID, MAX_DOCUMENT_ID, DEFAULT_TERM_FREQUENCY);
        assert!(smallest_hit.is_valid());
        assert!(!smallest_hit.has_term_frequency());
        assert!(!smallest_hit.is_prefix_hit());
        assert!(!smallest_hit.is_in_prefix_section());
        assert!(smallest_hit.value() >= Hit::MAX_DOCUMENT_ID_SORT_VALUE);
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        assert!(!Hit::exact(MAX_SECTION_ID + 1, SOME_DOCUMENT_ID, SOME_TERM_FREQUENCY).is_valid());
        assert!(!Hit::exact(SOME_SECTION_ID, INVALID_DOCUMENT_ID, SOME_TERM_FREQUENCY).is_valid());
        assert!(!Hit::exact(SOME_SECTION_ID, DocumentId::MAX, SOME_TERM_FREQUENCY).is_valid());
        // A value with a zero document field is not the all-ones pattern but still invalid.
        assert!(!Hit::from_value(Hit::MAX_DOCUMENT_ID_SORT_VALUE).is_valid());
        assert!(!Hit::from_value(1 << 40).is_valid());
    }

    #[test]
    fn test_comparison() {
        let hit = Hit::exact(1, 243, DEFAULT_TERM_FREQUENCY);
        let higher_document_id_hit = Hit::exact(1, 2409, DEFAULT_TERM_FREQUENCY);
        let higher_section_id_hit = Hit::exact(15, 243, DEFAULT_TERM_FREQUENCY);
        let term_frequency_hit = Hit::exact(1, 243, 12);
        let prefix_hit = Hit::new(1, 243, DEFAULT_TERM_FREQUENCY, false, true);
        let hit_in_prefix_section = Hit::new(1, 243, DEFAULT_TERM_FREQUENCY, true, false);

        let mut hits = vec![
            hit,
            higher_document_id_hit,
            higher_section_id_hit,
            term_frequency_hit,
            prefix_hit,
            hit_in_prefix_section,
        ];
        hits.sort();
        let expected = vec![
            higher_document_id_hit,
            hit,
            hit_in_prefix_section,
            prefix_hit,
            term_frequency_hit,
            higher_section_id_hit,
        ];
        assert_eq!(hits.iter().map(Hit::value).collect::<Vec<_>>(), expected.iter().map(Hit::value).collect::<Vec<_>>());

        // The term frequency value is not considered when comparing hits.
        let higher_term_frequency_hit = Hit::exact(1, 243, 108);
        assert!(!(term_frequency_hit < higher_term_frequency_hit));
        assert!(!(higher_term_frequency_hit < term_frequency_hit));
    }

    #[test]
    fn test_with_term_frequency() {
        let hit = Hit::exact(3, 7, DEFAULT_TERM_FREQUENCY);
        let updated = hit.with_term_frequency(9);
        assert!(updated.has_term_frequency());
        assert_eq!(updated.term_frequency(), 9);
        assert_eq!(updated.document_id(), 7);
        let reset = updated.with_term_frequency(DEFAULT_TERM_FREQUENCY);
        assert_eq!(reset.value(), hit.value());
    }

    fn flags() -> impl Strategy<Value = (TermFrequency, bool, bool)> {
        (any::<TermFrequency>(), any::<bool>(), any::<bool>())
    }

    proptest! {
        #[test]
        fn prop_encode_decode(section_id in 0..=MAX_SECTION_ID, document_id in 0..=MAX_DOCUMENT_ID, (tf, in_prefix, prefix_hit) in flags()) {
            let hit = Hit::new(section_id, document_id, tf, in_prefix, prefix_hit);
            prop_assert!(hit.is_valid());
            prop_assert_eq!(hit.section_id(), section_id);
            prop_assert_eq!(hit.document_id(), document_id);
            prop_assert_eq!(hit.term_frequency(), tf);
            prop_assert_eq!(hit.is_in_prefix_section(), in_prefix);
            prop_assert_eq!(hit.is_prefix_hit(), prefix_hit);
        }

        #[test]
        fn prop_section_dominates(
            a_section in 0..MAX_SECTION_ID,
            a_document in 0..=MAX_DOCUMENT_ID,
            b_document in 0..=MAX_DOCUMENT_ID,
            a_flags in flags(),
            b_flags in flags(),
            section_delta in 1..=MAX_SECTION_ID,
        ) {
            let b_section = a_section.saturating_add(section_delta).min(MAX_SECTION_ID);
            prop_assume!(b_section > a_section);
            let a = Hit::new(a_section, a_document, a_flags.0, a_flags.1, a_flags.2);
            let b = Hit::new(b_section, b_document, b_flags.0, b_flags.1, b_flags.2);
            prop_assert!(a < b);
        }

        #[test]
        fn prop_larger_document_sorts_first(
            section_id in 0..=MAX_SECTION_ID,
            a_document in 0..=MAX_DOCUMENT_ID,
            b_document in 0..=MAX_DOCUMENT_ID,
            (tf, in_prefix, prefix_hit) in flags(),
        ) {
            prop_assume!(a_document > b_document);
            let a = Hit::new(section_id, a_document, tf, in_prefix, prefix_hit);
            let b = Hit::new(section_id, b_document, tf, in_prefix, prefix_hit);
            prop_assert!(a < b);
        }
    }
}
