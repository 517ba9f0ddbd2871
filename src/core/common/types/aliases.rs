pub type DocumentId = u32;
pub type SectionId = u8;
pub type SectionIdMask = u64;
pub type TermFrequency = u8;

/// Per-section term frequencies of one document, indexed by [`SectionId`].
pub type TermFrequencyArray = [TermFrequency; TOTAL_NUM_SECTIONS];

// Document ids
pub const DOCUMENT_ID_BITS: u32 = 22;
pub const INVALID_DOCUMENT_ID: DocumentId = (1 << DOCUMENT_ID_BITS) - 1;
pub const MAX_DOCUMENT_ID: DocumentId = INVALID_DOCUMENT_ID - 1;
pub const MIN_DOCUMENT_ID: DocumentId = 0;

// Section ids
pub const SECTION_ID_BITS: u32 = 6;
pub const TOTAL_NUM_SECTIONS: usize = 1 << SECTION_ID_BITS;
pub const MAX_SECTION_ID: SectionId = (TOTAL_NUM_SECTIONS - 1) as SectionId;
pub const MIN_SECTION_ID: SectionId = 0;

pub const SECTION_ID_MASK_ALL: SectionIdMask = !0;
pub const SECTION_ID_MASK_NONE: SectionIdMask = 0;

// Term frequencies
pub const NO_TERM_FREQUENCY: TermFrequency = 0;
pub const DEFAULT_TERM_FREQUENCY: TermFrequency = 1;
pub const MAX_TERM_FREQUENCY: TermFrequency = TermFrequency::MAX;

#[inline]
pub fn is_document_id_valid(document_id: DocumentId) -> bool {
    document_id <= MAX_DOCUMENT_ID
}

#[inline]
pub fn is_section_id_valid(section_id: SectionId) -> bool {
    section_id <= MAX_SECTION_ID
}

/// Single-bit mask for `section_id`, `section_id` must be valid.
#[inline]
pub fn section_id_to_mask(section_id: SectionId) -> SectionIdMask {
    1u64 << section_id
}

/// Iterate section ids set in `mask`, lowest first.
pub fn section_ids_in_mask(mask: SectionIdMask) -> impl Iterator<Item = SectionId> {
    let mut remains = mask;
    std::iter::from_fn(move || {
        if remains == 0 {
            return None;
        }
        let section_id = remains.trailing_zeros() as SectionId;
        remains &= remains - 1;
        Some(section_id)
    })
}
