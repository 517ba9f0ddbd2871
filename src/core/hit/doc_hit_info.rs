use std::cmp::Ordering;

use crate::core::common::types::{
    section_id_to_mask, DocumentId, SectionId, SectionIdMask, INVALID_DOCUMENT_ID, SECTION_ID_MASK_NONE,
};

/// All the sections of one document a term was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocHitInfo {
    document_id: DocumentId,
    hit_section_ids_mask: SectionIdMask,
}

impl DocHitInfo {
    pub fn new(document_id: DocumentId) -> Self {
        Self { document_id, hit_section_ids_mask: SECTION_ID_MASK_NONE }
    }

    pub fn with_mask(document_id: DocumentId, hit_section_ids_mask: SectionIdMask) -> Self {
        Self { document_id, hit_section_ids_mask }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn hit_section_ids_mask(&self) -> SectionIdMask {
        self.hit_section_ids_mask
    }

    pub fn update_section(&mut self, section_id: SectionId) {
        self.hit_section_ids_mask |= section_id_to_mask(section_id);
    }

    pub fn merge_sections_from(&mut self, other_mask: SectionIdMask) {
        self.hit_section_ids_mask |= other_mask;
    }
}

impl Default for DocHitInfo {
    fn default() -> Self {
        Self::new(INVALID_DOCUMENT_ID)
    }
}

/// Document ids descending, mirroring how the underlying hits sort, then section mask ascending.
impl Ord for DocHitInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .document_id
            .cmp(&self.document_id)
            .then_with(|| self.hit_section_ids_mask.cmp(&other.hit_section_ids_mask))
    }
}

impl PartialOrd for DocHitInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
