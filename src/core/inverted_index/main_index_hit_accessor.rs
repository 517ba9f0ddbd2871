use log::{error, trace};

use crate::core::hit::Hit;
use crate::core::inverted_index::{ChainHandle, MainIndex};
use crate::core::posting_list::{PostingListError, PostingListHitAccessor};

/// Walks one posting list chain of a [`MainIndex`], a block per page.
pub struct MainIndexHitAccessor<'a> {
    main_index: &'a MainIndex,
    handle: ChainHandle,
    next_block_index: usize,
}

impl<'a> MainIndexHitAccessor<'a> {
    pub(crate) fn new(main_index: &'a MainIndex, handle: ChainHandle) -> Self {
        Self { main_index, handle, next_block_index: 0 }
    }

    pub fn handle(&self) -> ChainHandle {
        self.handle
    }

    fn validate_block(&self, block_index: usize, hits: &[Hit]) -> Result<(), PostingListError> {
        if let Some(hit) = hits.iter().find(|hit| !hit.is_valid()) {
            error!(
                "[validate_block] chain {} block {} holds an invalid hit {:?}",
                self.handle.index, block_index, hit
            );
            return Err(PostingListError::CorruptedHit {
                chain_index: self.handle.index,
                block_index,
                value: hit.value(),
            });
        }
        if let Some(pair) = hits.windows(2).find(|pair| pair[0] > pair[1]) {
            error!(
                "[validate_block] chain {} block {} isn't sorted, {:?} before {:?}",
                self.handle.index, block_index, pair[0], pair[1]
            );
            return Err(PostingListError::OutOfOrder {
                chain_index: self.handle.index,
                block_index,
                reason: format!("hit value {} sorted before {}", pair[0].value(), pair[1].value()),
            });
        }
        Ok(())
    }
}

impl<'a> PostingListHitAccessor for MainIndexHitAccessor<'a> {
    fn next_page(&mut self) -> Result<Option<Vec<Hit>>, PostingListError> {
        let chain = self.main_index.chain(self.handle)?;
        let Some(block) = chain.get(self.next_block_index) else {
            return Ok(None);
        };
        self.validate_block(self.next_block_index, block.hits())?;
        trace!(
            "[next_page] chain {} block {}, {} hits in {} bytes",
            self.handle.index,
            self.next_block_index,
            block.len(),
            block.posting_list_bytes()
        );
        self.next_block_index += 1;
        Ok(Some(block.hits().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::types::DEFAULT_TERM_FREQUENCY;
    use crate::core::inverted_index::{MainIndexBuilder, MainIndexConfig};

    fn cat_index() -> MainIndex {
        let mut builder = MainIndexBuilder::new();
        for document_id in [1, 4, 9] {
            builder.add_hit("cat", Hit::exact(0, document_id, DEFAULT_TERM_FREQUENCY)).unwrap();
        }
        builder.build(MainIndexConfig::default()).unwrap()
    }

    #[test]
    fn test_next_page_until_exhausted() {
        let index = cat_index();
        let mut accessor = index.accessor_for_handle(index.handle("cat").unwrap()).unwrap();
        let page = accessor.next_page().unwrap().unwrap();
        assert_eq!(page.iter().map(Hit::document_id).collect::<Vec<_>>(), vec![9, 4, 1]);
        assert!(accessor.next_page().unwrap().is_none());
        assert!(accessor.next_page().unwrap().is_none());
    }

    #[test]
    fn test_unsorted_block_is_reported() {
        crate::init_test_logger();
        let mut index = cat_index();
        let handle = index.handle("cat").unwrap();
        index.chains_mut()[handle.index as usize][0].hits.reverse();

        let mut accessor = index.accessor_for_handle(handle).unwrap();
        assert!(matches!(accessor.next_page(), Err(PostingListError::OutOfOrder { chain_index: 0, .. })));
    }
}
