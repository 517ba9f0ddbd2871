use crate::core::inverted_index::InvertedIndexError;
use crate::core::posting_list::PostingListHitAccessor;

/// Accessor over the chain a prefix query resolved to.
pub struct PrefixAccessor<A> {
    pub accessor: A,
    /// The chain belongs to the queried term itself rather than to a longer term extending it.
    pub exact: bool,
}

/// Resolves terms to posting list chains.
pub trait MainIndexAccess {
    // 关联类型 Accessor 会持有对 index 的引用
    type Accessor<'a>: PostingListHitAccessor
    where
        Self: 'a;

    /// Accessor over the chain of `term`, `None` if the term isn't indexed.
    fn accessor_for_exact_term(&self, term: &str) -> Result<Option<Self::Accessor<'_>>, InvertedIndexError>;

    /// Accessor over the chain holding every hit of the terms starting with `prefix`, `None` if no
    /// indexed term starts with it.
    fn accessor_for_prefix_term(
        &self,
        prefix: &str,
    ) -> Result<Option<PrefixAccessor<Self::Accessor<'_>>>, InvertedIndexError>;
}
