mod hit_accessor;

pub use hit_accessor::PostingListHitAccessor;
