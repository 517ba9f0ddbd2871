use log::error;

/// Bytes of one data unit in a hit posting list: the encoded [`crate::core::HitValue`].
pub const HIT_DATA_TYPE_BYTES: u32 = std::mem::size_of::<crate::core::HitValue>() as u32;

/// Data units at the head of every posting list reserved for its header.
pub const POSTING_LIST_SPECIAL_DATA: u32 = 2;

/// A hit posting list must hold its header and at least one hit.
pub const MIN_POSTING_LIST_BYTES: u32 = (POSTING_LIST_SPECIAL_DATA + 1) * HIT_DATA_TYPE_BYTES;

/// For a posting list size to be valid, it must:
/// 1. be `data_type_bytes` aligned.
/// 2. be equal to or larger than `min_posting_list_size`.
/// 3. be small enough that its count of data units fits in a single data unit, so the posting list
///    can describe its own size in its header.
pub fn is_valid_posting_list_size(size_in_bytes: u32, data_type_bytes: u32, min_posting_list_size: u32) -> bool {
    if data_type_bytes == 0 || size_in_bytes % data_type_bytes != 0 {
        error!("[is_valid_posting_list_size] size {} is not aligned to data type bytes {}", size_in_bytes, data_type_bytes);
        return false;
    }

    if size_in_bytes < min_posting_list_size {
        error!("[is_valid_posting_list_size] size {} is less than min size {}", size_in_bytes, min_posting_list_size);
        return false;
    }

    let num_data = (size_in_bytes / data_type_bytes) as u64;
    if num_data > max_encodable_in_bytes(data_type_bytes) {
        error!(
            "[is_valid_posting_list_size] size {} holds {} data units, which can't be encoded in {} bytes",
            size_in_bytes, num_data, data_type_bytes
        );
        return false;
    }

    true
}

/// Number of hits a posting list of `size_in_bytes` can hold.
pub fn hit_capacity(size_in_bytes: u32) -> usize {
    (size_in_bytes / HIT_DATA_TYPE_BYTES).saturating_sub(POSTING_LIST_SPECIAL_DATA) as usize
}

/// Bytes needed to hold `num_hits` hits.
pub fn bytes_for_hits(num_hits: usize) -> u64 {
    (num_hits as u64 + POSTING_LIST_SPECIAL_DATA as u64) * HIT_DATA_TYPE_BYTES as u64
}

fn max_encodable_in_bytes(data_type_bytes: u32) -> u64 {
    if data_type_bytes >= 8 {
        u64::MAX
    } else {
        (1u64 << (8 * data_type_bytes)) - 1
    }
}
