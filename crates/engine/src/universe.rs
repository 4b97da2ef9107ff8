use std::collections::BTreeSet;

use crate::model::KeyedCollection;

/// Union of every source's keys, deduplicated and sorted by byte order.
/// This order is the output row order.
pub fn build_key_universe(collections: &[KeyedCollection]) -> Vec<Vec<u8>> {
    let keys: BTreeSet<&[u8]> = collections.iter().flat_map(|c| c.keys()).collect();
    keys.into_iter().map(<[u8]>::to_vec).collect()
}
