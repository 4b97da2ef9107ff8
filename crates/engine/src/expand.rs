//! Cross-product of the records that share one join key.
//!
//! Sources are walked in order with the first source outermost, so later
//! sources vary fastest. A source holding no record for the key adds nothing
//! to the combination but the walk still continues past it, which keeps the
//! key's row in the output with that source's columns unfilled.

use std::convert::Infallible;

use crate::model::{KeyedCollection, Record};

/// Call `visit` once for every combination of records sharing `key`.
///
/// Stops at the first error returned by `visit`.
pub fn for_each_combination<'a, E, F>(
    key: &[u8],
    collections: &'a [KeyedCollection],
    mut visit: F,
) -> Result<(), E>
where
    F: FnMut(&[&'a Record]) -> Result<(), E>,
{
    recurse(key, Vec::new(), collections, &mut visit)
}

fn recurse<'a, E, F>(
    key: &[u8],
    acc: Vec<&'a Record>,
    remain: &'a [KeyedCollection],
    visit: &mut F,
) -> Result<(), E>
where
    F: FnMut(&[&'a Record]) -> Result<(), E>,
{
    let Some((this, rest)) = remain.split_first() else {
        return visit(&acc);
    };

    let records = this.records_for(key);
    if records.is_empty() {
        return recurse(key, acc, rest, visit);
    }

    for rec in records {
        // Each branch owns its prefix; siblings never see each other's picks.
        let mut branch = Vec::with_capacity(acc.len() + 1);
        branch.extend_from_slice(&acc);
        branch.push(rec);
        recurse(key, branch, rest, visit)?;
    }

    Ok(())
}

/// Every combination for `key`, collected.
pub fn expand<'a>(key: &[u8], collections: &'a [KeyedCollection]) -> Vec<Vec<&'a Record>> {
    let mut out = Vec::new();
    let result = for_each_combination::<Infallible, _>(key, collections, |combo| {
        out.push(combo.to_vec());
        Ok(())
    });
    match result {
        Ok(()) => out,
        Err(never) => match never {},
    }
}

/// Number of rows `key` expands to: the product of each source's record
/// count, with an absent source counting as one.
pub fn combination_count(key: &[u8], collections: &[KeyedCollection]) -> usize {
    collections
        .iter()
        .map(|c| c.records_for(key).len().max(1))
        .product()
}
