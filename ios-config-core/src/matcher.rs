use std::net::Ipv4Addr;

use crate::address::{address_equals, prefix_contains};
use crate::model::{ConfigDocument, MatchRecord};

/// Every address entry of `document` whose prefix contains `target`, in
/// file order. An empty vector means nothing matched.
pub fn match_document(document: &ConfigDocument, target: Ipv4Addr) -> Vec<MatchRecord> {
    document
        .interfaces
        .iter()
        .flat_map(|block| {
            block
                .addresses
                .iter()
                .filter(move |entry| prefix_contains(&entry.prefix, target))
                .map(move |entry| {
                    let exact = address_equals(entry.host(), target);
                    MatchRecord::new(&document.hostname, block, entry, exact)
                })
        })
        .collect()
}
