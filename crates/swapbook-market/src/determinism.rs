//! Book digests for replay verification.
//!
//! Two engines fed the same call sequence must end with identical books.
//! The digest covers the pair, both sides in rank order, and the remaining
//! amounts of every listed swap, so comparing 32 bytes is enough.

use sha2::{Digest, Sha256};
use swapbook_ledger::KvStore;
use swapbook_types::Result;

use crate::book::{BookSide, MarketBook};
use crate::quote::Quote;

/// SHA-256 over the ordered contents of a book.
pub fn compute_book_digest<K: KvStore + ?Sized>(kv: &K, book: &MarketBook) -> Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update(b"swapbook:book_digest:v1:");
    hasher.update(book.pair().name().as_bytes());

    for side in [BookSide::Buyers, BookSide::Sellers] {
        hasher.update(side.to_string().as_bytes());
        hasher.update(book.depth(kv, side)?.to_le_bytes());
        let mut cursor = None;
        loop {
            let page = book.walk(kv, side, cursor, 64)?;
            let Some(last) = page.last().copied() else {
                break;
            };
            for id in page {
                let quote = Quote::load(kv, id)?;
                hasher.update(id.0.to_le_bytes());
                hasher.update(quote.maker_amount.to_le_bytes());
                hasher.update(quote.taker_amount.to_le_bytes());
            }
            cursor = Some(last);
        }
    }

    Ok(hasher.finalize().into())
}

/// Recompute and compare against `expected`.
pub fn verify_book_digest<K: KvStore + ?Sized>(
    kv: &K,
    book: &MarketBook,
    expected: &[u8; 32],
) -> Result<bool> {
    Ok(compute_book_digest(kv, book)? == *expected)
}
