//! Fetch-aggregate-sort pipeline: bundled page fan-out, partial-failure
//! folding, and client-side ordering.
//!
//! The first page is fetched on its own to learn the total result count.
//! Remaining pages are partitioned into bundles of at most
//! `max_concurrency` pages; bundles run one after another while the pages
//! inside a bundle are fetched concurrently. Failed pages are logged and
//! dropped, then the merged collection is optionally sorted.

pub mod aggregate;
pub mod schedule;
pub mod search;
pub mod sort;
