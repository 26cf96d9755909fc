pub mod bucketizer;
pub mod cache;
pub mod error;
pub mod fetcher;
pub mod ranker;
