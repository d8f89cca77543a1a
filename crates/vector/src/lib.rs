//! funcsearch vector collection
//!
//! 임베딩 벡터 저장 및 전수(brute-force) 유사도 검색

pub mod collection;
pub mod ingest;
pub mod math;
pub mod store;
pub mod types;

pub use collection::VectorCollection;
pub use ingest::{embed_rows, load_pairs_from_csv, parse_csv_rows, CsvRow};
pub use math::{Metric, DEFAULT_DIMENSION};
pub use store::{load_collection, save_collection, LoadedCollection};
pub use types::{FunctionCodePair, HasEmbedding, SearchResult};
