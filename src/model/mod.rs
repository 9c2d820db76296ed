// File: ./src/model/mod.rs
pub mod bucket;
pub mod classifier;
pub mod date;
pub mod event;
pub mod icons;
pub mod teams;

pub use bucket::{DayBucket, DayBucketer, MAX_WINDOW_DAYS};
pub use classifier::{classify, classify_all};
pub use date::{DateFormats, DateStyle, DayKey, Normalized, normalize};
pub use event::{EnrichedEvent, PlacementZone, RawEvent, SourceConfig, Timestamp};
pub use icons::KeywordIconMatcher;
pub use teams::TeamDirectory;
