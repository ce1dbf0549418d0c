// Jobs: JSearch API client and payload normalization.

pub mod handlers;
pub mod jsearch;
pub mod normalizer;
