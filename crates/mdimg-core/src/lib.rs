pub mod config;
pub mod logging;

pub mod analyzer;
pub mod executor;
pub mod fetch;
pub mod markdown;
pub mod naming;
pub mod plan;
pub mod record;
pub mod report;
pub mod sniff;
pub mod storage;
pub mod store;
pub mod url_model;
