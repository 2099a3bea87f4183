//! Infrastructure: storage and outbound metadata clients

pub mod metadata;
pub mod storage;
