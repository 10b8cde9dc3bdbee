//! Infrastructure layer - password encoders, repositories, storage, logging

pub mod logging;
pub mod password;
pub mod storage;
pub mod user;
