#![allow(dead_code)]
pub mod http;
pub mod test_db;

pub use http::*;
pub use test_db::*;
