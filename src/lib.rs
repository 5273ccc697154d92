// src/lib.rs

//! Hacker Stories client library

pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod stories;
pub mod utils;
