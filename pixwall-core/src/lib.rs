#![allow(clippy::new_without_default)]

pub mod bookmark;
pub mod config;
pub mod download;
pub mod error;
pub mod item;
pub mod promise;
pub mod query;
pub mod state;
pub mod storage;
pub mod util;
pub mod webapi;
