#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

//! Wire models and client configuration shared by the Ibnelve browser client.

pub mod config;
pub mod models;
