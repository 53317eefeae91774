//! Mealdrop server library.
//!
//! Exposes the server internals as a library so handlers, repositories, and
//! services can be unit tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
