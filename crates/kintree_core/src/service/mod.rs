//! Use-case services over the member store.
//!
//! # Responsibility
//! - Orchestrate store writes into the admin flows (add, edit, photo
//!   attach, cascading delete, export).
//! - Keep callers decoupled from store backends.

pub mod member_service;
