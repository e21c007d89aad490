//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC string storage)
//! - Password policy validation with Unicode NFKC normalization

pub mod password;
