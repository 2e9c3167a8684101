// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports between the domain and its adapters.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure (`media`) implements application layer ports
//! - Presentation (`ui`) uses application layer services

pub mod port;
