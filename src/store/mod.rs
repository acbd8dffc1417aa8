//! Record-store adapters.
//!
//! The durable store is an external concern; the ledger only speaks
//! [`PositionRepositoryTrait`](crate::ledger::PositionRepositoryTrait).
//! This module ships the in-process adapter used as the default backend and
//! by the service tests.

mod memory;

pub use memory::MemoryStore;
