//! # Shared Bus - Event Bus for Pool Components
//!
//! Components announce completed state changes here instead of calling
//! each other's observers directly.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Gateway /  │                    │  Telemetry / │
//! │   Pension    │    publish()       │   Indexers   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Delivery Rules
//!
//! - Events are published after the ledger commits; a failed operation
//!   publishes nothing.
//! - Publishing is synchronous and never blocks the ledger.
//! - Slow subscribers lag and skip events rather than applying backpressure.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, PoolEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
