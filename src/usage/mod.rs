//! Usage analytics: event catalog, tracked-method registry, record envelope,
//! emission sinks, and the dispatch handler that ties them together.
//!
//! The contract, in one place: a public context method with a registry entry
//! emits a context-initialized record before its first tracked call and a
//! completion record per call; a method without an entry emits nothing; and
//! no emission outcome ever changes what the method returns.

pub mod batching;
pub mod events;
pub mod handler;
pub mod http;
pub mod message;
pub mod registry;
pub mod sink;

pub use batching::BatchingSink;
pub use events::UsageEvent;
pub use handler::{HandlerStats, UsageStatsHandler};
pub use http::HttpSink;
pub use message::{UsageMessage, MESSAGE_SCHEMA_VERSION};
pub use sink::{MemorySink, TracingSink, UsageSink};
