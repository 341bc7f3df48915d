//! ctxprogress - progress aggregation across concurrent workers
//!
//! An owner creates a tracking [`Scope`] and gets a [`Receiver`] back. Any
//! code holding the scope (or running under it, see [`ambient`]) obtains a
//! [`Reporter`] and publishes its own `(current, total)` pair. The receiver
//! sums the latest pair of every reporter on demand.
//!
//! # Architecture
//!
//! ```text
//! owner ── with_progress_receiver ──> (Scope, Receiver)
//!                                        │        │
//!            worker ── start_reporting ──┘        │ receive()
//!              │                                  │
//!              └── report(cur, total) ──> Registry ──> Σ cur, Σ total
//! ```
//!
//! Reporters from a scope without a registry are no-ops, so library code can
//! report unconditionally.
//!
//! # Example
//!
//! ```
//! use ctxprogress::Scope;
//!
//! let (scope, receiver) = Scope::background().with_progress_receiver();
//!
//! let first = scope.start_reporting();
//! first.report(10, 100);
//! scope.start_reporting().report(1, 10);
//!
//! assert_eq!(receiver.receive(), (11, 110));
//! ```

pub mod ambient;
pub mod config;
mod receiver;
mod registry;
mod reporter;
mod scope;

pub use ambient::start_reporting;
pub use config::{Config, IdentityScheme};
pub use receiver::{Progress, Receiver};
pub use registry::{Registry, Report, ReporterId};
pub use reporter::Reporter;
pub use scope::Scope;
