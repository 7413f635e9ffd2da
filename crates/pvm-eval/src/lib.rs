//! PVM small-step reducer.
//!
//! Rewrites a [`pvm_types::Node`] one primitive step at a time under an
//! immutable [`pvm_types::Environment`] until it reaches normal form (a
//! literal or `do-nothing`). [`reduce`] performs a single step;
//! [`Machine`] drives a whole run and reports each state to an
//! [`Observer`].

pub mod config;
pub mod error;
pub mod machine;
pub mod observer;
pub mod reduce;

pub use config::{DivisionMode, MachineConfig, DEFAULT_STEP_LIMIT};
pub use error::{ArithmeticError, EvalError, EvalResult};
pub use machine::{Machine, Outcome, State};
pub use observer::{LogObserver, Observer, PrintObserver, Snapshot, TraceRecorder};
pub use reduce::{apply_binary, apply_unary, reduce};
