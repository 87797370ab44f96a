//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and higher layers (the studio, tools). It avoids leaking runtime internals
//! into user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{AppCtx, WindowCtx};
