//! emitkit: synchronous, in-process named-event emitter
//!
//! Callers register listeners under event names and later invoke them with a
//! dispatch call. Listeners can be removed by name, by callback identity, by
//! context, or by once-ness.
//!
//! # Overview
//!
//! The crate has two collaborating pieces:
//!
//! 1. **Listener** (`listener`): a callback handle plus, once registered, its
//!    receiver and one-shot flag
//! 2. **Emitter** (`emitter`): the registry of listeners per event name and
//!    the dispatch algorithm
//!
//! # Quick Start
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use emitkit::{Emitter, Listener};
//!
//! let emitter = Emitter::<i32>::new();
//! let sum = Rc::new(Cell::new(0));
//!
//! let s = sum.clone();
//! let on_tick = Listener::<i32>::new(move |call| s.set(s.get() + *call.args()));
//!
//! emitter.register("tick", &on_tick)?;
//! emitter.dispatch("tick", &5)?;
//! emitter.dispatch("tick", &7)?;
//!
//! assert_eq!(sum.get(), 12);
//! assert_eq!(emitter.listener_count_for("tick"), 1);
//!
//! emitter.unregister("tick", Some(&on_tick), None, false);
//! assert!(!emitter.dispatch("tick", &1)?);
//! # Ok::<(), emitkit::EmitterError>(())
//! ```
//!
//! # Envelopes
//!
//! `dispatch_with_envelope` gives every listener an event-like envelope in
//! addition to the arguments, in the style of browser `dispatchEvent`:
//!
//! ```
//! use emitkit::{DynEmitter, Listener};
//! use serde_json::{json, Value};
//!
//! let emitter = DynEmitter::new();
//! let listener = Listener::<[Value]>::new(|call| {
//!     let envelope = call.envelope_as::<Value>().unwrap();
//!     assert_eq!(envelope["extra"], 9);
//!     assert_eq!(call.args(), &[json!(1), json!(2)][..]);
//! });
//!
//! emitter.register("evt", &listener)?;
//! emitter.dispatch_with_envelope(&json!({ "type": "evt", "extra": 9 }), &[json!(1), json!(2)])?;
//! # Ok::<(), emitkit::EmitterError>(())
//! ```
//!
//! # Error Handling
//!
//! Registration returns `Result<&Emitter>` so calls can be chained with
//! `and_then`. A listener error is returned from dispatch unchanged and stops
//! delivery to the listeners after it. Removal and inspection never fail.
//!
//! # Threading
//!
//! Everything runs on the caller's thread. The emitter is not `Sync`; a
//! listener may re-enter the emitter it was dispatched from.

pub mod config;
pub mod emitter;
pub mod error;
pub mod listener;
mod registry;
pub mod types;

// Re-export public types
pub use config::EmitterConfig;
pub use emitter::{DynEmitter, Emitter};
pub use error::{EmitterError, ListenerError, Result};
pub use listener::{Call, Context, Listener, ListenerResult, Receiver};
pub use types::{AsAny, DispatchTarget, Envelope, EventLike, EventName, Symbol};
