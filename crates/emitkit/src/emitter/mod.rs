//! The emitter: listener registration, removal and inspection
//!
//! Dispatch lives in the `dispatch` submodule. All operations take `&self`;
//! the registry sits behind a `RefCell` and is never borrowed while a listener
//! runs, so listeners can call back into the emitter.
//!
//! # Examples
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use emitkit::{Emitter, Listener};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let emitter = Emitter::<str>::new();
//!
//! let l = log.clone();
//! let boom = Listener::<str>::new(move |call| l.borrow_mut().push(call.args().to_string()));
//!
//! emitter.register_once("boom", &boom)?;
//! assert!(emitter.dispatch("boom", "first")?);
//! assert!(!emitter.dispatch("boom", "second")?);
//!
//! assert_eq!(emitter.listener_count_for("boom"), 0);
//! assert_eq!(*log.borrow(), vec!["first".to_string()]);
//! # Ok::<(), emitkit::EmitterError>(())
//! ```

mod dispatch;

use std::{cell::RefCell, fmt, rc::Rc};

use tracing::{trace, warn};

use crate::{
    config::EmitterConfig,
    error::{EmitterError, Result},
    listener::{Context, Listener, ListenerRecord},
    registry::Registry,
    types::EventName,
};

/// Synchronous named-event emitter
///
/// Generic over the argument type `A` handed to listeners by reference.
/// Single-threaded: the emitter is neither `Send` nor `Sync`.
pub struct Emitter<A: ?Sized> {
    registry: RefCell<Registry<A>>,
    config: EmitterConfig,
}

/// Emitter with untyped JSON arguments
pub type DynEmitter = Emitter<[serde_json::Value]>;

impl<A: ?Sized> Emitter<A> {
    /// Create an emitter with the default configuration
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create an emitter with an explicit configuration
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            registry: RefCell::new(Registry::new()),
            config,
        }
    }

    /// Configuration this emitter was built with
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Register a listener, invoked with the emitter as receiver
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the listener is unbound.
    pub fn register(&self, name: impl Into<EventName>, listener: &Listener<A>) -> Result<&Self> {
        self.insert(name.into(), listener, None, false)
    }

    /// Register a listener invoked with an explicit context as receiver
    pub fn register_with_context(
        &self,
        name: impl Into<EventName>,
        listener: &Listener<A>,
        context: Context,
    ) -> Result<&Self> {
        self.insert(name.into(), listener, Some(context), false)
    }

    /// Register a listener that is removed right before its first invocation
    pub fn register_once(
        &self,
        name: impl Into<EventName>,
        listener: &Listener<A>,
    ) -> Result<&Self> {
        self.insert(name.into(), listener, None, true)
    }

    /// One-time listener with an explicit context
    pub fn register_once_with_context(
        &self,
        name: impl Into<EventName>,
        listener: &Listener<A>,
        context: Context,
    ) -> Result<&Self> {
        self.insert(name.into(), listener, Some(context), true)
    }

    /// Remove listeners for an event
    ///
    /// Without a listener every record for `name` is removed. With one, only
    /// records sharing its callback are removed, further narrowed to records
    /// registered with `context` when given, and to one-time records when
    /// `once` is true. Absent names are a no-op.
    pub fn unregister(
        &self,
        name: impl Into<EventName>,
        listener: Option<&Listener<A>>,
        context: Option<&Context>,
        once: bool,
    ) -> &Self {
        let name = name.into();
        let mut registry = self.registry.borrow_mut();

        let removed = match listener {
            None => registry.remove_all(&name) as usize,
            Some(listener) => registry.remove_matching(&name, listener, context, once),
        };

        if removed > 0 {
            trace!(
                event = %name,
                removed = removed,
                remaining = registry.count(&name),
                "Unregistered listeners"
            );
        }
        self
    }

    /// Remove every listener for `name`, or every listener when `None`
    pub fn unregister_all(&self, name: Option<EventName>) -> &Self {
        match name {
            Some(name) => self.unregister(name, None, None, false),
            None => {
                self.registry.borrow_mut().clear();
                trace!("Unregistered all listeners");
                self
            }
        }
    }

    /// Names with at least one listener, in no particular order
    pub fn names(&self) -> Vec<EventName> {
        self.registry.borrow().names()
    }

    /// Listeners for `name` in registration order
    pub fn listeners_for(&self, name: impl Into<EventName>) -> Vec<Listener<A>> {
        self.registry.borrow().listeners(&name.into())
    }

    /// Number of listeners registered for `name`
    pub fn listener_count_for(&self, name: impl Into<EventName>) -> usize {
        self.registry.borrow().count(&name.into())
    }

    /// Number of distinct names with listeners
    pub fn name_count(&self) -> usize {
        self.registry.borrow().name_count()
    }

    /// Check if no listener is registered at all
    pub fn is_empty(&self) -> bool {
        self.name_count() == 0
    }

    fn insert(
        &self,
        name: EventName,
        listener: &Listener<A>,
        context: Option<Context>,
        once: bool,
    ) -> Result<&Self> {
        if !listener.is_bound() {
            return Err(EmitterError::InvalidArgument(format!(
                "listener for '{}' is not bound to a callback",
                name
            )));
        }

        let record = Rc::new(ListenerRecord::new(listener.clone(), context, once));
        let mut registry = self.registry.borrow_mut();
        let count = registry.insert(name.clone(), record);

        trace!(event = %name, listener_count = count, once = once, "Registered listener");

        let max = self.config.max_listeners;
        if max > 0 && count > max && registry.mark_warned(&name) {
            warn!(
                event = %name,
                listener_count = count,
                max_listeners = max,
                "Possible listener leak: more listeners registered than max_listeners"
            );
        }

        Ok(self)
    }
}

// Aliases
impl<A: ?Sized> Emitter<A> {
    /// Alias for [`Emitter::register`]
    pub fn on(&self, name: impl Into<EventName>, listener: &Listener<A>) -> Result<&Self> {
        self.register(name, listener)
    }

    /// Alias for [`Emitter::register`]
    pub fn add_listener(&self, name: impl Into<EventName>, listener: &Listener<A>) -> Result<&Self> {
        self.register(name, listener)
    }

    /// Alias for [`Emitter::register_once`]
    pub fn once(&self, name: impl Into<EventName>, listener: &Listener<A>) -> Result<&Self> {
        self.register_once(name, listener)
    }

    /// Alias for [`Emitter::register_once`]
    pub fn one(&self, name: impl Into<EventName>, listener: &Listener<A>) -> Result<&Self> {
        self.register_once(name, listener)
    }

    /// Alias for [`Emitter::unregister`]
    pub fn off(
        &self,
        name: impl Into<EventName>,
        listener: Option<&Listener<A>>,
        context: Option<&Context>,
        once: bool,
    ) -> &Self {
        self.unregister(name, listener, context, once)
    }

    /// Alias for [`Emitter::unregister`]
    pub fn remove_listener(
        &self,
        name: impl Into<EventName>,
        listener: Option<&Listener<A>>,
        context: Option<&Context>,
        once: bool,
    ) -> &Self {
        self.unregister(name, listener, context, once)
    }

    /// Alias for [`Emitter::unregister_all`]
    pub fn remove_all_listeners(&self, name: Option<EventName>) -> &Self {
        self.unregister_all(name)
    }

    /// Alias for [`Emitter::names`]
    pub fn event_names(&self) -> Vec<EventName> {
        self.names()
    }

    /// Alias for [`Emitter::listeners_for`]
    pub fn listeners(&self, name: impl Into<EventName>) -> Vec<Listener<A>> {
        self.listeners_for(name)
    }

    /// Alias for [`Emitter::listener_count_for`]
    pub fn listener_count(&self, name: impl Into<EventName>) -> usize {
        self.listener_count_for(name)
    }
}

impl<A: ?Sized> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("names", &self.names())
            .field("config", &self.config)
            .finish()
    }
}
