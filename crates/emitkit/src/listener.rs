//! Listeners and the per-invocation call view
//!
//! A [`Listener`] is a cheaply cloneable handle around a callback. Clones share
//! the same callback, and identity (used by `unregister`) is the identity of
//! that shared callback: a listener registered under a name can be removed by
//! passing any clone of the same handle.
//!
//! # Examples
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use emitkit::{Emitter, Listener};
//!
//! let sum = Rc::new(Cell::new(0));
//! let seen = sum.clone();
//! let on_tick = Listener::<i32>::new(move |call| seen.set(seen.get() + *call.args()));
//!
//! let emitter = Emitter::new();
//! emitter.register("tick", &on_tick)?;
//! emitter.dispatch("tick", &5)?;
//! emitter.dispatch("tick", &7)?;
//!
//! assert_eq!(sum.get(), 12);
//! # Ok::<(), emitkit::EmitterError>(())
//! ```

use std::{any::Any, fmt, rc::Rc};

use crate::{
    emitter::Emitter,
    error::ListenerError,
    types::{EventLike, EventName},
};

/// Explicit receiver a listener can be registered with
///
/// Compared by identity of the shared allocation, never by value.
pub type Context = Rc<dyn Any>;

/// Result returned by a listener callback
pub type ListenerResult = std::result::Result<(), ListenerError>;

type Callback<A> = dyn Fn(&Call<'_, A>) -> ListenerResult;

/// Handle to a listener callback
pub struct Listener<A: ?Sized> {
    callback: Option<Rc<Callback<A>>>,
}

impl<A: ?Sized> Listener<A> {
    /// Create a listener from an infallible callback
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Call<'_, A>) + 'static,
    {
        Self::fallible(move |call| {
            f(call);
            Ok(())
        })
    }

    /// Create a listener whose callback can fail
    ///
    /// A returned error aborts the dispatch that invoked the listener and is
    /// handed back to the dispatch caller.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&Call<'_, A>) -> ListenerResult + 'static,
    {
        Self {
            callback: Some(Rc::new(f)),
        }
    }

    /// Create a listener with no callback
    ///
    /// Unbound listeners are rejected at registration.
    pub fn unbound() -> Self {
        Self { callback: None }
    }

    /// Check if this listener has a callback
    pub fn is_bound(&self) -> bool {
        self.callback.is_some()
    }

    /// Check if two handles share the same callback
    ///
    /// Unbound listeners are never equal to anything.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.callback, &other.callback) {
            (Some(a), Some(b)) => std::ptr::eq(
                Rc::as_ptr(a) as *const (),
                Rc::as_ptr(b) as *const (),
            ),
            _ => false,
        }
    }

    pub(crate) fn invoke(&self, call: &Call<'_, A>) -> ListenerResult {
        match &self.callback {
            Some(callback) => callback(call),
            None => Ok(()),
        }
    }
}

impl<A: ?Sized> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
        }
    }
}

impl<A: ?Sized> Default for Listener<A> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<A: ?Sized> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self.callback.as_ref().map(|cb| Rc::as_ptr(cb) as *const ());
        f.debug_struct("Listener")
            .field("callback", &address)
            .finish()
    }
}

/// A registered listener with its receiver and one-shot flag
///
/// Immutable once stored in the registry.
pub(crate) struct ListenerRecord<A: ?Sized> {
    listener: Listener<A>,
    context: Option<Context>,
    once: bool,
}

impl<A: ?Sized> ListenerRecord<A> {
    pub(crate) fn new(listener: Listener<A>, context: Option<Context>, once: bool) -> Self {
        Self {
            listener,
            context,
            once,
        }
    }

    pub(crate) fn listener(&self) -> &Listener<A> {
        &self.listener
    }

    pub(crate) fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub(crate) fn is_once(&self) -> bool {
        self.once
    }

    /// Removal filter: same callback, and same context / once-ness when asked
    pub(crate) fn matches(
        &self,
        listener: &Listener<A>,
        context: Option<&Context>,
        once_only: bool,
    ) -> bool {
        if !self.listener.ptr_eq(listener) || (once_only && !self.once) {
            return false;
        }
        match context {
            Some(wanted) => self
                .context
                .as_ref()
                .is_some_and(|own| same_context(own, wanted)),
            None => true,
        }
    }
}

fn same_context(a: &Context, b: &Context) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// What a listener is invoked as
pub enum Receiver<'a, A: ?Sized> {
    /// No explicit context was given; the dispatching emitter
    Emitter(&'a Emitter<A>),

    /// Context given at registration
    Context(&'a Context),
}

/// View of a single listener invocation
///
/// Borrowed for the duration of the callback only.
pub struct Call<'a, A: ?Sized> {
    emitter: &'a Emitter<A>,
    event: &'a EventName,
    context: Option<&'a Context>,
    envelope: Option<&'a dyn EventLike>,
    args: &'a A,
}

impl<'a, A: ?Sized> Call<'a, A> {
    pub(crate) fn new(
        emitter: &'a Emitter<A>,
        event: &'a EventName,
        context: Option<&'a Context>,
        envelope: Option<&'a dyn EventLike>,
        args: &'a A,
    ) -> Self {
        Self {
            emitter,
            event,
            context,
            envelope,
            args,
        }
    }

    /// Name the event was dispatched under
    pub fn event(&self) -> &'a EventName {
        self.event
    }

    /// Arguments passed to dispatch
    pub fn args(&self) -> &'a A {
        self.args
    }

    /// The dispatching emitter
    ///
    /// Listeners may register, unregister or dispatch through it while running.
    pub fn emitter(&self) -> &'a Emitter<A> {
        self.emitter
    }

    /// Receiver: the explicit context, or the emitter when none was given
    pub fn receiver(&self) -> Receiver<'a, A> {
        match self.context {
            Some(context) => Receiver::Context(context),
            None => Receiver::Emitter(self.emitter),
        }
    }

    /// Explicit context given at registration
    pub fn context(&self) -> Option<&'a Context> {
        self.context
    }

    /// Explicit context downcast to a concrete type
    pub fn context_as<T: Any>(&self) -> Option<&'a T> {
        self.context.and_then(|ctx| ctx.downcast_ref::<T>())
    }

    /// Envelope, only set by `dispatch_with_envelope`
    pub fn envelope(&self) -> Option<&'a dyn EventLike> {
        self.envelope
    }

    /// Envelope downcast to a concrete type
    pub fn envelope_as<T: Any>(&self) -> Option<&'a T> {
        self.envelope
            .and_then(|envelope| envelope.as_any().downcast_ref::<T>())
    }
}
