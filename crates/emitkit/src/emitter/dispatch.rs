//! Event dispatch
//!
//! Both dispatch flavors share one delivery loop:
//!
//! 1. Snapshot the records registered for the name; return `false` if none.
//! 2. For each record in the snapshot, in registration order:
//!    - skip it if it was unregistered since the snapshot was taken;
//!    - remove it first if it is a one-time record;
//!    - invoke it. An error stops delivery and is returned as-is.
//!
//! Listeners registered while a dispatch runs are not invoked by it.

use tracing::debug;

use super::Emitter;
use crate::{
    error::{EmitterError, Result},
    listener::Call,
    types::{DispatchTarget, Envelope, EventLike, EventName},
};

impl<A: ?Sized> Emitter<A> {
    /// Invoke every listener registered for `name` with `args`
    ///
    /// Returns `Ok(true)` if the event had listeners, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns the first listener error; later listeners are not invoked.
    pub fn dispatch(&self, name: impl Into<EventName>, args: &A) -> Result<bool> {
        let name = name.into();
        self.deliver(&name, None, args)
    }

    /// Invoke listeners with an envelope available through [`Call::envelope`]
    ///
    /// A bare name gets a synthesized [`Envelope`]; an envelope is dispatched
    /// under its own `type` and handed to listeners by reference.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the envelope has no usable `type`, or the
    /// first listener error.
    pub fn dispatch_with_envelope<'e>(
        &self,
        target: impl Into<DispatchTarget<'e>>,
        args: &A,
    ) -> Result<bool> {
        match target.into() {
            DispatchTarget::Name(name) => {
                let envelope = Envelope::new(name);
                self.deliver(&envelope.event_type, Some(&envelope), args)
            }
            DispatchTarget::Envelope(envelope) => {
                let name = envelope.event_type().ok_or_else(|| {
                    EmitterError::InvalidArgument(
                        "envelope has no usable `type` field".to_string(),
                    )
                })?;
                self.deliver(&name, Some(envelope), args)
            }
        }
    }

    /// Alias for [`Emitter::dispatch`]
    pub fn emit(&self, name: impl Into<EventName>, args: &A) -> Result<bool> {
        self.dispatch(name, args)
    }

    /// Alias for [`Emitter::dispatch_with_envelope`]
    pub fn emit_with_event<'e>(
        &self,
        target: impl Into<DispatchTarget<'e>>,
        args: &A,
    ) -> Result<bool> {
        self.dispatch_with_envelope(target, args)
    }

    /// Alias for [`Emitter::dispatch_with_envelope`]
    pub fn trigger_handler<'e>(
        &self,
        target: impl Into<DispatchTarget<'e>>,
        args: &A,
    ) -> Result<bool> {
        self.dispatch_with_envelope(target, args)
    }

    fn deliver(
        &self,
        name: &EventName,
        envelope: Option<&dyn EventLike>,
        args: &A,
    ) -> Result<bool> {
        let snapshot = self.registry.borrow().snapshot(name);
        let Some(records) = snapshot else {
            debug!(event = %name, "No listeners registered for event");
            return Ok(false);
        };

        debug!(event = %name, listener_count = records.len(), "Dispatching event");

        for record in &records {
            let live = if record.is_once() {
                self.registry.borrow_mut().remove_record(name, record)
            } else {
                self.registry.borrow().contains_record(name, record)
            };
            if !live {
                continue;
            }

            let call = Call::new(self, name, record.context(), envelope, args);
            if let Err(e) = record.listener().invoke(&call) {
                debug!(event = %name, error = %e, "Listener failed, aborting dispatch");
                return Err(EmitterError::Listener(e));
            }
        }

        Ok(true)
    }
}
