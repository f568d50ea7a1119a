//! Core value types: event names, symbols and envelopes
//!
//! Event names are either plain strings or opaque [`Symbol`] tokens. A symbol
//! is only ever equal to its own clones, so two subsystems can each mint a
//! `Symbol::new("ready")` without their listeners colliding.
//!
//! # Examples
//!
//! ```
//! use emitkit::{EventName, Symbol};
//!
//! let ready = Symbol::new("ready");
//! let a = EventName::from(&ready);
//! let b = EventName::from(Symbol::new("ready"));
//!
//! assert_ne!(a, b);
//! assert_eq!(EventName::from("tick"), EventName::from("tick".to_string()));
//! ```

use std::{any::Any, cmp::Ordering, fmt, hash::Hash, sync::Arc};

use uuid::Uuid;

/// Opaque unique token usable as an event name
///
/// Equality and hashing use the token's id only; the description is for
/// display and debugging.
#[derive(Clone)]
pub struct Symbol {
    id: Uuid,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a new unique symbol with a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: Some(Arc::from(description.into())),
        }
    }

    /// Create a new unique symbol without a description
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
        }
    }

    /// Description given at creation, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// Name of an event: a string or a unique [`Symbol`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventName {
    /// Plain string name
    Str(String),

    /// Unique token name
    Token(Symbol),
}

impl EventName {
    /// String value, if this is a string name
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Token(_) => None,
        }
    }

    /// Check if this name is a symbol token
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Token(symbol) => symbol.fmt(f),
        }
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self::Str(name.to_string())
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self::Str(name)
    }
}

impl From<&String> for EventName {
    fn from(name: &String) -> Self {
        Self::Str(name.clone())
    }
}

impl From<Symbol> for EventName {
    fn from(symbol: Symbol) -> Self {
        Self::Token(symbol)
    }
}

impl From<&Symbol> for EventName {
    fn from(symbol: &Symbol) -> Self {
        Self::Token(symbol.clone())
    }
}

impl From<&EventName> for EventName {
    fn from(name: &EventName) -> Self {
        name.clone()
    }
}

/// Upcast helper so envelopes can be downcast to their concrete type
pub trait AsAny: Any {
    /// View this value as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An event-like value that carries a `type`
///
/// Envelopes are handed to listeners by reference during
/// `dispatch_with_envelope`. Listeners can recover the concrete type with
/// [`crate::Call::envelope_as`].
pub trait EventLike: AsAny {
    /// The event name this envelope is dispatched under
    ///
    /// `None` means the value has no usable `type` and cannot be dispatched.
    fn event_type(&self) -> Option<EventName>;
}

/// Minimal envelope holding only the event type
///
/// Synthesized by `dispatch_with_envelope` when it is given a bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Event type
    pub event_type: EventName,
}

impl Envelope {
    /// Create an envelope for an event name
    pub fn new(event_type: impl Into<EventName>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

impl EventLike for Envelope {
    fn event_type(&self) -> Option<EventName> {
        Some(self.event_type.clone())
    }
}

impl EventLike for serde_json::Value {
    fn event_type(&self) -> Option<EventName> {
        self.get("type")
            .and_then(|v| v.as_str())
            .map(EventName::from)
    }
}

/// What to dispatch: a bare event name or an envelope
pub enum DispatchTarget<'a> {
    /// Bare name; an [`Envelope`] is synthesized for it
    Name(EventName),

    /// Caller-owned envelope, passed to listeners as-is
    Envelope(&'a dyn EventLike),
}

impl<'a> DispatchTarget<'a> {
    /// Wrap any event-like value
    pub fn envelope(envelope: &'a dyn EventLike) -> Self {
        Self::Envelope(envelope)
    }
}

impl fmt::Debug for DispatchTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Envelope(envelope) => f
                .debug_tuple("Envelope")
                .field(&envelope.event_type())
                .finish(),
        }
    }
}

impl From<&str> for DispatchTarget<'_> {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

impl From<String> for DispatchTarget<'_> {
    fn from(name: String) -> Self {
        Self::Name(name.into())
    }
}

impl From<EventName> for DispatchTarget<'_> {
    fn from(name: EventName) -> Self {
        Self::Name(name)
    }
}

impl From<Symbol> for DispatchTarget<'_> {
    fn from(symbol: Symbol) -> Self {
        Self::Name(symbol.into())
    }
}

impl From<&Symbol> for DispatchTarget<'_> {
    fn from(symbol: &Symbol) -> Self {
        Self::Name(symbol.into())
    }
}

impl<'a> From<&'a dyn EventLike> for DispatchTarget<'a> {
    fn from(envelope: &'a dyn EventLike) -> Self {
        Self::Envelope(envelope)
    }
}

impl<'a> From<&'a Envelope> for DispatchTarget<'a> {
    fn from(envelope: &'a Envelope) -> Self {
        Self::Envelope(envelope)
    }
}

impl<'a> From<&'a serde_json::Value> for DispatchTarget<'a> {
    fn from(envelope: &'a serde_json::Value) -> Self {
        Self::Envelope(envelope)
    }
}
