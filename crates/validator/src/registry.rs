//! Named predicate registry.
//!
//! Rules refer to predicates by a short tag such as `"required"` or
//! `"is-even"`. The registry maps those tags to implementations and can be
//! extended at runtime. It is owned by a [`Validator`](crate::Validator), never
//! process-global.
//!
//! # Concurrency
//!
//! The mapping is copy-on-write: a shared map behind a reader/writer lock that
//! is only held long enough to clone or swap the `Arc`. A validation call
//! takes one [`RegistrySnapshot`] for its whole duration and runs predicates
//! with no lock held, so it never sees a half-applied registration, and
//! predicates may read the registry or validate nested records while a
//! [`register`](PredicateRegistry::register) is in progress.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::RegistrationError;
use crate::expression::{ALTERNATIVE_SEPARATOR, TERM_SEPARATOR};

// ============================================================================
// PREDICATE
// ============================================================================

/// A pure, total test over a single field value.
///
/// Implemented for every `Fn(&Value) -> bool + Send + Sync`, so closures and
/// plain functions can be registered directly.
///
/// Implementations may read the registry or validate nested records. A
/// registration made while a call is running takes effect from the next call.
///
/// # Examples
///
/// ```rust
/// use fieldrules::Predicate;
/// use serde_json::{Value, json};
///
/// let even_length = |value: &Value| value.as_str().is_some_and(|s| !s.is_empty() && s.len() % 2 == 0);
/// assert!(even_length.test(&json!("30")));
/// assert!(!even_length.test(&json!("301")));
/// ```
pub trait Predicate: Send + Sync {
    /// Returns `true` when the value passes.
    fn test(&self, value: &Value) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, value: &Value) -> bool {
        self(value)
    }
}

/// Shared handle to a registered predicate.
pub type SharedPredicate = Arc<dyn Predicate>;

// ============================================================================
// REGISTRY
// ============================================================================

type PredicateMap = HashMap<String, SharedPredicate>;

/// Thread-safe mapping from predicate name to implementation.
#[derive(Default)]
pub struct PredicateRegistry {
    predicates: RwLock<Arc<PredicateMap>>,
}

impl PredicateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `predicate` under `name`, replacing any previous predicate
    /// with that name.
    pub fn register<P>(&self, name: impl Into<String>, predicate: P) -> Result<(), RegistrationError>
    where
        P: Predicate + 'static,
    {
        self.register_shared(name, Arc::new(predicate))
    }

    /// Installs an already shared predicate under `name`.
    pub fn register_shared(
        &self,
        name: impl Into<String>,
        predicate: SharedPredicate,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        check_name(&name)?;

        let replaced = self.update(|map| map.insert(name.clone(), predicate));
        if replaced.is_some() {
            debug!(predicate = %name, "replaced predicate");
        } else {
            debug!(predicate = %name, "registered predicate");
        }
        Ok(())
    }

    /// Installs a predicate that may be absent.
    ///
    /// `None` fails with [`RegistrationError::MissingPredicate`] and leaves the
    /// registry unchanged.
    pub fn register_optional(
        &self,
        name: impl Into<String>,
        predicate: Option<SharedPredicate>,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        match predicate {
            Some(predicate) => self.register_shared(name, predicate),
            None => {
                check_name(&name)?;
                Err(RegistrationError::MissingPredicate { name })
            }
        }
    }

    /// Built-ins have static, known-good names.
    pub(crate) fn insert_builtin(&self, name: &'static str, predicate: SharedPredicate) {
        self.update(|map| map.insert(name.to_owned(), predicate));
    }

    /// Removes the predicate registered under `name`.
    ///
    /// Returns `true` if one was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.update(|map| map.remove(name)).is_some();
        if removed {
            debug!(predicate = %name, "unregistered predicate");
        }
        removed
    }

    /// Looks up a predicate by name.
    pub fn resolve(&self, name: &str) -> Option<SharedPredicate> {
        self.current().get(name).cloned()
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.current().contains_key(name)
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.current().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Takes a consistent read-only view of the registry.
    ///
    /// Later registrations do not affect an existing snapshot and do not wait
    /// for it to be dropped.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            predicates: self.current(),
        }
    }

    fn current(&self) -> Arc<PredicateMap> {
        Arc::clone(&*self.predicates.read())
    }

    /// Applies `change` to the map, cloning it first if a snapshot still
    /// shares it.
    fn update<R>(&self, change: impl FnOnce(&mut PredicateMap) -> R) -> R {
        let mut guard = self.predicates.write();
        change(Arc::make_mut(&mut *guard))
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("predicates", &self.names())
            .finish()
    }
}

fn check_name(name: &str) -> Result<(), RegistrationError> {
    if name.trim().is_empty() {
        return Err(RegistrationError::EmptyName);
    }
    if name.contains([TERM_SEPARATOR, ALTERNATIVE_SEPARATOR]) || name.trim() != name {
        return Err(RegistrationError::ReservedCharacter {
            name: name.to_owned(),
        });
    }
    Ok(())
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Read-only view of a [`PredicateRegistry`] held for one validation call.
#[derive(Clone)]
pub struct RegistrySnapshot {
    predicates: Arc<PredicateMap>,
}

impl RegistrySnapshot {
    /// Looks up a predicate by name.
    pub fn get(&self, name: &str) -> Option<&dyn Predicate> {
        self.predicates.get(name).map(AsRef::as_ref)
    }
}

// ============================================================================
// TESTS
// ============================================================================
