//! Explicit type to strategy overrides.
//!
//! A [`StrategyRegistry`] maps exact types, or whole generic definitions
//! such as every `Vec<T>`, to a [`Strategy`]. It is shared through a
//! [`SharedRegistry`] handle. A process-wide registry exists for the
//! convenience functions; operations may inject their own instead.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;
use log::{debug, warn};

use crate::info::{GenericDefinition, TypeInfo, Typed};
use crate::strategy::Strategy;
use crate::utils::{FixedHashState, TypeIdMap};

/// Stamps of registry states, unique across every registry of the process.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

// -----------------------------------------------------------------------------
// StrategyRegistry

/// Type to strategy overrides.
///
/// Lookup prefers a registration of the exact type over one of its generic
/// definition.
///
/// # Examples
///
/// ```
/// use vc_qs::info::{GenericDefinition, Typed};
/// use vc_qs::registry::StrategyRegistry;
/// use vc_qs::strategy::Strategy;
///
/// let mut registry = StrategyRegistry::new();
/// registry.register_generic(GenericDefinition::VEC, Strategy::Default);
/// registry.register::<Vec<bool>>(Strategy::NullMarker);
///
/// assert_eq!(registry.get(<Vec<u8>>::type_info()), Some(&Strategy::Default));
/// assert_eq!(registry.get(<Vec<bool>>::type_info()), Some(&Strategy::NullMarker));
/// assert_eq!(registry.get(u8::type_info()), None);
/// ```
pub struct StrategyRegistry {
    exact: TypeIdMap<(&'static str, Strategy)>,
    generic: HashMap<GenericDefinition, Strategy, FixedHashState>,
    generation: u64,
}

impl Default for StrategyRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            exact: TypeIdMap::new(),
            generic: HashMap::with_hasher(FixedHashState),
            generation: next_generation(),
        }
    }

    /// Registers `strategy` for exactly `T`, returning the replaced one.
    #[inline]
    pub fn register<T: Typed>(&mut self, strategy: Strategy) -> Option<Strategy> {
        self.register_type(T::type_info(), strategy)
    }

    /// Registers `strategy` for exactly the type of `info`.
    pub fn register_type(
        &mut self,
        info: &'static TypeInfo,
        strategy: Strategy,
    ) -> Option<Strategy> {
        debug!("register `{strategy}` for `{}`", info.type_path());
        self.generation = next_generation();
        self.exact
            .insert(info.ty_id(), (info.type_path(), strategy))
            .map(|(_, old)| old)
    }

    /// Registers `strategy` for every instantiation of `definition`.
    pub fn register_generic(
        &mut self,
        definition: GenericDefinition,
        strategy: Strategy,
    ) -> Option<Strategy> {
        debug!("register `{strategy}` for `{}<..>`", definition.path());
        self.generation = next_generation();
        self.generic.insert(definition, strategy)
    }

    pub fn unregister<T: Typed>(&mut self) -> Option<Strategy> {
        let removed = self.exact.remove(&T::type_info().ty_id()).map(|(_, old)| old);
        if removed.is_some() {
            debug!("unregister `{}`", T::type_info().type_path());
            self.generation = next_generation();
        }
        removed
    }

    pub fn unregister_generic(&mut self, definition: GenericDefinition) -> Option<Strategy> {
        let removed = self.generic.remove(&definition);
        if removed.is_some() {
            debug!("unregister `{}<..>`", definition.path());
            self.generation = next_generation();
        }
        removed
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.exact.clear();
        self.generic.clear();
        self.generation = next_generation();
    }

    /// The registration applying to `info`, exact ones first.
    pub fn get(&self, info: &TypeInfo) -> Option<&Strategy> {
        if let Some((_, strategy)) = self.exact.get(&info.ty_id()) {
            return Some(strategy);
        }
        let definition = info.generics()?.definition();
        self.generic.get(&definition)
    }

    #[inline]
    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.get(info).is_some()
    }

    /// Number of registrations, exact and generic.
    #[inline]
    pub fn len(&self) -> usize {
        self.exact.len() + self.generic.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A stamp that changes with every mutation.
    ///
    /// Stamps are unique across registries, so a changed stamp also
    /// reveals a replaced registry.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl core::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("exact", &self.exact)
            .field("generic", &self.generic)
            .field("generation", &self.generation)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// SharedRegistry

/// A cloneable handle to a lock-guarded [`StrategyRegistry`].
///
/// Lookups take the read lock and registrations the write lock, so a
/// lookup never observes a half-applied registration.
#[derive(Clone, Default, Debug)]
pub struct SharedRegistry(Arc<RwLock<StrategyRegistry>>);

impl SharedRegistry {
    #[inline]
    pub fn new(registry: StrategyRegistry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }

    /// The process-wide registry.
    #[inline]
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, StrategyRegistry> {
        self.0.read().unwrap_or_else(|poisoned| {
            warn!("strategy registry lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, StrategyRegistry> {
        self.0.write().unwrap_or_else(|poisoned| {
            warn!("strategy registry lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Shorthand for [`StrategyRegistry::register`] under the write lock.
    #[inline]
    pub fn register<T: Typed>(&self, strategy: Strategy) -> Option<Strategy> {
        self.write().register::<T>(strategy)
    }

    /// Shorthand for [`StrategyRegistry::register_generic`] under the write lock.
    #[inline]
    pub fn register_generic(
        &self,
        definition: GenericDefinition,
        strategy: Strategy,
    ) -> Option<Strategy> {
        self.write().register_generic(definition, strategy)
    }

    /// Returns `true` if both handles share one registry.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// -----------------------------------------------------------------------------
// Global

static GLOBAL: LazyLock<SharedRegistry> = LazyLock::new(SharedRegistry::default);

/// Replaces the content of the process-wide registry.
pub fn init_global(registry: StrategyRegistry) {
    debug!("initialize global strategy registry with {} entries", registry.len());
    *GLOBAL.write() = registry;
}

/// Removes every registration of the process-wide registry.
pub fn reset_global() {
    debug!("reset global strategy registry");
    GLOBAL.write().clear();
}

/// Serializes tests that touch the process-wide registry.
#[cfg(test)]
pub(crate) static GLOBAL_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::{GLOBAL_TEST_LOCK, SharedRegistry, StrategyRegistry, init_global, reset_global};
    use crate::info::{GenericDefinition, Typed};
    use crate::strategy::Strategy;
    use alloc::collections::VecDeque;
    use std::sync::PoisonError;

    #[test]
    fn mutation_changes_the_generation() {
        let mut registry = StrategyRegistry::new();
        let first = registry.generation();
        registry.register::<u8>(Strategy::BooleanAsBit);
        let second = registry.generation();
        assert_ne!(first, second);

        // removing nothing is not a mutation
        assert!(registry.unregister::<u16>().is_none());
        assert_eq!(registry.generation(), second);

        assert_eq!(registry.unregister::<u8>(), Some(Strategy::BooleanAsBit));
        assert!(registry.is_empty());
        assert_ne!(registry.generation(), second);
    }

    #[test]
    fn generations_are_unique_across_registries() {
        assert_ne!(StrategyRegistry::new().generation(), StrategyRegistry::new().generation());
    }

    #[test]
    fn generic_registration_requires_the_definition() {
        let mut registry = StrategyRegistry::new();
        registry.register_generic(GenericDefinition::VEC_DEQUE, Strategy::NullMarker);
        assert!(registry.contains(<VecDeque<u8>>::type_info()));
        assert!(!registry.contains(<Vec<u8>>::type_info()));
        assert!(!registry.contains(u8::type_info()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn shared_handles_see_registrations() {
        let shared = SharedRegistry::default();
        let other = shared.clone();
        assert!(shared.ptr_eq(&other));
        shared.register::<bool>(Strategy::BooleanAsBit);
        assert_eq!(other.read().get(bool::type_info()), Some(&Strategy::BooleanAsBit));
    }

    #[test]
    fn global_lifecycle() {
        let _guard = GLOBAL_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut registry = StrategyRegistry::new();
        registry.register::<char>(Strategy::NullMarker);
        init_global(registry);
        assert!(SharedRegistry::global().read().contains(char::type_info()));

        reset_global();
        assert!(SharedRegistry::global().read().is_empty());
    }
}
