//! Picks the conversion strategy of a type.
//!
//! The rules are tried in order, the first match wins:
//!
//! 1. A registration in the [`StrategyRegistry`], exact before generic.
//! 2. `Option<T>` resolves as `T`.
//! 3. A generic type must have exactly one type argument. A [`Lazy<T>`]
//!    becomes [`Strategy::Lazy`] and a sequence becomes
//!    [`Strategy::Sequence`], both wrapping the strategy of `T`.
//! 4. A non-generic sequence becomes `Sequence(Default)`.
//! 5. An enum becomes [`Strategy::EnumAsName`] if it opts into value
//!    names, [`Strategy::EnumAsUnderlying`] otherwise.
//! 6. Everything else uses [`Strategy::Default`].
//!
//! [`Lazy<T>`]: crate::impls::Lazy

use std::sync::{Mutex, PoisonError};

use log::trace;

use crate::error::QueryError;
use crate::info::TypeInfo;
use crate::registry::{SharedRegistry, StrategyRegistry};
use crate::strategy::Strategy;
use crate::utils::TypeIdMap;

struct Cache {
    generation: u64,
    entries: TypeIdMap<Strategy>,
}

/// Resolves strategies against a registry, caching non-generic types.
///
/// # Examples
///
/// ```
/// use vc_qs::impls::Lazy;
/// use vc_qs::info::Typed;
/// use vc_qs::registry::SharedRegistry;
/// use vc_qs::resolver::StrategyResolver;
/// use vc_qs::strategy::Strategy;
///
/// let resolver = StrategyResolver::new(SharedRegistry::default());
/// let strategy = resolver.resolve(<Vec<Lazy<u8>>>::type_info()).unwrap();
/// assert_eq!(strategy.to_string(), "Sequence(Lazy(Default))");
/// ```
pub struct StrategyResolver {
    registry: SharedRegistry,
    cache: Mutex<Cache>,
}

impl StrategyResolver {
    pub fn new(registry: SharedRegistry) -> Self {
        Self {
            registry,
            cache: Mutex::new(Cache {
                generation: 0,
                entries: TypeIdMap::new(),
            }),
        }
    }

    /// A resolver over the process-wide registry.
    #[inline]
    pub fn global() -> Self {
        Self::new(SharedRegistry::global())
    }

    #[inline]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Returns the strategy of `info`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Shape`] for a generic type without exactly one argument.
    /// - [`QueryError::EnumNaming`] for an enum opting into value names
    ///   with a variant lacking one.
    pub fn resolve(&self, info: &'static TypeInfo) -> Result<Strategy, QueryError> {
        let registry = self.registry.read();
        let generation = registry.generation();
        let cacheable = info.generics().is_none();

        if cacheable {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if cache.generation == generation
                && let Some(strategy) = cache.entries.get(&info.ty_id())
            {
                return Ok(strategy.clone());
            }
        }

        let strategy = resolve_in(&registry, info)?;
        trace!("resolved `{strategy}` for `{}`", info.type_path());

        if cacheable {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if cache.generation != generation {
                cache.entries.clear();
                cache.generation = generation;
            }
            cache.entries.insert(info.ty_id(), strategy.clone());
        }
        Ok(strategy)
    }
}

impl Default for StrategyResolver {
    /// See [`StrategyResolver::global`].
    #[inline]
    fn default() -> Self {
        Self::global()
    }
}

fn resolve_in(
    registry: &StrategyRegistry,
    info: &'static TypeInfo,
) -> Result<Strategy, QueryError> {
    if let Some(strategy) = registry.get(info) {
        return Ok(strategy.clone());
    }

    if let Some(optional) = info.as_optional() {
        return resolve_in(registry, optional.inner());
    }

    if let Some(generics) = info.generics() {
        let (1, Some(argument)) = (generics.len(), generics.argument(0)) else {
            return Err(QueryError::Shape {
                type_path: info.type_path(),
                arity: generics.len(),
            });
        };
        if info.is_lazy() {
            return Ok(Strategy::Lazy(resolve_in(registry, argument)?.into()));
        }
        if info.is_sequence() {
            return Ok(Strategy::Sequence(resolve_in(registry, argument)?.into()));
        }
    }

    if info.is_sequence() {
        return Ok(Strategy::Sequence(Strategy::Default.into()));
    }

    if let Some(enum_info) = info.as_enum() {
        if !enum_info.uses_value_names() {
            return Ok(Strategy::EnumAsUnderlying);
        }
        return match enum_info.unnamed_variant() {
            None => Ok(Strategy::EnumAsName),
            Some(variant) => Err(QueryError::EnumNaming {
                enum_path: info.type_path(),
                variant: variant.name(),
            }),
        };
    }

    Ok(Strategy::Default)
}

#[cfg(test)]
mod tests {
    use super::StrategyResolver;
    use crate::derive::Queryable;
    use crate::error::QueryError;
    use crate::impls::{GenericTypeInfoCell, Language, Lazy};
    use crate::info::{GenericDefinition, Generics, TypeInfo, TypeKind, Typed};
    use crate::registry::SharedRegistry;
    use crate::strategy::Strategy;
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::marker::PhantomData;

    #[derive(Queryable, Clone, Copy)]
    #[query(value_names)]
    enum Sort {
        #[query(name = "n")]
        Name,
        #[query(name = "d")]
        Date,
    }

    #[derive(Queryable, Clone, Copy)]
    #[query(value_names)]
    enum Broken {
        #[query(name = "a")]
        A,
        B,
    }

    #[derive(Queryable, Clone, Copy)]
    enum Plain {
        One,
    }

    struct Pair<A, B>(PhantomData<(A, B)>);

    impl<A: Typed, B: Typed> Typed for Pair<A, B> {
        fn type_info() -> &'static TypeInfo {
            static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| {
                TypeInfo::new::<Self>(TypeKind::Opaque).with_generics(Generics::new(
                    GenericDefinition::new("Pair"),
                    &[A::type_info, B::type_info],
                ))
            })
        }
    }

    fn resolver() -> StrategyResolver {
        StrategyResolver::new(SharedRegistry::default())
    }

    #[test]
    fn rule_chain() {
        let resolver = resolver();
        let resolve = |info| resolver.resolve(info).unwrap();

        assert_eq!(resolve(u8::type_info()), Strategy::Default);
        assert_eq!(resolve(String::type_info()), Strategy::Default);
        assert_eq!(resolve(Language::type_info()), Strategy::Default);
        assert_eq!(resolve(<Option<u8>>::type_info()), Strategy::Default);
        assert_eq!(resolve(Sort::type_info()), Strategy::EnumAsName);
        assert_eq!(resolve(<Option<Sort>>::type_info()), Strategy::EnumAsName);
        assert_eq!(resolve(Plain::type_info()), Strategy::EnumAsUnderlying);
        assert_eq!(
            resolve(<Vec<Sort>>::type_info()),
            Strategy::Sequence(Box::new(Strategy::EnumAsName))
        );
        assert_eq!(
            resolve(<Lazy<Plain>>::type_info()),
            Strategy::Lazy(Box::new(Strategy::EnumAsUnderlying))
        );
    }

    #[test]
    fn wrong_arity_is_a_shape_error() {
        let err = resolver().resolve(<Pair<u8, u8>>::type_info()).unwrap_err();
        assert!(matches!(err, QueryError::Shape { arity: 2, .. }));
    }

    #[test]
    fn missing_value_name_is_reported() {
        let err = resolver().resolve(Broken::type_info()).unwrap_err();
        assert!(matches!(err, QueryError::EnumNaming { variant: "B", .. }));
    }

    #[test]
    fn exact_registration_beats_generic() {
        let registry = SharedRegistry::default();
        registry.register_generic(GenericDefinition::VEC, Strategy::NullMarker);
        registry.register::<Vec<bool>>(Strategy::Sequence(Box::new(Strategy::BooleanAsBit)));
        let resolver = StrategyResolver::new(registry);

        assert_eq!(resolver.resolve(<Vec<u8>>::type_info()).unwrap(), Strategy::NullMarker);
        assert_eq!(
            resolver.resolve(<Vec<bool>>::type_info()).unwrap(),
            Strategy::Sequence(Box::new(Strategy::BooleanAsBit))
        );
    }

    #[test]
    fn registrations_apply_to_nested_arguments() {
        let registry = SharedRegistry::default();
        registry.register::<bool>(Strategy::BooleanAsBit);
        let resolver = StrategyResolver::new(registry);
        assert_eq!(
            resolver.resolve(<Vec<Option<bool>>>::type_info()).unwrap(),
            Strategy::Sequence(Box::new(Strategy::BooleanAsBit))
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = resolver();
        for info in [u8::type_info(), Sort::type_info(), <Vec<Lazy<u8>>>::type_info()] {
            assert_eq!(resolver.resolve(info).unwrap(), resolver.resolve(info).unwrap());
        }
    }

    #[test]
    fn cache_follows_registry_mutation() {
        let registry = SharedRegistry::default();
        let resolver = StrategyResolver::new(registry.clone());
        assert_eq!(resolver.resolve(bool::type_info()).unwrap(), Strategy::Default);

        registry.register::<bool>(Strategy::BooleanAsBit);
        assert_eq!(resolver.resolve(bool::type_info()).unwrap(), Strategy::BooleanAsBit);

        registry.write().clear();
        assert_eq!(resolver.resolve(bool::type_info()).unwrap(), Strategy::Default);
    }
}
