//! The entry points of building and parsing.

use alloc::boxed::Box;
use std::sync::LazyLock;

use log::debug;

use crate::Reflect;
use crate::error::QueryError;
use crate::factory::{DefaultFactory, InstanceFactory};
use crate::info::{TypeInfo, Typed};
use crate::query::{QueryConfig, QueryResult, QuerySyntax};
use crate::registry::SharedRegistry;
use crate::resolver::StrategyResolver;
use crate::walker::{BuildContext, ParseContext, build_value, materialize};
use crate::walker::{parse_value, resolve_bindings};

// -----------------------------------------------------------------------------
// QueryMapper

/// Maps object graphs to query text and back.
///
/// A mapper owns its compiled syntax, a strategy resolver and the factory
/// creating missing instances. It is `Send + Sync` and can be shared.
///
/// # Examples
///
/// ```
/// use vc_qs::prelude::*;
///
/// #[derive(Queryable, Default, Debug, PartialEq)]
/// #[query(default)]
/// struct Filter {
///     #[query(rename = "Name")]
///     name: String,
///     #[query(rename = "Tags")]
///     tags: Vec<String>,
/// }
///
/// let config = QueryConfig {
///     value_separator: ',',
///     split_pattern: ",".into(),
///     ..Default::default()
/// };
/// let mapper = QueryMapper::with_config(&config).unwrap();
///
/// let filter = Filter { name: "Alice".into(), tags: vec!["a".into(), "b".into()] };
/// let query = mapper.build(&filter).unwrap();
/// assert_eq!(query.query_string(), "Name=Alice&Tags=a,b");
///
/// let parsed: Filter = mapper.parse(query.query_string()).unwrap();
/// assert_eq!(parsed, filter);
/// ```
pub struct QueryMapper {
    syntax: QuerySyntax,
    resolver: StrategyResolver,
    factory: Box<dyn InstanceFactory>,
}

impl Default for QueryMapper {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl QueryMapper {
    /// A mapper with the default configuration, the process-wide registry
    /// and the [`DefaultFactory`].
    pub fn new() -> Self {
        Self {
            syntax: QuerySyntax::default(),
            resolver: StrategyResolver::global(),
            factory: Box::new(DefaultFactory),
        }
    }

    /// A mapper using `config`.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidPattern`] if a pattern of `config` does not compile.
    pub fn with_config(config: &QueryConfig) -> Result<Self, QueryError> {
        Ok(Self {
            syntax: config.compile()?,
            ..Self::new()
        })
    }

    /// Resolves strategies against `registry` instead of the process-wide one.
    #[inline]
    pub fn with_registry(mut self, registry: SharedRegistry) -> Self {
        self.resolver = StrategyResolver::new(registry);
        self
    }

    #[inline]
    pub fn with_factory(mut self, factory: impl InstanceFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    #[inline]
    pub fn syntax(&self) -> &QuerySyntax {
        &self.syntax
    }

    #[inline]
    pub fn resolver(&self) -> &StrategyResolver {
        &self.resolver
    }

    #[inline]
    pub fn factory(&self) -> &dyn InstanceFactory {
        &*self.factory
    }

    /// Builds the query text of `value`.
    ///
    /// `value` is only read, so null slots flagged `instantiate` but skipped
    /// on build stay null. Use [`build_materialized`](Self::build_materialized)
    /// to create them first.
    ///
    /// # Errors
    ///
    /// Any [`QueryError`] raised while walking `value` or converting a slot.
    /// Nothing is returned partially.
    pub fn build(&self, value: &dyn Reflect) -> Result<QueryResult, QueryError> {
        let mut ctx = BuildContext::new(&self.syntax, &self.resolver);
        build_value(&mut ctx, value)?;
        let result = ctx.finish()?;
        debug!(
            "built {} parameters from `{}`",
            result.processed_values().len(),
            value.reflect_type_info().type_path(),
        );
        Ok(result)
    }

    /// Instantiates the null slots of `value` that are skipped on build but
    /// flagged to be instantiated, then builds its query text.
    pub fn build_materialized(&self, value: &mut dyn Reflect) -> Result<QueryResult, QueryError> {
        materialize(value, &*self.factory, &self.syntax, &mut 0)?;
        self.build(value)
    }

    /// Writes the values of `text` into the slots of `target`.
    ///
    /// Slots whose parameter is absent keep their value.
    ///
    /// # Errors
    ///
    /// Any [`QueryError`] raised while walking `target` or converting a
    /// value. Writes that already happened are kept.
    pub fn parse_into(&self, target: &mut dyn Reflect, text: &str) -> Result<(), QueryError> {
        let dictionary = self.syntax.tokenize(text);
        let mut ctx = ParseContext::new(&self.syntax, &self.resolver, &*self.factory, &dictionary);
        parse_value(&mut ctx, target)?;
        debug!(
            "bound {} of {} parameters to `{}`",
            ctx.bindings().len(),
            dictionary.len(),
            target.reflect_type_info().type_path(),
        );
        resolve_bindings(target, ctx)
    }

    /// Parses `text` into a fresh instance of `T` created by the factory.
    pub fn parse<T: Typed + Reflect>(&self, text: &str) -> Result<T, QueryError> {
        let root = self.parse_dyn(T::type_info(), text)?;
        T::from_boxed(root).map_err(|_| QueryError::Instantiation {
            type_path: T::type_info().type_path(),
        })
    }

    /// Parses `text` into a fresh instance of the type described by `info`.
    pub fn parse_dyn(
        &self,
        info: &'static TypeInfo,
        text: &str,
    ) -> Result<Box<dyn Reflect>, QueryError> {
        let mut root = self.factory.create(info).ok_or(QueryError::Instantiation {
            type_path: info.type_path(),
        })?;
        self.parse_into(&mut *root, text)?;
        Ok(root)
    }
}

impl core::fmt::Debug for QueryMapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueryMapper")
            .field("syntax", &self.syntax)
            .field("registry", self.resolver.registry())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Shorthands

static DEFAULT_MAPPER: LazyLock<QueryMapper> = LazyLock::new(QueryMapper::new);

/// Builds the query text of `value` with the default mapper.
///
/// # Examples
///
/// ```
/// use vc_qs::prelude::*;
///
/// #[derive(Queryable)]
/// struct Page {
///     number: u32,
///     #[query(strategy = Strategy::BooleanAsBit)]
///     last: bool,
/// }
///
/// let query = to_query(&Page { number: 4, last: true }).unwrap();
/// assert_eq!(query.query_string(), "number=4&last=1");
/// ```
#[inline]
pub fn to_query(value: &dyn Reflect) -> Result<QueryResult, QueryError> {
    DEFAULT_MAPPER.build(value)
}

/// Parses `text` into a fresh `T` with the default mapper.
///
/// # Examples
///
/// ```
/// use vc_qs::prelude::*;
///
/// #[derive(Queryable, Default)]
/// #[query(default)]
/// struct Page {
///     number: u32,
///     size: Option<u32>,
/// }
///
/// let page: Page = from_query("number=4&other=x").unwrap();
/// assert_eq!(page.number, 4);
/// assert_eq!(page.size, None);
/// ```
#[inline]
pub fn from_query<T: Typed + Reflect>(text: &str) -> Result<T, QueryError> {
    DEFAULT_MAPPER.parse(text)
}

#[cfg(test)]
mod tests {
    use super::QueryMapper;
    use crate::Reflect;
    use crate::derive::Queryable;
    use crate::error::QueryError;
    use crate::info::{TypeInfo, Typed};
    use crate::query::QueryConfig;
    use crate::registry::SharedRegistry;
    use crate::strategy::Strategy;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[derive(Queryable, Default, Debug, PartialEq)]
    #[query(default)]
    struct Paging {
        page: u32,
        size: u32,
    }

    #[derive(Queryable, Default, Debug, PartialEq)]
    #[query(default)]
    struct Search {
        term: String,
        paging: Option<Paging>,
        #[query(skip_build, instantiate)]
        cursor: Option<Paging>,
    }

    fn mapper() -> QueryMapper {
        QueryMapper::new().with_registry(SharedRegistry::default())
    }

    #[test]
    fn build_then_parse() {
        let mapper = mapper();
        let search = Search {
            term: String::from("a b"),
            paging: Some(Paging { page: 2, size: 20 }),
            cursor: None,
        };
        let query = mapper.build(&search).unwrap();
        assert_eq!(query.query_string(), "term=a b&page=2&size=20");
        assert_eq!(query.encoded_query_string(), "term=a%20b&page=2&size=20");

        // null groups are neither built nor bound
        let mut parsed: Search = mapper.parse(query.query_string()).unwrap();
        assert_eq!(parsed.term, "a b");
        assert_eq!(parsed.paging, None);

        parsed.paging = Some(Paging::default());
        mapper.parse_into(&mut parsed, "page=3").unwrap();
        assert_eq!(parsed.paging, Some(Paging { page: 3, size: 0 }));
    }

    #[test]
    fn materialized_build_fills_flagged_slots() {
        let mut search = Search::default();
        mapper().build(&search).unwrap();
        assert_eq!(search.cursor, None);

        let query = mapper().build_materialized(&mut search).unwrap();
        assert_eq!(search.cursor, Some(Paging::default()));
        assert_eq!(query.query_string(), "term=");
    }

    #[test]
    fn custom_config_and_factory() {
        let config = QueryConfig {
            pair_separator: ';',
            parameter_pattern: String::from("([^?=;]+)(=([^;]*))?"),
            ..QueryConfig::default()
        };
        let factory = |info: &'static TypeInfo| -> Option<Box<dyn Reflect>> {
            info.is::<Search>().then(|| {
                Box::new(Search {
                    term: String::from("seed"),
                    cursor: Some(Paging { page: 1, size: 1 }),
                    ..Search::default()
                }) as Box<dyn Reflect>
            })
        };
        let mapper = QueryMapper::with_config(&config)
            .unwrap()
            .with_registry(SharedRegistry::default())
            .with_factory(factory);

        let parsed: Search = mapper.parse("x=1;size=7").unwrap();
        assert_eq!(parsed.term, "seed");
        assert_eq!(parsed.cursor, Some(Paging { page: 1, size: 7 }));

        let err = mapper.parse::<Paging>("page=1").unwrap_err();
        assert!(matches!(err, QueryError::Instantiation { .. }));
    }

    #[test]
    fn flagged_groups_need_the_factory_on_parse() {
        let factory = |info: &'static TypeInfo| -> Option<Box<dyn Reflect>> {
            info.is::<Search>().then(|| Box::new(Search::default()) as Box<dyn Reflect>)
        };
        let mapper = mapper().with_factory(factory);

        // `cursor` is skipped on build only, so parse must create a `Paging`
        let err = mapper.parse::<Search>("term=x").unwrap_err();
        assert_eq!(
            err,
            QueryError::Instantiation {
                type_path: Paging::type_info().type_path(),
            }
        );
    }

    #[test]
    fn registry_is_private_to_the_mapper() {
        let registry = SharedRegistry::default();
        registry.register::<u32>(Strategy::NullMarker);
        let private = QueryMapper::new().with_registry(registry);

        let query = private.build(&Paging { page: 1, size: 2 }).unwrap();
        assert_eq!(query.query_string(), "page=&size=");
        let query = mapper().build(&Paging::default()).unwrap();
        assert_eq!(query.query_string(), "page=0&size=0");
    }

    #[test]
    fn roots_must_be_structs() {
        let err = mapper().build(&3_u8).unwrap_err();
        assert!(matches!(err, QueryError::Conversion { .. }));
        assert!(mapper().parse_dyn(u8::type_info(), "a=1").is_err());
    }
}
