use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

use crate::Reflect;
use crate::access::slot_mut;
use crate::cfg;
use crate::error::QueryError;
use crate::factory::{InstanceFactory, instantiate};
use crate::info::{StructInfo, TypeInfo, Typed};
use crate::metadata::SlotMetadata;
use crate::ops::{DynamicStruct, ReflectRef};
use crate::query::{QueryResult, QuerySyntax};
use crate::resolver::StrategyResolver;
use crate::utils::IndexMap;
use crate::walker::Parameter;

// -----------------------------------------------------------------------------
// BuildContext

/// The state of one build: configuration, resolver and the parameters
/// collected so far.
pub struct BuildContext<'a> {
    syntax: &'a QuerySyntax,
    resolver: &'a StrategyResolver,
    parameters: IndexMap<String, Parameter<'a>>,
    depth: usize,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(syntax: &'a QuerySyntax, resolver: &'a StrategyResolver) -> Self {
        Self {
            syntax,
            resolver,
            parameters: IndexMap::default(),
            depth: 0,
        }
    }

    #[inline]
    pub fn syntax(&self) -> &'a QuerySyntax {
        self.syntax
    }

    #[inline]
    pub fn resolver(&self) -> &'a StrategyResolver {
        self.resolver
    }

    /// Returns `true` if a parameter named `name` was collected.
    #[inline]
    pub fn exists(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Removes the parameter named `name`, keeping the order of the rest.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Parameter<'a>> {
        self.parameters.shift_remove(name)
    }

    /// Adds `parameter`, replacing a parameter of the same name.
    ///
    /// # Errors
    ///
    /// [`QueryError::MissingDeclaration`] without strategy and
    /// [`QueryError::CapabilityMismatch`] if the strategy cannot handle the
    /// declared type.
    pub fn add_parameter(&mut self, parameter: Parameter<'a>) -> Result<(), QueryError> {
        parameter.validate()?;
        let name = String::from(parameter.name());
        if let Some(old) = self.parameters.insert(name, parameter) {
            debug!("parameter `{}` replaced by a later slot", old.name());
        }
        Ok(())
    }

    /// Adds an owned value under `name`, converted by the strategy resolved
    /// for `T`.
    pub fn add_value<T: Typed + Reflect>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), QueryError> {
        let declared = T::type_info();
        let strategy = self.resolver.resolve(declared)?;
        self.add_parameter(
            Parameter::new(name, declared)
                .with_owned_value(value.into_boxed_reflect())
                .with_strategy(strategy),
        )
    }

    /// The collected parameters, in order of first insertion.
    #[inline]
    pub fn parameters(&self) -> impl ExactSizeIterator<Item = &Parameter<'a>> {
        self.parameters.values()
    }

    fn enter(&mut self, info: &'static TypeInfo) -> Result<(), QueryError> {
        enter(&mut self.depth, self.syntax, info)
    }

    /// Renders every parameter and assembles the query text.
    pub(crate) fn finish(self) -> Result<QueryResult, QueryError> {
        let mut values = Vec::with_capacity(self.parameters.len());
        for (name, parameter) in self.parameters {
            let strategy = parameter.validate()?;
            let text = strategy.build(parameter.value(), self.syntax)?;
            values.push((name, text, strategy.is_null_marker()));
        }
        Ok(QueryResult::assemble(values, self.syntax))
    }
}

pub(super) fn enter(
    depth: &mut usize,
    syntax: &QuerySyntax,
    info: &'static TypeInfo,
) -> Result<(), QueryError> {
    if *depth >= syntax.max_depth() {
        return Err(QueryError::DepthExceeded {
            limit: syntax.max_depth(),
            type_path: info.type_path(),
        });
    }
    *depth += 1;
    Ok(())
}

#[inline]
pub(super) fn not_walkable(value: &dyn Reflect) -> QueryError {
    QueryError::conversion(value.reflect_type_info().type_path(), "only structs can be walked")
}

pub(super) fn struct_info(value: &dyn Reflect) -> Result<&'static StructInfo, QueryError> {
    value
        .reflect_type_info()
        .as_struct()
        .ok_or_else(|| not_walkable(value))
}

// -----------------------------------------------------------------------------
// Build

/// Collects the parameters of `value` and its grouped slots into `ctx`.
pub(crate) fn build_value<'a>(
    ctx: &mut BuildContext<'a>,
    value: &'a dyn Reflect,
) -> Result<(), QueryError> {
    if let Some(bag) = value.downcast_ref::<DynamicStruct>() {
        return build_entries(ctx, bag);
    }
    let info = struct_info(value)?;
    let ReflectRef::Struct(object) = value.reflect_ref() else {
        return Err(not_walkable(value));
    };
    ctx.enter(value.reflect_type_info())?;

    for field in info.slots() {
        let meta = SlotMetadata::resolve(info, field)?;
        if meta.skip_build() {
            cfg::trace_slots! {
                log::trace!("skip `{}::{}` on build", field.owner_path(), field.name());
            }
            continue;
        }
        let Some(slot) = object.field_at(field.index()) else {
            continue;
        };

        if meta.is_grouped() {
            if let Some(group) = slot.non_null() {
                build_value(ctx, group)?;
            }
            continue;
        }

        let strategy = meta.strategy(ctx.resolver)?;
        let Some(slot) = slot.non_null() else {
            if strategy.is_null_marker() {
                ctx.add_parameter(
                    Parameter::new(meta.name(), field.type_info()).with_strategy(strategy),
                )?;
            }
            continue;
        };
        ctx.add_parameter(
            Parameter::new(meta.name(), field.type_info())
                .with_value(slot)
                .with_strategy(strategy),
        )?;
    }

    if let Some(hook) = info.build_hook() {
        hook(value, ctx)?;
    }
    ctx.depth -= 1;
    Ok(())
}

fn build_entries<'a>(
    ctx: &mut BuildContext<'a>,
    bag: &'a DynamicStruct,
) -> Result<(), QueryError> {
    ctx.enter(DynamicStruct::type_info())?;

    for (name, entry) in bag.iter() {
        let declared = entry.reflect_type_info();
        let Some(value) = entry.non_null() else {
            if !declared.unwrap_optional().is_walkable() {
                let strategy = ctx.resolver.resolve(declared)?;
                if strategy.is_null_marker() {
                    ctx.add_parameter(Parameter::new(name, declared).with_strategy(strategy))?;
                }
            }
            continue;
        };
        if value.reflect_type_info().is_walkable() {
            build_value(ctx, value)?;
            continue;
        }
        let strategy = ctx.resolver.resolve(declared)?;
        ctx.add_parameter(
            Parameter::new(name, declared)
                .with_value(value)
                .with_strategy(strategy),
        )?;
    }

    ctx.depth -= 1;
    Ok(())
}

// -----------------------------------------------------------------------------
// Materialize

/// Instantiates null slots that are skipped on build but flagged to be
/// instantiated, in `value` and its grouped slots.
pub(crate) fn materialize(
    value: &mut dyn Reflect,
    factory: &dyn InstanceFactory,
    syntax: &QuerySyntax,
    depth: &mut usize,
) -> Result<(), QueryError> {
    if let Some(bag) = value.downcast_mut::<DynamicStruct>() {
        enter(depth, syntax, DynamicStruct::type_info())?;
        for index in 0..bag.field_len() {
            if let Some((_, entry)) = bag.entry_at_mut(index)
                && let Some(group) = entry.non_null_mut()
                && group.reflect_type_info().is_walkable()
            {
                materialize(group, factory, syntax, depth)?;
            }
        }
        *depth -= 1;
        return Ok(());
    }
    let info = struct_info(value)?;
    enter(depth, syntax, value.reflect_type_info())?;

    for field in info.slots() {
        let meta = SlotMetadata::resolve(info, field)?;
        let slot = slot_mut(value, field)?;
        if meta.skip_build() {
            if meta.instantiate_on_null() && slot.is_null() {
                slot.set(instantiate(factory, field.type_info())?)
                    .map_err(|_| QueryError::Instantiation {
                        type_path: field.type_path(),
                    })?;
            }
            continue;
        }
        if meta.is_grouped()
            && let Some(group) = slot.non_null_mut()
        {
            materialize(group, factory, syntax, depth)?;
        }
    }

    *depth -= 1;
    Ok(())
}
