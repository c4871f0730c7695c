use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::access::{navigate_mut, resolve_and_materialize_path, slot_mut};
use crate::cfg;
use crate::error::QueryError;
use crate::factory::{InstanceFactory, instantiate};
use crate::info::{FieldInfo, TypeInfo, Typed};
use crate::metadata::SlotMetadata;
use crate::ops::DynamicStruct;
use crate::query::{QueryDictionary, QuerySyntax};
use crate::resolver::StrategyResolver;
use crate::strategy::Strategy;
use crate::walker::build::{enter, struct_info};
use crate::walker::{BoundSlot, Parameter, PropertyBinding};

// -----------------------------------------------------------------------------
// ParseContext

/// The state of one parse: configuration, resolver, instance factory, the
/// parsed query text and the bindings recorded so far.
///
/// While a type is walked the context also tracks the path of the instance
/// being walked, so hooks can bind its slots by name.
pub struct ParseContext<'a> {
    syntax: &'a QuerySyntax,
    resolver: &'a StrategyResolver,
    factory: &'a dyn InstanceFactory,
    dictionary: &'a QueryDictionary,
    bindings: Vec<PropertyBinding>,
    path: Vec<usize>,
    owners: Vec<&'static TypeInfo>,
    depth: usize,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(
        syntax: &'a QuerySyntax,
        resolver: &'a StrategyResolver,
        factory: &'a dyn InstanceFactory,
        dictionary: &'a QueryDictionary,
    ) -> Self {
        Self {
            syntax,
            resolver,
            factory,
            dictionary,
            bindings: Vec::new(),
            path: Vec::new(),
            owners: Vec::new(),
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

    #[inline]
    pub fn factory(&self) -> &'a dyn InstanceFactory {
        self.factory
    }

    /// The parsed query text.
    #[inline]
    pub fn dictionary(&self) -> &'a QueryDictionary {
        self.dictionary
    }

    #[inline]
    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }

    /// Returns `true` if a binding for parameter `name` was recorded.
    pub fn exists(&self, name: &str) -> bool {
        self.bindings.iter().any(|binding| binding.name() == name)
    }

    /// Removes the binding for parameter `name`.
    pub fn remove(&mut self, name: &str) -> Option<PropertyBinding> {
        let index = self.bindings.iter().position(|binding| binding.name() == name)?;
        Some(self.bindings.remove(index))
    }

    /// Records `binding` if the query text has its parameter and no binding
    /// for that name exists yet.
    pub fn try_add_binding(&mut self, binding: PropertyBinding) -> bool {
        if !self.dictionary.contains(binding.name()) || self.exists(binding.name()) {
            return false;
        }
        cfg::trace_slots! {
            log::trace!("bind `{}` at {:?}", binding.name(), binding.path());
        }
        self.bindings.push(binding);
        true
    }

    /// Binds the slot named `slot` of the instance being walked to the
    /// parameter `name`.
    ///
    /// Returns whether the binding was recorded, see
    /// [`try_add_binding`](Self::try_add_binding).
    pub fn bind(&mut self, slot: &str, name: impl Into<String>) -> Result<bool, QueryError> {
        let owner = self.current_owner(slot)?;
        let field = owner
            .as_struct()
            .and_then(|info| info.field(slot))
            .ok_or_else(|| QueryError::NotFound {
                owner: owner.type_path(),
                slot: slot.into(),
            })?;
        let mut path = self.path.clone();
        path.push(field.index());
        self.bind_at(path, owner, field, name.into())
    }

    /// Binds the slot at the dotted `path` below `current` to the parameter
    /// `name`, materializing null intermediates.
    ///
    /// `current` must be the instance being walked, the one a hook is
    /// called on.
    pub fn bind_path(
        &mut self,
        current: &mut dyn Reflect,
        path: &str,
        name: impl Into<String>,
    ) -> Result<bool, QueryError> {
        let owner = self.current_owner(path)?;
        if current.reflect_type_info().ty_id() != owner.ty_id() {
            return Err(QueryError::NotFound {
                owner: current.reflect_type_info().type_path(),
                slot: path.into(),
            });
        }
        let slot = resolve_and_materialize_path(current, path, self.factory)?;
        let mut full = self.path.clone();
        full.extend_from_slice(slot.indices());
        self.bind_at(full, slot.owner(), slot.field(), name.into())
    }

    fn current_owner(&self, slot: &str) -> Result<&'static TypeInfo, QueryError> {
        self.owners
            .last()
            .copied()
            .ok_or_else(|| QueryError::MissingDeclaration {
                name: slot.into(),
                missing: "instance being walked",
            })
    }

    fn bind_at(
        &mut self,
        path: Vec<usize>,
        owner: &'static TypeInfo,
        field: &'static FieldInfo,
        name: String,
    ) -> Result<bool, QueryError> {
        let info = owner.as_struct().ok_or_else(|| QueryError::NotFound {
            owner: owner.type_path(),
            slot: field.name().into(),
        })?;
        let strategy = SlotMetadata::resolve(info, field)?.strategy(self.resolver)?;
        Ok(self.try_add_binding(binding(path, owner, field, name, strategy)))
    }
}

fn binding(
    path: Vec<usize>,
    owner: &'static TypeInfo,
    field: &'static FieldInfo,
    name: impl Into<String>,
    strategy: Strategy,
) -> PropertyBinding {
    let parameter = Parameter::new(name, field.type_info()).with_strategy(strategy);
    PropertyBinding::new(path, owner, field, parameter)
}

// -----------------------------------------------------------------------------
// Parse

/// Records the bindings of `value` and its grouped slots into `ctx`.
pub(crate) fn parse_value(
    ctx: &mut ParseContext<'_>,
    value: &mut dyn Reflect,
) -> Result<(), QueryError> {
    if let Some(bag) = value.downcast_mut::<DynamicStruct>() {
        return parse_entries(ctx, bag);
    }
    let info = struct_info(value)?;
    let owner = value.reflect_type_info();
    enter(&mut ctx.depth, ctx.syntax, owner)?;
    ctx.owners.push(owner);

    for field in info.slots() {
        let meta = SlotMetadata::resolve(info, field)?;
        if meta.skip_parse() {
            if meta.instantiate_on_null() {
                instantiate_if_null(slot_mut(value, field)?, field, ctx.factory)?;
            }
            cfg::trace_slots! {
                log::trace!("skip `{}::{}` on parse", field.owner_path(), field.name());
            }
            continue;
        }

        if !meta.is_grouped() {
            let strategy = meta.strategy(ctx.resolver)?;
            let mut path = ctx.path.clone();
            path.push(field.index());
            ctx.try_add_binding(binding(path, owner, field, meta.name(), strategy));
            continue;
        }

        let slot = slot_mut(value, field)?;
        if slot.is_null() && !meta.instantiate_on_null() {
            continue;
        }
        instantiate_if_null(&mut *slot, field, ctx.factory)?;
        let Some(group) = slot.non_null_mut() else {
            continue;
        };
        ctx.path.push(field.index());
        parse_value(ctx, group)?;
        ctx.path.pop();
    }

    if let Some(hook) = info.parse_hook() {
        hook(value, ctx)?;
    }
    ctx.owners.pop();
    ctx.depth -= 1;
    Ok(())
}

/// Binds the existing entries of `bag`, entries are never added.
fn parse_entries(ctx: &mut ParseContext<'_>, bag: &mut DynamicStruct) -> Result<(), QueryError> {
    let owner = DynamicStruct::type_info();
    enter(&mut ctx.depth, ctx.syntax, owner)?;

    for index in 0..bag.field_len() {
        let Some((name, entry)) = bag.entry_at_mut(index) else {
            continue;
        };
        let declared = entry.reflect_type_info();
        if declared.unwrap_optional().is_walkable() {
            let Some(group) = entry.non_null_mut() else {
                continue;
            };
            ctx.path.push(index);
            parse_value(ctx, group)?;
            ctx.path.pop();
            continue;
        }

        let strategy = ctx.resolver.resolve(declared)?;
        let mut path = ctx.path.clone();
        path.push(index);
        let parameter = Parameter::new(name, declared).with_strategy(strategy);
        ctx.try_add_binding(PropertyBinding::entry(path, owner, parameter));
    }

    ctx.depth -= 1;
    Ok(())
}

fn instantiate_if_null(
    slot: &mut dyn Reflect,
    field: &FieldInfo,
    factory: &dyn InstanceFactory,
) -> Result<(), QueryError> {
    if slot.is_null() {
        slot.set(instantiate(factory, field.type_info())?)
            .map_err(|_| QueryError::Instantiation {
                type_path: field.type_path(),
            })?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Resolution

/// Converts the raw value of every binding and writes it into its slot.
pub(crate) fn resolve_bindings(
    root: &mut dyn Reflect,
    ctx: ParseContext<'_>,
) -> Result<(), QueryError> {
    for binding in ctx.bindings {
        let name = binding.name();
        let raw = ctx
            .dictionary
            .get(name)
            .ok_or_else(|| QueryError::MissingDeclaration {
                name: name.into(),
                missing: "value",
            })?;
        let strategy = binding.parameter().validate()?;

        let slot_name = match binding.slot() {
            BoundSlot::Field(field) => field.name(),
            BoundSlot::Entry(_) => name,
        };
        let not_found = || QueryError::NotFound {
            owner: binding.owner().type_path(),
            slot: slot_name.into(),
        };
        let (_, owner_path) = binding.path().split_last().ok_or_else(not_found)?;
        let owner = navigate_mut(&mut *root, owner_path).ok_or_else(not_found)?;
        if owner.reflect_type_info().ty_id() != binding.owner().ty_id() {
            return Err(not_found());
        }
        if let BoundSlot::Field(field) = binding.slot()
            && !field.is_writable()
        {
            return Err(QueryError::NotWritable {
                owner: field.owner_path(),
                slot: field.name(),
            });
        }

        let declared = binding.parameter().declared();
        let value = strategy.parse(raw, declared, ctx.syntax)?;
        let value = declared.coerce(value).map_err(|value| {
            QueryError::conversion(
                declared.type_path(),
                format!("unexpected value of `{}`", value.reflect_type_info().type_path()),
            )
        })?;
        let slot = match binding.slot() {
            BoundSlot::Field(field) => slot_mut(owner, field)?,
            BoundSlot::Entry(index) => owner
                .reflect_mut()
                .as_struct()
                .and_then(|bag| bag.field_at_mut(index))
                .ok_or_else(not_found)?,
        };
        slot.set(value).map_err(|_| {
            QueryError::conversion(declared.type_path(), "slot rejected the value")
        })?;
    }
    Ok(())
}
