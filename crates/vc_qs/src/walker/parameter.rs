use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::error::QueryError;
use crate::info::{FieldInfo, TypeInfo};
use crate::strategy::Strategy;

// -----------------------------------------------------------------------------
// Parameter

#[derive(Debug)]
enum Value<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

/// A named, typed and optionally valued unit of query text.
///
/// # Examples
///
/// ```
/// use vc_qs::info::Typed;
/// use vc_qs::strategy::Strategy;
/// use vc_qs::walker::Parameter;
///
/// let param = Parameter::new("page", u32::type_info())
///     .with_value(&3_u32)
///     .with_strategy(Strategy::Default);
/// assert!(param.validate().is_ok());
///
/// // a strategy must be assigned before the parameter is used
/// assert!(Parameter::new("page", u32::type_info()).validate().is_err());
/// ```
#[derive(Debug)]
pub struct Parameter<'a> {
    name: String,
    value: Option<Value<'a>>,
    declared: &'static TypeInfo,
    strategy: Option<Strategy>,
}

impl<'a> Parameter<'a> {
    /// Creates a null parameter without strategy.
    pub fn new(name: impl Into<String>, declared: &'static TypeInfo) -> Self {
        Self {
            name: name.into(),
            value: None,
            declared,
            strategy: None,
        }
    }

    /// Sets a value borrowed from the object graph.
    #[inline]
    pub fn with_value(mut self, value: &'a dyn Reflect) -> Self {
        self.value = Some(Value::Borrowed(value));
        self
    }

    /// Sets a value owned by the parameter.
    #[inline]
    pub fn with_owned_value(mut self, value: Box<dyn Reflect>) -> Self {
        self.value = Some(Value::Owned(value));
        self
    }

    #[inline]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value, `None` standing for null.
    pub fn value(&self) -> Option<&dyn Reflect> {
        match &self.value {
            Some(Value::Borrowed(value)) => Some(*value),
            Some(Value::Owned(value)) => Some(&**value),
            None => None,
        }
    }

    #[inline]
    pub const fn declared(&self) -> &'static TypeInfo {
        self.declared
    }

    #[inline]
    pub fn strategy(&self) -> Option<&Strategy> {
        self.strategy.as_ref()
    }

    /// Checks that a strategy is assigned and can handle the declared type.
    pub fn validate(&self) -> Result<&Strategy, QueryError> {
        let strategy = self.strategy.as_ref().ok_or_else(|| QueryError::MissingDeclaration {
            name: self.name.clone(),
            missing: "strategy",
        })?;
        if !strategy.can_handle(self.declared) {
            return Err(strategy.mismatch(self.declared));
        }
        Ok(strategy)
    }
}

// -----------------------------------------------------------------------------
// PropertyBinding

/// The slot a [`PropertyBinding`] writes to.
#[derive(Clone, Copy, Debug)]
pub enum BoundSlot {
    /// A declared slot of a struct.
    Field(&'static FieldInfo),
    /// The entry at this index of a [`DynamicStruct`](crate::ops::DynamicStruct).
    Entry(usize),
}

/// A slot awaiting the raw value of its parameter.
///
/// The slot is addressed by indices from the root of the parse.
#[derive(Debug)]
pub struct PropertyBinding {
    path: Vec<usize>,
    owner: &'static TypeInfo,
    slot: BoundSlot,
    parameter: Parameter<'static>,
}

impl PropertyBinding {
    /// `path` leads from the root to the slot, its last index is the slot's.
    pub fn new(
        path: Vec<usize>,
        owner: &'static TypeInfo,
        field: &'static FieldInfo,
        parameter: Parameter<'static>,
    ) -> Self {
        Self {
            path,
            owner,
            slot: BoundSlot::Field(field),
            parameter,
        }
    }

    /// Binds the property bag entry at the last index of `path`.
    pub fn entry(
        path: Vec<usize>,
        owner: &'static TypeInfo,
        parameter: Parameter<'static>,
    ) -> Self {
        let index = path.last().copied().unwrap_or_default();
        Self {
            path,
            owner,
            slot: BoundSlot::Entry(index),
            parameter,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.parameter.name()
    }

    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The instance type the slot was found on.
    #[inline]
    pub const fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    #[inline]
    pub const fn slot(&self) -> BoundSlot {
        self.slot
    }

    /// The declared slot, `None` for a property bag entry.
    #[inline]
    pub const fn field(&self) -> Option<&'static FieldInfo> {
        match self.slot {
            BoundSlot::Field(field) => Some(field),
            BoundSlot::Entry(_) => None,
        }
    }

    #[inline]
    pub fn parameter(&self) -> &Parameter<'static> {
        &self.parameter
    }
}
