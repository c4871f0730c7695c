use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::{Any, TypeId};
use core::fmt::Display;
use core::str::FromStr;

use crate::Reflect;
use crate::info::{EnumInfo, Generics, LazyInfo, OptionalInfo, SequenceInfo, StructInfo};

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a type, as far as query mapping is concerned.
#[derive(Debug)]
pub enum TypeKind {
    /// `bool`, integers, floats, `char` and `String`.
    Primitive,
    /// A leaf value without slots.
    Opaque,
    Struct(StructInfo),
    /// A property bag whose slots are only known at runtime,
    /// [`DynamicStruct`](crate::ops::DynamicStruct).
    Dynamic,
    Enum(EnumInfo),
    Sequence(SequenceInfo),
    /// The nullable wrapper, `Option<T>`.
    Optional(OptionalInfo),
    /// The deferred wrapper, [`Lazy<T>`](crate::impls::Lazy).
    Lazy(LazyInfo),
}

impl TypeKind {
    /// A short lowercase name, used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Opaque => "opaque",
            Self::Struct(_) => "struct",
            Self::Dynamic => "dynamic",
            Self::Enum(_) => "enum",
            Self::Sequence(_) => "sequence",
            Self::Optional(_) => "optional",
            Self::Lazy(_) => "lazy",
        }
    }
}

// -----------------------------------------------------------------------------
// TypeTraits

type DefaultFn = fn() -> Box<dyn Reflect>;
type DisplayFn = fn(&dyn Reflect) -> Option<String>;
type FromStrFn = fn(&str) -> Result<Box<dyn Reflect>, String>;

#[derive(Clone, Copy, Debug, Default)]
struct TypeTraits {
    default: Option<DefaultFn>,
    display: Option<DisplayFn>,
    from_str: Option<FromStrFn>,
}

fn default_fn<T: Default + Reflect>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

fn display_fn<T: Display + Reflect>(value: &dyn Reflect) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}

fn from_str_fn<T>(text: &str) -> Result<Box<dyn Reflect>, String>
where
    T: FromStr + Reflect,
    T::Err: Display,
{
    match text.parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(err) => Err(err.to_string()),
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Descriptor of a single type.
///
/// # Examples
///
/// ```
/// use vc_qs::info::{TypeInfo, Typed};
///
/// let info: &'static TypeInfo = <Option<u8>>::type_info();
/// assert!(info.is_optional());
/// assert!(info.unwrap_optional().is::<u8>());
///
/// let value = info.unwrap_optional().parse_text("7").unwrap().unwrap();
/// assert_eq!(value.downcast_ref::<u8>(), Some(&7));
/// ```
#[derive(Debug)]
pub struct TypeInfo {
    ty_id: TypeId,
    type_path: &'static str,
    type_ident: &'static str,
    kind: TypeKind,
    generics: Option<Generics>,
    traits: TypeTraits,
}

/// `alloc::vec::Vec<u8>` -> `Vec`
fn short_ident(path: &'static str) -> &'static str {
    let head = match path.find('<') {
        Some(end) => &path[..end],
        None => path,
    };
    match head.rfind("::") {
        Some(start) => &head[start + 2..],
        None => head,
    }
}

impl TypeInfo {
    /// Creates the descriptor of `T` without capabilities or generics.
    pub fn new<T: Any>(kind: TypeKind) -> Self {
        let type_path = core::any::type_name::<T>();
        Self {
            ty_id: TypeId::of::<T>(),
            type_path,
            type_ident: short_ident(type_path),
            kind,
            generics: None,
            traits: TypeTraits::default(),
        }
    }

    /// Records the instantiated generic shape.
    #[inline]
    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = Some(generics);
        self
    }

    /// Exposes `T::default` to instance factories and the null-marker strategy.
    #[inline]
    pub fn with_default<T: Default + Reflect>(mut self) -> Self {
        self.traits.default = Some(default_fn::<T>);
        self
    }

    /// Exposes a hand-written constructor in place of `Default`.
    #[inline]
    pub fn with_default_fn(mut self, f: fn() -> Box<dyn Reflect>) -> Self {
        self.traits.default = Some(f);
        self
    }

    /// Exposes `T`'s `Display` to the default strategy.
    #[inline]
    pub fn with_display<T: Display + Reflect>(mut self) -> Self {
        self.traits.display = Some(display_fn::<T>);
        self
    }

    /// Exposes `T`'s `FromStr` to the default strategy.
    #[inline]
    pub fn with_from_str<T>(mut self) -> Self
    where
        T: FromStr + Reflect,
        T::Err: Display,
    {
        self.traits.from_str = Some(from_str_fn::<T>);
        self
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Full path of the type, e.g. `alloc::vec::Vec<u8>`.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Name without module path and generics, e.g. `Vec`.
    #[inline]
    pub const fn type_ident(&self) -> &'static str {
        self.type_ident
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub fn generics(&self) -> Option<&Generics> {
        self.generics.as_ref()
    }

    // ---------------------------------------------------------------------
    // Kind views

    #[inline]
    pub fn as_struct(&self) -> Option<&StructInfo> {
        match &self.kind {
            TypeKind::Struct(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_enum(&self) -> Option<&EnumInfo> {
        match &self.kind {
            TypeKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&SequenceInfo> {
        match &self.kind {
            TypeKind::Sequence(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_optional(&self) -> Option<&OptionalInfo> {
        match &self.kind {
            TypeKind::Optional(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_lazy(&self) -> Option<&LazyInfo> {
        match &self.kind {
            TypeKind::Lazy(info) => Some(info),
            _ => None,
        }
    }

    /// Primitives, strings and enums.
    #[inline]
    pub const fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive | TypeKind::Enum(_))
    }

    /// A property bag, see [`TypeKind::Dynamic`].
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.kind, TypeKind::Dynamic)
    }

    /// Structs and property bags, the types the walkers recurse into.
    #[inline]
    pub const fn is_walkable(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_) | TypeKind::Dynamic)
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        matches!(self.kind, TypeKind::Opaque)
    }

    #[inline]
    pub const fn is_sequence(&self) -> bool {
        matches!(self.kind, TypeKind::Sequence(_))
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        matches!(self.kind, TypeKind::Optional(_))
    }

    #[inline]
    pub const fn is_lazy(&self) -> bool {
        matches!(self.kind, TypeKind::Lazy(_))
    }

    /// Returns the wrapped type of `Option<T>`, or `self` for other types.
    #[inline]
    pub fn unwrap_optional(&'static self) -> &'static TypeInfo {
        match &self.kind {
            TypeKind::Optional(info) => info.inner(),
            _ => self,
        }
    }

    // ---------------------------------------------------------------------
    // Capabilities

    #[inline]
    pub fn has_default(&self) -> bool {
        self.traits.default.is_some()
    }

    /// Creates the default value, if the type exposes one.
    #[inline]
    pub fn create_default(&self) -> Option<Box<dyn Reflect>> {
        self.traits.default.map(|f| f())
    }

    /// Renders `value` with the type's `Display`.
    ///
    /// Returns `None` if the capability is missing or `value` is of another type.
    #[inline]
    pub fn display(&self, value: &dyn Reflect) -> Option<String> {
        self.traits.display.and_then(|f| f(value))
    }

    /// Parses `text` with the type's `FromStr`.
    ///
    /// Returns `None` if the capability is missing.
    #[inline]
    pub fn parse_text(&self, text: &str) -> Option<Result<Box<dyn Reflect>, String>> {
        self.traits.from_str.map(|f| f(text))
    }

    /// Adapts `value` to this type.
    ///
    /// A value of this type passes through, a value of the wrapped type of an
    /// `Option<T>` descriptor is wrapped in `Some`. Anything else is returned
    /// as the error.
    pub fn coerce(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        let value_id = value.reflect_type_info().ty_id();
        if value_id == self.ty_id {
            return Ok(value);
        }
        match &self.kind {
            TypeKind::Optional(info) if info.inner().ty_id() == value_id => info.wrap(value),
            _ => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::short_ident;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn idents_drop_module_and_generics() {
        assert_eq!(short_ident("alloc::vec::Vec<alloc::string::String>"), "Vec");
        assert_eq!(short_ident("u32"), "u32");
        assert_eq!(short_ident("my::Page"), "Page");
    }

    #[test]
    fn capabilities_of_primitives() {
        let info = u16::type_info();
        assert!(info.is_primitive());
        assert_eq!(info.display(&12_u16), Some(String::from("12")));
        assert!(info.parse_text("x").unwrap().is_err());
        // wrong type
        assert_eq!(info.display(&12_u8), None);
    }

    #[test]
    fn coerce_wraps_into_option() {
        let info = <Option<u8>>::type_info();
        let value = info.coerce(Box::new(3_u8)).unwrap();
        assert_eq!(value.downcast_ref::<Option<u8>>(), Some(&Some(3)));

        let value = info.coerce(Box::new(Some(4_u8))).unwrap();
        assert_eq!(value.downcast_ref::<Option<u8>>(), Some(&Some(4)));

        assert!(info.coerce(Box::new(3_i64)).is_err());
    }
}
