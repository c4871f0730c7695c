use alloc::boxed::Box;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// GenericDefinition

/// Identity of a generic type definition, e.g. `Vec` in `Vec<u8>`.
///
/// Two instantiations of the same definition compare equal here, which is
/// what registry entries for a whole family of types are keyed by.
///
/// # Examples
///
/// ```
/// use vc_qs::info::{GenericDefinition, Typed};
///
/// let a = <Vec<u8>>::type_info().generics().unwrap().definition();
/// let b = <Vec<String>>::type_info().generics().unwrap().definition();
/// assert_eq!(a, b);
/// assert_eq!(a, GenericDefinition::VEC);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenericDefinition {
    path: &'static str,
}

impl GenericDefinition {
    /// `core::option::Option`
    pub const OPTION: Self = Self::new("core::option::Option");
    /// `alloc::vec::Vec`
    pub const VEC: Self = Self::new("alloc::vec::Vec");
    /// `alloc::collections::VecDeque`
    pub const VEC_DEQUE: Self = Self::new("alloc::collections::VecDeque");
    /// [`Lazy`](crate::impls::Lazy)
    pub const LAZY: Self = Self::new("vc_qs::impls::Lazy");

    /// Creates a definition from the path of the type without its arguments.
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }
}

// -----------------------------------------------------------------------------
// Generics

/// The instantiated generic shape of a type: its definition and the ordered
/// type arguments.
#[derive(Clone, Debug)]
pub struct Generics {
    definition: GenericDefinition,
    arguments: Box<[fn() -> &'static TypeInfo]>,
}

impl Generics {
    #[inline]
    pub fn new(definition: GenericDefinition, arguments: &[fn() -> &'static TypeInfo]) -> Self {
        Self {
            definition,
            arguments: arguments.into(),
        }
    }

    #[inline]
    pub const fn definition(&self) -> GenericDefinition {
        self.definition
    }

    /// Number of type arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[inline]
    pub fn argument(&self, index: usize) -> Option<&'static TypeInfo> {
        self.arguments.get(index).map(|f| f())
    }

    #[inline]
    pub fn arguments(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.arguments.iter().map(|f| f())
    }
}
