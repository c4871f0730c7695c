use alloc::boxed::Box;

use crate::Reflect;

// -----------------------------------------------------------------------------
// VariantInfo

/// A unit variant of an enum.
///
/// The derive rejects discriminants that are not exact as `i64`:
///
/// ```compile_fail
/// use vc_qs::derive::Queryable;
///
/// #[derive(Queryable)]
/// #[repr(u64)]
/// enum Wide {
///     Small = 1,
///     Huge = u64::MAX,
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct VariantInfo {
    name: &'static str,
    value_name: Option<&'static str>,
    discriminant: i64,
}

impl VariantInfo {
    #[inline]
    pub const fn new(name: &'static str, discriminant: i64) -> Self {
        Self {
            name,
            value_name: None,
            discriminant,
        }
    }

    /// Sets the name used in query text by the named strategy.
    #[inline]
    pub const fn with_value_name(mut self, value_name: &'static str) -> Self {
        self.value_name = Some(value_name);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn value_name(&self) -> Option<&'static str> {
        self.value_name
    }

    #[inline]
    pub const fn discriminant(&self) -> i64 {
        self.discriminant
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// Descriptor of a fieldless enum.
///
/// # Examples
///
/// ```
/// use vc_qs::info::{EnumInfo, VariantInfo};
///
/// let info = EnumInfo::new(
///     &[
///         VariantInfo::new("Asc", 0).with_value_name("asc"),
///         VariantInfo::new("Desc", 1).with_value_name("desc"),
///     ],
///     |_| None,
/// )
/// .with_value_names(true);
///
/// assert!(info.uses_value_names());
/// assert_eq!(info.position_by_value_name("desc"), Some(1));
/// assert_eq!(info.position_by_discriminant(0), Some(0));
/// ```
#[derive(Debug)]
pub struct EnumInfo {
    variants: Box<[VariantInfo]>,
    value_names: bool,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    /// `from_index` constructs the variant at a position of `variants`.
    #[inline]
    pub fn new(
        variants: &[VariantInfo],
        from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            variants: variants.into(),
            value_names: false,
            from_index,
        }
    }

    /// Opts into value names, see [`Strategy::EnumAsName`](crate::strategy::Strategy::EnumAsName).
    #[inline]
    pub fn with_value_names(mut self, value_names: bool) -> Self {
        self.value_names = value_names;
        self
    }

    #[inline]
    pub const fn uses_value_names(&self) -> bool {
        self.value_names
    }

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name() == name)
    }

    pub fn position_by_value_name(&self, value_name: &str) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.value_name() == Some(value_name))
    }

    pub fn position_by_discriminant(&self, discriminant: i64) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.discriminant() == discriminant)
    }

    /// The first variant without a value name.
    pub fn unnamed_variant(&self) -> Option<&VariantInfo> {
        self.variants.iter().find(|v| v.value_name().is_none())
    }

    /// Constructs the variant at `index`.
    #[inline]
    pub fn instantiate(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }
}
