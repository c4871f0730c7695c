use crate::Reflect;
use crate::info::VariantInfo;

/// The active variant of a fieldless enum.
pub trait Enum: Reflect {
    /// Position of the active variant in [`EnumInfo::variants`](crate::info::EnumInfo::variants).
    fn variant_index(&self) -> usize;
}

impl dyn Enum {
    /// The descriptor of the active variant.
    pub fn variant_info(&self) -> Option<&'static VariantInfo> {
        self.reflect_type_info()
            .as_enum()?
            .variant_at(self.variant_index())
    }
}
