use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{StructInfo, TypeInfo, TypeKind, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::utils::IndexMap;

/// Slot access of a struct.
///
/// Indices follow the order of [`StructInfo::fields`], or the insertion
/// order for a [`DynamicStruct`].
pub trait Struct: Reflect {
    /// Returns the value of the slot at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the mutable value of the slot at `index`.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Number of slots.
    fn field_len(&self) -> usize;
}

impl dyn Struct {
    /// The descriptor of the underlying struct.
    ///
    /// `None` for a [`DynamicStruct`].
    #[inline]
    pub fn struct_info(&self) -> Option<&'static StructInfo> {
        self.reflect_type_info().as_struct()
    }

    /// Returns the value of the slot named `name`.
    pub fn field(&self, name: &str) -> Option<&dyn Reflect> {
        let index = self.struct_info()?.field(name)?.index();
        self.field_at(index)
    }

    /// Returns the mutable value of the slot named `name`.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        let index = self.struct_info()?.field(name)?.index();
        self.field_at_mut(index)
    }
}

// -----------------------------------------------------------------------------
// DynamicStruct

/// A property bag: named slots that are added at runtime.
///
/// Entries keep their insertion order, re-inserting a name replaces the
/// value in place. A bag is walked like a struct, except that every entry
/// is treated as an undecorated slot: nested structs and bags are grouped,
/// everything else uses the strategy resolved for the entry's type.
///
/// Parsing only writes entries that already exist, a bag never grows from
/// query text.
///
/// # Examples
///
/// ```
/// use vc_qs::ops::DynamicStruct;
///
/// let mut bag = DynamicStruct::new();
/// bag.extend("page", 2_u32);
/// bag.extend("term", String::from("rust"));
/// bag.extend("page", 3_u32);
///
/// assert_eq!(bag.field_len(), 2);
/// assert_eq!(bag.index_of("term"), Some(1));
/// assert_eq!(bag.get("page").unwrap().downcast_ref::<u32>(), Some(&3));
/// ```
#[derive(Default)]
pub struct DynamicStruct {
    fields: IndexMap<Cow<'static, str>, Box<dyn Reflect>>,
}

impl DynamicStruct {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under `name`, or replaces the value already there.
    pub fn extend_boxed(&mut self, name: impl Into<Cow<'static, str>>, value: Box<dyn Reflect>) {
        self.fields.insert(name.into(), value);
    }

    /// Boxes `value` and calls [`extend_boxed`](Self::extend_boxed).
    #[inline]
    pub fn extend<T: Reflect>(&mut self, name: impl Into<Cow<'static, str>>, value: T) {
        self.extend_boxed(name, Box::new(value));
    }

    /// Removes the entry `name`, keeping the order of the rest.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Reflect>> {
        self.fields.shift_remove(name)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    #[inline]
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.fields.get_index(index).map(|(name, _)| &**name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&dyn Reflect> {
        self.fields.get(name).map(|value| &**value)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        self.fields.get_mut(name).map(|value| &mut **value)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &dyn Reflect)> {
        self.fields.iter().map(|(name, value)| (&**name, &**value))
    }

    /// The entry at `index`, its name and its mutable value.
    pub(crate) fn entry_at_mut(&mut self, index: usize) -> Option<(&str, &mut dyn Reflect)> {
        self.fields
            .get_index_mut(index)
            .map(|(name, value)| (&**name, &mut **value))
    }
}

impl<N: Into<Cow<'static, str>>> FromIterator<(N, Box<dyn Reflect>)> for DynamicStruct {
    fn from_iter<T: IntoIterator<Item = (N, Box<dyn Reflect>)>>(fields: T) -> Self {
        let mut bag = Self::new();
        for (name, value) in fields {
            bag.extend_boxed(name, value);
        }
        bag
    }
}

impl fmt::Debug for DynamicStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicStruct")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Typed for DynamicStruct {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Dynamic).with_default::<Self>())
    }
}

impl Reflect for DynamicStruct {
    impl_reflect_cast_fn!(Struct, Struct);
}

impl Struct for DynamicStruct {
    #[inline]
    fn field_at(&self, index: usize) -> Option<&dyn Reflect> {
        self.fields.get_index(index).map(|(_, value)| &**value)
    }

    #[inline]
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.fields.get_index_mut(index).map(|(_, value)| &mut **value)
    }

    #[inline]
    fn field_len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{DynamicStruct, Struct};
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ReflectRef;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn entries_keep_their_first_position() {
        let mut bag: DynamicStruct = [
            ("a", Box::new(1_u8) as Box<dyn Reflect>),
            ("b", Box::new(String::from("x"))),
        ]
        .into_iter()
        .collect();
        bag.extend("a", 7_u8);

        assert_eq!(bag.name_at(0), Some("a"));
        assert_eq!(bag.field_at(0).unwrap().downcast_ref::<u8>(), Some(&7));
        assert!(bag.remove("a").is_some());
        assert_eq!(bag.index_of("b"), Some(0));
    }

    #[test]
    fn bags_are_viewed_as_structs() {
        let mut bag = DynamicStruct::new();
        bag.extend("n", 1_u8);
        let value: &dyn Reflect = &bag;

        assert!(DynamicStruct::type_info().is_dynamic());
        // no static slots to describe
        assert!(value.reflect_type_info().as_struct().is_none());
        let ReflectRef::Struct(view) = value.reflect_ref() else {
            panic!("bag is not viewed as a struct");
        };
        assert_eq!(view.field_len(), 1);

        *bag.get_mut("n").unwrap().downcast_mut::<u8>().unwrap() = 4;
        assert_eq!(bag.get("n").unwrap().downcast_ref::<u8>(), Some(&4));
    }
}
