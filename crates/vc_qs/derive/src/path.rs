//! Paths of the engine items named by generated code.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) use crate::manifest::vc_qs;

#[inline(always)]
pub(crate) fn macro_utils_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::__macro_exports::macro_utils
    }
}

#[inline(always)]
pub(crate) fn reflect_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::Reflect
    }
}

// -----------------------------------------------------------------------------
// info

#[inline(always)]
pub(crate) fn typed_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn type_kind_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::TypeKind
    }
}

#[inline(always)]
pub(crate) fn struct_info_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn field_info_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::FieldInfo
    }
}

#[inline(always)]
pub(crate) fn slot_attributes_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::SlotAttributes
    }
}

#[inline(always)]
pub(crate) fn slot_flags_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::SlotFlags
    }
}

#[inline(always)]
pub(crate) fn enum_info_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn variant_info_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::VariantInfo
    }
}

#[inline(always)]
pub(crate) fn generics_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::Generics
    }
}

#[inline(always)]
pub(crate) fn generic_definition_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::info::GenericDefinition
    }
}

// -----------------------------------------------------------------------------
// impls

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::impls::GenericTypeInfoCell
    }
}

// -----------------------------------------------------------------------------
// ops

#[inline(always)]
pub(crate) fn reflect_ref_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn reflect_mut_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::ops::ReflectMut
    }
}

#[inline(always)]
pub(crate) fn struct_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn enum_(vc_qs_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_qs_path::ops::Enum
    }
}
