use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::derive_data::{EnumVariant, QueryEnum};
use crate::impls::{impl_trait_reflect, impl_trait_typed};

/// Implements `Typed`, `Reflect` and `Enum` for a fieldless enum.
///
/// Enums are leaves, so the mutable view is the plain value.
pub(crate) fn impl_enum(info: &QueryEnum) -> TokenStream {
    let meta = info.meta();
    let enum_ = crate::path::enum_(meta.vc_qs_path());

    let typed_impl = impl_trait_typed(meta, info.to_info_tokens());
    let reflect_impl = impl_trait_reflect(
        meta,
        &Ident::new("Enum", Span::call_site()),
        &Ident::new("Value", Span::call_site()),
    );

    let indices = 0..info.variants().len();
    let idents = info.variants().iter().map(EnumVariant::ident);
    let ident = meta.ident();
    let range_checks = info
        .variants()
        .iter()
        .map(|variant| variant.to_range_check_tokens(ident));

    quote! {
        #( #range_checks )*

        #typed_impl

        #reflect_impl

        impl #enum_ for #ident {
            fn variant_index(&self) -> usize {
                match self {
                    #( Self::#idents => #indices, )*
                }
            }
        }
    }
}
