use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::QueryMeta;

/// Generate implementation code for `Typed`.
///
/// For param `type_info_tokens`, See the `to_info_tokens` of
/// [`QueryStruct`] and [`QueryEnum`].
///
/// [`QueryStruct`]: crate::derive_data::QueryStruct
/// [`QueryEnum`]: crate::derive_data::QueryEnum
pub(crate) fn impl_trait_typed(meta: &QueryMeta, type_info_tokens: TokenStream) -> TokenStream {
    let vc_qs_path = meta.vc_qs_path();
    let typed_ = crate::path::typed_(vc_qs_path);
    let type_info_ = crate::path::type_info_(vc_qs_path);

    let cell_tokens = meta.type_info_cell(type_info_tokens);

    let ident = meta.ident();
    let generics = meta.impl_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #cell_tokens
            }
        }
    }
}
