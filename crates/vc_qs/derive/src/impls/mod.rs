// -----------------------------------------------------------------------------
// Modules

mod enum_kind;
mod struct_kind;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use enum_kind::impl_enum;
use struct_kind::impl_struct;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::QueryDerive;

/// Provided for `#[derive(Queryable)]`.
pub(crate) fn match_query_impls(ast: DeriveInput) -> TokenStream {
    let query_derive = match QueryDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let query_impls = match query_derive {
        QueryDerive::Struct(info) => impl_struct(&info),
        QueryDerive::Enum(info) => impl_enum(&info),
    };

    TokenStream::from(quote! {
        const _: () = {
            #query_impls
        };
    })
}
