use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::derive_data::QueryStruct;
use crate::impls::{impl_trait_reflect, impl_trait_typed};

/// Implements `Typed`, `Reflect` and `Struct` for a struct with named
/// fields.
pub(crate) fn impl_struct(info: &QueryStruct) -> TokenStream {
    let meta = info.meta();
    let vc_qs_path = meta.vc_qs_path();
    let reflect_ = crate::path::reflect_(vc_qs_path);
    let struct_ = crate::path::struct_(vc_qs_path);

    let kind = Ident::new("Struct", Span::call_site());
    let typed_impl = impl_trait_typed(meta, info.to_info_tokens());
    let reflect_impl = impl_trait_reflect(meta, &kind, &kind);

    let indices: Vec<usize> = info.fields().iter().map(|field| field.index).collect();
    let idents: Vec<_> = info.fields().iter().map(|field| field.ident()).collect();
    let field_len = info.fields().len();

    let ident = meta.ident();
    let generics = meta.impl_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #typed_impl

        #reflect_impl

        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(&self.#idents), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(&mut self.#idents), )*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
