use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::derive_data::QueryMeta;

/// Generate implementation code for `Reflect`.
///
/// `ref_kind` / `mut_kind` name the variants of `ReflectRef` / `ReflectMut`
/// returned for the type.
pub(crate) fn impl_trait_reflect(
    meta: &QueryMeta,
    ref_kind: &Ident,
    mut_kind: &Ident,
) -> TokenStream {
    let vc_qs_path = meta.vc_qs_path();
    let reflect_ = crate::path::reflect_(vc_qs_path);
    let typed_ = crate::path::typed_(vc_qs_path);
    let reflect_ref_ = crate::path::reflect_ref_(vc_qs_path);
    let reflect_mut_ = crate::path::reflect_mut_(vc_qs_path);
    let macro_utils_ = crate::path::macro_utils_(vc_qs_path);

    let ident = meta.ident();
    let generics = meta.impl_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            fn set(
                &mut self,
                value: #macro_utils_::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), #macro_utils_::Box<dyn #reflect_>> {
                *self = <Self as #typed_>::from_boxed(value)?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#ref_kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#mut_kind(self)
            }
        }
    }
}
