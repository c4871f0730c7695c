use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Variant};

use super::{QueryMeta, VariantAttributes};

/// A unit variant.
pub(crate) struct EnumVariant<'a> {
    pub data: &'a Variant,
    pub attrs: VariantAttributes,
}

impl EnumVariant<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        &self.data.ident
    }

    /// Generates a `VariantInfo` construction.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// _path_::VariantInfo::new("Desc", Order::Desc as i64).with_value_name("desc")
    /// ```
    pub fn to_info_tokens(&self, enum_ident: &Ident, vc_qs_path: &syn::Path) -> TokenStream {
        let variant_info_ = crate::path::variant_info_(vc_qs_path);
        let ident = self.ident();
        let name = ident.to_string();
        let value_name = self
            .attrs
            .name
            .as_ref()
            .map(|value_name| quote!(.with_value_name(#value_name)));
        quote! {
            #variant_info_::new(#name, #enum_ident::#ident as i64)
                #value_name
        }
    }

    /// Generates a compile time check that the discriminant is exact as `i64`.
    ///
    /// Discriminants of `#[repr(u64)]` or wider enums may not be.
    pub fn to_range_check_tokens(&self, enum_ident: &Ident) -> TokenStream {
        let ident = self.ident();
        let message = format!("discriminant of `{enum_ident}::{ident}` does not fit in `i64`");
        quote! {
            const _: () = ::core::assert!(
                (#enum_ident::#ident as ::core::primitive::i128)
                    >= (::core::primitive::i64::MIN as ::core::primitive::i128)
                    && (#enum_ident::#ident as ::core::primitive::i128)
                        <= (::core::primitive::i64::MAX as ::core::primitive::i128),
                #message
            );
        }
    }
}

pub(crate) struct QueryEnum<'a> {
    pub meta: QueryMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

impl<'a> QueryEnum<'a> {
    #[inline]
    pub fn meta(&self) -> &QueryMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[EnumVariant<'a>] {
        &self.variants
    }

    /// Generates the `TypeInfo` construction, including the constructor
    /// of variants by position.
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_qs_path = self.meta.vc_qs_path();
        let type_info_ = crate::path::type_info_(vc_qs_path);
        let type_kind_ = crate::path::type_kind_(vc_qs_path);
        let enum_info_ = crate::path::enum_info_(vc_qs_path);
        let reflect_ = crate::path::reflect_(vc_qs_path);
        let macro_utils_ = crate::path::macro_utils_(vc_qs_path);

        let enum_ident = self.meta.ident();
        let variants = self
            .variants
            .iter()
            .map(|variant| variant.to_info_tokens(enum_ident, vc_qs_path));
        let indices = 0..self.variants.len();
        let idents = self.variants.iter().map(EnumVariant::ident);
        let value_names = self
            .meta
            .attrs()
            .value_names
            .map(|_| quote!(.with_value_names(true)));
        let with_traits = self.meta.with_traits_expression();

        quote! {
            fn from_index(
                index: usize,
            ) -> ::core::option::Option<#macro_utils_::Box<dyn #reflect_>> {
                match index {
                    #( #indices => ::core::option::Option::Some(
                        #macro_utils_::Box::new(#enum_ident::#idents)
                    ), )*
                    _ => ::core::option::Option::None,
                }
            }

            #type_info_::new::<Self>(#type_kind_::Enum(
                #enum_info_::new(&[ #(#variants),* ], from_index)
                    #value_names
            ))
            #with_traits
        }
    }
}
