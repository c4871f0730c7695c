use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, Ident};

use super::{FieldAttributes, QueryMeta};

/// A named field of a struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Position among the fields, the slot index.
    pub index: usize,
}

impl StructField<'_> {
    #[inline]
    pub fn ident(&self) -> Option<&Ident> {
        self.data.ident.as_ref()
    }

    /// Generates a `FieldInfo` construction.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// _path_::FieldInfo::new::<FieldType>("name").with_attributes(..)
    /// ```
    pub fn to_info_tokens(&self, vc_qs_path: &syn::Path) -> TokenStream {
        let field_info_ = crate::path::field_info_(vc_qs_path);
        let ty = &self.data.ty;
        let name = self.ident().map(ToString::to_string).unwrap_or_default();
        let with_attributes = self.attrs.get_expression_with(vc_qs_path);
        quote! {
            #field_info_::new::<#ty>(#name)
                #with_attributes
        }
    }
}

pub(crate) struct QueryStruct<'a> {
    pub meta: QueryMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

impl<'a> QueryStruct<'a> {
    #[inline]
    pub fn meta(&self) -> &QueryMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Generates the `TypeInfo` construction.
    pub fn to_info_tokens(&self) -> TokenStream {
        let vc_qs_path = self.meta.vc_qs_path();
        let type_info_ = crate::path::type_info_(vc_qs_path);
        let type_kind_ = crate::path::type_kind_(vc_qs_path);
        let struct_info_ = crate::path::struct_info_(vc_qs_path);

        let attrs = self.meta.attrs();
        let fields = self.fields.iter().map(|field| field.to_info_tokens(vc_qs_path));
        let explicit_only = attrs.explicit_only.map(|_| quote!(.with_explicit_only(true)));
        let companion = attrs
            .metadata
            .as_ref()
            .map(|ty| quote!(.with_companion::<#ty>()));
        let extend_build = attrs.extend_build.map(|_| quote!(.with_extended_build::<Self>()));
        let extend_parse = attrs.extend_parse.map(|_| quote!(.with_extended_parse::<Self>()));

        let with_generics = self.meta.with_generics_expression();
        let with_traits = self.meta.with_traits_expression();

        quote! {
            #type_info_::new::<Self>(#type_kind_::Struct(
                #struct_info_::new::<Self>(&[ #(#fields),* ])
                    #explicit_only
                    #companion
                    #extend_build
                    #extend_parse
            ))
            #with_generics
            #with_traits
        }
    }
}
