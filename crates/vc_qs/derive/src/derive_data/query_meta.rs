use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident, Path, parse_quote};

use super::TypeAttributes;

/// What every derived item shares: its name, generics, type attributes and
/// the path of the engine crate.
pub(crate) struct QueryMeta<'a> {
    vc_qs_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> QueryMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            vc_qs_path: crate::path::vc_qs(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn vc_qs_path(&self) -> &Path {
        &self.vc_qs_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Generics of the impl blocks, every type parameter bound by
    /// `Typed + Reflect`.
    pub fn impl_generics(&self) -> Generics {
        let typed_ = crate::path::typed_(&self.vc_qs_path);
        let reflect_ = crate::path::reflect_(&self.vc_qs_path);

        let mut generics = self.generics.clone();
        let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause
                .predicates
                .push(parse_quote!(#param: #typed_ + #reflect_));
        }
        generics
    }

    /// Generates the body of `Typed::type_info`.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// static CELL: _path_::NonGenericTypeInfoCell = _path_::NonGenericTypeInfoCell::new();
    /// CELL.get_or_init(|| { /* info_tokens */ })
    /// ```
    pub fn type_info_cell(&self, info_tokens: TokenStream) -> TokenStream {
        if self.is_generic() {
            let info_cell = crate::path::generic_type_info_cell_(&self.vc_qs_path);
            quote! {
                static CELL: #info_cell = #info_cell::new();
                CELL.get_or_insert::<Self>(|| {
                    #info_tokens
                })
            }
        } else {
            let info_cell = crate::path::non_generic_type_info_cell_(&self.vc_qs_path);
            quote! {
                static CELL: #info_cell = #info_cell::new();
                CELL.get_or_init(|| {
                    #info_tokens
                })
            }
        }
    }

    /// Generates the capability calls on `TypeInfo`.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// .with_default::<Self>()
    /// .with_display::<Self>()
    /// ```
    pub fn with_traits_expression(&self) -> TokenStream {
        let default = self.attrs.default.map(|_| quote!(.with_default::<Self>()));
        let display = self.attrs.display.map(|_| quote!(.with_display::<Self>()));
        let from_str = self.attrs.from_str.map(|_| quote!(.with_from_str::<Self>()));
        quote! {
            #default
            #display
            #from_str
        }
    }

    /// Generates the generics of a generic type, identified by its module
    /// path and name.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// .with_generics(
    ///     _path_::Generics::new(
    ///         _path_::GenericDefinition::new(concat!(module_path!(), "::Page")),
    ///         &[<T as _path_::Typed>::type_info],
    ///     )
    /// )
    /// ```
    pub fn with_generics_expression(&self) -> TokenStream {
        if !self.is_generic() {
            return TokenStream::new();
        }
        let typed_ = crate::path::typed_(&self.vc_qs_path);
        let generics_ = crate::path::generics_(&self.vc_qs_path);
        let generic_definition_ = crate::path::generic_definition_(&self.vc_qs_path);

        let name = format!("::{}", self.ident);
        let params = self.generics.type_params().map(|param| &param.ident);
        quote! {
            .with_generics(
                #generics_::new(
                    #generic_definition_::new(::core::concat!(::core::module_path!(), #name)),
                    &[ #( <#params as #typed_>::type_info ),* ],
                )
            )
        }
    }
}
