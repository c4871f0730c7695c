//! `#[query(...)]` on types, fields and variants.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, LitStr, Meta, Type};

use crate::QUERY_ATTRIBUTE_NAME;

fn query_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(QUERY_ATTRIBUTE_NAME))
}

fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate query attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}

fn set_value<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate query attribute"));
    }
    *slot = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[query(...)]` on a struct or enum.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub display: Option<Span>,
    pub from_str: Option<Span>,
    pub explicit_only: Option<Span>,
    pub extend_build: Option<Span>,
    pub extend_parse: Option<Span>,
    pub value_names: Option<Span>,
    pub metadata: Option<Type>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in query_attrs(attrs) {
            if let Meta::Path(_) = attr.meta {
                continue;
            }
            attr.parse_nested_meta(|meta| out.parse_meta(&meta))?;
        }
        Ok(out)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a query attribute name"));
        };
        match ident.to_string().as_str() {
            "default" => set_flag(&mut self.default, meta),
            "display" => set_flag(&mut self.display, meta),
            "from_str" => set_flag(&mut self.from_str, meta),
            "explicit_only" => set_flag(&mut self.explicit_only, meta),
            "extend_build" => set_flag(&mut self.extend_build, meta),
            "extend_parse" => set_flag(&mut self.extend_parse, meta),
            "value_names" => set_flag(&mut self.value_names, meta),
            "metadata" => {
                let ty: Type = meta.value()?.parse()?;
                set_value(&mut self.metadata, ty, meta)
            }
            _ => Err(meta.error(
                "unknown type attribute, expected one of `default`, `display`, `from_str`, \
                 `explicit_only`, `extend_build`, `extend_parse`, `value_names`, `metadata`",
            )),
        }
    }

    /// Struct-only attributes used on an enum, and the reverse.
    pub fn check_struct(&self) -> syn::Result<()> {
        match self.value_names {
            Some(span) => Err(syn::Error::new(span, "`value_names` only applies to enums")),
            None => Ok(()),
        }
    }

    pub fn check_enum(&self) -> syn::Result<()> {
        let struct_only = [
            (self.explicit_only, "explicit_only"),
            (self.extend_build, "extend_build"),
            (self.extend_parse, "extend_parse"),
        ];
        for (span, name) in struct_only {
            if let Some(span) = span {
                let message = format!("`{name}` only applies to structs");
                return Err(syn::Error::new(span, message));
            }
        }
        if let Some(ty) = &self.metadata {
            return Err(syn::Error::new(ty.span(), "`metadata` only applies to structs"));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[query(...)]` on a named field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub declared: bool,
    pub rename: Option<LitStr>,
    pub strategy: Option<Expr>,
    pub skip_build: Option<Span>,
    pub skip_parse: Option<Span>,
    pub instantiate: Option<Span>,
    pub read_only: Option<Span>,
    pub write_only: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in query_attrs(attrs) {
            out.declared = true;
            if let Meta::Path(_) = attr.meta {
                continue;
            }
            attr.parse_nested_meta(|meta| out.parse_meta(&meta))?;
        }
        Ok(out)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a query attribute name"));
        };
        match ident.to_string().as_str() {
            "rename" => {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new(name.span(), "parameter names cannot be empty"));
                }
                set_value(&mut self.rename, name, meta)
            }
            "strategy" => {
                let expr: Expr = meta.value()?.parse()?;
                set_value(&mut self.strategy, expr, meta)
            }
            "skip" => {
                set_flag(&mut self.skip_build, meta)?;
                set_flag(&mut self.skip_parse, meta)
            }
            "skip_build" => set_flag(&mut self.skip_build, meta),
            "skip_parse" => set_flag(&mut self.skip_parse, meta),
            "instantiate" => set_flag(&mut self.instantiate, meta),
            "read_only" => set_flag(&mut self.read_only, meta),
            "write_only" => set_flag(&mut self.write_only, meta),
            _ => Err(meta.error(
                "unknown field attribute, expected one of `rename`, `strategy`, `skip`, \
                 `skip_build`, `skip_parse`, `instantiate`, `read_only`, `write_only`",
            )),
        }
    }

    /// Generates the `.with_attributes(..)` call of a `FieldInfo`.
    ///
    /// Similar to following:
    ///
    /// ```ignore
    /// .with_attributes(
    ///     _path_::SlotAttributes::new()
    ///         .with_flags(_path_::SlotFlags::DECLARED)
    ///         .with_rename("q")
    ///         .with_strategy(|| Strategy::BooleanAsBit)
    /// )
    /// ```
    pub fn get_expression_with(&self, vc_qs_path: &syn::Path) -> TokenStream {
        if !self.declared {
            return TokenStream::new();
        }
        let slot_attributes_ = crate::path::slot_attributes_(vc_qs_path);
        let slot_flags_ = crate::path::slot_flags_(vc_qs_path);

        let switches = [
            (self.skip_build.is_some(), quote!(SKIP_BUILD)),
            (self.skip_parse.is_some(), quote!(SKIP_PARSE)),
            (self.instantiate.is_some(), quote!(INSTANTIATE)),
            (self.read_only.is_some(), quote!(READ_ONLY)),
            (self.write_only.is_some(), quote!(WRITE_ONLY)),
        ];
        let flags = switches
            .into_iter()
            .filter(|(on, _)| *on)
            .map(|(_, flag)| quote!(.with_flags(#slot_flags_::#flag)));
        let rename = self.rename.as_ref().map(|name| quote!(.with_rename(#name)));
        let strategy = self
            .strategy
            .as_ref()
            .map(|expr| quote!(.with_strategy(|| #expr)));

        quote! {
            .with_attributes(
                #slot_attributes_::new()
                    .with_flags(#slot_flags_::DECLARED)
                    #(#flags)*
                    #rename
                    #strategy
            )
        }
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// `#[query(...)]` on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub name: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in query_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    set_value(&mut out.name, name, &meta)
                } else {
                    Err(meta.error("unknown variant attribute, expected `name`"))
                }
            })?;
        }
        Ok(out)
    }
}
