use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use super::{
    EnumVariant, FieldAttributes, QueryEnum, QueryMeta, QueryStruct, StructField, TypeAttributes,
    VariantAttributes,
};

/// The derive input, sorted by item kind.
pub(crate) enum QueryDerive<'a> {
    Struct(QueryStruct<'a>),
    Enum(QueryEnum<'a>),
}

impl<'a> QueryDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        match &input.data {
            Data::Struct(data) => {
                attrs.check_struct()?;
                let fields = match &data.fields {
                    Fields::Named(fields) => fields
                        .named
                        .iter()
                        .enumerate()
                        .map(|(index, data)| {
                            Ok(StructField {
                                data,
                                attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                                index,
                            })
                        })
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new(
                            fields.span(),
                            "`Queryable` supports structs with named fields only",
                        ));
                    }
                };
                let meta = QueryMeta::new(attrs, &input.ident, &input.generics);
                Ok(Self::Struct(QueryStruct { meta, fields }))
            }
            Data::Enum(data) => {
                attrs.check_enum()?;
                if !input.generics.params.is_empty() {
                    return Err(syn::Error::new(
                        input.generics.span(),
                        "`Queryable` enums cannot be generic",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Queryable` enums need at least one variant",
                    ));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| {
                        if !matches!(variant.fields, Fields::Unit) {
                            return Err(syn::Error::new(
                                variant.fields.span(),
                                "`Queryable` enums must be fieldless",
                            ));
                        }
                        Ok(EnumVariant {
                            data: variant,
                            attrs: VariantAttributes::parse_attrs(&variant.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                let meta = QueryMeta::new(attrs, &input.ident, &input.generics);
                Ok(Self::Enum(QueryEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Queryable` cannot be derived for unions",
            )),
        }
    }
}
