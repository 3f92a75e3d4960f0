//! Derive macro for catalog table descriptions.
//!
//! This crate provides `#[derive(Table)]`, a static alternative to
//! reflecting a table's columns from `information_schema`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta};

/// Implements `oxide_query_core::meta::TableDefinition` for a struct.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name (optional,
///   defaults to snake_case of struct name)
/// - `#[table(schema = "schema_name")]` - Qualifies the table with a schema
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to field name)
/// - `#[column(skip)]` - Leaves the field out of the table
///
/// # Generated Items
///
/// For a struct `User`, this macro generates:
///
/// - `impl TableDefinition for User`, so `catalog.register::<User>()` works
/// - `User::TABLE_NAME` and `User::COLUMNS` constants
#[proc_macro_derive(Table, attributes(table, column))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_table_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_table_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table = parse_table_attrs(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Table derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Table derive only supports structs",
            ));
        }
    };

    let mut column_names: Vec<String> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = parse_column_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let column_name = attrs.name.unwrap_or_else(|| field_name.to_string());
        if column_names.contains(&column_name) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column `{column_name}`"),
            ));
        }
        column_names.push(column_name);
    }

    let table_name = &table.name;
    let in_schema = table.schema.as_ref().map(|schema| {
        quote! { .in_schema(#schema) }
    });
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::oxide_query_core::meta::TableDefinition
            for #struct_name #ty_generics #where_clause
        {
            fn table_schema() -> ::oxide_query_core::meta::TableSchema {
                ::oxide_query_core::meta::TableSchema::new(#table_name)
                    #in_schema
                    .columns([#(#column_names),*])
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// SQL table name.
            pub const TABLE_NAME: &'static str = #table_name;

            /// SQL column names in field order.
            pub const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
        }
    };

    Ok(expanded)
}

struct TableAttrs {
    name: String,
    schema: Option<String>,
}

struct ColumnAttrs {
    name: Option<String>,
    skip: bool,
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn parse_table_attrs(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<TableAttrs> {
    let mut result = TableAttrs {
        name: to_snake_case(&struct_name.to_string()),
        schema: None,
    };
    for attr in attrs {
        if attr.path().is_ident("table") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    result.name = string_value(&meta)?;
                } else if meta.path.is_ident("schema") {
                    result.schema = Some(string_value(&meta)?);
                } else {
                    return Err(meta.error("unsupported table attribute"));
                }
                Ok(())
            })?;
        }
    }
    Ok(result)
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs {
        name: None,
        skip: false,
    };

    for attr in attrs {
        if attr.path().is_ident("column") {
            // Handle empty attribute like #[column]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    result.name = Some(string_value(&meta)?);
                } else {
                    return Err(meta.error("unsupported column attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
