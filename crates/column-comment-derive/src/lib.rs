//! Derive macro for column comment statements.
//!
//! This crate provides `#[derive(ColumnComment)]`, which reads table naming
//! and per-field comment attributes from a struct and generates the
//! matching `ALTER TABLE ... COMMENT` statements as constants.

use column_comment_core::case::{comment_ident, to_snake_case};
use std::collections::HashMap;

use column_comment_core::{
    CollectingSink, FieldDescriptor, Generator, LengthOverride, Severity, TableDescriptor,
    TypeName,
};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, Ident, Lit, LitInt, LitStr,
    Meta, PathArguments, Type, parse_macro_input,
};

/// Derives `CommentSource` for a struct and generates a `{Struct}Comment`
/// type holding one statement constant per documented field.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - SQL table name (optional)
/// - `#[entity(name = "entity_name")]` - entity name, used when no table name
///   is given (optional, defaults to the struct name)
///
/// # Field Attributes
///
/// - `#[comment = "text"]` or `#[comment("text")]` - the column comment;
///   fields without it are ignored
/// - `#[comment]` - use the field's doc comment as the column comment
/// - `#[column(name = "column_name")]` - SQL column name (optional,
///   defaults to the snake_case field name)
/// - `#[column(nullable = false)]` or `#[column(not_null)]` - NOT NULL column
/// - `#[column(length = 100)]` - explicit length
/// - `#[lob]` - large text, stored as `LONGTEXT`
/// - `#[enumerated]` - enumeration stored by name as `VARCHAR`
///
/// # Generated Items
///
/// For a struct `User`, this macro generates:
///
/// - `impl CommentSource for User`
/// - `UserComment` with a `&'static str` constant per field whose type
///   resolves, named after the column in SCREAMING_SNAKE_CASE
/// - `impl CommentTable for UserComment`
///
/// A field whose type cannot be mapped is a compile error spanned on its
/// type. The remaining constants are still generated.
///
/// ```compile_fail
/// use column_comment_derive::ColumnComment;
///
/// pub struct Address;
///
/// #[derive(ColumnComment)]
/// pub struct Customer {
///     #[comment = "home address"]
///     pub address: Address,
/// }
/// ```
///
/// Two columns that would share a constant name are rejected as well:
///
/// ```compile_fail
/// use column_comment_derive::ColumnComment;
///
/// #[derive(ColumnComment)]
/// pub struct Customer {
///     #[comment = "login"]
///     #[column(name = "user-name")]
///     pub login: String,
///     #[comment = "display name"]
///     pub user_name: String,
/// }
/// ```
#[proc_macro_derive(ColumnComment, attributes(table, entity, column, comment, lob, enumerated))]
pub fn derive_column_comment(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_column_comment_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_column_comment_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let table = TableDescriptor::resolve(
        &struct_name.to_string(),
        get_name_attr(&input.attrs, "entity")?.as_deref(),
        get_name_attr(&input.attrs, "table")?.as_deref(),
    );

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "ColumnComment derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "ColumnComment derive only supports structs",
            ));
        }
    };

    // Collect documented fields
    let mut field_infos: Vec<FieldInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let Some(comment) = parse_comment(&field.attrs)? else {
            continue;
        };
        if comment.trim().is_empty() {
            continue;
        }
        let column_attrs = parse_column_attrs(&field.attrs)?;
        let type_name = rust_type_name(&field.ty);

        let mut descriptor =
            FieldDescriptor::new(field_name.to_string(), TypeName::parse(&type_name), comment)
                .nullable(column_attrs.nullable)
                .length(LengthOverride::from_option(column_attrs.length));
        if let Some(name) = column_attrs.name {
            descriptor = descriptor.column_name(name);
        }
        if has_flag(&field.attrs, "lob") {
            descriptor = descriptor.large_text();
        }
        if has_flag(&field.attrs, "enumerated") {
            descriptor = descriptor.enumerated();
        }

        if let Some(other) = field_infos
            .iter()
            .find(|f| f.descriptor.column() == descriptor.column())
        {
            return Err(syn::Error::new_spanned(
                field_name,
                format!(
                    "column `{}` is already used by field `{}`",
                    descriptor.column(),
                    other.descriptor.name
                ),
            ));
        }

        field_infos.push(FieldInfo {
            field_name: field_name.clone(),
            ty: field.ty.clone(),
            type_name,
            descriptor,
        });
    }

    let generator = Generator::mysql();
    let sink = CollectingSink::new();

    // Generate statement constants for fields that resolve
    let mut constants: Vec<TokenStream2> = Vec::new();
    let mut all_entries: Vec<TokenStream2> = Vec::new();
    let mut const_owners: HashMap<String, &Ident> = HashMap::new();
    for info in &field_infos {
        let Some(entry) = generator.process_field(&table, &info.descriptor, &sink) else {
            continue;
        };
        let ident = comment_ident(&to_snake_case(entry.column()));
        if let Some(owner) = const_owners.get(&ident) {
            return Err(syn::Error::new_spanned(
                &info.field_name,
                format!("constant `{ident}` would also be generated for field `{owner}`"),
            ));
        }
        const_owners.insert(ident.clone(), &info.field_name);
        let const_name = format_ident!("{}", ident, span = info.field_name.span());
        let comment = entry.comment();
        let sql = &entry.sql;

        constants.push(quote! {
            #[doc = #comment]
            pub const #const_name: &'static str = #sql;
        });
        all_entries.push(quote! { (#comment, #sql) });
    }

    // Unsupported fields become compile errors next to the generated items
    let errors: Vec<TokenStream2> = sink
        .into_diagnostics()
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .filter_map(|d| {
            let info = field_infos.iter().find(|f| f.descriptor.name == d.field)?;
            Some(syn::Error::new_spanned(&info.ty, d.message).to_compile_error())
        })
        .collect();

    // Generate field descriptors
    let descriptors: Vec<TokenStream2> = field_infos
        .iter()
        .map(descriptor_tokens)
        .collect();

    let comment_struct_name = format_ident!("{}Comment", struct_name);
    let table_name = &table.name;
    let struct_doc = format!("Column comment statements for `{struct_name}`.");

    let expanded = quote! {
        impl ::column_comment_core::CommentSource for #struct_name {
            fn table() -> ::column_comment_core::TableDescriptor {
                ::column_comment_core::TableDescriptor::new(#table_name)
            }

            fn fields() -> ::std::vec::Vec<::column_comment_core::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }

        #[doc = #struct_doc]
        #[derive(Debug, Clone, Copy)]
        #vis struct #comment_struct_name;

        #[allow(non_upper_case_globals)]
        impl #comment_struct_name {
            #(#constants)*
        }

        impl ::column_comment_core::CommentTable for #comment_struct_name {
            const TABLE: &'static str = #table_name;
            const ALL: &'static [(&'static str, &'static str)] = &[#(#all_entries),*];
        }

        #(#errors)*
    };

    Ok(expanded)
}

struct FieldInfo {
    field_name: Ident,
    ty: Type,
    type_name: String,
    descriptor: FieldDescriptor,
}

struct ColumnAttrs {
    name: Option<String>,
    nullable: bool,
    length: Option<u32>,
}

fn descriptor_tokens(info: &FieldInfo) -> TokenStream2 {
    let d = &info.descriptor;
    let name = &d.name;
    let type_name = &info.type_name;
    let comment = &d.comment;
    let nullable = d.nullable;
    let large_text = d.hints.large_text;
    let enumerated = d.hints.enumerated;
    let column = match &d.column {
        Some(column) => quote! { ::std::option::Option::Some(::std::string::String::from(#column)) },
        None => quote! { ::std::option::Option::None },
    };
    let length = match d.length {
        LengthOverride::Explicit(n) => {
            quote! { ::column_comment_core::LengthOverride::Explicit(#n) }
        }
        LengthOverride::Legacy(n) => {
            quote! { ::column_comment_core::LengthOverride::Legacy(#n) }
        }
        LengthOverride::Absent => quote! { ::column_comment_core::LengthOverride::Absent },
    };

    quote! {
        ::column_comment_core::FieldDescriptor {
            name: ::std::string::String::from(#name),
            column: #column,
            declared_type: ::column_comment_core::TypeName::parse(#type_name),
            hints: ::column_comment_core::TypeHints {
                large_text: #large_text,
                enumerated: #enumerated,
            },
            length: #length,
            nullable: #nullable,
            comment: ::std::string::String::from(#comment),
        }
    }
}

fn get_name_attr(attrs: &[Attribute], attr_name: &str) -> syn::Result<Option<String>> {
    for attr in attrs {
        if attr.path().is_ident(attr_name) {
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }
            let mut name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: Expr = meta.value()?.parse()?;
                    if let Expr::Lit(lit) = value {
                        if let Lit::Str(s) = lit.lit {
                            name = Some(s.value());
                        }
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    // Keys owned by other derives sharing this attribute.
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
            if name.is_some() {
                return Ok(name);
            }
        }
    }
    Ok(None)
}

fn parse_comment(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if !attr.path().is_ident("comment") {
            continue;
        }
        let text = match &attr.meta {
            Meta::Path(_) => doc_comment(attrs).ok_or_else(|| {
                syn::Error::new_spanned(attr, "`#[comment]` requires a doc comment on the field")
            })?,
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(lit) => match &lit.lit {
                    Lit::Str(s) => s.value(),
                    other => {
                        return Err(syn::Error::new_spanned(other, "expected a string literal"));
                    }
                },
                other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
            },
            Meta::List(_) => attr.parse_args::<LitStr>()?.value(),
        };
        return Ok(Some(text));
    }
    Ok(None)
}

fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(lit) => match &lit.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs {
        name: None,
        nullable: true,
        length: None,
    };

    for attr in attrs {
        if attr.path().is_ident("column") {
            // Handle empty attribute like #[column]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("nullable") {
                    result.nullable = if meta.input.peek(syn::Token![=]) {
                        meta.value()?.parse::<syn::LitBool>()?.value
                    } else {
                        true
                    };
                } else if meta.path.is_ident("not_null") || meta.path.is_ident("primary_key") {
                    result.nullable = false;
                } else if meta.path.is_ident("name") {
                    result.name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("length") {
                    result.length = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
                } else if meta.input.peek(syn::Token![=]) {
                    // Keys owned by other derives sharing this attribute.
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn has_flag(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Renders a field type the way `TypeName::parse` expects it, without the
/// token spacing `quote` would add.
fn rust_type_name(ty: &Type) -> String {
    match ty {
        Type::Reference(r) => rust_type_name(&r.elem),
        Type::Paren(p) => rust_type_name(&p.elem),
        Type::Group(g) => rust_type_name(&g.elem),
        Type::Path(p) => {
            let segments: Vec<String> = p
                .path
                .segments
                .iter()
                .map(|segment| {
                    let mut name = segment.ident.to_string();
                    if let PathArguments::AngleBracketed(args) = &segment.arguments {
                        let inner: Vec<String> = args
                            .args
                            .iter()
                            .filter_map(|arg| match arg {
                                GenericArgument::Type(t) => Some(rust_type_name(t)),
                                _ => None,
                            })
                            .collect();
                        if !inner.is_empty() {
                            name.push('<');
                            name.push_str(&inner.join(","));
                            name.push('>');
                        }
                    }
                    name
                })
                .collect();
            segments.join("::")
        }
        other => quote!(#other).to_string().replace(' ', ""),
    }
}
