use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, collect_field_docs, ensure_named_struct, infer_description,
    infer_schema_name, parse_completion_schema_args, validate_fallback,
};

pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match parse_completion_schema_args(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let item_struct = parse_macro_input!(item as ItemStruct);

    if let Err(err) = ensure_named_struct(&item_struct) {
        return err.to_compile_error().into();
    }

    if !item_struct.generics.params.is_empty() {
        return syn::Error::new(
            item_struct.generics.span(),
            "`#[completion_schema]` does not support generic structs",
        )
        .to_compile_error()
        .into();
    }

    let fallback = match args.fallback.as_ref() {
        Some(lit) => match validate_fallback(lit) {
            Ok(()) => lit.clone(),
            Err(err) => return err.to_compile_error().into(),
        },
        None => {
            return syn::Error::new(
                item_struct.ident.span(),
                "`#[completion_schema]` requires a `fallback = \"...\"` JSON document",
            )
            .to_compile_error()
            .into();
        }
    };

    let schema_name = infer_schema_name(&item_struct, args.name.as_ref());
    let struct_docs = collect_doc_comments(&item_struct.attrs);
    let description = infer_description(args.description.as_ref(), struct_docs);

    let description_tokens = description
        .as_ref()
        .map(|lit| quote! { Some(#lit) })
        .unwrap_or_else(|| quote! { None });

    let field_doc_tokens: Vec<_> = collect_field_docs(&item_struct)
        .iter()
        .map(|(field, doc)| {
            let field_lit = LitStr::new(field, Span::call_site());
            let doc_lit = LitStr::new(doc, Span::call_site());
            quote! { (#field_lit, #doc_lit) }
        })
        .collect();

    let type_name = LitStr::new(&item_struct.ident.to_string(), Span::call_site());
    let ident = &item_struct.ident;

    let expanded = quote! {
        #item_struct

        impl travel_multiverse::schema::CompletionSchema for #ident {
            fn schema() -> &'static travel_multiverse::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<travel_multiverse::schema::SchemaHandle> = std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    travel_multiverse::schema::apply_doc_comments(
                        &mut root,
                        #schema_name,
                        #description_tokens,
                        &[#(#field_doc_tokens),*],
                    );
                    travel_multiverse::schema::SchemaHandle::from_root_schema(
                        #schema_name,
                        #type_name,
                        root,
                    )
                })
            }

            fn fallback() -> serde_json::Value {
                // Checked for well-formedness at expansion time.
                serde_json::from_str(#fallback).unwrap_or(serde_json::Value::Null)
            }
        }
    };

    expanded.into()
}
