use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

enum OptionKind {
    /// Parsed with `FromStr`.
    Plain { placeholder: String },
    /// Parsed with the `CliValue`-generated `parse`.
    ValueEnum,
    /// `--name[=<bool>]` plus a `--no-name` negation.
    Flag,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms: Vec<TokenStream2> = Vec::new();
    let mut entries: Vec<TokenStream2> = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let ty = &field.ty;

        let mut long_name: Option<String> = None;
        let mut value_name: Option<String> = None;
        let mut value_enum = false;
        let mut flag = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    long_name = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("value") {
                    let lit: LitStr = meta.value()?.parse()?;
                    value_name = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("value_enum") {
                    value_enum = true;
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    flag = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/value/value_enum/flag"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let Some(long_name) = long_name else {
            continue;
        };
        if flag && value_enum {
            return syn::Error::new(field.span(), "cli field cannot be both flag and value_enum")
                .to_compile_error()
                .into();
        }

        let kind = if flag {
            OptionKind::Flag
        } else if value_enum {
            OptionKind::ValueEnum
        } else {
            OptionKind::Plain {
                placeholder: value_name.unwrap_or_else(|| utils::placeholder_from_type(ty)),
            }
        };

        let long_lit = LitStr::new(&long_name, field.span());
        let summary_lit = LitStr::new(&utils::doc_summary(&field.attrs), field.span());

        match kind {
            OptionKind::Plain { placeholder } => {
                arms.push(quote! {
                    #long_lit => {
                        let raw = value.ok_or_else(|| {
                            crate::Error::invalid_configuration(format!("Missing value for --{name}"))
                        })?;
                        self.#field_ident = raw.parse::<#ty>().map_err(|e| {
                            crate::Error::invalid_configuration(format!(
                                "Invalid value for --{name}: {raw} ({e})"
                            ))
                        })?;
                        Ok(true)
                    }
                });
                let signature = LitStr::new(
                    &format!("--{long_name} <{placeholder}>"),
                    field.span(),
                );
                entries.push(quote! { (String::from(#signature), #summary_lit) });
            }
            OptionKind::ValueEnum => {
                arms.push(quote! {
                    #long_lit => {
                        let raw = value.ok_or_else(|| {
                            crate::Error::invalid_configuration(format!("Missing value for --{name}"))
                        })?;
                        self.#field_ident = <#ty>::parse(&raw)?;
                        Ok(true)
                    }
                });
                entries.push(quote! {
                    (format!("--{} <{}>", #long_lit, <#ty>::EXPECTED), #summary_lit)
                });
            }
            OptionKind::Flag => {
                let negated_lit = LitStr::new(&format!("no-{long_name}"), field.span());
                arms.push(quote! {
                    #long_lit => {
                        self.#field_ident = match value {
                            Some(raw) => Self::parse_flag(name, &raw)?,
                            None => true,
                        };
                        Ok(true)
                    }
                    #negated_lit => {
                        if value.is_some() {
                            return Err(crate::Error::invalid_configuration(format!(
                                "Flag --{name} does not take a value"
                            )));
                        }
                        self.#field_ident = false;
                        Ok(true)
                    }
                });
                let signature = LitStr::new(
                    &format!("--{long_name}[=<bool>] | --no-{long_name}"),
                    field.span(),
                );
                entries.push(quote! { (String::from(#signature), #summary_lit) });
            }
        }
    }

    let expanded = quote! {
        impl #struct_ident {
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn parse_flag(name: &str, raw: &str) -> crate::Result<bool> {
                match raw.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(crate::Error::invalid_configuration(format!(
                        "Invalid boolean for --{name}: {raw} (expected true/false)"
                    ))),
                }
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms)*
                    _ => Ok(false),
                }
            }

            /// Usage signature and doc summary of every recognized option, in declaration order.
            pub fn cli_entries() -> Vec<(String, &'static str)> {
                vec![#(#entries),*]
            }
        }
    };

    TokenStream::from(expanded)
}
