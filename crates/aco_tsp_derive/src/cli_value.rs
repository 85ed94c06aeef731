use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

struct VariantNames {
    ident: syn::Ident,
    canonical: String,
    aliases: Vec<String>,
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident.clone();

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut option_name = utils::to_kebab_case(&enum_ident.to_string());
    for attr in &input.attrs {
        if !attr.path().is_ident("cli_value") {
            continue;
        }
        let parse_result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                let lit: LitStr = meta.value()?.parse()?;
                option_name = lit.value();
                return Ok(());
            }
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        });
        if let Err(err) = parse_result {
            return err.to_compile_error().into();
        }
    }

    let mut variants = Vec::new();
    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            )
            .to_compile_error()
            .into();
        }

        let mut names = VariantNames {
            canonical: utils::to_kebab_case(&variant.ident.to_string()),
            ident: variant.ident,
            aliases: Vec::new(),
        };

        for attr in &variant.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    names.canonical = lit.value();
                    return Ok(());
                }
                if meta.path.is_ident("alias") {
                    let lit: LitStr = meta.value()?.parse()?;
                    names.aliases.push(lit.value());
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected name/alias"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        variants.push(names);
    }

    let parse_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let accepted = std::iter::once(&v.canonical)
            .chain(v.aliases.iter())
            .map(|name| utils::call_site_lit(name));
        quote! { #(#accepted)|* => Ok(Self::#ident), }
    });
    let display_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let canonical = utils::call_site_lit(&v.canonical);
        quote! { Self::#ident => #canonical, }
    });

    let expected = variants
        .iter()
        .map(|v| v.canonical.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let expected_lit = utils::call_site_lit(&expected);
    let option_lit = utils::call_site_lit(&option_name);

    let expanded = quote! {
        impl #enum_ident {
            /// Canonical accepted values joined with `|`.
            pub const EXPECTED: &'static str = #expected_lit;

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_configuration(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        Self::EXPECTED
                    ))),
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    #(#display_arms)*
                })
            }
        }
    };

    TokenStream::from(expanded)
}
