use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Lit, Meta, Token, Type, ext::IdentExt,
    parse_macro_input,
};

/// Helper enum for parsed attribute values
enum MetaValue {
    Str(String),
    Expr(Expr),
    Flag,
}

/// Join the struct's `///` comments into a single description
fn collect_docs(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Define a struct whose fields are loaded from environment variables
///
/// Generates the struct itself plus an `envargs::FromEnv` implementation.
/// Fields are configured with `#[var(env = "NAME", dest = "key", default = expr, optional)]`,
/// where every key may be omitted.
#[proc_macro]
pub fn define_env(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_env(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_env(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let struct_attrs = &input.attrs;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let description = collect_docs(struct_attrs);

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "define_env! only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "define_env! only supports structs",
            ));
        }
    };

    let mut field_defs = Vec::new();
    let mut registrations = Vec::new();
    let mut extractions = Vec::new();

    for field in fields {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "define_env! fields must be named")
        })?;
        let field_vis = &field.vis;
        let field_type = &field.ty;

        let config = parse_field_config(field)?;

        // Extract cfg attributes for feature gating
        let cfg_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .collect();

        // Everything but #[var(...)] stays on the generated field
        let kept_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| !attr.path().is_ident("var"))
            .collect();

        field_defs.push(quote! {
            #(#kept_attrs)*
            #field_vis #field_name: #field_type
        });

        let unraw_name = field_name.unraw().to_string();
        let env_var = config
            .env_var
            .unwrap_or_else(|| unraw_name.to_uppercase());
        let dest = config.dest.unwrap_or(unraw_name);

        let (is_option, inner_type) = extract_option_type(field_type);

        if is_option && config.default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Option<T> fields resolve to None when unset and cannot have a default",
            ));
        }
        if !is_option && config.optional && config.default.is_none() {
            return Err(syn::Error::new_spanned(
                field,
                "optional fields without a default must have type Option<T>",
            ));
        }

        let required = !is_option && config.default.is_none();

        let default_code = config.default.as_ref().map(|default_expr| {
            quote! {
                .default_value({
                    let __default: #inner_type = #default_expr;
                    ::envargs::EnvValue::into_value(__default)
                })
            }
        });

        registrations.push(quote! {
            #(#cfg_attrs)*
            loader.register(
                ::envargs::Variable::new(#env_var)
                    .value_type(<#inner_type as ::envargs::EnvValue>::VALUE_TYPE)
                    .required(#required)
                    .dest(#dest)
                    #default_code
            )?;
        });

        let extract_code = if is_option {
            quote! { ns.get_optional::<#inner_type>(#dest)? }
        } else {
            quote! { ns.get_as::<#inner_type>(#dest)? }
        };
        extractions.push(quote! {
            #(#cfg_attrs)*
            #field_name: #extract_code
        });
    }

    let struct_def = quote! {
        #(#struct_attrs)*
        #vis struct #struct_name #impl_generics #where_clause {
            #(#field_defs),*
        }
    };

    let from_env_impl = quote! {
        impl #impl_generics ::envargs::FromEnv for #struct_name #ty_generics #where_clause {
            fn loader() -> ::core::result::Result<::envargs::ConfigLoader, ::envargs::ConfigError> {
                let mut loader = ::envargs::ConfigLoader::new().with_description(#description);

                #(#registrations)*

                ::core::result::Result::Ok(loader)
            }

            fn from_namespace(
                ns: &::envargs::Namespace,
            ) -> ::core::result::Result<Self, ::envargs::ConfigError> {
                ::core::result::Result::Ok(Self {
                    #(#extractions),*
                })
            }
        }
    };

    Ok(quote! {
        #struct_def
        #from_env_impl
    })
}

#[derive(Debug, Default)]
struct FieldConfig {
    env_var: Option<String>,
    dest: Option<String>,
    default: Option<Expr>,
    optional: bool,
}

/// Parse #[var(env = "X", dest = "y", default = val, optional)] syntax
fn parse_var_list(meta_list: &syn::MetaList) -> syn::Result<HashMap<String, MetaValue>> {
    let mut values = HashMap::new();

    meta_list.parse_nested_meta(|meta| {
        let key = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("expected identifier"))?
            .to_string();

        if meta.input.peek(Token![=]) {
            meta.input.parse::<Token![=]>()?;

            if key == "env" || key == "dest" {
                let value: syn::LitStr = meta.input.parse()?;
                values.insert(key, MetaValue::Str(value.value()));
            } else {
                let expr: Expr = meta.input.parse()?;
                values.insert(key, MetaValue::Expr(expr));
            }
        } else {
            values.insert(key, MetaValue::Flag);
        }

        Ok(())
    })?;

    Ok(values)
}

fn parse_field_config(field: &syn::Field) -> syn::Result<FieldConfig> {
    // Fields without #[var] use the defaults
    let Some(var_attr) = field.attrs.iter().find(|attr| attr.path().is_ident("var")) else {
        return Ok(FieldConfig::default());
    };

    let parsed = match &var_attr.meta {
        Meta::Path(_) => return Ok(FieldConfig::default()),
        Meta::List(list) => parse_var_list(list)?,
        Meta::NameValue(_) => {
            return Err(syn::Error::new_spanned(
                var_attr,
                "var attribute must be a list: #[var(env = \"...\", ...)]",
            ));
        }
    };

    let mut config = FieldConfig::default();

    for (key, value) in parsed {
        match (key.as_str(), value) {
            ("env", MetaValue::Str(s)) => config.env_var = Some(s),
            ("dest", MetaValue::Str(s)) => config.dest = Some(s),
            ("default", MetaValue::Expr(e)) => config.default = Some(e),
            ("optional", MetaValue::Flag) => config.optional = true,
            ("env" | "dest", _) => {
                return Err(syn::Error::new_spanned(
                    var_attr,
                    format!("{} must be a string literal: {} = \"...\"", key, key),
                ));
            }
            ("default", _) => {
                return Err(syn::Error::new_spanned(
                    var_attr,
                    "default must be given a value: default = expr",
                ));
            }
            ("optional", _) => {
                return Err(syn::Error::new_spanned(
                    var_attr,
                    "optional is a flag and takes no value",
                ));
            }
            (other, _) => {
                return Err(syn::Error::new_spanned(
                    var_attr,
                    format!(
                        "unknown key `{}`, expected one of: env, dest, default, optional",
                        other
                    ),
                ));
            }
        }
    }

    Ok(config)
}

/// Extract the inner type from Option<T>, returns (is_option, inner_type)
fn extract_option_type(ty: &Type) -> (bool, &Type) {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_ty)) = args.args.first() {
                        return (true, inner_ty);
                    }
                }
            }
        }
    }
    (false, ty)
}
