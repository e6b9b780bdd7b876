use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// A single `name = value` pair inside `#[error(...)]`.
struct Tag {
    name: Ident,
    value: Expr,
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        Ok(Self { name, value: input.parse()? })
    }
}

/// What a math input error shows when it is reported: the headline, the text next to each
/// highlighted part of the expression, and an optional hint.
#[derive(Default)]
pub struct ReportTags {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl Parse for ReportTags {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut tags = Self::default();
        for Tag { name, value } in Punctuated::<Tag, Token![,]>::parse_terminated(input)? {
            let slot = match name.to_string().as_str() {
                "message" => &mut tags.message,
                "labels" => &mut tags.labels,
                "help" => &mut tags.help,
                other => return Err(syn::Error::new_spanned(&name, format!("unknown tag `{}`", other))),
            };
            *slot = Some(value);
        }
        Ok(tags)
    }
}

/// Brings the named fields of the error into scope, so the tags can refer to them.
fn bind_fields(name: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { let #name { #(#names),* } = self; }
        },
        Fields::Unnamed(_) => quote_spanned! { name.span() =>
            compile_error!("`ErrorKind` cannot be derived for tuple structs");
        },
        Fields::Unit => TokenStream2::new(),
    }
}

/// A parse error struct annotated with `#[derive(ErrorKind)]`.
pub struct ErrorStruct {
    pub name: Ident,
    fields: Fields,
    tags: ReportTags,
}

impl Parse for ErrorStruct {
    fn parse(input: ParseStream) -> Result<Self> {
        // doc comments and other attributes come before `#[error(...)]`
        let attrs = input.call(Attribute::parse_outer)?;
        let item = input.parse::<ItemStruct>()?;

        let tags = match attrs.iter().find(|attr| attr.path().is_ident("error")) {
            Some(attr) => attr.parse_args::<ReportTags>()?,
            None => ReportTags::default(),
        };
        if tags.message.is_none() {
            return Err(syn::Error::new(item.ident.span(), "missing `message` tag in `#[error(...)]` attribute"));
        }

        Ok(Self { name: item.ident, fields: item.fields, tags })
    }
}

impl ToTokens for ErrorStruct {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bindings = bind_fields(&self.name, &self.fields);
        let message = &self.tags.message;
        let labels = match &self.tags.labels {
            Some(labels) => quote! { #labels },
            None => quote! { [""; 0] },
        };
        let help = self.tags.help.as_ref().map(|help| quote! { report.set_help(#help); });

        tokens.extend(quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #[allow(unused_variables)]
                #bindings

                let labels = #labels
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let text = text.to_string();
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(mathstep_error::EXPR);
                        if text.is_empty() { label } else { label.with_message(text) }
                    })
                    .collect::<Vec<_>>();

                let start = spans.first().map_or(0, |span| span.start);
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                report.finish()
            }
        });
    }
}
