//! Attribute parsing for `#[envstruct(...)]` annotations.
//!
//! Field attributes are lowered into the raw tag string understood by the
//! runtime tag parser, so both spellings behave identically.

use syn::{Attribute, Field, Lit, LitStr};

/// Parsed `#[envstruct(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw tag written as `#[envstruct("...")]`.
    pub raw: Option<String>,

    /// Custom environment variable name.
    pub name: Option<String>,

    /// Default value, already rendered as a string.
    pub default: Option<String>,

    /// `optional` flag.
    pub optional: bool,

    /// `skip` flag.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and validate `#[envstruct(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in envstruct_attrs(&field.attrs) {
            // #[envstruct("raw,tag")]
            if let Ok(lit) = attr.parse_args::<LitStr>() {
                attrs.raw = Some(lit.value());
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let name = lit.value();
                    if name.is_empty()
                        || name.contains(',')
                        || name == "-"
                        || name == "optional"
                        || name.starts_with("default=")
                    {
                        return Err(syn::Error::new_spanned(
                            lit,
                            "name must be non-empty, contain no ',' and not be a tag keyword",
                        ));
                    }
                    attrs.name = Some(name);
                    return Ok(());
                }

                // default = "..." | 42 | 1.5 | true
                if meta.path.is_ident("default") {
                    let lit: Lit = meta.value()?.parse()?;
                    let value = render_literal(&lit)?;
                    if value.contains(',') {
                        return Err(syn::Error::new_spanned(
                            lit,
                            "default values cannot contain ',', separate elements with ';'",
                        ));
                    }
                    attrs.default = Some(value);
                    return Ok(());
                }

                if meta.path.is_ident("optional") {
                    attrs.optional = true;
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported envstruct attribute"))
            })?;
        }

        Ok(attrs)
    }

    /// Render the raw tag string handed to the runtime.
    ///
    /// Structured options are appended after a raw tag, so they win on
    /// conflicts.
    pub fn to_tag(&self) -> String {
        let mut tokens: Vec<String> = Vec::new();
        if let Some(raw) = self.raw.as_ref().filter(|raw| !raw.is_empty()) {
            tokens.push(raw.clone());
        }
        if self.skip {
            tokens.push("-".to_string());
        }
        if self.optional {
            tokens.push("optional".to_string());
        }
        if let Some(default) = &self.default {
            tokens.push(format!("default={default}"));
        }
        if let Some(name) = &self.name {
            tokens.push(name.clone());
        }
        tokens.join(",")
    }
}

/// Parsed `#[envstruct(...)]` attributes from the type itself.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Key prefix used by `from_env()`.
    pub prefix: Option<String>,

    /// Treat the type as a leaf parsed by its `Unmarshal` impl.
    pub unmarshal: bool,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut container = Self::default();

        for attr in envstruct_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let lit: LitStr = meta.value()?.parse()?;
                    container.prefix = Some(lit.value());
                    return Ok(());
                }

                if meta.path.is_ident("unmarshal") {
                    container.unmarshal = true;
                    return Ok(());
                }

                Err(meta.error("unsupported container-level envstruct attribute"))
            })?;
        }

        Ok(container)
    }
}

fn envstruct_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("envstruct"))
}

fn render_literal(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new_spanned(
            other,
            "default must be a string, integer, float or bool literal",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_raw_tag() {
        let field: Field = parse_quote! {
            #[envstruct("default=1m,myTimeout")]
            pub timeout: Duration
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.raw.as_deref(), Some("default=1m,myTimeout"));
        assert_eq!(attrs.to_tag(), "default=1m,myTimeout");
    }

    #[test]
    fn test_parse_name_attribute() {
        let field: Field = parse_quote! {
            #[envstruct(name = "logRotate")]
            pub rotate: bool
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, Some("logRotate".to_string()));
        assert_eq!(attrs.to_tag(), "logRotate");
    }

    #[test]
    fn test_parse_default_string() {
        let field: Field = parse_quote! {
            #[envstruct(default = "/var/log/mylog.log")]
            pub path: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.to_tag(), "default=/var/log/mylog.log");
    }

    #[test]
    fn test_parse_default_number_and_bool() {
        let field: Field = parse_quote! {
            #[envstruct(default = 8080)]
            pub port: u16
        };
        assert_eq!(FieldAttrs::from_field(&field).unwrap().default.as_deref(), Some("8080"));

        let field: Field = parse_quote! {
            #[envstruct(default = false)]
            pub debug: bool
        };
        assert_eq!(FieldAttrs::from_field(&field).unwrap().default.as_deref(), Some("false"));
    }

    #[test]
    fn test_default_with_comma_is_rejected() {
        let field: Field = parse_quote! {
            #[envstruct(default = "a,b")]
            pub items: Vec<String>
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_keyword_name_is_rejected() {
        let field: Field = parse_quote! {
            #[envstruct(name = "optional")]
            pub value: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_multiple_attributes() {
        let field: Field = parse_quote! {
            #[envstruct(optional, default = "a;b", name = "ITEMS")]
            pub items: Vec<String>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.to_tag(), "optional,default=a;b,ITEMS");
    }

    #[test]
    fn test_parse_skip() {
        let field: Field = parse_quote! {
            #[envstruct(skip)]
            pub cache: Vec<u8>
        };

        assert_eq!(FieldAttrs::from_field(&field).unwrap().to_tag(), "-");
    }

    #[test]
    fn test_unknown_attribute() {
        let field: Field = parse_quote! {
            #[envstruct(from_file)]
            pub secret: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub value: String
        };

        assert_eq!(FieldAttrs::from_field(&field).unwrap().to_tag(), "");
    }

    #[test]
    fn test_container_attributes() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[envstruct(prefix = "MYAPP", unmarshal)])];
        let container = ContainerAttrs::from_attrs(&attrs).unwrap();
        assert_eq!(container.prefix.as_deref(), Some("MYAPP"));
        assert!(container.unmarshal);
    }
}
