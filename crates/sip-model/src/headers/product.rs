//! # Product headers
//!
//! `User-Agent` and `Server` identify the software of the originating
//! client or the answering server as a sequence of product tokens and
//! comments ([RFC 3261 §20.35, §20.41](https://datatracker.ietf.org/doc/html/rfc3261#section-20.35)).
//!
//! ```rust
//! use sip_model::headers::{Product, ProductInfo, UserAgent};
//!
//! let ua: UserAgent = "Softphone/Beta1.5 (Windows)".parse().unwrap();
//! assert_eq!(ua.products().next().map(|p| p.name()), Some("Softphone"));
//!
//! let mut built = UserAgent::new(Product::new("Softphone", Some("Beta1.5")).unwrap());
//! built.push(ProductInfo::Comment("Windows".into()));
//! assert_eq!(built, ua);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{Matches, Merge};
use crate::parser::token::is_token;

/// `token [ "/" version ]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    name: String,
    version: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Result<Self> {
        let name = name.into();
        if !is_token(&name) {
            return Err(Error::InvalidArgument(format!("Invalid product name: '{}'", name)));
        }
        if let Some(v) = version {
            if !is_token(v) {
                return Err(Error::InvalidArgument(format!("Invalid product version: '{}'", v)));
            }
        }
        Ok(Product {
            name,
            version: version.map(str::to_string),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub(crate) fn from_parts(name: String, version: Option<String>) -> Self {
        Product { name, version }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}/{}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

/// One element of a product list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductInfo {
    Product(Product),
    /// Text between parentheses, stored without them.
    Comment(String),
}

impl fmt::Display for ProductInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductInfo::Product(p) => write!(f, "{}", p),
            ProductInfo::Comment(c) => write!(f, "({})", c),
        }
    }
}

impl std::convert::From<Product> for ProductInfo {
    fn from(p: Product) -> Self {
        ProductInfo::Product(p)
    }
}

fn fmt_products(items: &[ProductInfo], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

macro_rules! product_header {
    ($(#[$meta:meta])* $name:ident, $parser:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(Vec<ProductInfo>);

        impl $name {
            pub fn new(product: Product) -> Self {
                $name(vec![ProductInfo::Product(product)])
            }

            pub fn items(&self) -> &[ProductInfo] {
                &self.0
            }

            /// The product tokens, skipping comments.
            pub fn products(&self) -> impl Iterator<Item = &Product> {
                self.0.iter().filter_map(|i| match i {
                    ProductInfo::Product(p) => Some(p),
                    ProductInfo::Comment(_) => None,
                })
            }

            pub fn push(&mut self, item: ProductInfo) {
                self.0.push(item);
            }

            pub(crate) fn from_parts(items: Vec<ProductInfo>) -> Self {
                $name(items)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt_products(&self.0, f)
            }
        }

        impl Matches for $name {
            fn matches(&self, template: &Self) -> bool {
                template.0.is_empty() || self.0 == template.0
            }
        }

        impl Merge for $name {
            fn merge(&mut self, other: &Self) {
                if !other.0.is_empty() {
                    self.0 = other.0.clone();
                }
            }
        }

        typed_header!($name, $name, $parser);
    };
}

product_header!(
    /// `User-Agent`
    UserAgent, crate::parser::headers::product::user_agent
);
product_header!(
    /// `Server`
    Server, crate::parser::headers::product::server
);
