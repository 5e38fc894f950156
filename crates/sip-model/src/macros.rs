// Internal macros that generate the per-header boilerplate.

/// Implements `FromStr` (through the given nom parser) and `TypedHeaderTrait`
/// for a header type stored in `Header::$variant`.
macro_rules! typed_header {
    ($ty:ident, $variant:ident, $parser:path) => {
        impl std::str::FromStr for $ty {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                $crate::parser::parse_all(s.trim(), $parser)
            }
        }

        impl $crate::headers::header::TypedHeaderTrait for $ty {
            fn header_name() -> $crate::headers::HeaderName {
                $crate::headers::HeaderName::$variant
            }

            fn to_header(&self) -> $crate::headers::Header {
                $crate::headers::Header::$variant(self.clone())
            }

            fn from_header(header: &$crate::headers::Header) -> $crate::error::Result<Self> {
                match header {
                    $crate::headers::Header::$variant(h) => Ok(h.clone()),
                    // Raw values kept by lenient parsing get a second chance here
                    $crate::headers::Header::Extension(ext)
                        if ext.header_name() == $crate::headers::HeaderName::$variant =>
                    {
                        ext.value().parse()
                    }
                    other => Err($crate::error::Error::InvalidHeader(format!(
                        "Expected {} header, got {}",
                        $crate::headers::HeaderName::$variant,
                        other.name()
                    ))),
                }
            }
        }
    };
}

/// `Matches` and `Merge` for headers whose value has no optional parts: a
/// template matches only an equal header and merging takes the other value.
macro_rules! match_by_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::headers::matching::Matches for $ty {
                fn matches(&self, template: &Self) -> bool {
                    self == template
                }
            }

            impl $crate::headers::matching::Merge for $ty {
                fn merge(&mut self, other: &Self) {
                    *self = other.clone();
                }
            }
        )+
    };
}
