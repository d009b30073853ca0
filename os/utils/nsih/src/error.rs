use crate::HeaderVariant;

/// Problems found in a Boot Header.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum HeaderError {
    #[error("read data size ({read_size}) is less than boot header size ({header_size})")]
    TooShort { read_size: u32, header_size: usize },

    #[error("bad signature in header: {found:#010x}")]
    BadSignature { found: u32 },

    #[error("the {variant} boot header has no boot method field")]
    UnsupportedBootMethodForVariant { variant: HeaderVariant },
}

/// How a caller should treat a [`HeaderError`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Severity {
    /// Report and carry on with the image as it is.
    Warning,
    /// Abort.
    Error,
}

impl HeaderError {
    /// A header that cannot be read is only fatal when the caller asked to
    /// repair its size field.
    #[must_use]
    pub const fn severity(&self, fix_size: bool) -> Severity {
        match self {
            Self::TooShort { .. } | Self::BadSignature { .. } if fix_size => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_fix_size() {
        let short = HeaderError::TooShort {
            read_size: 500,
            header_size: 1024,
        };
        let bad = HeaderError::BadSignature { found: 0 };
        let method = HeaderError::UnsupportedBootMethodForVariant {
            variant: HeaderVariant::Artik,
        };

        assert_eq!(short.severity(false), Severity::Warning);
        assert_eq!(short.severity(true), Severity::Error);
        assert_eq!(bad.severity(false), Severity::Warning);
        assert_eq!(bad.severity(true), Severity::Error);
        assert_eq!(method.severity(true), Severity::Warning);
    }
}
