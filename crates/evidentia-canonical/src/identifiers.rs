use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    ProfileId,
    "Identifier for canonicalization profiles (pattern: `[A-Za-z0-9_-]{16,128}`).",
    r"^[A-Za-z0-9_-]{16,128}$"
);
newtype!(
    SellerId,
    "Opaque marketplace seller identifier (URL-safe, up to 64 chars).",
    r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$"
);
newtype!(
    AnomalyId,
    "Identifier of one detected refund/cost anomaly (URL-safe, up to 64 chars).",
    r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$"
);
newtype!(
    DocumentId,
    "Identifier of a generated artifact record (URL-safe, up to 64 chars).",
    r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$"
);
newtype!(
    BundleId,
    "Identifier of an export bundle (URL-safe, up to 64 chars).",
    r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$"
);
newtype!(
    ActorId,
    "Stable identifier for acting principals (`kind:name`, lowercase, URL-safe).",
    r"^(user|service|system|admin):[a-z][a-z0-9_-]{0,62}$"
);
newtype!(
    TemplateVersion,
    "Document template version like `v1.0` or `v2.1.3`.",
    r"^v\d+\.\d+(\.\d+)?$"
);
newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix. Ordering is lexicographic, so \
     producers within one deployment must emit a uniform sub-second precision.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$"
);
