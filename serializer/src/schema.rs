//! Column constraints the mapping validates against.
//!
//! The store owns these; the mapping only reads them.

/// Whether inbound payloads must carry a `description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionPolicy {
    /// Missing `description` is a validation error.
    Required,
    /// Missing `description` takes this value.
    Optional { default: String },
}

impl Default for DescriptionPolicy {
    fn default() -> Self {
        DescriptionPolicy::Optional {
            default: String::new(),
        }
    }
}

/// Constraints on the todo record, supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSchema {
    pub description: DescriptionPolicy,
    /// Upper bound on `title`, in characters. `None` means unbounded.
    pub title_max_length: Option<usize>,
    pub allow_blank_title: bool,
}

impl Default for TodoSchema {
    fn default() -> Self {
        Self {
            description: DescriptionPolicy::default(),
            title_max_length: Some(120),
            allow_blank_title: false,
        }
    }
}

impl TodoSchema {
    #[must_use]
    pub fn with_description(mut self, policy: DescriptionPolicy) -> Self {
        self.description = policy;
        self
    }

    #[must_use]
    pub fn with_title_max_length(mut self, max: Option<usize>) -> Self {
        self.title_max_length = max;
        self
    }

    #[must_use]
    pub fn with_blank_title(mut self, allow: bool) -> Self {
        self.allow_blank_title = allow;
        self
    }
}
