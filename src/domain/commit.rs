use regex::Regex;

/// Structured record of a single raw commit message.
///
/// Produced once per commit and never mutated. A header that does not
/// follow the conventional grammar yields an empty `r#type`; such commits
/// are still carried through analysis and resolve via the configured
/// default bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    pub r#type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub breaking: bool,
    /// Module the commit was attributed to by the path-filtered git query,
    /// when known
    pub module: Option<String>,
}

impl CommitInfo {
    /// Parse a commit message according to the conventional commits grammar
    /// `type(scope)!: subject`, where scope and `!` are both optional.
    ///
    /// A `BREAKING CHANGE:` (or `BREAKING-CHANGE:`) footer marks the commit
    /// breaking even without the `!` marker. Messages that do not match the
    /// grammar never fail to parse; they come back with an empty type and
    /// the raw header as subject.
    pub fn parse(message: &str, hash: impl Into<String>) -> Self {
        let (header, rest) = match message.split_once('\n') {
            Some((header, rest)) => (header, rest.trim()),
            None => (message, ""),
        };

        let body = if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        };

        let breaking_footer =
            message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:");

        if let Some(captures) = Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)$")
            .ok()
            .and_then(|re| re.captures(header))
        {
            let r#type = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            let subject = captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return CommitInfo {
                hash: hash.into(),
                r#type,
                scope,
                subject,
                body,
                breaking: has_exclamation || breaking_footer,
                module: None,
            };
        }

        // Malformed header: keep the raw text, leave the type empty
        CommitInfo {
            hash: hash.into(),
            r#type: String::new(),
            scope: None,
            subject: header.to_string(),
            body,
            breaking: breaking_footer,
            module: None,
        }
    }

    /// Whether the header matched the conventional grammar
    pub fn is_conventional(&self) -> bool {
        !self.r#type.is_empty()
    }

    /// Attribute this commit to a module
    pub fn for_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}
