//! Per-call configuration.
//!
//! Every recognized option is an explicit struct field with a default; there
//! is no open-ended keyword map. Raw-passthrough and tabular conversion are
//! separate typed methods on the client rather than flags, since they change
//! the return type.

use crate::types::Terms;

/// Field selection for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fields {
    /// The operation's default field set.
    #[default]
    Default,
    /// The `all` sentinel: every available field.
    All,
    /// An explicit ordered field list.
    List(Vec<String>),
}

impl Fields {
    /// Render as a wire value; `Default` resolves to the operation default
    /// (or nothing, when the service default applies).
    pub(crate) fn resolve(&self, operation_default: Option<&str>) -> Option<String> {
        match self {
            Fields::Default => operation_default.map(str::to_string),
            Fields::All => Some("all".to_string()),
            Fields::List(items) => Some(items.join(",")),
        }
    }
}

impl From<&str> for Fields {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            Fields::All
        } else {
            Fields::List(Terms::from(s).normalize())
        }
    }
}

impl From<Vec<&str>> for Fields {
    fn from(items: Vec<&str>) -> Self {
        Fields::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Fields {
    fn from(items: Vec<String>) -> Self {
        Fields::List(items)
    }
}

/// Options for single and batch annotation lookups.
#[derive(Debug, Clone)]
pub struct GeneOptions {
    pub fields: Fields,
    pub species: Option<String>,
    pub email: Option<String>,
    pub entrezonly: Option<bool>,
    pub verbose: bool,
}

impl Default for GeneOptions {
    fn default() -> Self {
        Self {
            fields: Fields::Default,
            species: None,
            email: None,
            entrezonly: None,
            verbose: true,
        }
    }
}

impl GeneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Back-compatible alias for [`GeneOptions::fields`].
    pub fn filter(self, fields: impl Into<Fields>) -> Self {
        self.fields(fields)
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn entrezonly(mut self, entrezonly: bool) -> Self {
        self.entrezonly = Some(entrezonly);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Options for free-text queries.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub fields: Fields,
    pub species: Option<String>,
    pub size: Option<u32>,
    pub skip: Option<u32>,
    /// Sort field, passed through verbatim; prefix with `-` for descending.
    pub sort: Option<String>,
    pub entrezonly: Option<bool>,
    pub email: Option<String>,
    pub verbose: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            fields: Fields::Default,
            species: None,
            size: None,
            skip: None,
            sort: None,
            entrezonly: None,
            email: None,
            verbose: true,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Back-compatible alias for [`QueryOptions::fields`].
    pub fn filter(self, fields: impl Into<Fields>) -> Self {
        self.fields(fields)
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn entrezonly(mut self, entrezonly: bool) -> Self {
        self.entrezonly = Some(entrezonly);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Options for batch-term lookups (id-mapping).
#[derive(Debug, Clone)]
pub struct QueryManyOptions {
    /// Identifier namespaces to search, comma-joined on the wire.
    pub scopes: Option<String>,
    pub fields: Fields,
    pub species: Option<String>,
    pub entrezonly: Option<bool>,
    pub email: Option<String>,
    pub verbose: bool,
}

impl Default for QueryManyOptions {
    fn default() -> Self {
        Self {
            scopes: None,
            fields: Fields::Default,
            species: None,
            entrezonly: None,
            email: None,
            verbose: true,
        }
    }
}

impl QueryManyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the identifier namespaces searched, as a delimited string or a
    /// collection.
    pub fn scopes(mut self, scopes: impl Into<Terms>) -> Self {
        self.scopes = Some(scopes.into().normalize().join(","));
        self
    }

    /// Back-compatible alias for [`QueryManyOptions::scopes`].
    pub fn scope(self, scopes: impl Into<Terms>) -> Self {
        self.scopes(scopes)
    }

    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Back-compatible alias for [`QueryManyOptions::fields`].
    pub fn filter(self, fields: impl Into<Fields>) -> Self {
        self.fields(fields)
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn entrezonly(mut self, entrezonly: bool) -> Self {
        self.entrezonly = Some(entrezonly);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_resolution() {
        assert_eq!(Fields::Default.resolve(None), None);
        assert_eq!(
            Fields::Default.resolve(Some("symbol,name")),
            Some("symbol,name".to_string())
        );
        assert_eq!(Fields::All.resolve(Some("symbol")), Some("all".to_string()));
        assert_eq!(
            Fields::from("name, symbol").resolve(None),
            Some("name,symbol".to_string())
        );
        assert_eq!(Fields::from("ALL"), Fields::All);
    }

    #[test]
    fn test_scopes_accepts_string_or_list() {
        let from_str = QueryManyOptions::new().scopes("entrezgene,symbol");
        let from_list = QueryManyOptions::new().scopes(vec!["entrezgene", "symbol"]);
        assert_eq!(from_str.scopes, from_list.scopes);
        assert_eq!(from_str.scopes.as_deref(), Some("entrezgene,symbol"));
    }

    #[test]
    fn test_aliases_match_primary_setters() {
        let a = QueryManyOptions::new().scope("entrezgene");
        let b = QueryManyOptions::new().scopes("entrezgene");
        assert_eq!(a.scopes, b.scopes);

        let c = GeneOptions::new().filter("symbol,name");
        let d = GeneOptions::new().fields("symbol,name");
        assert_eq!(c.fields, d.fields);
    }
}
