use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use span::Spanned;

/// The rewrite category a substitution came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Extension,
    Relation,
    FileField,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Extension => write!(f, "extension"),
            RuleKind::Relation => write!(f, "relation"),
            RuleKind::FileField => write!(f, "file-field"),
        }
    }
}

/// A single substitution made inside a tag
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rewrite {
    pub rule: RuleKind,
    pub old: String,
    pub new: String,
}

/// The ported contents of one template plus everything that changed in it
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Ported {
    pub text: String,
    pub rewrites: Vec<Spanned<Rewrite>>,
}

impl Ported {
    pub fn changed(&self) -> bool {
        !self.rewrites.is_empty()
    }
}

/// Which rewrite categories a run applies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub add_extension: bool,
    pub update_relations: bool,
    pub update_file_fields: bool,
    pub rename_generic: bool,
}

impl RuleSet {
    /// All text-rewriting categories, without the generic-rename copies
    pub fn all_rewrites() -> Self {
        RuleSet {
            add_extension: true,
            update_relations: true,
            update_file_fields: true,
            rename_generic: false,
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.add_extension || self.update_relations || self.update_file_fields || self.rename_generic
    }
}

/// Console chatter level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// A porting config file, as written by the user
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct PortConfig {
    pub extensions: Option<Vec<String>>,
    pub relations: Option<RelationsConfig>,
}

/// The `[relations]` table of a config file
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct RelationsConfig {
    /// Accessors confirmed to be genuine methods, never rewritten
    pub ignored_methods: Option<Vec<String>>,
    /// Names rewritten despite appearing in `ignored_methods`
    pub force_update: Option<Vec<String>>,
    /// `related_name` overrides: base name to collection name
    pub mapping: Option<HashMap<String, String>>,
}

/// Run options with defaults applied and the exclusion set resolved
#[derive(Clone, Debug, PartialEq)]
pub struct PortOptions {
    /// Extensions a template reference may already carry; the first entry
    /// is the one appended to bare references
    pub extensions: Vec<String>,
    /// Base names exempt from the relation and file-field rules
    pub excluded: HashSet<String>,
    /// Collection-name overrides for the relation rule
    pub mapping: HashMap<String, String>,
}

impl Default for PortOptions {
    fn default() -> Self {
        PortOptions {
            extensions: vec!["html".to_string()],
            excluded: HashSet::new(),
            mapping: HashMap::new(),
        }
    }
}

impl PortOptions {
    /// The extension appended by the extension rule
    pub fn default_extension(&self) -> &str {
        self.extensions.first().map(|e| e.as_str()).unwrap_or("html")
    }

    pub fn recognizes_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    /// The collection a relation accessor resolves to: the configured
    /// mapping entry if present, `<name>_set` otherwise
    pub fn collection(&self, name: &str) -> String {
        match self.mapping.get(name) {
            Some(related_name) => related_name.clone(),
            None => format!("{name}_set"),
        }
    }
}
