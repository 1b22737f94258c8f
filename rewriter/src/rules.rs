use regex::Regex;
use span::{Span, Spanned};
use tokenizer::{
    Segment, Tokenizer, BLOCK_TAG_END, BLOCK_TAG_START, TAG_DELIMITER_LEN, VARIABLE_TAG_END,
    VARIABLE_TAG_START,
};
use types::{Ported, PortOptions, Rewrite, RuleKind, RuleSet};

use crate::ACCESSOR_PATTERN;

/// Accessor suffixes that map to file-field attributes
pub const FILE_FIELD_METHODS: [&str; 6] = ["url", "size", "file", "width", "height", "filename"];

/// The porting rules, compiled once for a run
///
/// Rule order is fixed: extension, then relation, then file-field. Every
/// accessor occurrence is classified exactly once and replacement text is
/// never re-scanned, so applying the same rules to their own output changes
/// nothing.
pub struct Rules {
    set: RuleSet,
    options: PortOptions,
    accessor: Regex,
}

impl Rules {
    pub fn new(set: RuleSet, options: PortOptions) -> Self {
        Self {
            set,
            options,
            accessor: Regex::new(ACCESSOR_PATTERN).expect("accessor pattern compiles"),
        }
    }

    /// Tokenize, apply the enabled rules per tag, and reassemble.
    ///
    /// Untouched segments are reproduced byte for byte. The returned events
    /// are ordered by their byte position in the input.
    pub fn rewrite(&self, input: &str) -> Ported {
        let mut text = String::with_capacity(input.len());
        let mut rewrites = Vec::new();

        for segment in Tokenizer::new(input) {
            match &segment {
                Segment::Text { .. } | Segment::Comment { .. } => {
                    text.push_str(segment.source());
                }
                Segment::Variable { source, at } => {
                    text.push_str(&self.rewrite_variable(source, at, &mut rewrites));
                }
                Segment::Block { source, at } => {
                    text.push_str(&self.rewrite_block(source, at, &mut rewrites));
                }
            }
        }

        Ported { text, rewrites }
    }

    fn rewrite_variable(
        &self,
        source: &str,
        at: &Span,
        rewrites: &mut Vec<Spanned<Rewrite>>,
    ) -> String {
        let inner = &source[TAG_DELIMITER_LEN..source.len() - TAG_DELIMITER_LEN];

        let mut out = String::with_capacity(source.len());
        out.push_str(VARIABLE_TAG_START);
        self.apply_accessors(inner, at.start + TAG_DELIMITER_LEN, &mut out, rewrites);
        out.push_str(VARIABLE_TAG_END);
        out
    }

    /// Block tags only ever have their argument rewritten; the command word
    /// stays, so tag names like `{% get_comment_list %}` survive.
    fn rewrite_block(
        &self,
        source: &str,
        at: &Span,
        rewrites: &mut Vec<Spanned<Rewrite>>,
    ) -> String {
        let inner = &source[TAG_DELIMITER_LEN..source.len() - TAG_DELIMITER_LEN];
        let inner_start = at.start + TAG_DELIMITER_LEN;

        let lead = inner.len() - inner.trim_start().len();
        let rest = &inner[lead..];
        let command_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let command = &rest[..command_len];

        let split = lead + command_len;
        let argument = &inner[split..];
        let argument_start = inner_start + split;

        let mut out = String::with_capacity(source.len() + 8);
        out.push_str(BLOCK_TAG_START);
        out.push_str(&inner[..split]);

        if self.set.add_extension && matches!(command, "extends" | "include") {
            if let Some(ported) = self.add_extension(argument, argument_start, rewrites) {
                out.push_str(&ported);
                out.push_str(BLOCK_TAG_END);
                return out;
            }
        }

        self.apply_accessors(argument, argument_start, &mut out, rewrites);
        out.push_str(BLOCK_TAG_END);
        out
    }

    /// Append the default extension to a quoted template reference.
    ///
    /// Returns `None` when the argument is untouched: an unquoted (variable)
    /// reference, an unterminated literal, trailing junk after the closing
    /// quote, or a reference that already carries a recognized extension.
    fn add_extension(
        &self,
        argument: &str,
        argument_start: usize,
        rewrites: &mut Vec<Spanned<Rewrite>>,
    ) -> Option<String> {
        let trimmed = argument.trim();
        let lead = argument.len() - argument.trim_start().len();

        let quote = trimmed.chars().next()?;
        if quote != '"' && quote != '\'' {
            return None;
        }

        let literal = &trimmed[1..];
        let close = literal.find(quote)?;
        if !literal[close + 1..].is_empty() {
            return None;
        }
        let reference = &literal[..close];

        if let Some((_, extension)) = reference.rsplit_once('.') {
            if self.options.recognizes_extension(extension) {
                return None;
            }
        }

        let extension = self.options.default_extension();
        let old = &trimmed[..close + 2];
        let new = format!("{quote}{reference}.{extension}{quote}");
        let literal_start = argument_start + lead;

        rewrites.push((
            Rewrite {
                rule: RuleKind::Extension,
                old: old.to_string(),
                new: new.clone(),
            },
            literal_start..literal_start + old.len(),
        ));

        let mut ported = String::with_capacity(argument.len() + extension.len() + 1);
        ported.push_str(&argument[..lead]);
        ported.push_str(&new);
        ported.push_str(&argument[lead + trimmed.len()..]);
        Some(ported)
    }

    /// Run the relation and file-field rules over one region of a tag,
    /// copying everything that does not match.
    fn apply_accessors(
        &self,
        region: &str,
        region_start: usize,
        out: &mut String,
        rewrites: &mut Vec<Spanned<Rewrite>>,
    ) {
        if !self.set.update_relations && !self.set.update_file_fields {
            out.push_str(region);
            return;
        }

        let mut copied = 0;
        for occurrence in self.accessor.find_iter(region) {
            let name = &occurrence.as_str()["get_".len()..];
            let Some((rule, new)) = self.classify(name) else {
                continue;
            };

            out.push_str(&region[copied..occurrence.start()]);
            out.push_str(&new);
            copied = occurrence.end();

            rewrites.push((
                Rewrite {
                    rule,
                    old: occurrence.as_str().to_string(),
                    new,
                },
                region_start + occurrence.start()..region_start + occurrence.end(),
            ));
        }
        out.push_str(&region[copied..]);
    }

    /// Pick the one rule an accessor occurrence belongs to, longest suffix
    /// first and the bare relation form last.
    fn classify(&self, name: &str) -> Option<(RuleKind, String)> {
        if self.set.update_relations {
            if let Some(base) = name.strip_suffix("_list") {
                return self.relation(base, "all");
            }
            if let Some(base) = name.strip_suffix("_count") {
                return self.relation(base, "count");
            }
        }

        if let Some((base, method)) = split_file_field(name) {
            if self.set.update_file_fields && !base.is_empty() && !self.excluded(base) {
                return Some((RuleKind::FileField, format!("{base}.{method}")));
            }
            // file-field accessors stay out of the bare relation form's reach
            return None;
        }

        if self.set.update_relations && !self.excluded(name) {
            return Some((RuleKind::Relation, name.to_string()));
        }

        None
    }

    fn relation(&self, base: &str, method: &str) -> Option<(RuleKind, String)> {
        if base.is_empty() || self.excluded(base) {
            return None;
        }

        Some((
            RuleKind::Relation,
            format!("{}.{method}", self.options.collection(base)),
        ))
    }

    fn excluded(&self, name: &str) -> bool {
        self.options.excluded.contains(name)
    }
}

fn split_file_field(name: &str) -> Option<(&str, &'static str)> {
    FILE_FIELD_METHODS.iter().find_map(|method| {
        name.strip_suffix(method)
            .and_then(|rest| rest.strip_suffix('_'))
            .map(|base| (base, *method))
    })
}
