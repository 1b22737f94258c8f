use span::Span;

pub const VARIABLE_TAG_START: &str = "{{";
pub const VARIABLE_TAG_END: &str = "}}";
pub const BLOCK_TAG_START: &str = "{%";
pub const BLOCK_TAG_END: &str = "%}";
pub const COMMENT_TAG_START: &str = "{#";
pub const COMMENT_TAG_END: &str = "#}";

/// Length of every tag delimiter, opening or closing
pub const TAG_DELIMITER_LEN: usize = 2;

/// One region of a template: plain text or a single delimited tag
///
/// Segments partition the template in order with no gaps or overlaps;
/// concatenating their source reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Bytes outside any tag delimiter
    Text { text: &'t str, at: Span },
    /// A `{{ ... }}` tag, delimiters included
    Variable { source: &'t str, at: Span },
    /// A `{% ... %}` tag, delimiters included
    Block { source: &'t str, at: Span },
    /// A `{# ... #}` tag, delimiters included
    Comment { source: &'t str, at: Span },
}

impl<'t> Segment<'t> {
    /// The exact source bytes of this segment, delimiters included
    pub fn source(&self) -> &'t str {
        match self {
            Segment::Text { text, .. } => text,
            Segment::Variable { source, .. }
            | Segment::Block { source, .. }
            | Segment::Comment { source, .. } => source,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Segment::Text { at, .. }
            | Segment::Variable { at, .. }
            | Segment::Block { at, .. }
            | Segment::Comment { at, .. } => at,
        }
    }

    /// Tag contents with the delimiters stripped; `None` for plain text
    pub fn contents(&self) -> Option<&'t str> {
        match self {
            Segment::Text { .. } => None,
            Segment::Variable { source, .. }
            | Segment::Block { source, .. }
            | Segment::Comment { source, .. } => {
                Some(&source[TAG_DELIMITER_LEN..source.len() - TAG_DELIMITER_LEN])
            }
        }
    }
}

enum TagKind {
    Variable,
    Block,
    Comment,
}

impl TagKind {
    fn end(&self) -> &'static str {
        match self {
            TagKind::Variable => VARIABLE_TAG_END,
            TagKind::Block => BLOCK_TAG_END,
            TagKind::Comment => COMMENT_TAG_END,
        }
    }
}

/// Splits template text into [segments](Segment)
///
/// The tokenizer is lazy and borrows the input; create a new one to restart.
/// Malformed tag syntax never fails: an opener with no matching closer is
/// passed through as plain text.
#[derive(Debug, Clone)]
pub struct Tokenizer<'t> {
    rest: &'t str,
    byte: usize,
}

impl<'t> Tokenizer<'t> {
    pub fn new(template: &'t str) -> Self {
        Self {
            rest: template,
            byte: 0,
        }
    }

    fn take_text(&mut self, len: usize) -> Segment<'t> {
        let text = &self.rest[..len];
        let at = self.byte..self.byte + len;
        self.byte += len;
        self.rest = &self.rest[len..];
        Segment::Text { text, at }
    }

    fn lex_text(&mut self) -> Segment<'t> {
        let next_tag = [
            self.rest.find(VARIABLE_TAG_START),
            self.rest.find(BLOCK_TAG_START),
            self.rest.find(COMMENT_TAG_START),
        ]
        .into_iter()
        .flatten()
        .min();

        self.take_text(next_tag.unwrap_or(self.rest.len()))
    }

    fn lex_tag(&mut self, kind: TagKind) -> Segment<'t> {
        let Some(end) = self.rest.find(kind.end()) else {
            // unterminated tag; the remainder of the input is text
            return self.take_text(self.rest.len());
        };

        let len = end + TAG_DELIMITER_LEN;
        let source = &self.rest[..len];
        let at = self.byte..self.byte + len;
        self.byte += len;
        self.rest = &self.rest[len..];

        match kind {
            TagKind::Variable => Segment::Variable { source, at },
            TagKind::Block => Segment::Block { source, at },
            TagKind::Comment => Segment::Comment { source, at },
        }
    }
}

impl<'t> Iterator for Tokenizer<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        Some(if self.rest.starts_with(VARIABLE_TAG_START) {
            self.lex_tag(TagKind::Variable)
        } else if self.rest.starts_with(BLOCK_TAG_START) {
            self.lex_tag(TagKind::Block)
        } else if self.rest.starts_with(COMMENT_TAG_START) {
            self.lex_tag(TagKind::Comment)
        } else {
            self.lex_text()
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    macro_rules! tokenize_test {
        ($test_name:ident, $template:expr, $segments:expr) => {
            #[test]
            fn $test_name() {
                let exp: Vec<Segment> = $segments;
                let got: Vec<Segment> = Tokenizer::new($template).collect();
                assert_eq!(exp, got);
            }
        };
    }

    tokenize_test!(tokenize_empty, "", vec![]);

    tokenize_test!(
        tokenize_plain_text,
        "Just some text",
        vec![Segment::Text {
            text: "Just some text",
            at: 0..14,
        }]
    );

    tokenize_test!(
        tokenize_variable,
        "{{ entry.title }}",
        vec![Segment::Variable {
            source: "{{ entry.title }}",
            at: 0..17,
        }]
    );

    tokenize_test!(
        tokenize_block,
        "{% extends \"base\" %}",
        vec![Segment::Block {
            source: "{% extends \"base\" %}",
            at: 0..20,
        }]
    );

    tokenize_test!(
        tokenize_comment,
        "{# not rendered #}",
        vec![Segment::Comment {
            source: "{# not rendered #}",
            at: 0..18,
        }]
    );

    tokenize_test!(
        tokenize_mixed_template,
        "text\n{% if test %}{{ value }}{% endif %}end",
        vec![
            Segment::Text {
                text: "text\n",
                at: 0..5,
            },
            Segment::Block {
                source: "{% if test %}",
                at: 5..18,
            },
            Segment::Variable {
                source: "{{ value }}",
                at: 18..29,
            },
            Segment::Block {
                source: "{% endif %}",
                at: 29..40,
            },
            Segment::Text {
                text: "end",
                at: 40..43,
            },
        ]
    );

    tokenize_test!(
        tokenize_adjacent_tags,
        "{{ a }}{{ b }}",
        vec![
            Segment::Variable {
                source: "{{ a }}",
                at: 0..7,
            },
            Segment::Variable {
                source: "{{ b }}",
                at: 7..14,
            },
        ]
    );

    tokenize_test!(
        unterminated_variable_is_text,
        "{{ entry.title }",
        vec![Segment::Text {
            text: "{{ entry.title }",
            at: 0..16,
        }]
    );

    tokenize_test!(
        unterminated_block_is_text,
        "start {% if test %",
        vec![
            Segment::Text {
                text: "start ",
                at: 0..6,
            },
            Segment::Text {
                text: "{% if test %",
                at: 6..18,
            },
        ]
    );

    tokenize_test!(
        unterminated_comment_is_text,
        "{# dangling",
        vec![Segment::Text {
            text: "{# dangling",
            at: 0..11,
        }]
    );

    tokenize_test!(
        lone_brace_is_text,
        "a { b } c",
        vec![Segment::Text {
            text: "a { b } c",
            at: 0..9,
        }]
    );

    tokenize_test!(
        earliest_closer_wins,
        "{% a }} %}",
        vec![Segment::Block {
            source: "{% a }} %}",
            at: 0..10,
        }]
    );

    #[test]
    fn contents_strips_delimiters() {
        let segments: Vec<Segment> = Tokenizer::new("pre{{ title }}{% endif %}{#c#}").collect();

        let contents: Vec<Option<&str>> = segments.iter().map(|s| s.contents()).collect();

        assert_eq!(contents, vec![None, Some(" title "), Some(" endif "), Some("c")]);
    }

    #[test]
    fn delimiter_free_text_is_a_single_segment() {
        for text in ["a", "no tags here\nat all", "} % # {", "   "] {
            let segments: Vec<Segment> = Tokenizer::new(text).collect();

            assert_eq!(
                segments,
                vec![Segment::Text {
                    text,
                    at: 0..text.len(),
                }]
            );
        }
    }

    #[test]
    fn reassembly_is_lossless() {
        let listing = textwrap::dedent(
            "
            {% extends \"base\" %}
            {% block content %}
            <ul>{% for entry in entries.get_entry_list %}
            <li>{{ entry.title }}</li>
            {% endfor %}</ul>
            {% endblock %}
            ",
        );
        let templates = [
            "",
            "plain",
            "{{ a }}{% b %}{# c #}",
            "text {{ unterminated",
            "{%no spaces%}tail",
            listing.as_str(),
        ];

        for template in templates {
            let reassembled: String = Tokenizer::new(template).map(|s| s.source()).collect();

            assert_eq!(template, reassembled);
        }
    }

    #[test]
    fn spans_partition_the_input() {
        let template = "a{{ b }}c{% d %}{# e #}";

        let mut expected_start = 0;
        for segment in Tokenizer::new(template) {
            assert_eq!(expected_start, segment.span().start);
            assert_eq!(segment.source(), span::slice(template, segment.span()));
            expected_start = segment.span().end;
        }

        assert_eq!(expected_start, template.len());
    }
}
