use std::ops::Range;

/// A pair of T and the byte range it came from in the source text
pub type Spanned<T> = (T, Span);

/// A byte range into the source text
pub type Span = Range<usize>;

/// A span representing no location in the source text
pub const NO_SPAN: Span = 0..0;

/// The source text covered by a span
pub fn slice<'s>(source: &'s str, span: &Span) -> &'s str {
    &source[span.start..span.end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_pairs_value_with_location() {
        let spanned_tag: Spanned<String> = (String::from("{{ entry }}"), 7..18);

        assert_eq!(spanned_tag, (String::from("{{ entry }}"), 7..18));
    }

    #[test]
    fn slice_recovers_the_spanned_text() {
        let source = "<body>{{ entry }}</body>";

        assert_eq!(slice(source, &(6..17)), "{{ entry }}");
    }

    #[test]
    fn no_span_is_empty() {
        let source = "<body></body>";

        assert_eq!(slice(source, &NO_SPAN), "");
    }
}
