use console::Style;
use similar::{ChangeTag, TextDiff};

/// Render a unified diff between a template and its ported text, styled
/// for the terminal. Colors disable themselves when stdout is not a tty.
pub fn unified_diff(name: &str, old: &str, new: &str) -> String {
    let header = Style::new().bold();

    let mut output = String::new();
    output.push_str(&format!("{}\n", header.apply_to(format!("--- {name}"))));
    output.push_str(&format!("{}\n", header.apply_to(format!("+++ {name} (ported)"))));

    let diff = TextDiff::from_lines(old, new);
    let mut unified = diff.unified_diff();
    unified.context_radius(3);

    for hunk in unified.iter_hunks() {
        output.push_str(&format!("{}\n", header.apply_to(hunk.header())));

        for change in hunk.iter_changes() {
            let (sign, style) = match change.tag() {
                ChangeTag::Delete => ("-", Style::new().red()),
                ChangeTag::Insert => ("+", Style::new().green()),
                ChangeTag::Equal => (" ", Style::new()),
            };

            output.push_str(&format!(
                "{}{}",
                style.apply_to(sign).bold(),
                style.apply_to(change)
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_changed_lines_with_signs() {
        console::set_colors_enabled(false);

        let old = "{% extends \"base\" %}\n<p>kept</p>\n";
        let new = "{% extends \"base.html\" %}\n<p>kept</p>\n";

        let rendered = unified_diff("blog/entry_detail.html", old, new);

        assert_eq!(
            textwrap::dedent(
                r#"
                --- blog/entry_detail.html
                +++ blog/entry_detail.html (ported)
                @@ -1,2 +1,2 @@
                -{% extends "base" %}
                +{% extends "base.html" %}
                 <p>kept</p>
                "#,
            )
            .trim_start(),
            rendered
        );
    }
}
