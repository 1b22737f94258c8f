use line_col::LineColLookup;

/// Map a byte index to a position (line, column)
///
/// Line and column are zero based
pub fn index_to_position(source: &str, index: usize) -> (usize, usize) {
    let lookup = LineColLookup::new(source);

    let (line, column) = lookup.get(index);

    (line - 1, column - 1)
}

/// Map a position (line, column) to a byte index
///
/// Line and column are zero based
pub fn position_to_index(source: &str, position: (usize, usize)) -> usize {
    let (line, column) = position;

    let line_start = if line == 0 {
        0
    } else {
        source
            .char_indices()
            .filter(|(_, c)| *c == '\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
            .unwrap_or(source.len())
    };

    line_start + column
}
