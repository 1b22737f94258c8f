use console::Style;

pub fn ported(something: impl ToString) {
    eprintln!(
        "{} {}",
        Style::new().for_stderr().green().apply_to("ported"),
        something.to_string()
    );
}

pub fn copied(something: impl ToString) {
    eprintln!(
        "{} {}",
        Style::new().for_stderr().green().apply_to("copied"),
        something.to_string()
    );
}

pub fn guessed(something: impl ToString) {
    eprintln!(
        "{} {}",
        Style::new().for_stderr().yellow().apply_to("guessed"),
        something.to_string()
    );
}

pub fn detail(something: impl ToString) {
    eprintln!(
        "  {}",
        Style::new().for_stderr().dim().apply_to(something.to_string())
    );
}

pub fn error(something: impl ToString) {
    eprintln!(
        "{}: {}",
        Style::new().for_stderr().red().apply_to("error"),
        something.to_string()
    );
}
