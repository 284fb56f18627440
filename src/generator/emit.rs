//! Line-level helpers shared by the sequence generators and the file template.

const INDENT: &str = "    ";

/// Indentation depth of statements inside the generated constructor.
pub(crate) const BODY_DEPTH: usize = 2;

pub(crate) fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

pub(crate) fn push_annotation(out: &mut String, depth: usize, unit: &impl std::fmt::Display) {
    push_line(out, depth, &format!("@{unit}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_indented_by_four_spaces_per_level() {
        let mut out = String::new();
        push_line(&mut out, 2, "double x = 0;");
        push_annotation(&mut out, 1, &"m");
        assert_eq!(out, "        double x = 0;\n    @m\n");
    }
}
