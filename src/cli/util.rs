use crate::harness::OpKind;

use super::runner::OutputMode;

pub fn parse_output_mode(s: Option<&str>) -> OutputMode {
    match s.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        Some("plain") => OutputMode::Plain,
        _ => OutputMode::Human,
    }
}

/// Parse `add,mult,comp`; unknown entries are errors.
pub fn parse_kinds(s: &[String]) -> Result<Vec<OpKind>, crate::errors::UnitBenchError> {
    s.iter().map(|k| OpKind::parse(k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_parsing() {
        assert_eq!(parse_output_mode(Some("JSON")), OutputMode::Json);
        assert_eq!(parse_output_mode(Some("plain")), OutputMode::Plain);
        assert_eq!(parse_output_mode(None), OutputMode::Human);
        assert_eq!(parse_output_mode(Some("other")), OutputMode::Human);
    }

    #[test]
    fn kind_parsing() {
        let kinds = parse_kinds(&["mult".into(), "comp".into()]).unwrap();
        assert_eq!(kinds, [OpKind::Mult, OpKind::Comp]);
        assert!(parse_kinds(&["sqrt".into()]).is_err());
    }
}
