use crate::errors::UnitBenchError;
use crate::generator::emit::{BODY_DEPTH, push_annotation, push_line};
use crate::generator::naming::NameAllocator;
use crate::generator::variables::declare;
use crate::types::{Namespace, Operand, UnitLabel};

/// Binary arithmetic operator applied along a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Mul,
    Div,
    Add,
    Sub,
}

impl Operator {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Add => "+",
            Operator::Sub => "-",
        }
    }

    /// Plural noun used in the group comment.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Operator::Mul => "multiplications",
            Operator::Div => "divisions",
            Operator::Add => "additions",
            Operator::Sub => "subtractions",
        }
    }
}

/// Whether a constant one is prepended so that operands == operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// `n` declared variables plus the constant one.
    Corrected,
    /// `n + 1` declared variables.
    Uncorrected,
}

impl Correction {
    #[must_use]
    pub fn from_no_correction(no_correction: bool) -> Self {
        if no_correction { Correction::Uncorrected } else { Correction::Corrected }
    }

    /// Number of variables to declare for `n` operations.
    #[must_use]
    pub fn declared_count(self, n: usize) -> usize {
        match self {
            Correction::Corrected => n,
            Correction::Uncorrected => n + 1,
        }
    }
}

/// One result variable per operation, or a single flattened expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    PerLine,
    SingleExpression,
}

impl Layout {
    #[must_use]
    pub fn from_per_line(per_line: bool) -> Self {
        if per_line { Layout::PerLine } else { Layout::SingleExpression }
    }
}

#[derive(Debug, Clone)]
pub struct OperationGroup {
    pub operator: Operator,
    pub num_ops: usize,
    /// Fraction (0.0..=1.0) of starting variables that carry a unit.
    pub fraction_annotated: f64,
    pub units: Vec<UnitLabel>,
    pub layout: Layout,
    pub correction: Correction,
    pub end_annotation: Option<UnitLabel>,
}

/// Emit declarations followed by exactly `num_ops` applications of the
/// group's operator.
///
/// # Errors
/// Propagates `InvalidConfiguration` from variable declaration.
pub fn build_operation_sequence(
    alloc: &mut NameAllocator,
    group: &OperationGroup,
) -> Result<String, UnitBenchError> {
    log::debug!(
        "operation group: op={} n={} layout={:?} correction={:?}",
        group.operator.symbol(),
        group.num_ops,
        group.layout,
        group.correction
    );
    let count = group.correction.declared_count(group.num_ops);
    let block = declare(alloc, count, group.fraction_annotated, &group.units)?;
    let mut code = String::new();
    block.render_into(&mut code);

    let operands = block.operands(group.correction);
    if operands.len() < 2 {
        return Ok(code);
    }
    let op = group.operator.symbol();
    match group.layout {
        Layout::PerLine => {
            let mut prev = operands[0];
            let last = operands.len() - 1;
            for (i, rhs) in operands.iter().enumerate().skip(1) {
                // the previous result is always the left operand
                let result = alloc.next(Namespace::Result);
                if i == last
                    && let Some(unit) = &group.end_annotation
                {
                    push_annotation(&mut code, BODY_DEPTH, unit);
                }
                push_line(&mut code, BODY_DEPTH, &format!("double {result} = {prev} {op} {rhs};"));
                prev = Operand::Var(result);
            }
        }
        Layout::SingleExpression => {
            let result = alloc.next(Namespace::Result);
            if let Some(unit) = &group.end_annotation {
                push_annotation(&mut code, BODY_DEPTH, unit);
            }
            let expr = operands
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(&format!(" {op} "));
            push_line(&mut code, BODY_DEPTH, &format!("double {result} = {expr};"));
        }
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_units;

    fn group(num_ops: usize, layout: Layout, correction: Correction) -> OperationGroup {
        OperationGroup {
            operator: Operator::Mul,
            num_ops,
            fraction_annotated: 1.0,
            units: default_units(),
            layout,
            correction,
            end_annotation: Some("m".into()),
        }
    }

    #[test]
    fn per_line_corrected_folds_from_constant() {
        let mut alloc = NameAllocator::new();
        let code =
            build_operation_sequence(&mut alloc, &group(3, Layout::PerLine, Correction::Corrected))
                .unwrap();
        let expected = [
            "@m",
            "double starting1 = 0;",
            "@g",
            "double starting2 = 0;",
            "@s",
            "double starting3 = 0;",
            "double result1 = (@Dimensionless int) 1 * starting1;",
            "double result2 = result1 * starting2;",
            "@m",
            "double result3 = result2 * starting3;",
        ]
        .iter()
        .map(|l| format!("        {l}\n"))
        .collect::<String>();
        assert_eq!(code, expected);
    }

    #[test]
    fn single_expression_uncorrected_uses_all_operands() {
        let mut alloc = NameAllocator::new();
        let mut g = group(2, Layout::SingleExpression, Correction::Uncorrected);
        g.operator = Operator::Add;
        g.end_annotation = None;
        g.fraction_annotated = 0.0;
        let code = build_operation_sequence(&mut alloc, &g).unwrap();
        assert!(code.ends_with("        double result1 = starting1 + starting2 + starting3;\n"));
        assert!(!code.contains('@'));
    }

    #[test]
    fn single_operation_per_line_still_gets_end_annotation() {
        let mut alloc = NameAllocator::new();
        let code =
            build_operation_sequence(&mut alloc, &group(1, Layout::PerLine, Correction::Uncorrected))
                .unwrap();
        assert!(code.ends_with("        @m\n        double result1 = starting1 * starting2;\n"));
    }

    #[test]
    fn zero_operations_emit_no_result() {
        let mut alloc = NameAllocator::new();
        let corrected =
            build_operation_sequence(&mut alloc, &group(0, Layout::PerLine, Correction::Corrected))
                .unwrap();
        assert!(corrected.is_empty());
        let uncorrected = build_operation_sequence(
            &mut alloc,
            &group(0, Layout::SingleExpression, Correction::Uncorrected),
        )
        .unwrap();
        assert_eq!(uncorrected.matches("double ").count(), 1);
        assert!(!uncorrected.contains("result"));
    }

    #[test]
    fn operator_count_is_independent_of_mode() {
        for layout in [Layout::PerLine, Layout::SingleExpression] {
            for correction in [Correction::Corrected, Correction::Uncorrected] {
                let mut alloc = NameAllocator::new();
                let code = build_operation_sequence(&mut alloc, &group(5, layout, correction)).unwrap();
                assert_eq!(code.matches(" * ").count(), 5, "{layout:?} {correction:?}");
            }
        }
    }
}
