use crate::errors::UnitBenchError;
use crate::generator::emit::{BODY_DEPTH, push_annotation, push_line};
use crate::generator::naming::NameAllocator;
use crate::generator::ops::Correction;
use crate::generator::units::assign_units;
use crate::types::{Identifier, Namespace, Operand, UnitLabel, VariableDecl};

/// Starting-variable declarations for one group, in consumption order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBlock {
    pub decls: Vec<VariableDecl>,
}

impl VariableBlock {
    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.decls.iter().map(|d| d.ident)
    }

    #[must_use]
    pub fn annotated_count(&self) -> usize {
        self.decls.iter().filter(|d| d.unit.is_some()).count()
    }

    /// Operand list for a sequence: the declared variables, preceded by the
    /// constant one in corrected mode.
    #[must_use]
    pub fn operands(&self, correction: Correction) -> Vec<Operand> {
        let mut operands = Vec::with_capacity(self.decls.len() + 1);
        if correction == Correction::Corrected {
            operands.push(Operand::Constant);
        }
        operands.extend(self.identifiers().map(Operand::Var));
        operands
    }

    pub fn render_into(&self, out: &mut String) {
        for decl in &self.decls {
            if let Some(unit) = &decl.unit {
                push_annotation(out, BODY_DEPTH, unit);
            }
            // type and value are irrelevant to the benchmark
            push_line(out, BODY_DEPTH, &format!("double {} = 0;", decl.ident));
        }
    }
}

/// `floor(fraction * count)`, tolerant of the representation error in
/// fractions derived from whole percentages (e.g. `0.29 * 100`).
#[must_use]
pub fn annotated_count(fraction: f64, count: usize) -> usize {
    let exact = fraction * count as f64;
    (exact + 1e-9).floor() as usize
}

/// Declare `count` fresh starting variables, annotating the first
/// `floor(fraction * count)` of them with round-robin units from `pool`.
///
/// # Errors
/// `InvalidConfiguration` if `fraction` is outside `[0.0, 1.0]` or the pool is
/// empty while annotations are required.
pub fn declare(
    alloc: &mut NameAllocator,
    count: usize,
    fraction: f64,
    pool: &[UnitLabel],
) -> Result<VariableBlock, UnitBenchError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(UnitBenchError::invalid(format!(
            "annotation fraction {fraction} is outside [0.0, 1.0]"
        )));
    }
    let annotated = annotated_count(fraction, count).min(count);
    let units = assign_units(annotated, pool)?;
    let decls = (0..count)
        .map(|i| VariableDecl {
            ident: alloc.next(Namespace::Starting),
            unit: units.get(i).cloned(),
        })
        .collect();
    Ok(VariableBlock { decls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_units;

    #[test]
    fn annotated_prefix_precedes_unannotated_suffix() {
        let mut alloc = NameAllocator::new();
        let block = declare(&mut alloc, 4, 0.5, &default_units()).unwrap();
        let units: Vec<Option<&str>> =
            block.decls.iter().map(|d| d.unit.as_ref().map(UnitLabel::as_str)).collect();
        assert_eq!(units, [Some("m"), Some("g"), None, None]);
        assert_eq!(block.annotated_count(), 2);
    }

    #[test]
    fn floor_is_exact_for_whole_percentages() {
        assert_eq!(annotated_count(0.29, 100), 29);
        assert_eq!(annotated_count(0.75, 3), 2);
        assert_eq!(annotated_count(1.0, 5), 5);
        assert_eq!(annotated_count(0.0, 5), 0);
        assert_eq!(annotated_count(0.57, 100), 57);
    }

    #[test]
    fn render_emits_annotation_above_declaration() {
        let mut alloc = NameAllocator::new();
        let block = declare(&mut alloc, 2, 0.5, &["s".into()]).unwrap();
        let mut out = String::new();
        block.render_into(&mut out);
        assert_eq!(out, "        @s\n        double starting1 = 0;\n        double starting2 = 0;\n");
    }

    #[test]
    fn corrected_operands_start_with_constant() {
        let mut alloc = NameAllocator::new();
        let block = declare(&mut alloc, 2, 0.0, &[]).unwrap();
        let ops = block.operands(Correction::Corrected);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0], Operand::Constant);
        assert_eq!(block.operands(Correction::Uncorrected).len(), 2);
    }

    #[test]
    fn fraction_out_of_range_is_rejected() {
        let mut alloc = NameAllocator::new();
        assert!(declare(&mut alloc, 3, 1.5, &default_units()).is_err());
        assert!(declare(&mut alloc, 3, -0.1, &default_units()).is_err());
        assert!(declare(&mut alloc, 3, f64::NAN, &default_units()).is_err());
        // nothing was allocated by the failed calls
        assert_eq!(alloc.issued(Namespace::Starting), 0);
    }
}
