use crate::errors::UnitBenchError;
use crate::generator::emit::{BODY_DEPTH, push_line};
use crate::generator::naming::NameAllocator;
use crate::generator::ops::Correction;
use crate::generator::variables::declare;
use crate::types::UnitLabel;

#[derive(Debug, Clone)]
pub struct ComparisonGroup {
    pub num_comps: usize,
    pub fraction_annotated: f64,
    pub units: Vec<UnitLabel>,
    pub correction: Correction,
}

/// Emit declarations followed by `num_comps` independent equality checks
/// between consecutive operands. Each check has an empty body.
///
/// # Errors
/// Propagates `InvalidConfiguration` from variable declaration.
pub fn build_comparison_sequence(
    alloc: &mut NameAllocator,
    group: &ComparisonGroup,
) -> Result<String, UnitBenchError> {
    log::debug!("comparison group: n={} correction={:?}", group.num_comps, group.correction);
    let count = group.correction.declared_count(group.num_comps);
    let block = declare(alloc, count, group.fraction_annotated, &group.units)?;
    let mut code = String::new();
    block.render_into(&mut code);
    for pair in block.operands(group.correction).windows(2) {
        let line = format!("if ({} == {}) {{}}", pair[0].bare(), pair[1].bare());
        push_line(&mut code, BODY_DEPTH, &line);
    }
    Ok(code)
}
