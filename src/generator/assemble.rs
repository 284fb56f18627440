use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::UnitBenchError;
use crate::generator::comps::{ComparisonGroup, build_comparison_sequence};
use crate::generator::emit::{BODY_DEPTH, push_line};
use crate::generator::naming::NameAllocator;
use crate::generator::ops::{Correction, Layout, OperationGroup, Operator, build_operation_sequence};
use crate::generator::units::UnitPicker;
use crate::types::{MULT_END_UNIT, UnitLabel, default_units};
use crate::utils::num::{count_from_i64, percent_to_fraction};

/// File extension of written artifacts.
pub const ARTIFACT_EXTENSION: &str = "java";

/// Knobs for multiplication or addition groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticKnobs {
    pub groups: i64,
    /// Operations per group.
    pub ops: i64,
    /// Annotate the final result of each group.
    pub end: bool,
    pub per_line: bool,
    pub no_correction: bool,
    /// Percentage (0..=100) of starting variables carrying a unit.
    pub annot: i64,
}

impl Default for ArithmeticKnobs {
    fn default() -> Self {
        Self { groups: 1, ops: 0, end: false, per_line: false, no_correction: false, annot: 100 }
    }
}

/// Knobs for comparison groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonKnobs {
    pub groups: i64,
    pub ops: i64,
    pub no_correction: bool,
    pub annot: i64,
}

impl Default for ComparisonKnobs {
    fn default() -> Self {
        Self { groups: 1, ops: 0, no_correction: false, annot: 100 }
    }
}

/// Everything that determines one generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileConfig {
    pub mult: ArithmeticKnobs,
    pub add: ArithmeticKnobs,
    pub comp: ComparisonKnobs,
    pub units: Vec<UnitLabel>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            mult: ArithmeticKnobs::default(),
            add: ArithmeticKnobs::default(),
            comp: ComparisonKnobs::default(),
            units: default_units(),
        }
    }
}

impl FileConfig {
    #[must_use]
    pub fn with_mult(mut self, groups: i64, ops: i64) -> Self {
        self.mult.groups = groups;
        self.mult.ops = ops;
        self
    }

    #[must_use]
    pub fn with_add(mut self, groups: i64, ops: i64) -> Self {
        self.add.groups = groups;
        self.add.ops = ops;
        self
    }

    #[must_use]
    pub fn with_comp(mut self, groups: i64, ops: i64) -> Self {
        self.comp.groups = groups;
        self.comp.ops = ops;
        self
    }

    /// Container name, e.g. `Mult1x3_Add0x0_Comp0x0`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "Mult{}x{}_Add{}x{}_Comp{}x{}",
            self.mult.groups, self.mult.ops, self.add.groups, self.add.ops, self.comp.groups, self.comp.ops
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct CheckedKnobs {
    groups: usize,
    ops: usize,
    fraction: f64,
}

impl CheckedKnobs {
    fn enabled(self) -> bool {
        self.groups > 0 && self.ops > 0
    }
}

fn check(kind: &str, groups: i64, ops: i64, annot: i64) -> Result<CheckedKnobs, UnitBenchError> {
    Ok(CheckedKnobs {
        groups: count_from_i64(&format!("{kind}_groups"), groups)?,
        ops: count_from_i64(kind, ops)?,
        fraction: percent_to_fraction(&format!("{kind}_annot"), annot)?,
    })
}

/// Assembled source text together with its container name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub source: String,
}

impl GeneratedFile {
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{ARTIFACT_EXTENSION}", self.name)
    }
}

/// Build the complete source for `config`.
///
/// The whole configuration is validated before any text is produced. The
/// `picker` chooses the single unit used by each addition and comparison group.
///
/// # Errors
/// `InvalidConfiguration` for negative counts, percentages outside 0..=100,
/// or an empty unit pool while any group is enabled.
pub fn assemble(config: &FileConfig, picker: &mut dyn UnitPicker) -> Result<GeneratedFile, UnitBenchError> {
    let mult = check("mult", config.mult.groups, config.mult.ops, config.mult.annot)?;
    let add = check("add", config.add.groups, config.add.ops, config.add.annot)?;
    let comp = check("comp", config.comp.groups, config.comp.ops, config.comp.annot)?;
    if config.units.is_empty() && (mult.enabled() || add.enabled() || comp.enabled()) {
        return Err(UnitBenchError::invalid("unit pool must not be empty"));
    }

    let name = config.file_name();
    let mut alloc = NameAllocator::new();
    let mut body = String::new();

    if mult.enabled() {
        // any combination of units multiplies; the end unit is arbitrary
        let end_annotation = config.mult.end.then(|| UnitLabel::from(MULT_END_UNIT));
        for _ in 0..mult.groups {
            let group = OperationGroup {
                operator: Operator::Mul,
                num_ops: mult.ops,
                fraction_annotated: mult.fraction,
                units: config.units.clone(),
                layout: Layout::from_per_line(config.mult.per_line),
                correction: Correction::from_no_correction(config.mult.no_correction),
                end_annotation: end_annotation.clone(),
            };
            push_group(&mut body, group.operator.plural(), mult.ops);
            body.push_str(&build_operation_sequence(&mut alloc, &group)?);
            body.push('\n');
        }
    }

    if add.enabled() {
        for _ in 0..add.groups {
            // only like units add, so one unit per group
            let unit = picker.pick(&config.units)?;
            let group = OperationGroup {
                operator: Operator::Add,
                num_ops: add.ops,
                fraction_annotated: add.fraction,
                units: vec![unit.clone()],
                layout: Layout::from_per_line(config.add.per_line),
                correction: Correction::from_no_correction(config.add.no_correction),
                end_annotation: config.add.end.then_some(unit),
            };
            push_group(&mut body, group.operator.plural(), add.ops);
            body.push_str(&build_operation_sequence(&mut alloc, &group)?);
            body.push('\n');
        }
    }

    if comp.enabled() {
        for _ in 0..comp.groups {
            let unit = picker.pick(&config.units)?;
            let group = ComparisonGroup {
                num_comps: comp.ops,
                fraction_annotated: comp.fraction,
                units: vec![unit],
                correction: Correction::from_no_correction(config.comp.no_correction),
            };
            push_group(&mut body, "comparisons", comp.ops);
            body.push_str(&build_comparison_sequence(&mut alloc, &group)?);
            body.push('\n');
        }
    }

    let mut source = String::with_capacity(body.len() + 128);
    source.push_str("import units.qual.*;\n\n");
    source.push_str(&format!("public class {name} {{\n\n"));
    push_line(&mut source, 1, &format!("public {name}() {{"));
    source.push('\n');
    source.push_str(&body);
    push_line(&mut source, 1, "}");
    source.push('}');
    Ok(GeneratedFile { name, source })
}

fn push_group(body: &mut String, noun: &str, n: usize) {
    push_line(body, BODY_DEPTH, &format!("// A group of {n} {noun}"));
}

/// Persist `file` as `<dir>/<name>.java` through a temp file in the same
/// directory, so a failed write never leaves a truncated artifact.
///
/// # Errors
/// Returns an I/O error if the directory cannot be created or the write or
/// rename fails.
pub fn write_artifact(dir: &Path, file: &GeneratedFile) -> Result<PathBuf, UnitBenchError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    let dest = dir.join(file.file_name());
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(file.source.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&dest).map_err(|e| UnitBenchError::Io(e.error))?;
    log::info!("generated microbenchmark: {}", dest.display());
    Ok(dest)
}

/// Assemble and write in one step; returns the artifact path.
///
/// # Errors
/// See [`assemble`] and [`write_artifact`].
pub fn generate_file(
    dir: &Path,
    config: &FileConfig,
    picker: &mut dyn UnitPicker,
) -> Result<PathBuf, UnitBenchError> {
    let file = assemble(config, picker)?;
    write_artifact(dir, &file)
}
