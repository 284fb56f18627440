use proptest::prelude::*;
use std::collections::HashSet;
use unitbench::generator::{
    ComparisonGroup, Correction, FileConfig, FixedPicker, Layout, NameAllocator, OperationGroup,
    Operator, annotated_count, assemble, assign_units, build_comparison_sequence,
    build_operation_sequence,
};
use unitbench::types::{Namespace, UnitLabel, default_units};

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![Just(Operator::Mul), Just(Operator::Div), Just(Operator::Add), Just(Operator::Sub)]
}

fn layout() -> impl Strategy<Value = Layout> {
    prop_oneof![Just(Layout::PerLine), Just(Layout::SingleExpression)]
}

fn correction() -> impl Strategy<Value = Correction> {
    prop_oneof![Just(Correction::Corrected), Just(Correction::Uncorrected)]
}

proptest! {
    #[test]
    fn prop_operator_count_matches_requested(
        op in operator(),
        layout in layout(),
        correction in correction(),
        n in 1usize..40,
        pct in 0u32..=100,
    ) {
        let group = OperationGroup {
            operator: op,
            num_ops: n,
            fraction_annotated: f64::from(pct) / 100.0,
            units: default_units(),
            layout,
            correction,
            end_annotation: None,
        };
        let code = build_operation_sequence(&mut NameAllocator::new(), &group).unwrap();
        let needle = format!(" {} ", op.symbol());
        prop_assert_eq!(code.matches(needle.as_str()).count(), n);
        let results = code.lines().filter(|l| l.trim_start().starts_with("double result")).count();
        match layout {
            Layout::PerLine => prop_assert_eq!(results, n),
            Layout::SingleExpression => prop_assert_eq!(results, 1),
        }
    }

    #[test]
    fn prop_annotated_prefix_has_floor_size(n in 0usize..60, pct in 0u32..=100) {
        let group = OperationGroup {
            operator: Operator::Mul,
            num_ops: n,
            fraction_annotated: f64::from(pct) / 100.0,
            units: default_units(),
            layout: Layout::SingleExpression,
            correction: Correction::Corrected,
            end_annotation: None,
        };
        let code = build_operation_sequence(&mut NameAllocator::new(), &group).unwrap();
        let lines: Vec<&str> = code.lines().map(str::trim).collect();
        // a declaration is annotated iff the line before it is an annotation
        let flags: Vec<bool> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.starts_with("double starting"))
            .map(|(i, _)| i > 0 && lines[i - 1].starts_with('@'))
            .collect();
        let expected = (n * pct as usize) / 100;
        prop_assert_eq!(flags.len(), n);
        prop_assert_eq!(flags.iter().filter(|f| **f).count(), expected);
        prop_assert!(flags.iter().skip(expected).all(|f| !*f));
        prop_assert_eq!(annotated_count(f64::from(pct) / 100.0, n), expected);
    }

    #[test]
    fn prop_units_cycle_through_pool(count in 0usize..50, pool_len in 1usize..8) {
        let pool: Vec<UnitLabel> = (0..pool_len).map(|i| UnitLabel::new(format!("u{i}"))).collect();
        let out = assign_units(count, &pool).unwrap();
        prop_assert_eq!(out.len(), count);
        for (i, u) in out.iter().enumerate() {
            prop_assert_eq!(u, &pool[i % pool_len]);
        }
    }

    #[test]
    fn prop_comparison_count_matches_requested(n in 0usize..40, correction in correction()) {
        let group = ComparisonGroup {
            num_comps: n,
            fraction_annotated: 0.5,
            units: vec![UnitLabel::from("s")],
            correction,
        };
        let code = build_comparison_sequence(&mut NameAllocator::new(), &group).unwrap();
        prop_assert_eq!(code.matches(" == ").count(), n);
        prop_assert_eq!(code.matches("{}").count(), n);
    }

    #[test]
    fn prop_allocator_never_repeats(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut alloc = NameAllocator::new();
        let mut seen = HashSet::new();
        for starting in ops {
            let ns = if starting { Namespace::Starting } else { Namespace::Result };
            prop_assert!(seen.insert(alloc.next(ns).to_string()));
        }
    }

    #[test]
    fn prop_assembled_identifiers_are_unique(
        mult in (0i64..4, 0i64..6),
        add in (0i64..4, 0i64..6),
        comp in (0i64..4, 0i64..6),
        per_line in any::<bool>(),
    ) {
        let mut cfg = FileConfig::default()
            .with_mult(mult.0, mult.1)
            .with_add(add.0, add.1)
            .with_comp(comp.0, comp.1);
        cfg.mult.per_line = per_line;
        cfg.add.per_line = per_line;
        let file = assemble(&cfg, &mut FixedPicker("m".into())).unwrap();
        let mut seen = HashSet::new();
        for line in file.source.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix("double ") {
                let ident = rest.split(' ').next().unwrap_or_default();
                prop_assert!(seen.insert(ident.to_string()), "duplicate {}", ident);
            }
        }
        prop_assert!(file.source.ends_with("    }\n}"), "file does not close main and the class");
    }
}
