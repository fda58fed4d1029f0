use braid_core::{schema::Role, Ocp};
use braid_multiphase::{Error, Event, MultiphaseOcp};
use ndarray::{arr1, arr2};

/// A minimal phase with `nx` states and one control.
fn phase(name: &str, nx: usize) -> Ocp {
    let mut ocp = Ocp::default();
    ocp.model.name = name.to_string();
    ocp.model.state_names = (0..nx).map(|i| format!("x{i}")).collect();
    ocp.model.control_names = vec!["u".to_string()];
    ocp
}

#[test]
fn composes_two_phases_with_clashing_model_names() {
    let mut ocp = MultiphaseOcp::new(vec![10, 5]).expect("valid stage counts");
    ocp.set_phase(phase("m", 4), 0);
    ocp.set_phase(phase("m", 4), 1);

    let report = ocp.make_consistent_unobserved().expect("should compose");

    assert_eq!(ocp.models[0].name, "m_0");
    assert_eq!(ocp.models[1].name, "m_1");
    let renames = report.renamed_models.expect("names were deduplicated");
    assert_eq!(renames.original, vec!["m", "m"]);
    assert_eq!(renames.renamed, vec!["m_0", "m_1"]);

    let indices = ocp.indices().expect("derived after make_consistent");
    assert_eq!(indices.total_horizon, 15);
    assert_eq!(indices.start, vec![0, 10]);
    assert_eq!(indices.end, vec![10, 15]);
    assert_eq!(indices.cost_start, vec![1, 10]);

    assert_eq!(ocp.normalized_phases().len(), 2);
    for view in ocp.normalized_phases() {
        assert_eq!(view.dims.nx, Some(4));
        assert_eq!(view.dims.n_stages, Some(15));
    }
}

#[test]
fn distinct_model_names_are_left_alone() {
    let mut ocp = MultiphaseOcp::new(vec![3, 3]).expect("valid stage counts");
    ocp.set_phase(phase("ascent", 2), 0);
    ocp.set_phase(phase("descent", 2), 1);

    let report = ocp.make_consistent_unobserved().expect("should compose");

    assert!(report.renamed_models.is_none());
    assert_eq!(ocp.models[0].name, "ascent");
    assert_eq!(ocp.models[1].name, "descent");
}

#[test]
fn terminal_field_on_a_non_last_phase_is_reported_but_not_an_error() {
    let mut ocp = MultiphaseOcp::new(vec![10, 5]).expect("valid stage counts");
    let mut first = phase("a", 3);
    first.model.terminal_cost_expr = Some("x' * We * x".to_string());
    ocp.set_phase(first, 0);
    ocp.set_phase(phase("b", 3), 1);

    let report = ocp.make_consistent_unobserved().expect("should compose");

    assert_eq!(report.ignored_fields.len(), 1);
    let ignored = &report.ignored_fields[0];
    assert_eq!(ignored.phase, 0);
    assert_eq!(ignored.role, Role::TerminalOnly);
    assert_eq!(ignored.fields, vec!["terminal_cost_expr"]);

    // The field stays in place; it is only ignored downstream.
    assert!(ocp.models[0].terminal_cost_expr.is_some());
}

#[test]
fn initial_cost_on_a_non_first_phase_is_reported() {
    let mut ocp = MultiphaseOcp::new(vec![4, 4, 4]).expect("valid stage counts");
    ocp.set_phase(phase("a", 2), 0);
    let mut middle = phase("b", 2);
    middle.cost.w_0 = Some(arr2(&[[1.0]]));
    middle.cost.y_ref_0 = arr1(&[0.5]);
    ocp.set_phase(middle, 1);
    ocp.set_phase(phase("c", 2), 2);

    let report = ocp.make_consistent_unobserved().expect("should compose");

    assert_eq!(report.ignored_fields.len(), 1);
    let ignored = &report.ignored_fields[0];
    assert_eq!(ignored.phase, 1);
    assert_eq!(ignored.role, Role::InitialOnly);
    assert_eq!(ignored.fields, vec!["w_0", "y_ref_0"]);
}

#[test]
fn mismatched_state_dimensions_fail_and_leave_the_problem_untouched() {
    let mut ocp = MultiphaseOcp::new(vec![5, 5]).expect("valid stage counts");
    ocp.set_phase(phase("m", 4), 0);
    ocp.set_phase(phase("m", 6), 1);

    let err = ocp.make_consistent_unobserved().unwrap_err();
    match err {
        Error::StateDimensionMismatch { nx_list } => assert_eq!(nx_list, vec![4, 6]),
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing was committed: no indices, no normalized phases, and the
    // clashing names were not rewritten.
    assert!(ocp.indices().is_none());
    assert!(ocp.normalized_phases().is_empty());
    assert_eq!(ocp.models[0].name, "m");
    assert_eq!(ocp.models[1].name, "m");
}

#[test]
fn phase_consistency_errors_abort_with_the_phase_index() {
    let mut ocp = MultiphaseOcp::new(vec![5, 5]).expect("valid stage counts");
    ocp.set_phase(phase("a", 2), 0);
    let mut bad = phase("b", 2);
    bad.constraints.x0 = Some(arr1(&[1.0, 2.0, 3.0]));
    ocp.set_phase(bad, 1);

    let err = ocp.make_consistent_unobserved().unwrap_err();
    match err {
        Error::Phase { phase, .. } => assert_eq!(phase, 1),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ocp.indices().is_none());
}

#[test]
fn initial_state_override_is_translated_on_the_first_phase() {
    let mut ocp = MultiphaseOcp::new(vec![10]).expect("valid stage counts");
    let mut only = phase("m", 2);
    only.constraints.x0 = Some(arr1(&[0.1, -0.2]));
    ocp.set_phase(only, 0);

    ocp.make_consistent_unobserved().expect("should compose");

    assert_eq!(ocp.constraints[0].lbx_0, arr1(&[0.1, -0.2]));
    assert_eq!(ocp.constraints[0].ubx_0, arr1(&[0.1, -0.2]));
    assert_eq!(ocp.constraints[0].idxbx_0, vec![0, 1]);
}

#[test]
fn observer_sees_diagnostics_in_phase_order() {
    let mut ocp = MultiphaseOcp::new(vec![2, 2]).expect("valid stage counts");
    let mut first = phase("m", 2);
    first.model.terminal_cost_expr = Some("q(x)".to_string());
    ocp.set_phase(first, 0);
    ocp.set_phase(phase("m", 2), 1);

    let mut events: Vec<Event> = Vec::new();
    ocp.make_consistent(|event: &Event| -> Option<()> {
        events.push(event.clone());
        None
    })
    .expect("should compose");

    assert_eq!(
        events,
        vec![
            Event::ModelsRenamed {
                original: vec!["m".to_string(), "m".to_string()],
                renamed: vec!["m_0".to_string(), "m_1".to_string()],
            },
            Event::IgnoredFields {
                phase: 0,
                role: Role::TerminalOnly,
                fields: vec!["terminal_cost_expr"],
            },
            Event::PhaseNormalized { phase: 0 },
            Event::PhaseNormalized { phase: 1 },
        ]
    );
}

#[test]
fn rerunning_on_an_unmodified_problem_gives_the_same_result() {
    let mut ocp = MultiphaseOcp::new(vec![6, 3]).expect("valid stage counts");
    ocp.set_phase(phase("up", 3), 0);
    ocp.set_phase(phase("down", 3), 1);

    ocp.make_consistent_unobserved().expect("first run");
    let snapshot = ocp.to_value().expect("export");

    let report = ocp.make_consistent_unobserved().expect("second run");
    assert!(report.renamed_models.is_none());
    assert!(report.ignored_fields.is_empty());
    assert_eq!(ocp.to_value().expect("export"), snapshot);
}

#[test]
fn export_carries_indices_only_after_composition() {
    let mut ocp = MultiphaseOcp::new(vec![10, 5]).expect("valid stage counts");
    ocp.set_phase(phase("m", 2), 0);
    ocp.set_phase(phase("n", 2), 1);

    let before = ocp.to_value().expect("export");
    assert!(before["indices"].is_null());

    ocp.make_consistent_unobserved().expect("should compose");

    let after = ocp.to_value().expect("export");
    assert_eq!(after["indices"]["total_horizon"], 15);
    assert_eq!(after["indices"]["cost_start"][0], 1);
    assert!(after.get("normalized_phases").is_none());
}
