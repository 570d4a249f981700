use insta::assert_debug_snapshot;
use soaring_task::task::{ContestNationality, create_task_factory};
use soaring_task::{
    Angle, GeoPoint, GeoVector, OrderedTask, PointKind, TaskBehaviour, TaskFactory, TaskFactoryType,
    TaskPointFactoryType, TaskValidationError, Waypoint,
};

fn waypoint(id: u32, distance: f64, bearing: f64) -> Waypoint {
    let home = GeoPoint::degrees(11.0, 48.0);
    let location = GeoVector::new(distance, Angle::degrees(bearing)).end_point(&home);
    Waypoint::new(id, format!("TP{id:02}"), location)
}

fn us_rules() -> TaskBehaviour {
    TaskBehaviour {
        contest_nationality: ContestNationality::American,
        ..TaskBehaviour::default()
    }
}

/// Appends `legs` with auto-mutation, then closes the task with a finish
fn build(kind: TaskFactoryType, behaviour: TaskBehaviour, legs: &[(u32, f64, f64)]) -> OrderedTask {
    let mut task = OrderedTask::with_factory(kind, behaviour);
    for &(id, distance, bearing) in legs {
        let point = task
            .create_intermediate(waypoint(id, distance, bearing))
            .expect("ruleset has no intermediate type");
        task.append(point, true).expect("append failed");
    }
    task.check_add_finish();
    task
}

#[test]
fn racing_us_legal_point_sets() {
    let factory = create_task_factory(TaskFactoryType::Racing, &us_rules());

    assert_debug_snapshot!(factory.start_types(), @r"
    [
        StartCylinder,
    ]
    ");
    assert_debug_snapshot!(factory.intermediate_types(), @r"
    [
        MatCylinder,
    ]
    ");
    assert_debug_snapshot!(factory.finish_types(), @r"
    [
        FinishLine,
        FinishCylinder,
    ]
    ");
}

#[test]
fn aat_legal_intermediates() {
    let factory = create_task_factory(TaskFactoryType::Aat, &TaskBehaviour::default());

    assert_debug_snapshot!(factory.intermediate_types(), @r"
    [
        AatCylinder,
        AatSegment,
        AatAnnularSector,
        AatKeyhole,
    ]
    ");
}

#[test]
fn aat_us_mutates_segment_to_cylinder() {
    let mixed = TaskFactory::new(TaskFactoryType::Mixed, TaskBehaviour::default());
    let segment = mixed.create_point(TaskPointFactoryType::AatSegment, waypoint(1, 0.0, 0.0), None);

    let factory = TaskFactory::new(TaskFactoryType::Aat, us_rules());
    assert_eq!(factory.mutated_point_type(&segment), TaskPointFactoryType::AatCylinder);
}

#[test]
fn mutation_is_idempotent_for_legal_points() {
    let mixed = TaskFactory::new(TaskFactoryType::Mixed, TaskBehaviour::default());

    for behaviour in [TaskBehaviour::default(), us_rules()] {
        for kind in TaskFactoryType::ALL {
            let factory = TaskFactory::new(kind, behaviour);
            for point_type in TaskPointFactoryType::ALL {
                let point = mixed.create_point(point_type, waypoint(1, 0.0, 0.0), None);
                let mutated = factory.mutated_point_type(&point);

                let legal = match point.kind() {
                    PointKind::Start => factory.start_types(),
                    PointKind::Turnpoint | PointKind::Area => factory.intermediate_types(),
                    PointKind::Finish => factory.finish_types(),
                };
                assert!(legal.contains(&mutated), "{kind:?}: {point_type:?} -> {mutated:?}");
                if legal.contains(&point_type) {
                    assert_eq!(mutated, factory.point_type(&point));
                }
            }
        }
    }
}

#[test]
fn racing_task_with_one_point_is_too_short() {
    let task = build(TaskFactoryType::Racing, TaskBehaviour::default(), &[(0, 0.0, 0.0)]);
    assert_eq!(task.len(), 1);

    let report = task.validate();
    assert!(!report.valid);
    assert!(report.errors.contains(&TaskValidationError::UnderMinTurnpoints));
    assert_debug_snapshot!(report.errors, @r"
    [
        NoValidFinish,
        UnderMinTurnpoints,
    ]
    ");
}

#[test]
fn empty_task_is_invalid() {
    let task = OrderedTask::new(TaskBehaviour::default());
    let report = task.validate();
    assert!(!report.valid);
    assert_eq!(report.errors, [TaskValidationError::EmptyTask]);
}

#[test]
fn fai_triangle_geometry() {
    let legs = [(0, 0.0, 0.0), (1, 100_000.0, 0.0), (2, 100_000.0, 60.0), (0, 0.0, 0.0)];
    let task = build(TaskFactoryType::FaiTriangle, TaskBehaviour::default(), &legs);
    assert_eq!(task.len(), 4);

    let types: Vec<_> = task.points().iter().map(|point| point.factory_type()).collect();
    assert_debug_snapshot!(types, @r"
    [
        StartSector,
        AstCylinder,
        AstCylinder,
        FinishSector,
    ]
    ");

    let report = task.validate();
    assert!(report.valid, "{:?}", report.errors);
    assert!(report.errors.is_empty());

    let flat = [(0, 0.0, 0.0), (1, 100_000.0, 0.0), (2, 200_000.0, 1.0), (0, 0.0, 0.0)];
    let task = build(TaskFactoryType::FaiTriangle, TaskBehaviour::default(), &flat);
    let report = task.validate();
    assert!(!report.valid);
    assert_debug_snapshot!(report.errors, @r"
    [
        InvalidFaiTriangleGeometry,
    ]
    ");
}

#[test]
fn fai_task_reusing_a_turnpoint_warns() {
    let legs = [(0, 0.0, 0.0), (1, 50_000.0, 0.0), (1, 50_000.0, 0.0), (2, 50_000.0, 90.0)];
    let task = build(TaskFactoryType::FaiGeneral, TaskBehaviour::default(), &legs);

    let report = task.validate();
    assert!(report.valid);
    assert_eq!(report.errors, [TaskValidationError::TurnpointsNotUnique]);
}

#[test]
fn fai_and_mat_zone_checks() {
    let legs = [(0, 0.0, 0.0), (1, 50_000.0, 0.0), (2, 50_000.0, 90.0)];

    let racing = build(TaskFactoryType::Racing, TaskBehaviour::default(), &legs);
    let report = racing.factory().validate_fai_ozs(&racing);
    assert!(report.valid);
    assert_eq!(report.errors, [TaskValidationError::NonFaiOzs]);

    let fai = build(TaskFactoryType::FaiGeneral, TaskBehaviour::default(), &legs);
    assert!(fai.factory().validate_fai_ozs(&fai).errors.is_empty());

    let mat = build(TaskFactoryType::Mat, TaskBehaviour::default(), &legs);
    assert!(mat.factory().validate_mat_ozs(&mat).errors.is_empty());
    assert_eq!(
        racing.factory().validate_mat_ozs(&racing).errors,
        [TaskValidationError::NonMatOzs]
    );
}

#[test]
fn switching_to_us_racing_mutates_every_point() {
    let legs = [(0, 0.0, 0.0), (1, 50_000.0, 0.0), (2, 50_000.0, 90.0), (0, 0.0, 0.0)];
    let mut task = build(TaskFactoryType::FaiGeneral, TaskBehaviour::default(), &legs);

    let mut task_us = task.clone_with(us_rules());
    assert!(task_us.set_factory(TaskFactoryType::Racing));
    let types: Vec<_> = task_us.points().iter().map(|point| point.factory_type()).collect();
    assert_debug_snapshot!(types, @r"
    [
        StartCylinder,
        MatCylinder,
        MatCylinder,
        FinishCylinder,
    ]
    ");
    assert!(task_us.validate().valid);

    // the original is unaffected by edits to its clone
    assert!(task.set_factory(TaskFactoryType::FaiGeneral));
    assert_eq!(task.points()[0].factory_type(), TaskPointFactoryType::StartSector);
}

#[test]
fn valid_types_by_position() {
    let legs = [(0, 0.0, 0.0), (1, 50_000.0, 0.0), (2, 50_000.0, 90.0)];
    let task = build(TaskFactoryType::Mat, TaskBehaviour::default(), &legs);

    assert_debug_snapshot!(task.valid_types(0), @r"
    [
        StartCylinder,
        StartLine,
        StartSector,
    ]
    ");
    assert_debug_snapshot!(task.valid_types(2), @r"
    [
        MatCylinder,
        FinishLine,
        FinishCylinder,
    ]
    ");
}

#[test]
fn mat_candidate_points() {
    let factory = create_task_factory(TaskFactoryType::Mat, &TaskBehaviour::default());
    let mut waypoints: Vec<_> = (0..300).map(|id| waypoint(id, 1_000.0 * f64::from(id), 45.0)).collect();
    waypoints[0].is_turnpoint = false;

    let points = factory.mat_points(&waypoints);
    assert_eq!(points.len(), soaring_task::task::MAX_MAT_POINTS);
    assert!(points.iter().all(|point| point.factory_type() == TaskPointFactoryType::MatCylinder));
    assert_eq!(points[0].waypoint().id, 1);
}
