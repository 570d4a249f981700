//! Ruleset-driven construction and validation of task points
//!
//! A [`TaskFactory`] is one [`RulesetDescriptor`] plus the configured
//! [`TaskBehaviour`]. The descriptor decides which point types are legal
//! for each role, how illegal types are mutated when the ruleset changes,
//! and which structural constraints the task has to meet.

mod rulesets;
mod types;

pub use self::rulesets::{FixedSizes, RulesetDescriptor, TaskFactoryConstraints, descriptor};
pub use self::types::{TaskFactoryType, TaskPointFactoryType};

use crate::error::TaskValidationError;
use crate::task::{OrderedTask, OrderedTaskPoint, PointKind, TaskBehaviour, Waypoint, fai_triangle};
use crate::zone::ObservationZone;
use tracing::{debug, warn};

/// Upper bound of candidate points offered for a MAT task
pub const MAX_MAT_POINTS: usize = 256;

/// Outcome of validating a task against a ruleset
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<TaskValidationError>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }
}

impl ValidationReport {
    fn add(&mut self, error: TaskValidationError) {
        if error.is_error() {
            self.valid = false;
        }
        self.errors.push(error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskFactory {
    descriptor: &'static RulesetDescriptor,
    behaviour: TaskBehaviour,
}

impl TaskFactory {
    /// Select the ruleset for `kind` under the behaviour's nationality
    pub fn new(kind: TaskFactoryType, behaviour: TaskBehaviour) -> Self {
        let descriptor = descriptor(kind, behaviour.contest_nationality);
        debug!(?kind, nationality = ?descriptor.nationality, "task factory created");
        Self { descriptor, behaviour }
    }

    pub fn kind(&self) -> TaskFactoryType {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &'static RulesetDescriptor {
        self.descriptor
    }

    pub fn constraints(&self) -> &TaskFactoryConstraints {
        &self.descriptor.constraints
    }

    pub fn behaviour(&self) -> &TaskBehaviour {
        &self.behaviour
    }

    /// Replace the behaviour, re-selecting the national variant
    pub fn set_behaviour(&mut self, behaviour: TaskBehaviour) {
        self.descriptor = descriptor(self.descriptor.kind, behaviour.contest_nationality);
        self.behaviour = behaviour;
    }

    pub fn start_types(&self) -> &'static [TaskPointFactoryType] {
        self.descriptor.start_types
    }

    pub fn intermediate_types(&self) -> &'static [TaskPointFactoryType] {
        self.descriptor.intermediate_types
    }

    pub fn finish_types(&self) -> &'static [TaskPointFactoryType] {
        self.descriptor.finish_types
    }

    pub fn is_valid_start_type(&self, point_type: TaskPointFactoryType) -> bool {
        self.start_types().contains(&point_type)
    }

    pub fn is_valid_intermediate_type(&self, point_type: TaskPointFactoryType) -> bool {
        self.intermediate_types().contains(&point_type)
    }

    pub fn is_valid_finish_type(&self, point_type: TaskPointFactoryType) -> bool {
        self.finish_types().contains(&point_type)
    }

    fn legal_types(&self, kind: PointKind) -> &'static [TaskPointFactoryType] {
        match kind {
            PointKind::Start => self.start_types(),
            PointKind::Turnpoint | PointKind::Area => self.intermediate_types(),
            PointKind::Finish => self.finish_types(),
        }
    }

    /// Configured default for the role if legal, otherwise the first legal type
    fn preferred_type(&self, kind: PointKind) -> TaskPointFactoryType {
        let defaults = &self.behaviour.sector_defaults;
        let preferred = match kind {
            PointKind::Start => defaults.start_type,
            PointKind::Turnpoint | PointKind::Area => defaults.turnpoint_type,
            PointKind::Finish => defaults.finish_type,
        };

        let legal = self.legal_types(kind);
        if legal.contains(&preferred) {
            preferred
        } else {
            legal.first().copied().unwrap_or(preferred)
        }
    }

    /// The type of an existing point
    pub fn point_type(&self, point: &OrderedTaskPoint) -> TaskPointFactoryType {
        point.factory_type()
    }

    /// Nearest type legal under this ruleset for the role of `point`
    ///
    /// Legal types map to themselves. Illegal ones go through the ruleset's
    /// mutation table and fall back to the preferred type of the role.
    pub fn mutated_point_type(&self, point: &OrderedTaskPoint) -> TaskPointFactoryType {
        let current = point.factory_type();
        let legal = self.legal_types(point.kind());
        if legal.contains(&current) {
            return current;
        }

        match self.descriptor.mutation(current) {
            Some(mutated) if legal.contains(&mutated) => mutated,
            _ => self.preferred_type(point.kind()),
        }
    }

    /// Build a point of any type, ignoring legality
    ///
    /// `size` is the zone radius or line length; `None` or a non-positive
    /// size uses the configured defaults. Rulesets with fixed sizes always
    /// use those.
    pub fn create_point(&self, point_type: TaskPointFactoryType, waypoint: Waypoint, size: Option<f64>) -> OrderedTaskPoint {
        use TaskPointFactoryType::*;

        let (start, turnpoint, finish) = match self.descriptor.fixed_sizes {
            Some(sizes) => (sizes.start, sizes.turnpoint, sizes.finish),
            None => {
                let defaults = &self.behaviour.sector_defaults;
                let size = size.filter(|size| *size > 0.0);
                (
                    size.unwrap_or(defaults.start_radius),
                    size.unwrap_or(defaults.turnpoint_radius),
                    size.unwrap_or(defaults.finish_radius),
                )
            }
        };

        let location = waypoint.location;
        let zone = match point_type {
            StartSector => ObservationZone::fai_sector(location, false),
            StartLine => ObservationZone::line(location, start),
            StartCylinder => ObservationZone::cylinder(location, start),
            StartBga => ObservationZone::bga_start(location),
            FaiSector => ObservationZone::fai_sector(location, true),
            KeyholeSector | AatKeyhole => ObservationZone::keyhole(location),
            BgaFixedCourseSector => ObservationZone::bga_fixed_course(location),
            BgaEnhancedOptionSector => ObservationZone::bga_enhanced_option(location),
            AstCylinder | AatCylinder => ObservationZone::cylinder(location, turnpoint),
            SymmetricQuadrant => ObservationZone::symmetric_quadrant(location, turnpoint),
            AatSegment => ObservationZone::sector(location, turnpoint),
            AatAnnularSector => ObservationZone::annular_sector(location, turnpoint),
            MatCylinder => ObservationZone::mat_cylinder(location),
            FinishSector => ObservationZone::fai_sector(location, false),
            FinishLine => ObservationZone::line(location, finish),
            FinishCylinder => ObservationZone::cylinder(location, finish),
        };

        OrderedTaskPoint::new(point_type.kind(), waypoint, zone)
    }

    /// Rebuild `point` as `point_type`, keeping its waypoint and zone size
    pub fn create_mutated_point(&self, point: &OrderedTaskPoint, point_type: TaskPointFactoryType) -> OrderedTaskPoint {
        self.create_point(point_type, point.waypoint().clone(), point.zone().size())
    }

    pub fn create_start_of(&self, point_type: TaskPointFactoryType, waypoint: Waypoint) -> Option<OrderedTaskPoint> {
        self.is_valid_start_type(point_type)
            .then(|| self.create_point(point_type, waypoint, None))
    }

    pub fn create_intermediate_of(
        &self,
        point_type: TaskPointFactoryType,
        waypoint: Waypoint,
    ) -> Option<OrderedTaskPoint> {
        self.is_valid_intermediate_type(point_type)
            .then(|| self.create_point(point_type, waypoint, None))
    }

    pub fn create_finish_of(&self, point_type: TaskPointFactoryType, waypoint: Waypoint) -> Option<OrderedTaskPoint> {
        self.is_valid_finish_type(point_type)
            .then(|| self.create_point(point_type, waypoint, None))
    }

    pub fn create_start(&self, waypoint: Waypoint) -> Option<OrderedTaskPoint> {
        self.create_start_of(self.preferred_type(PointKind::Start), waypoint)
    }

    /// Intermediate point of the preferred type; [`OrderedTask::create_intermediate`]
    /// additionally honours homogeneous rulesets
    pub fn create_intermediate(&self, waypoint: Waypoint) -> Option<OrderedTaskPoint> {
        self.create_intermediate_of(self.preferred_type(PointKind::Turnpoint), waypoint)
    }

    pub fn create_finish(&self, waypoint: Waypoint) -> Option<OrderedTaskPoint> {
        self.create_finish_of(self.preferred_type(PointKind::Finish), waypoint)
    }

    pub fn is_position_start(&self, position: usize) -> bool {
        position == 0
    }

    /// Whether an intermediate point may sit at `position` of a task with
    /// `task_size` points
    pub fn is_position_intermediate(&self, position: usize, task_size: usize) -> bool {
        let constraints = self.constraints();
        if self.is_position_start(position) || position >= constraints.max_points {
            return false;
        }
        if position + 1 < constraints.min_points {
            return true;
        }

        if constraints.is_fixed_size() {
            position + 1 < constraints.max_points
        } else if task_size < constraints.min_points {
            true
        } else {
            position <= task_size
        }
    }

    pub fn is_position_finish(&self, position: usize, task_size: usize) -> bool {
        let constraints = self.constraints();
        if self.is_position_start(position) {
            return false;
        }
        if position + 1 < constraints.min_points || position + 1 > constraints.max_points {
            return false;
        }

        if constraints.is_fixed_size() {
            position + 1 == constraints.max_points
        } else {
            position + 1 >= task_size
        }
    }

    /// Whether intermediates of role `kind` may sit at `position`
    fn is_valid_intermediate_kind(&self, kind: PointKind, position: usize, task_size: usize) -> bool {
        self.is_position_intermediate(position, task_size)
            && self.intermediate_types().iter().any(|point_type| point_type.kind() == kind)
    }

    /// Whether `point` is legal at `position` by both role and type
    pub fn is_valid_type(&self, point: &OrderedTaskPoint, position: usize, task_size: usize) -> bool {
        let point_type = point.factory_type();
        match point.kind() {
            PointKind::Start => self.is_position_start(position) && self.is_valid_start_type(point_type),
            kind @ (PointKind::Turnpoint | PointKind::Area) => {
                self.is_valid_intermediate_kind(kind, position, task_size)
                    && self.is_valid_intermediate_type(point_type)
            }
            PointKind::Finish => {
                self.is_position_finish(position, task_size) && self.is_valid_finish_type(point_type)
            }
        }
    }

    /// Intermediate types offered at `position`; homogeneous rulesets only
    /// offer the type of the first turnpoint
    pub fn valid_intermediate_types(&self, position: usize, task: &OrderedTask) -> Vec<TaskPointFactoryType> {
        let task_size = task.len();
        if !self.is_position_intermediate(position, task_size) {
            return Vec::new();
        }

        if self.constraints().homogeneous_tps && position > 1 && task_size > 1 {
            if let Some(first) = task.point(1) {
                let point_type = first.factory_type();
                if self.is_valid_intermediate_type(point_type) {
                    return vec![point_type];
                }
            }
        }

        self.intermediate_types().to_vec()
    }

    /// Every type that could be placed at `position`
    pub fn valid_types(&self, position: usize, task: &OrderedTask) -> Vec<TaskPointFactoryType> {
        let mut types = Vec::new();
        if self.is_position_start(position) {
            types.extend_from_slice(self.start_types());
        }
        types.extend(self.valid_intermediate_types(position, task));
        if self.is_position_finish(position, task.len()) {
            types.extend_from_slice(self.finish_types());
        }
        types
    }

    /// Start and finish share a location, needs at least three points
    pub fn is_closed(&self, task: &OrderedTask) -> bool {
        let points = task.points();
        match (points.first(), points.last()) {
            (Some(start), Some(finish)) if points.len() >= 3 => start.location() == finish.location(),
            _ => false,
        }
    }

    /// No waypoint appears twice, except the start reused as finish
    pub fn is_unique(&self, task: &OrderedTask) -> bool {
        let points = task.points();
        let size = points.len();
        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                let start_as_finish = i == 0 && j + 1 == size;
                if !start_as_finish && a.waypoint() == b.waypoint() {
                    return false;
                }
            }
        }
        true
    }

    /// All turnpoints share the type of the first one; the finish is exempt
    pub fn is_homogeneous(&self, task: &OrderedTask) -> bool {
        let points = task.points();
        let Some(first) = points.get(1) else {
            return true;
        };

        let first_type = first.factory_type();
        points
            .iter()
            .skip(2)
            .filter(|point| point.kind() != PointKind::Finish)
            .all(|point| point.factory_type() == first_type)
    }

    /// Check `task` against the ruleset; never fails, findings are reported
    pub fn validate(&self, task: &OrderedTask) -> ValidationReport {
        let mut report = ValidationReport::default();
        let points = task.points();
        let constraints = self.constraints();

        if points.is_empty() {
            report.add(TaskValidationError::EmptyTask);
            warn!(errors = ?report.errors, "task validation failed");
            return report;
        }

        let start_valid = points
            .first()
            .is_some_and(|start| start.kind() == PointKind::Start && self.is_valid_start_type(start.factory_type()));
        if !start_valid {
            report.add(TaskValidationError::NoValidStart);
        }

        let finish_valid = points.last().is_some_and(|finish| {
            finish.kind() == PointKind::Finish && self.is_valid_finish_type(finish.factory_type())
        });
        if !finish_valid {
            report.add(TaskValidationError::NoValidFinish);
        }

        let illegal_intermediate = points
            .iter()
            .filter(|point| point.is_intermediate())
            .any(|point| !self.is_valid_intermediate_type(point.factory_type()));
        if illegal_intermediate {
            report.add(TaskValidationError::InvalidPointType);
        }

        if constraints.is_closed && !self.is_closed(task) {
            report.add(TaskValidationError::TaskNotClosed);
        }

        if constraints.is_fixed_size() {
            if points.len() != constraints.max_points {
                report.add(TaskValidationError::IncorrectNumberTurnpoints);
            }
        } else {
            if points.len() < constraints.min_points {
                report.add(TaskValidationError::UnderMinTurnpoints);
            }
            if points.len() > constraints.max_points {
                report.add(TaskValidationError::ExceedsMaxTurnpoints);
            }
        }

        if constraints.homogeneous_tps && !self.is_homogeneous(task) {
            report.add(TaskValidationError::TaskNotHomogeneous);
        }

        if (constraints.is_unique || self.kind().is_fai()) && !self.is_unique(task) {
            report.add(TaskValidationError::TurnpointsNotUnique);
        }

        if self.descriptor.fai_triangle && points.len() == 4 {
            let [a, b, c] = [0, 1, 2].map(|i| points[i].location());
            if !fai_triangle::test_points(&a, &b, &c) {
                report.add(TaskValidationError::InvalidFaiTriangleGeometry);
            }
        }

        if report.valid {
            debug!(kind = ?self.kind(), warnings = report.errors.len(), "task validated");
        } else {
            warn!(kind = ?self.kind(), errors = ?report.errors, "task validation failed");
        }
        report
    }

    /// Whether every zone fits the FAI badge and record dimensions
    pub fn validate_fai_ozs(&self, task: &OrderedTask) -> ValidationReport {
        use TaskPointFactoryType::*;

        let valid = task.points().iter().all(|point| {
            let size = point.zone().size().unwrap_or(-1.0);
            match point.factory_type() {
                StartSector | FaiSector | FinishSector => true,
                StartLine | FinishLine => size <= 2000.01,
                AstCylinder => size <= 500.01,
                _ => false,
            }
        });

        let mut report = ValidationReport::default();
        if !valid {
            report.add(TaskValidationError::NonFaiOzs);
        }
        report
    }

    /// Whether every zone is one a MAT task may use
    pub fn validate_mat_ozs(&self, task: &OrderedTask) -> ValidationReport {
        use TaskPointFactoryType::*;

        let valid = task.points().iter().all(|point| {
            matches!(
                point.factory_type(),
                StartCylinder | StartLine | StartSector | MatCylinder | FinishLine | FinishCylinder
            )
        });

        let mut report = ValidationReport::default();
        if !valid {
            report.add(TaskValidationError::NonMatOzs);
        }
        report
    }

    /// Candidate intermediate points for a MAT task, one per turnpoint
    /// waypoint, capped at [`MAX_MAT_POINTS`]
    pub fn mat_points(&self, waypoints: &[Waypoint]) -> Vec<OrderedTaskPoint> {
        waypoints
            .iter()
            .filter(|waypoint| waypoint.is_turnpoint)
            .take(MAX_MAT_POINTS)
            .filter_map(|waypoint| self.create_intermediate(waypoint.clone()))
            .collect()
    }
}

/// Factory for `kind` configured by `behaviour`
pub fn create_task_factory(kind: TaskFactoryType, behaviour: &TaskBehaviour) -> TaskFactory {
    TaskFactory::new(kind, *behaviour)
}
