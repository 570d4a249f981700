use crate::error::{Error, Result};
use crate::geo::{Angle, FlatProjection, GeoPoint};
use crate::task::{
    OrderedTaskPoint, PointKind, TaskBehaviour, TaskFactory, TaskFactoryType, TaskPointFactoryType,
    ValidationReport, Waypoint,
};
use tracing::{debug, trace, warn};

/// A sequence of task points governed by one ruleset
///
/// Every edit works on a private copy and replaces the task only when the
/// edit succeeded, so a failed edit leaves the task untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTask {
    points: Vec<OrderedTaskPoint>,
    factory: TaskFactory,
    active_index: usize,
    projection: Option<FlatProjection>,
}

impl OrderedTask {
    /// Empty task using the behaviour's default ruleset
    pub fn new(behaviour: TaskBehaviour) -> Self {
        Self::with_factory(behaviour.task_type_default, behaviour)
    }

    pub fn with_factory(kind: TaskFactoryType, behaviour: TaskBehaviour) -> Self {
        Self {
            points: Vec::new(),
            factory: TaskFactory::new(kind, behaviour),
            active_index: 0,
            projection: None,
        }
    }

    /// Copy of this task configured with `behaviour`
    pub fn clone_with(&self, behaviour: TaskBehaviour) -> Self {
        let mut task = self.clone();
        task.factory.set_behaviour(behaviour);
        task
    }

    /// Take over the points and ruleset of `candidate`, keeping progress
    pub fn commit(&mut self, candidate: &OrderedTask) {
        let active_index = self.active_index;
        *self = candidate.clone();
        self.active_index = active_index.min(self.points.len().saturating_sub(1));
        self.update_geometry();
        debug!(points = self.points.len(), kind = ?self.factory.kind(), "ordered task committed");
    }

    pub fn factory(&self) -> &TaskFactory {
        &self.factory
    }

    pub fn factory_kind(&self) -> TaskFactoryType {
        self.factory.kind()
    }

    pub fn behaviour(&self) -> &TaskBehaviour {
        self.factory.behaviour()
    }

    /// Switch ruleset and mutate the points to fit it, returns whether any
    /// point changed
    pub fn set_factory(&mut self, kind: TaskFactoryType) -> bool {
        debug!(from = ?self.factory.kind(), to = ?kind, "switching task ruleset");
        self.factory = TaskFactory::new(kind, *self.factory.behaviour());
        self.mutate_to_factory()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[OrderedTaskPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&OrderedTaskPoint> {
        self.points.get(index)
    }

    pub(crate) fn point_mut(&mut self, index: usize) -> Option<&mut OrderedTaskPoint> {
        self.points.get_mut(index)
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.factory.constraints().max_points
    }

    pub fn has_start(&self) -> bool {
        self.points.first().is_some_and(|point| point.kind() == PointKind::Start)
    }

    pub fn has_finish(&self) -> bool {
        self.points.last().is_some_and(|point| point.kind() == PointKind::Finish)
    }

    pub fn has_targets(&self) -> bool {
        self.points.iter().any(OrderedTaskPoint::has_target)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn set_active_index(&mut self, index: usize) -> Result<()> {
        if index >= self.points.len() {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.points.len(),
            });
        }

        debug!(index, "active task point changed");
        self.active_index = index;
        Ok(())
    }

    /// Projection centred on the task, `None` for an empty task
    pub fn projection(&self) -> Option<&FlatProjection> {
        self.projection.as_ref()
    }

    pub fn validate(&self) -> ValidationReport {
        self.factory.validate(self)
    }

    /// Intermediate point for `waypoint`, matching the first turnpoint on
    /// homogeneous rulesets
    pub fn create_intermediate(&self, waypoint: Waypoint) -> Option<OrderedTaskPoint> {
        if self.factory.constraints().homogeneous_tps {
            if let Some(first) = self.points.get(1) {
                let point_type = first.factory_type();
                if self.factory.is_valid_intermediate_type(point_type) {
                    return self.factory.create_intermediate_of(point_type, waypoint);
                }
            }
        }

        self.factory.create_intermediate(waypoint)
    }

    /// Apply `edit` to a copy and keep it only if the edit succeeds
    fn edit(&mut self, edit: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        let mut candidate = self.clone();
        edit(&mut candidate)?;
        candidate.active_index = candidate.active_index.min(candidate.points.len().saturating_sub(1));
        candidate.update_geometry();
        *self = candidate;
        Ok(())
    }

    fn incompatible(position: usize, point: &OrderedTaskPoint) -> Error {
        Error::IncompatiblePoint {
            position,
            point_type: Some(point.factory_type()),
        }
    }

    fn creation_failed(position: usize) -> Error {
        Error::IncompatiblePoint {
            position,
            point_type: None,
        }
    }

    fn check_index(&self, position: usize) -> Result<()> {
        if position >= self.points.len() {
            return Err(Error::IndexOutOfRange {
                index: position,
                size: self.points.len(),
            });
        }
        Ok(())
    }

    fn raw_append(&mut self, point: OrderedTaskPoint) -> Result<()> {
        if self.is_full() {
            return Err(Error::TaskFull {
                max: self.factory.constraints().max_points,
            });
        }

        let position = self.points.len();
        if let Some(last) = self.points.last() {
            if last.kind() == PointKind::Finish || point.kind() == PointKind::Start {
                return Err(Self::incompatible(position, &point));
            }
        }

        self.points.push(point);
        Ok(())
    }

    fn raw_insert(&mut self, point: OrderedTaskPoint, position: usize) -> Result<()> {
        if position >= self.points.len() {
            return self.raw_append(point);
        }
        if self.is_full() {
            return Err(Error::TaskFull {
                max: self.factory.constraints().max_points,
            });
        }

        let after_finish = position > 0 && self.points[position - 1].kind() == PointKind::Finish;
        let before_start = self.points[position].kind() == PointKind::Start;
        let misplaced = point.kind() == PointKind::Finish || (position > 0 && point.kind() == PointKind::Start);
        if after_finish || before_start || misplaced {
            return Err(Self::incompatible(position, &point));
        }

        self.points.insert(position, point);
        Ok(())
    }

    fn raw_replace(&mut self, point: OrderedTaskPoint, position: usize) -> Result<()> {
        self.check_index(position)?;

        let has_predecessor = position > 0;
        let has_successor = position + 1 < self.points.len();
        if (has_predecessor && point.kind() == PointKind::Start) || (has_successor && point.kind() == PointKind::Finish)
        {
            return Err(Self::incompatible(position, &point));
        }

        self.points[position] = point;
        Ok(())
    }

    fn raw_remove(&mut self, position: usize) -> Result<()> {
        self.check_index(position)?;
        self.points.remove(position);
        Ok(())
    }

    fn start_for(&self, waypoint: Waypoint, position: usize) -> Result<OrderedTaskPoint> {
        self.factory
            .create_start(waypoint)
            .ok_or_else(|| Self::creation_failed(position))
    }

    fn intermediate_for(&self, waypoint: Waypoint, position: usize) -> Result<OrderedTaskPoint> {
        self.create_intermediate(waypoint)
            .ok_or_else(|| Self::creation_failed(position))
    }

    fn finish_for(&self, waypoint: Waypoint, position: usize) -> Result<OrderedTaskPoint> {
        self.factory
            .create_finish(waypoint)
            .ok_or_else(|| Self::creation_failed(position))
    }

    /// Add `point` at the end
    ///
    /// With `auto_mutate` the first point becomes a start, a previous finish
    /// is turned into a turnpoint and the new point becomes a finish where it
    /// is not legal as given.
    pub fn append(&mut self, point: OrderedTaskPoint, auto_mutate: bool) -> Result<()> {
        self.edit(|task| {
            if !auto_mutate {
                return task.raw_append(point);
            }
            if task.is_full() {
                return Err(Error::TaskFull {
                    max: task.factory.constraints().max_points,
                });
            }

            let size = task.points.len();
            if size == 0 {
                let point = if task.factory.is_valid_type(&point, 0, 0) {
                    point
                } else {
                    task.start_for(point.waypoint().clone(), 0)?
                };
                return task.raw_append(point);
            }

            if size > 1 {
                let last = &task.points[size - 1];
                if !task.factory.is_valid_intermediate_type(last.factory_type()) {
                    let intermediate = task.intermediate_for(last.waypoint().clone(), size - 1)?;
                    task.points[size - 1] = intermediate;
                }
            }

            let point = if task.factory.is_valid_type(&point, size, size) {
                point
            } else {
                task.finish_for(point.waypoint().clone(), size)?
            };
            task.raw_append(point)
        })
    }

    /// Insert `point` before `position`, appending past the end
    ///
    /// With `auto_mutate` an insert at the front demotes the old start to a
    /// turnpoint, and anything inserted elsewhere becomes an intermediate.
    pub fn insert(&mut self, point: OrderedTaskPoint, position: usize, auto_mutate: bool) -> Result<()> {
        if position >= self.points.len() {
            return self.append(point, auto_mutate);
        }

        self.edit(|task| {
            if !auto_mutate {
                return task.raw_insert(point, position);
            }
            if task.is_full() {
                return Err(Error::TaskFull {
                    max: task.factory.constraints().max_points,
                });
            }

            if position == 0 {
                if task.has_start() {
                    let old_start = task.points[0].waypoint().clone();
                    let intermediate = task.intermediate_for(old_start, 0)?;
                    task.raw_replace(intermediate, 0)?;
                }

                let size = task.points.len();
                let point = if task.factory.is_valid_type(&point, 0, size) {
                    point
                } else {
                    task.start_for(point.waypoint().clone(), 0)?
                };
                return task.raw_insert(point, 0);
            }

            let point = if point.is_intermediate() {
                point
            } else {
                task.intermediate_for(point.waypoint().clone(), position)?
            };
            task.raw_insert(point, position)
        })
    }

    /// Replace the point at `position`
    ///
    /// With `auto_mutate` a point that is illegal at `position` is rebuilt as
    /// the start, finish or intermediate that position calls for.
    pub fn replace(&mut self, point: OrderedTaskPoint, position: usize, auto_mutate: bool) -> Result<()> {
        self.edit(|task| task.replace_inner(point, position, auto_mutate))
    }

    fn replace_inner(&mut self, point: OrderedTaskPoint, position: usize, auto_mutate: bool) -> Result<()> {
        self.check_index(position)?;
        if !auto_mutate {
            return self.raw_replace(point, position);
        }

        let size = self.points.len();
        let point = if self.factory.is_valid_type(&point, position, size) {
            point
        } else if position == 0 {
            self.start_for(point.waypoint().clone(), position)?
        } else if position + 1 == size && self.factory.is_position_finish(position, size) {
            self.finish_for(point.waypoint().clone(), position)?
        } else {
            self.intermediate_for(point.waypoint().clone(), position)?
        };
        self.raw_replace(point, position)
    }

    /// Remove the point at `position`
    ///
    /// With `auto_mutate` removing the start promotes the next point to
    /// start, and removing the last point turns the new last point into a
    /// finish where a finish belongs.
    pub fn remove(&mut self, position: usize, auto_mutate: bool) -> Result<()> {
        self.edit(|task| task.remove_inner(position, auto_mutate))
    }

    fn remove_inner(&mut self, position: usize, auto_mutate: bool) -> Result<()> {
        self.check_index(position)?;
        let size = self.points.len();
        if !auto_mutate || size == 1 {
            return self.raw_remove(position);
        }

        if position == 0 {
            let start = self.start_for(self.points[1].waypoint().clone(), 0)?;
            self.raw_remove(0)?;
            self.points[0] = start;
            return Ok(());
        }

        if position + 1 == size && self.factory.is_position_finish(position - 1, size - 1) {
            let finish = self.finish_for(self.points[position - 1].waypoint().clone(), position - 1)?;
            self.raw_remove(position)?;
            self.points[position - 1] = finish;
            return Ok(());
        }

        self.raw_remove(position)
    }

    /// Exchange the points at `position` and `position + 1`
    pub fn swap(&mut self, position: usize, auto_mutate: bool) -> Result<()> {
        let size = self.points.len();
        if size <= 1 || position + 1 >= size {
            return Err(Error::IndexOutOfRange { index: position, size });
        }

        let mut candidate = self.clone();
        let next = candidate.points[position + 1].clone();
        candidate.insert(next, position, auto_mutate)?;
        candidate.remove(position + 2, auto_mutate)?;
        *self = candidate;
        Ok(())
    }

    /// Move the point at `position` to `waypoint`, keeping its type and size
    pub fn relocate(&mut self, position: usize, waypoint: Waypoint) -> Result<()> {
        self.edit(|task| {
            task.check_index(position)?;
            let current = &task.points[position];
            let point = task.factory.create_point(current.factory_type(), waypoint, current.zone().size());
            task.points[position] = point;
            Ok(())
        })
    }

    /// Turn the last point into a finish if the task has none
    pub fn check_add_finish(&mut self) -> bool {
        let size = self.points.len();
        if size < 2 || self.has_finish() {
            return false;
        }

        let waypoint = self.points[size - 1].waypoint().clone();
        let Some(finish) = self.factory.create_finish(waypoint) else {
            return false;
        };

        self.points[size - 1] = finish;
        self.update_geometry();
        true
    }

    /// Drop points beyond the ruleset's maximum
    pub fn remove_excess(&mut self) -> bool {
        let max = self.factory.constraints().max_points;
        if self.points.len() <= max {
            return false;
        }

        self.points.truncate(max);
        self.active_index = self.active_index.min(max.saturating_sub(1));
        true
    }

    /// Move the finish onto the start waypoint for closed rulesets
    pub fn mutate_closed_finish(&mut self) -> bool {
        let size = self.points.len();
        if size < 2 || !self.factory.is_position_finish(size - 1, size) {
            return false;
        }
        if !self.factory.constraints().is_closed || self.factory.is_closed(self) {
            return false;
        }
        if self.points[size - 1].kind() != PointKind::Finish {
            return false;
        }

        let waypoint = self.points[0].waypoint().clone();
        let Some(finish) = self.factory.create_finish(waypoint) else {
            return false;
        };

        self.points[size - 1] = finish;
        true
    }

    /// Rebuild every point that is illegal under the current ruleset,
    /// returns whether anything changed
    ///
    /// FAI General and MAT rebuild all points so zone sizes follow the
    /// ruleset too.
    pub fn mutate_to_factory(&mut self) -> bool {
        let mut changed = self.remove_excess();
        let factory = self.factory;
        let rebuild_all = matches!(factory.kind(), TaskFactoryType::FaiGeneral | TaskFactoryType::Mat);

        for position in 0..self.points.len() {
            let size = self.points.len();
            let point = &self.points[position];
            if factory.is_valid_type(point, position, size) && !rebuild_all {
                continue;
            }

            let mut point_type = factory.mutated_point_type(point);
            let (legal, preferred) = if factory.is_position_finish(position, size) {
                (factory.finish_types(), factory.behaviour().sector_defaults.finish_type)
            } else if position == 0 {
                (factory.start_types(), factory.behaviour().sector_defaults.start_type)
            } else {
                (factory.intermediate_types(), factory.behaviour().sector_defaults.turnpoint_type)
            };
            if !legal.contains(&point_type) {
                point_type = fallback(legal, preferred);
            }

            let mutated = factory.create_mutated_point(point, point_type);
            if mutated == *point {
                continue;
            }
            match self.replace_inner(mutated, position, true) {
                Ok(()) => changed = true,
                Err(error) => warn!(position, ?point_type, %error, "point not mutated to ruleset"),
            }
        }

        changed |= self.mutate_closed_finish();
        self.active_index = self.active_index.min(self.points.len().saturating_sub(1));
        self.update_geometry();
        if changed {
            debug!(kind = ?factory.kind(), "task points mutated to ruleset");
        }
        changed
    }

    /// Re-orient zones, rebuild the projection and refresh the landout
    /// geometry of every leg
    pub fn update_geometry(&mut self) {
        let locations: Vec<GeoPoint> = self.points.iter().map(OrderedTaskPoint::location).collect();

        for (i, point) in self.points.iter_mut().enumerate() {
            let previous = i.checked_sub(1).map(|j| &locations[j]);
            point.zone_mut().set_legs(previous, locations.get(i + 1));
        }

        self.projection = FlatProjection::from_points(&locations);

        if let Some(first) = self.points.first_mut() {
            first.clear_landout();
        }
        let mut recomputed = 0;
        for i in 1..self.points.len() {
            let origin = self.points[i - 1].scored_location();
            if self.points[i].update_landout(origin) {
                recomputed += 1;
            }
        }
        trace!(points = self.points.len(), recomputed, "task geometry updated");
    }

    /// Bearing of the leg into `index`, or out of it for the first point
    pub fn leg_bearing(&self, index: usize) -> Angle {
        let Some(point) = self.points.get(index) else {
            return Angle::ZERO;
        };

        if let Some(previous) = index.checked_sub(1).and_then(|i| self.points.get(i)) {
            previous.location().bearing(&point.location())
        } else if let Some(next) = self.points.get(index + 1) {
            point.location().bearing(&next.location())
        } else {
            Angle::ZERO
        }
    }

    /// Forget all progress: nothing achieved or scored, first point active
    pub fn reset(&mut self) {
        for point in &mut self.points {
            point.set_achieved(false);
            point.set_scored_location(None);
        }
        self.active_index = 0;
        self.update_geometry();
    }

    pub fn set_achieved(&mut self, index: usize, achieved: bool) -> Result<()> {
        self.check_index(index)?;
        self.points[index].set_achieved(achieved);
        Ok(())
    }

    /// Record where a point was scored; the following leg's landout geometry
    /// is refreshed
    pub fn set_scored_location(&mut self, index: usize, location: Option<GeoPoint>) -> Result<()> {
        self.check_index(index)?;
        self.points[index].set_scored_location(location);
        self.update_geometry();
        Ok(())
    }

    /// Sum of the legs between waypoints (m)
    pub fn nominal_distance(&self) -> f64 {
        self.points
            .windows(2)
            .map(|leg| leg[0].location().distance(&leg[1].location()))
            .sum()
    }

    /// Nominal distance less the start and finish cylinder radii (m)
    pub fn scored_nominal_distance(&self) -> f64 {
        let adjustment: f64 = [self.points.first(), self.points.last()]
            .into_iter()
            .flatten()
            .filter(|point| matches!(point.kind(), PointKind::Start | PointKind::Finish))
            .map(|point| point.zone().score_adjustment())
            .sum();
        (self.nominal_distance() - adjustment).max(0.0)
    }

    pub fn task_center(&self) -> Option<GeoPoint> {
        self.projection.map(|projection| projection.center())
    }

    /// Distance from the centre to the furthest waypoint (m)
    pub fn task_radius(&self) -> f64 {
        let Some(center) = self.task_center() else {
            return 0.0;
        };

        self.points
            .iter()
            .map(|point| center.distance(&point.location()))
            .fold(0.0, f64::max)
    }

    /// Distance scored so far plus the landout distance of the active leg
    /// for a landing at `reference` (m)
    pub fn scan_distance_landout(&self, reference: &GeoPoint) -> f64 {
        if self.active_index == 0 || self.points.is_empty() {
            return 0.0;
        }

        let scored: f64 = self.points[..self.active_index]
            .windows(2)
            .map(|leg| leg[0].scored_location().distance(&leg[1].scored_location()))
            .sum();

        let active = self
            .points
            .get(self.active_index)
            .map(|point| point.landout().distance(reference))
            .unwrap_or(0.0);

        scored + active
    }

    /// Types offered at `position` of this task
    pub fn valid_types(&self, position: usize) -> Vec<TaskPointFactoryType> {
        self.factory.valid_types(position, self)
    }

    /// Whether `waypoint` may be offered as an additional MAT point
    pub fn should_add_to_mat(&self, waypoint: &Waypoint) -> bool {
        waypoint.is_turnpoint && !self.points.iter().any(|point| point.waypoint() == waypoint)
    }
}

fn fallback(legal: &[TaskPointFactoryType], preferred: TaskPointFactoryType) -> TaskPointFactoryType {
    if legal.contains(&preferred) {
        preferred
    } else {
        legal.first().copied().unwrap_or(preferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoVector;
    use claims::{assert_err, assert_gt, assert_lt, assert_matches, assert_ok};

    fn home() -> GeoPoint {
        GeoPoint::degrees(7.0, 51.0)
    }

    fn waypoint(id: u32, distance: f64, bearing: f64) -> Waypoint {
        let location = GeoVector::new(distance, Angle::degrees(bearing)).end_point(&home());
        Waypoint::new(id, format!("WP{id}"), location)
    }

    fn racing() -> OrderedTask {
        OrderedTask::new(TaskBehaviour::default())
    }

    fn add(task: &mut OrderedTask, waypoint: Waypoint) {
        let point = assert_some_intermediate(task, waypoint);
        assert_ok!(task.append(point, true));
    }

    fn assert_some_intermediate(task: &OrderedTask, waypoint: Waypoint) -> OrderedTaskPoint {
        match task.create_intermediate(waypoint) {
            Some(point) => point,
            None => panic!("no intermediate point"),
        }
    }

    fn triangle(task: &mut OrderedTask) {
        add(task, waypoint(0, 0.0, 0.0));
        add(task, waypoint(1, 50_000.0, 0.0));
        add(task, waypoint(2, 50_000.0, 60.0));
        add(task, waypoint(0, 0.0, 0.0));
        assert!(task.check_add_finish());
    }

    #[test]
    fn test_append_keeps_intermediates() {
        let mut task = racing();
        add(&mut task, waypoint(0, 0.0, 0.0));
        add(&mut task, waypoint(1, 50_000.0, 0.0));

        assert_eq!(task.points()[0].kind(), PointKind::Start);
        assert_eq!(task.points()[1].kind(), PointKind::Turnpoint);
        assert!(!task.has_finish());
    }

    #[test]
    fn test_append_auto_mutates_roles() {
        let mut task = racing();
        triangle(&mut task);

        let kinds: Vec<_> = task.points().iter().map(OrderedTaskPoint::kind).collect();
        assert_eq!(
            kinds,
            [PointKind::Start, PointKind::Turnpoint, PointKind::Turnpoint, PointKind::Finish]
        );
        assert!(task.has_start());
        assert!(task.has_finish());
        assert!(task.validate().valid);
    }

    #[test]
    fn test_append_without_mutation_keeps_roles() {
        let mut task = racing();
        let point = assert_some_intermediate(&task, waypoint(1, 0.0, 0.0));
        assert_ok!(task.append(point, false));
        assert_eq!(task.points()[0].kind(), PointKind::Turnpoint);
        assert!(!task.has_start());
    }

    #[test]
    fn test_append_after_finish_requires_mutation() {
        let mut task = racing();
        triangle(&mut task);

        let point = assert_some_intermediate(&task, waypoint(3, 10_000.0, 90.0));
        assert_matches!(task.append(point, false), Err(Error::IncompatiblePoint { position: 4, .. }));
        assert_eq!(task.len(), 4);
    }

    #[test]
    fn test_insert_at_front_demotes_start() {
        let mut task = racing();
        triangle(&mut task);

        let point = assert_some_intermediate(&task, waypoint(5, 10_000.0, 180.0));
        assert_ok!(task.insert(point, 0, true));

        assert_eq!(task.len(), 5);
        assert_eq!(task.points()[0].kind(), PointKind::Start);
        assert_eq!(task.points()[0].waypoint().id, 5);
        assert_eq!(task.points()[1].kind(), PointKind::Turnpoint);
        assert_eq!(task.points()[1].waypoint().id, 0);
    }

    #[test]
    fn test_insert_finish_in_middle_becomes_turnpoint() {
        let mut task = racing();
        triangle(&mut task);

        let factory = *task.factory();
        let finish = factory.create_point(TaskPointFactoryType::FinishLine, waypoint(6, 20_000.0, 30.0), None);
        assert_ok!(task.insert(finish.clone(), 2, true));
        assert_eq!(task.points()[2].kind(), PointKind::Turnpoint);

        assert_err!(task.insert(finish, 2, false));
    }

    #[test]
    fn test_remove_start_promotes_next_point() {
        let mut task = racing();
        triangle(&mut task);

        assert_ok!(task.remove(0, true));
        assert_eq!(task.len(), 3);
        assert_eq!(task.points()[0].kind(), PointKind::Start);
        assert_eq!(task.points()[0].waypoint().id, 1);
    }

    #[test]
    fn test_remove_finish_promotes_previous_point() {
        let mut task = racing();
        triangle(&mut task);

        assert_ok!(task.remove(3, true));
        assert_eq!(task.len(), 3);
        assert_eq!(task.points()[2].kind(), PointKind::Finish);
        assert_eq!(task.points()[2].waypoint().id, 2);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut task = racing();
        assert_matches!(task.remove(0, true), Err(Error::IndexOutOfRange { index: 0, size: 0 }));
    }

    #[test]
    fn test_swap() {
        let mut task = racing();
        triangle(&mut task);

        assert_ok!(task.swap(1, true));
        let ids: Vec<_> = task.points().iter().map(|point| point.waypoint().id).collect();
        assert_eq!(ids, [0, 2, 1, 0]);
        assert!(task.validate().valid);

        assert_err!(task.swap(3, true));
    }

    #[test]
    fn test_replace_start_with_intermediate_rebuilds_start() {
        let mut task = racing();
        triangle(&mut task);

        let point = assert_some_intermediate(&task, waypoint(7, 5_000.0, 270.0));
        assert_ok!(task.replace(point, 0, true));
        assert_eq!(task.points()[0].kind(), PointKind::Start);
        assert_eq!(task.points()[0].waypoint().id, 7);
    }

    #[test]
    fn test_relocate_keeps_type() {
        let mut task = racing();
        triangle(&mut task);

        let before = task.points()[1].factory_type();
        assert_ok!(task.relocate(1, waypoint(8, 40_000.0, 10.0)));
        assert_eq!(task.points()[1].factory_type(), before);
        assert_eq!(task.points()[1].waypoint().id, 8);
    }

    #[test]
    fn test_failed_edit_leaves_task_untouched() {
        let mut task = racing();
        triangle(&mut task);
        let before = task.clone();

        assert_err!(task.remove(10, false));
        assert_eq!(task, before);

        let factory = *task.factory();
        let finish = factory.create_point(TaskPointFactoryType::FinishLine, waypoint(6, 20_000.0, 30.0), None);
        assert_err!(task.insert(finish, 1, false));
        assert_eq!(task, before);
    }

    #[test]
    fn test_is_full() {
        let mut task = OrderedTask::with_factory(TaskFactoryType::FaiGoal, TaskBehaviour::default());
        add(&mut task, waypoint(0, 0.0, 0.0));
        add(&mut task, waypoint(1, 50_000.0, 0.0));
        assert!(task.is_full());

        let point = assert_some_intermediate(&task, waypoint(2, 10_000.0, 90.0));
        assert_matches!(task.append(point, true), Err(Error::TaskFull { max: 2 }));
    }

    #[test]
    fn test_set_factory_mutates_points() {
        let mut task = racing();
        triangle(&mut task);

        assert!(task.set_factory(TaskFactoryType::Aat));
        let types: Vec<_> = task.points().iter().map(OrderedTaskPoint::factory_type).collect();
        assert_eq!(
            types,
            [
                TaskPointFactoryType::StartCylinder,
                TaskPointFactoryType::AatCylinder,
                TaskPointFactoryType::AatCylinder,
                TaskPointFactoryType::FinishCylinder,
            ]
        );
        assert!(task.has_targets());
        assert!(task.validate().valid);
    }

    #[test]
    fn test_set_factory_removes_excess_points() {
        let mut task = racing();
        triangle(&mut task);
        add(&mut task, waypoint(3, 30_000.0, 200.0));
        assert_eq!(task.len(), 5);

        task.set_factory(TaskFactoryType::FaiTriangle);
        assert_eq!(task.len(), 4);
        assert!(task.factory().is_closed(&task));
    }

    #[test]
    fn test_check_add_finish() {
        let mut task = racing();
        add(&mut task, waypoint(0, 0.0, 0.0));
        let point = assert_some_intermediate(&task, waypoint(1, 50_000.0, 0.0));
        assert_ok!(task.append(point, false));
        assert!(!task.has_finish());

        assert!(task.check_add_finish());
        assert!(task.has_finish());
        assert!(!task.check_add_finish());
    }

    #[test]
    fn test_update_geometry_orients_sectors() {
        let mut task = OrderedTask::with_factory(TaskFactoryType::FaiGeneral, TaskBehaviour::default());
        let factory = *task.factory();
        let points = [
            (TaskPointFactoryType::StartSector, waypoint(0, 0.0, 0.0)),
            (TaskPointFactoryType::FaiSector, waypoint(1, 50_000.0, 0.0)),
            (TaskPointFactoryType::FinishSector, waypoint(2, 50_000.0, 90.0)),
        ];
        for (point_type, waypoint) in points {
            assert_ok!(task.append(factory.create_point(point_type, waypoint, None), false));
        }
        assert!(task.projection().is_some());

        // the turnpoint sector faces away from both legs
        let turnpoint = &task.points()[1];
        let outside = GeoVector::new(5_000.0, Angle::degrees(315.0)).end_point(&turnpoint.location());
        let inside_turn = GeoVector::new(5_000.0, Angle::degrees(135.0)).end_point(&turnpoint.location());
        assert!(turnpoint.zone().inside(&outside));
        assert!(!turnpoint.zone().inside(&inside_turn));
    }

    #[test]
    fn test_nominal_distance() {
        let mut task = racing();
        add(&mut task, waypoint(0, 0.0, 0.0));
        add(&mut task, waypoint(1, 50_000.0, 0.0));
        assert!(task.check_add_finish());

        assert_lt!((task.nominal_distance() - 50_000.0).abs(), 1e-6);
        assert_lt!((task.scored_nominal_distance() - 48_000.0).abs(), 1e-6);
        assert_gt!(task.task_radius(), 24_000.0);
    }

    #[test]
    fn test_scan_distance_landout() {
        let mut task = racing();
        add(&mut task, waypoint(0, 0.0, 0.0));
        add(&mut task, waypoint(1, 50_000.0, 0.0));
        add(&mut task, waypoint(2, 50_000.0, 90.0));

        let reference = waypoint(9, 20_000.0, 0.0).location;
        assert_eq!(task.scan_distance_landout(&reference), 0.0);

        assert_ok!(task.set_active_index(1));
        assert_lt!((task.scan_distance_landout(&reference) - 20_000.0).abs(), 1e-3);

        assert_ok!(task.set_active_index(2));
        let leg = task.points()[0].location().distance(&task.points()[1].location());
        assert_gt!(task.scan_distance_landout(&task.points()[1].location()), leg - 1e-3);

        assert_err!(task.set_active_index(3));
    }

    #[test]
    fn test_scored_location_refreshes_landout() {
        let mut task = racing();
        add(&mut task, waypoint(0, 0.0, 0.0));
        add(&mut task, waypoint(1, 50_000.0, 0.0));
        let before = task.points()[1].landout().clone();

        assert_ok!(task.set_scored_location(0, Some(waypoint(9, 1_000.0, 0.0).location)));
        assert_ne!(task.points()[1].landout(), &before);
    }

    #[test]
    fn test_should_add_to_mat() {
        let mut task = OrderedTask::with_factory(TaskFactoryType::Mat, TaskBehaviour::default());
        add(&mut task, waypoint(0, 0.0, 0.0));

        assert!(!task.should_add_to_mat(&waypoint(0, 0.0, 0.0)));
        assert!(task.should_add_to_mat(&waypoint(1, 10_000.0, 0.0)));

        let mut landable = waypoint(2, 10_000.0, 90.0);
        landable.is_turnpoint = false;
        assert!(!task.should_add_to_mat(&landable));
    }

    #[test]
    fn test_clone_with_behaviour() {
        let mut task = racing();
        triangle(&mut task);

        let behaviour = TaskBehaviour {
            contest_nationality: crate::task::ContestNationality::American,
            ..TaskBehaviour::default()
        };
        let clone = task.clone_with(behaviour);
        assert_eq!(clone.len(), task.len());
        assert_eq!(clone.factory().descriptor().nationality, Some(behaviour.contest_nationality));
        assert_eq!(task.factory().descriptor().nationality, None);
    }
}
