//! Shared task state
//!
//! [`TaskManager`] holds the committed ordered task, the navigation mode and
//! the glide polar. [`ProtectedTaskManager`] shares one manager between the
//! calculation thread and the UI behind a reader-writer lock: a [`Lease`]
//! for queries and an [`ExclusiveLease`] for commits and target edits.

use crate::error::{Error, Result};
use crate::geo::{Angle, GeoPoint};
use crate::polar::GlidePolar;
use crate::task::{OrderedTask, OrderedTaskPoint, TaskBehaviour, Waypoint};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use tracing::debug;

/// What the aircraft is navigating along
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TaskMode {
    #[default]
    None,
    Ordered,
    Goto(Waypoint),
}

#[derive(Debug, Clone)]
pub struct TaskManager {
    ordered: OrderedTask,
    mode: TaskMode,
    behaviour: TaskBehaviour,
    glide_polar: GlidePolar,
}

impl TaskManager {
    pub fn new(behaviour: TaskBehaviour) -> Self {
        Self {
            ordered: OrderedTask::new(behaviour),
            mode: TaskMode::None,
            behaviour,
            glide_polar: GlidePolar::default(),
        }
    }

    pub fn mode(&self) -> &TaskMode {
        &self.mode
    }

    pub fn is_ordered(&self) -> bool {
        self.mode == TaskMode::Ordered
    }

    pub fn behaviour(&self) -> &TaskBehaviour {
        &self.behaviour
    }

    pub fn set_behaviour(&mut self, behaviour: TaskBehaviour) {
        self.behaviour = behaviour;
        self.ordered = self.ordered.clone_with(behaviour);
    }

    pub fn ordered_task(&self) -> &OrderedTask {
        &self.ordered
    }

    /// Working copy of the ordered task for editing
    pub fn clone_ordered(&self) -> OrderedTask {
        self.ordered.clone_with(self.behaviour)
    }

    /// Replace the ordered task with `candidate`
    ///
    /// A non-empty candidate has to pass validation. Committing an empty
    /// task clears the ordered task and leaves ordered mode.
    pub fn commit(&mut self, candidate: &OrderedTask) -> Result<()> {
        check_candidate(candidate)?;
        self.commit_validated(candidate);
        Ok(())
    }

    /// Swap in a candidate that already passed [`check_candidate`]
    pub(crate) fn commit_validated(&mut self, candidate: &OrderedTask) {
        self.ordered.commit(candidate);
        self.mode = if self.ordered.is_empty() {
            TaskMode::None
        } else {
            TaskMode::Ordered
        };
        debug!(mode = ?self.mode, points = self.ordered.len(), "task committed");
    }

    /// Navigate directly to `waypoint`, the ordered task is kept
    pub fn do_goto(&mut self, waypoint: Waypoint) {
        debug!(waypoint = %waypoint.name, "goto");
        self.mode = TaskMode::Goto(waypoint);
    }

    /// Return to the committed ordered task, if any
    pub fn resume_ordered(&mut self) -> bool {
        if self.ordered.is_empty() {
            return false;
        }

        self.mode = TaskMode::Ordered;
        true
    }

    /// Forget all task progress
    pub fn reset(&mut self) {
        self.ordered.reset();
    }

    pub fn active_task_point_index(&self) -> usize {
        self.ordered.active_index()
    }

    pub fn set_active_task_point(&mut self, index: usize) -> Result<()> {
        if !self.is_ordered() {
            return Err(Error::NotOrdered);
        }
        self.ordered.set_active_index(index)
    }

    pub fn glide_polar(&self) -> &GlidePolar {
        &self.glide_polar
    }

    pub fn set_glide_polar(&mut self, glide_polar: GlidePolar) {
        self.glide_polar = glide_polar;
    }

    pub fn set_mc(&mut self, mc: f64) {
        self.glide_polar.set_mc(mc);
    }

    /// The glide polar flown at the safety MacCready setting
    pub fn safety_polar(&self) -> GlidePolar {
        let mut polar = self.glide_polar;
        if polar.is_valid() {
            polar.set_mc(self.behaviour.safety_mc);
        }
        polar
    }

    fn target_point(&self, index: usize) -> Result<&OrderedTaskPoint> {
        if !self.is_ordered() {
            return Err(Error::NotOrdered);
        }

        let point = self.ordered.point(index).ok_or(Error::IndexOutOfRange {
            index,
            size: self.ordered.len(),
        })?;
        if !point.has_target() {
            return Err(Error::NoTarget(index));
        }
        Ok(point)
    }

    /// Like [`Self::target_point`], also refusing points already achieved
    fn editable_target_point(&mut self, index: usize) -> Result<&mut OrderedTaskPoint> {
        if self.target_point(index)?.is_achieved() {
            return Err(Error::PointAchieved(index));
        }

        let size = self.ordered.len();
        self.ordered
            .point_mut(index)
            .ok_or(Error::IndexOutOfRange { index, size })
    }

    pub fn has_target(&self, index: usize) -> bool {
        self.target_point(index).is_ok()
    }

    pub fn target_location(&self, index: usize) -> Option<GeoPoint> {
        self.target_point(index).ok()?.target_location()
    }

    /// Move the target of point `index`, returns `false` if a lock kept it
    pub fn set_target_location(&mut self, index: usize, location: GeoPoint, override_lock: bool) -> Result<bool> {
        let moved = self
            .editable_target_point(index)?
            .set_target_location(location, override_lock);
        debug!(index, moved, "target location set");
        Ok(moved)
    }

    /// Place the target of point `index` by range and radial relative to
    /// the inbound leg
    ///
    /// An explicit placement moves a locked target too. The lock only
    /// keeps target optimisation away from it.
    pub fn set_target(&mut self, index: usize, range: f64, radial: Angle) -> Result<bool> {
        let reference = self.ordered.leg_bearing(index);
        let moved = self
            .editable_target_point(index)?
            .set_target_range_radial(range, radial, reference);
        debug!(index, range, radial = radial.to_degrees(), moved, "target range/radial set");
        Ok(moved)
    }

    pub fn target_range_radial(&self, index: usize) -> Result<(f64, Angle)> {
        let reference = self.ordered.leg_bearing(index);
        self.target_point(index)?
            .target_range_radial(reference)
            .ok_or(Error::NoTarget(index))
    }

    pub fn target_lock(&mut self, index: usize, locked: bool) -> Result<()> {
        self.target_point(index)?;

        let size = self.ordered.len();
        let point = self
            .ordered
            .point_mut(index)
            .ok_or(Error::IndexOutOfRange { index, size })?;
        point.set_target_locked(locked);
        debug!(index, locked, "target lock changed");
        Ok(())
    }

    pub fn target_is_locked(&self, index: usize) -> Result<bool> {
        let point = self.target_point(index)?;
        Ok(point.target().is_some_and(|target| target.is_locked()))
    }
}

/// A non-empty candidate has to pass validation before it is committed
fn check_candidate(candidate: &OrderedTask) -> Result<()> {
    if candidate.is_empty() {
        return Ok(());
    }

    let report = candidate.validate();
    if report.valid {
        Ok(())
    } else {
        Err(Error::InvalidTask(report.errors))
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new(TaskBehaviour::default())
    }
}

/// Shared read access to the task manager, released on drop
pub type Lease<'a> = RwLockReadGuard<'a, TaskManager>;

/// Exclusive write access to the task manager, released on drop
pub type ExclusiveLease<'a> = RwLockWriteGuard<'a, TaskManager>;

/// Handle to a task manager shared between threads
///
/// Cloning the handle shares the same manager.
#[derive(Debug, Clone, Default)]
pub struct ProtectedTaskManager {
    inner: Arc<RwLock<TaskManager>>,
}

impl ProtectedTaskManager {
    pub fn new(manager: TaskManager) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    pub fn lease(&self) -> Lease<'_> {
        self.inner.read()
    }

    pub fn exclusive_lease(&self) -> ExclusiveLease<'_> {
        self.inner.write()
    }

    /// Working copy of the ordered task, taken under a shared lease
    pub fn task_clone(&self) -> OrderedTask {
        self.lease().clone_ordered()
    }

    /// Validate `candidate` without holding the lock, then swap it in
    pub fn commit(&self, candidate: &OrderedTask) -> Result<()> {
        check_candidate(candidate)?;
        self.exclusive_lease().commit_validated(candidate);
        Ok(())
    }

    pub fn set_target(&self, index: usize, range: f64, radial: Angle) -> Result<bool> {
        self.exclusive_lease().set_target(index, range, radial)
    }

    pub fn target_lock(&self, index: usize, locked: bool) -> Result<()> {
        self.exclusive_lease().target_lock(index, locked)
    }

    pub fn target_is_locked(&self, index: usize) -> Result<bool> {
        self.lease().target_is_locked(index)
    }

    pub fn set_active_task_point(&self, index: usize) -> Result<()> {
        self.exclusive_lease().set_active_task_point(index)
    }
}
