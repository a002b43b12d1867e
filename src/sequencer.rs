//! Optimistic task reordering.
//!
//! Each reorder gesture runs a small state machine: Idle, then
//! OptimisticallyMoved once the local order has been swapped, then either
//! Confirmed or RolledBack when the backend answers. The local view
//! updates before any confirmation, so the observed order always reflects
//! the most recent user-issued swap regardless of confirmation latency.
//! Between `begin` and `finish` the swapped order is fully observable and
//! usable.
//!
//! The backend is an injected async trait so the protocol is testable
//! without persistence or any rendering surface. Dropping a sequencer with
//! a gesture in flight simply abandons the confirmation; no hook fires for
//! a discarded view.

use std::collections::HashSet;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }
}

impl FromStr for MoveDirection {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(Error::InvalidArgument(format!(
                "direction must be up or down, got {other}"
            ))),
        }
    }
}

/// Confirmation backend for move requests. The project store implements
/// this; tests inject doubles that accept, reject, or record calls. Only
/// the success/failure outcome matters to the protocol; any response body
/// is ignored.
#[async_trait]
pub trait MoveBackend {
    async fn persist_move(&mut self, task_id: TaskId, direction: MoveDirection) -> Result<()>;
}

/// What to do with the optimistic local order when the backend rejects a
/// move. The failure hook always fires first; the policy then decides
/// whether the swap is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevertPolicy {
    /// Undo the local swap so the order matches server truth again.
    #[default]
    RevertOnFailure,
    /// Keep the optimistic order and leave reconciliation to the caller.
    KeepLocal,
}

/// Terminal state of a single reorder gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The task had no neighbor in the requested direction: nothing was
    /// swapped and no request was issued. Not an error.
    NoOp,
    /// Backend confirmed; the optimistic order is final.
    Confirmed,
    /// Backend rejected and the local swap was undone.
    RolledBack,
    /// Backend rejected; the optimistic order was kept per policy.
    FailureKeptLocal,
}

/// An in-flight gesture: the optimistic swap has been applied locally and
/// the backend request is outstanding. Passing this back to `finish`
/// settles the gesture; dropping it abandons the confirmation.
#[derive(Debug)]
#[must_use = "an in-flight move must be settled with finish() or deliberately abandoned"]
pub struct MoveGesture {
    task_id: TaskId,
    direction: MoveDirection,
    swapped_with: TaskId,
}

impl MoveGesture {
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }
}

type ConfirmHook = Box<dyn FnMut(TaskId) + Send>;
type RejectHook = Box<dyn FnMut(TaskId, &Error) + Send>;

/// Client-side coordinator for backlog reordering.
///
/// Owns the local ordered view (stable ids, not positions) and an injected
/// backend. No two moves for the same task may be in flight at once; a
/// second request is rejected with `Error::MoveInFlight` rather than
/// silently dropped. Moves for different tasks settle in arrival order.
pub struct TaskSequencer<B: MoveBackend> {
    order: Vec<TaskId>,
    backend: B,
    policy: RevertPolicy,
    in_flight: HashSet<TaskId>,
    on_confirmed: Option<ConfirmHook>,
    on_rejected: Option<RejectHook>,
}

impl<B: MoveBackend> TaskSequencer<B> {
    pub fn new(order: Vec<TaskId>, backend: B) -> Self {
        Self {
            order,
            backend,
            policy: RevertPolicy::default(),
            in_flight: HashSet::new(),
            on_confirmed: None,
            on_rejected: None,
        }
    }

    pub fn with_policy(mut self, policy: RevertPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Observable side-effect point for a confirmed move. By contract the
    /// hook performs no further mutation: the optimistic state is already
    /// final when it fires.
    pub fn on_confirmed(mut self, hook: impl FnMut(TaskId) + Send + 'static) -> Self {
        self.on_confirmed = Some(Box::new(hook));
        self
    }

    /// Observable side-effect point for a rejected move. Fires before the
    /// revert policy is applied, so the hook sees the optimistic order.
    pub fn on_rejected(mut self, hook: impl FnMut(TaskId, &Error) + Send + 'static) -> Self {
        self.on_rejected = Some(Box::new(hook));
        self
    }

    /// The local ordered view, including any unconfirmed optimistic swaps.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    pub fn pending(&self, task_id: TaskId) -> bool {
        self.in_flight.contains(&task_id)
    }

    /// Run one full reorder gesture: optimistic swap, backend
    /// confirmation, hooks, policy.
    pub async fn move_task(
        &mut self,
        task_id: TaskId,
        direction: MoveDirection,
    ) -> Result<MoveOutcome> {
        let Some(gesture) = self.begin(task_id, direction)? else {
            return Ok(MoveOutcome::NoOp);
        };
        let result = self.backend.persist_move(task_id, direction).await;
        Ok(self.finish(gesture, result))
    }

    /// Phase one: apply the optimistic local swap and mark the task in
    /// flight. Returns `None` when the task is already at the boundary in
    /// the requested direction; no request should be issued in that case.
    pub fn begin(&mut self, task_id: TaskId, direction: MoveDirection) -> Result<Option<MoveGesture>> {
        if self.in_flight.contains(&task_id) {
            return Err(Error::MoveInFlight(task_id));
        }
        let Some(position) = self.order.iter().position(|id| *id == task_id) else {
            return Err(Error::TaskNotFound(task_id.to_string()));
        };
        let Some(neighbor) = neighbor_position(position, direction, self.order.len()) else {
            debug!(%task_id, direction = direction.as_str(), "boundary move is a no-op");
            return Ok(None);
        };

        let swapped_with = self.order[neighbor];
        self.order.swap(position, neighbor);
        self.in_flight.insert(task_id);
        debug!(%task_id, direction = direction.as_str(), "optimistically moved");

        Ok(Some(MoveGesture {
            task_id,
            direction,
            swapped_with,
        }))
    }

    /// Phase two: settle an in-flight gesture with the backend outcome.
    /// Fires the matching hook, applies the revert policy on failure, and
    /// returns the task to the idle state.
    pub fn finish(&mut self, gesture: MoveGesture, result: Result<()>) -> MoveOutcome {
        self.in_flight.remove(&gesture.task_id);

        match result {
            Ok(()) => {
                if let Some(hook) = self.on_confirmed.as_mut() {
                    hook(gesture.task_id);
                }
                MoveOutcome::Confirmed
            }
            Err(err) => {
                warn!(
                    task_id = %gesture.task_id,
                    direction = gesture.direction.as_str(),
                    error = %err,
                    "move rejected by backend"
                );
                if let Some(hook) = self.on_rejected.as_mut() {
                    hook(gesture.task_id, &err);
                }
                match self.policy {
                    RevertPolicy::RevertOnFailure => {
                        self.revert(&gesture);
                        MoveOutcome::RolledBack
                    }
                    RevertPolicy::KeepLocal => MoveOutcome::FailureKeptLocal,
                }
            }
        }
    }

    /// Undo the optimistic swap by id lookup, not by remembered positions,
    /// so confirmed moves of other tasks in the meantime stay intact.
    fn revert(&mut self, gesture: &MoveGesture) {
        let moved = self.order.iter().position(|id| *id == gesture.task_id);
        let partner = self.order.iter().position(|id| *id == gesture.swapped_with);
        if let (Some(moved), Some(partner)) = (moved, partner) {
            self.order.swap(moved, partner);
        }
    }
}

fn neighbor_position(position: usize, direction: MoveDirection, len: usize) -> Option<usize> {
    match direction {
        MoveDirection::Up => position.checked_sub(1),
        MoveDirection::Down => {
            let below = position + 1;
            (below < len).then_some(below)
        }
    }
}
