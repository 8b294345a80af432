//! Bubble-certified tree
//!
//! Every sample point joining the tree carries a [`Bubble`]. An edge between
//! two bubbles is certified either directly (the bubbles overlap along the
//! segment) or by bisecting the uncovered gap with mid-bubbles, breadth first,
//! under a fixed construction budget.
//!
//! Bubbles live in an arena owned by the tree and link to their parent by
//! [`BubbleId`]. Parent links always point back toward the start, so the path
//! is recovered by walking them from the goal.

use super::{PlannerTree, TreeCore};
use crate::bubble::{reaches, Bubble, BubbleId};
use crate::environment::CollisionOracle;
use crate::error::{PlanError, PlanResult};
use crate::params::PlannerParams;
use crate::space::{Configuration, SampleSpace};
use std::collections::VecDeque;
use tracing::debug;

/// Uncovered stretch of a segment between two bubbles
///
/// `near` is the bubble on the start side; `near_hull` and `far_hull` are the
/// points where each bubble stops along the segment.
#[derive(Debug)]
struct Gap {
    near: BubbleId,
    near_hull: Configuration,
    far: BubbleId,
    far_hull: Configuration,
}

/// Tree planner certified with free-space bubbles
#[derive(Debug)]
pub struct BubbleTree<S, O> {
    core: TreeCore<S, O>,
    arena: Vec<Bubble>,
    slots: Vec<Option<BubbleId>>,
    max_connect_param: usize,
}

impl<S: SampleSpace, O: CollisionOracle> BubbleTree<S, O> {
    /// Create a planning query over `space`; `start` and `goal` are added to the pool
    pub fn new(
        space: S,
        oracle: O,
        start: Configuration,
        goal: Configuration,
        params: &PlannerParams,
    ) -> PlanResult<Self> {
        let core = TreeCore::new(space, oracle, start, goal, params)?;
        let slots = vec![None; core.space.size()];
        Ok(Self {
            core,
            arena: Vec::new(),
            slots,
            max_connect_param: params.max_connect_param,
        })
    }

    /// Bubble behind a handle
    pub fn bubble(&self, id: BubbleId) -> &Bubble {
        &self.arena[id.0]
    }

    /// Bubble built for a sample index, if any
    pub fn bubble_of(&self, index: usize) -> Option<&Bubble> {
        self.slots
            .get(index)
            .copied()
            .flatten()
            .map(|id| self.bubble(id))
    }

    /// Number of bubbles alive in the arena, mid-bubbles included
    pub fn bubble_count(&self) -> usize {
        self.arena.len()
    }

    pub fn max_connect_param(&self) -> usize {
        self.max_connect_param
    }

    /// Sample indices along the parent chain from start to goal
    pub fn sample_chain(&self) -> PlanResult<Vec<usize>> {
        Ok(self
            .chain()?
            .into_iter()
            .filter_map(|id| self.bubble(id).sample)
            .collect())
    }

    fn push_bubble(&mut self, bubble: Bubble) -> BubbleId {
        self.arena.push(bubble);
        BubbleId(self.arena.len() - 1)
    }

    /// Ensure `index` has a bubble; false if none can be built there
    fn make_sample_bubble(&mut self, index: usize) -> bool {
        if self.slots[index].is_some() {
            return true;
        }
        let core = &mut self.core;
        let made = core.oracle.try_make_bubble(core.space.get(index));
        match made {
            Some(mut bubble) if self.core.accepts_bubble(&bubble) => {
                bubble.sample = Some(index);
                bubble.parent = None;
                let id = self.push_bubble(bubble);
                self.slots[index] = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Drop mid-bubbles created after `mark` and unlink `target`
    fn rollback(&mut self, mark: usize, target: BubbleId) {
        self.arena.truncate(mark);
        self.arena[target.0].parent = None;
    }

    /// Bisect the gaps between `from` and `to` until covered or out of budget
    fn bisect(
        &mut self,
        from: BubbleId,
        from_hull: Configuration,
        to: BubbleId,
        to_hull: Configuration,
    ) -> bool {
        let mark = self.arena.len();
        let mut queue = VecDeque::new();
        queue.push_back(Gap {
            near: from,
            near_hull: from_hull,
            far: to,
            far_hull: to_hull,
        });

        let mut attempts = 0;
        while let Some(gap) = queue.pop_front() {
            if attempts >= self.max_connect_param {
                debug!(
                    budget = self.max_connect_param,
                    open_gaps = queue.len() + 1,
                    "bisection budget exhausted"
                );
                self.rollback(mark, to);
                return false;
            }
            attempts += 1;
            self.core.stats.mid_bubbles += 1;

            let mid = (&gap.near_hull + &gap.far_hull) * 0.5;
            let made = self.core.oracle.try_make_bubble(&mid);
            let Some(mut mid_bubble) = made.filter(|bubble| self.core.accepts_bubble(bubble)) else {
                debug!(attempts, "mid-bubble construction failed");
                self.rollback(mark, to);
                return false;
            };

            let (Some(mid_near), Some(mid_far)) = (
                mid_bubble.hull_toward(&gap.near_hull),
                mid_bubble.hull_toward(&gap.far_hull),
            ) else {
                self.rollback(mark, to);
                return false;
            };

            mid_bubble.parent = None;
            mid_bubble.sample = None;
            let mid_id = self.push_bubble(mid_bubble);

            if reaches(self.bubble(gap.near).center(), &gap.near_hull, &mid, &mid_near) {
                self.arena[mid_id.0].parent = Some(gap.near);
            } else {
                queue.push_back(Gap {
                    near: gap.near,
                    near_hull: gap.near_hull,
                    far: mid_id,
                    far_hull: mid_near,
                });
            }

            if reaches(&mid, &mid_far, self.bubble(gap.far).center(), &gap.far_hull) {
                self.arena[gap.far.0].parent = Some(mid_id);
            } else {
                queue.push_back(Gap {
                    near: mid_id,
                    near_hull: mid_far,
                    far: gap.far,
                    far_hull: gap.far_hull,
                });
            }
        }
        true
    }

    /// Bubble handles from start to goal
    fn chain(&self) -> PlanResult<Vec<BubbleId>> {
        let goal = self.slots[self.core.goal_index].ok_or(PlanError::NoPath)?;
        let start = self.slots[self.core.start_index].ok_or(PlanError::NoPath)?;
        if self.bubble(goal).parent.is_none() {
            return Err(PlanError::NoPath);
        }

        let mut chain = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.bubble(current).parent {
            if chain.len() > self.arena.len() {
                return Err(PlanError::BrokenChain { steps: chain.len() });
            }
            chain.push(parent);
            current = parent;
        }
        if current != start {
            return Err(PlanError::BrokenChain { steps: chain.len() });
        }

        chain.reverse();
        Ok(chain)
    }
}

impl<S: SampleSpace, O: CollisionOracle> PlannerTree for BubbleTree<S, O> {
    type Space = S;
    type Oracle = O;

    fn core(&self) -> &TreeCore<S, O> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TreeCore<S, O> {
        &mut self.core
    }

    fn prepare_endpoints(&mut self) -> PlanResult<()> {
        if !self.make_sample_bubble(self.core.start_index) {
            return Err(PlanError::CollisionAtStart);
        }
        if !self.make_sample_bubble(self.core.goal_index) {
            return Err(PlanError::CollisionAtGoal);
        }
        Ok(())
    }

    fn admit_neighbor(&mut self, index: usize) -> bool {
        self.make_sample_bubble(index)
    }

    fn connect_points(&mut self, from: usize, to: usize) -> bool {
        let (Some(from_id), Some(to_id)) = (self.slots[from], self.slots[to]) else {
            return false;
        };

        let from_center = self.bubble(from_id).center().clone();
        let to_center = self.bubble(to_id).center().clone();
        if from_center == to_center {
            self.arena[to_id.0].parent = Some(from_id);
            return true;
        }

        let (Some(from_hull), Some(to_hull)) = (
            self.bubble(from_id).hull_toward(&to_center),
            self.bubble(to_id).hull_toward(&from_center),
        ) else {
            return false;
        };

        if reaches(&from_center, &from_hull, &to_center, &to_hull) {
            self.arena[to_id.0].parent = Some(from_id);
            return true;
        }

        self.bisect(from_id, from_hull, to_id, to_hull)
    }

    fn goal_linked(&self) -> bool {
        self.bubble_of(self.core.goal_index)
            .is_some_and(|bubble| bubble.parent.is_some())
    }

    fn generate_path(&self) -> PlanResult<Vec<Configuration>> {
        Ok(self
            .chain()?
            .into_iter()
            .map(|id| self.bubble(id).center().clone())
            .collect())
    }
}
