//! Delegation chains and the hand-off permission matrix.
//!
//! Both tables are immutable constants. A chain is the ordered list of
//! roles expected to handle a task category end to end; the permission
//! matrix says which role may pass work to which, independent of any
//! category. The two are consulted separately.

use crate::core::role::Role;
use crate::core::task::{Task, TaskType};
use crate::error::{Error, Result};
use crate::hlog_debug;

/// Chain used for a category name that does not parse.
pub const FALLBACK_CHAIN: &[Role] = &[Role::Developer];

const FEATURE_CHAIN: &[Role] = &[Role::Architect, Role::Senior, Role::Developer, Role::Reviewer];
const BUG_FIX_CHAIN: &[Role] = &[Role::Senior, Role::Developer, Role::Reviewer];
const REFACTOR_CHAIN: &[Role] = &[Role::Senior, Role::Developer, Role::Reviewer];
const TEST_CHAIN: &[Role] = &[Role::Developer, Role::Reviewer];
const DOCUMENTATION_CHAIN: &[Role] = &[Role::Developer, Role::Reviewer];
const ARCHITECTURE_CHAIN: &[Role] = &[Role::Product, Role::Architect, Role::Senior];

/// Static delegation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelegationEngine;

impl DelegationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn chain_for(&self, task_type: TaskType) -> &'static [Role] {
        match task_type {
            TaskType::Feature => FEATURE_CHAIN,
            TaskType::BugFix => BUG_FIX_CHAIN,
            TaskType::Refactor => REFACTOR_CHAIN,
            TaskType::Test => TEST_CHAIN,
            TaskType::Documentation => DOCUMENTATION_CHAIN,
            TaskType::Architecture => ARCHITECTURE_CHAIN,
        }
    }

    /// Chain for a raw category name. Unrecognized names fall back to
    /// [`FALLBACK_CHAIN`].
    pub fn chain_for_name(&self, name: &str) -> &'static [Role] {
        name.parse::<TaskType>()
            .map(|t| self.chain_for(t))
            .unwrap_or(FALLBACK_CHAIN)
    }

    pub fn delegation_chain(&self, task: &Task) -> Result<&'static [Role]> {
        task.validate()?;
        Ok(self.chain_for(task.task_type))
    }

    /// The role after `current` in the task's chain.
    ///
    /// # Errors
    /// Returns [`Error::NoNextAgent`] both when `current` is last in the
    /// chain and when it is not in the chain at all.
    pub fn next_agent(&self, task: &Task, current: Role) -> Result<Role> {
        let chain = self.delegation_chain(task)?;
        hlog_debug!("next_agent: {} chain, current {}", task.task_type, current);
        self.next_in_chain(chain, current)
    }

    /// The role after `current` in an already selected chain, such as one
    /// from [`Self::chain_for_name`]. Fails like [`Self::next_agent`].
    pub fn next_in_chain(&self, chain: &[Role], current: Role) -> Result<Role> {
        let next = chain
            .iter()
            .position(|&r| r == current)
            .and_then(|i| chain.get(i + 1))
            .copied();
        hlog_debug!("next_in_chain: after {} -> {:?}", current, next);
        next.ok_or(Error::NoNextAgent { role: current })
    }

    /// True when `current` appears anywhere in the task's chain, including
    /// the last position, where [`Self::next_agent`] fails.
    pub fn should_delegate(&self, task: &Task, current: Role) -> Result<bool> {
        Ok(self.delegation_chain(task)?.contains(&current))
    }

    pub fn hand_off_targets(&self, from: Role) -> &'static [Role] {
        match from {
            Role::Product => &[Role::Architect, Role::Senior, Role::Developer],
            Role::Architect => &[Role::Senior, Role::Developer],
            Role::Senior => &[Role::Developer, Role::Reviewer],
            Role::Developer => &[Role::Reviewer],
            Role::Reviewer => &[],
            Role::Ops => &[Role::Senior, Role::Developer],
        }
    }

    pub fn can_hand_off(&self, from: Role, to: Role) -> bool {
        self.hand_off_targets(from).contains(&to)
    }

    /// Check a proposed hand-off against both the permission matrix and
    /// the task's chain.
    pub fn authorize_hand_off(&self, task: &Task, from: Role, to: Role) -> Result<()> {
        if !self.can_hand_off(from, to) {
            return Err(Error::HandOffDenied {
                from,
                to,
                reason: format!("{} may not hand off to {}", from, to),
            });
        }
        let next = self.next_agent(task, from)?;
        if next != to {
            return Err(Error::HandOffDenied {
                from,
                to,
                reason: format!("{} chain expects {} after {}", task.task_type, next, from),
            });
        }
        Ok(())
    }
}
