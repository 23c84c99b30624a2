// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    collections::{BTreeSet, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::Deserialize;

use crate::{BasaltError, BasaltResult, LineNumber};

/// What [`IdGenerator::release`] does with an id that is not in use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleasePolicy {
    /// Queue it for reuse anyway.
    #[default]
    Accept,

    /// Fail with a handle error.
    Reject,
}

#[derive(Debug, Default)]
struct IdPool {
    in_use: BTreeSet<u32>,

    /// Reused first-released, first-reused.
    released: VecDeque<u32>,
}

/// Hands out small positive ids, reusing released ones before minting new
/// ones. Safe to share between threads.
#[derive(Debug, Default)]
pub struct IdGenerator {
    pool: Mutex<IdPool>,
    policy: ReleasePolicy,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: ReleasePolicy) -> Self {
        Self {
            pool: Mutex::default(),
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    fn pool(&self) -> MutexGuard<'_, IdPool> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn next(&self) -> u32 {
        let mut pool = self.pool();

        while let Some(id) = pool.released.pop_front() {
            if pool.in_use.insert(id) {
                return id;
            }
        }

        let id = pool.in_use.last().map_or(1, |max| max + 1);
        pool.in_use.insert(id);
        id
    }

    pub fn release(&self, id: u32) -> BasaltResult<()> {
        let mut pool = self.pool();

        if !pool.in_use.remove(&id) {
            if self.policy == ReleasePolicy::Reject {
                return Err(BasaltError::handle(LineNumber::UNASSIGNED, id, "was released while it was not in use"));
            }

            log::debug!("Id {id} was released while it was not in use");
        }

        if !pool.released.contains(&id) {
            pool.released.push_back(id);
        }

        Ok(())
    }

    /// Marks an id chosen by the caller as in use. Returns `false` when it
    /// already was.
    pub fn claim(&self, id: u32) -> bool {
        let mut pool = self.pool();

        if !pool.in_use.insert(id) {
            return false;
        }

        pool.released.retain(|released| *released != id);
        true
    }

    #[must_use]
    pub fn is_in_use(&self, id: u32) -> bool {
        self.pool().in_use.contains(&id)
    }

    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.pool().in_use.len()
    }

    pub fn reset(&self) {
        *self.pool() = IdPool::default();
    }
}
