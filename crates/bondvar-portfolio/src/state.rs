//! Compute-once cache for the combined table.

use bondvar_core::CombinedTable;

/// The combined table, either not yet built or built and cached.
///
/// The cache is never refreshed implicitly. Changing instrument data
/// requires an explicit [`ComputedState::invalidate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ComputedState {
    /// Not built yet (or invalidated).
    #[default]
    Uncomputed,
    /// Built table.
    Ready(CombinedTable),
}

impl ComputedState {
    /// Returns true if a table is cached.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The cached table, if any.
    pub fn get(&self) -> Option<&CombinedTable> {
        match self {
            Self::Ready(table) => Some(table),
            Self::Uncomputed => None,
        }
    }

    /// Returns the cached table, building it with `build` first if needed.
    pub fn get_or_try_init<E>(
        &mut self,
        build: impl FnOnce() -> Result<CombinedTable, E>,
    ) -> Result<&mut CombinedTable, E> {
        if let Self::Uncomputed = self {
            *self = Self::Ready(build()?);
        }
        match self {
            Self::Ready(table) => Ok(table),
            Self::Uncomputed => unreachable!("state was initialized above"),
        }
    }

    /// Drops the cached table. Returns true if one was cached.
    pub fn invalidate(&mut self) -> bool {
        std::mem::take(self).is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondvar_core::{CoreError, MissingPolicy};

    fn empty_table() -> CombinedTable {
        CombinedTable::new(vec![], vec![], MissingPolicy::Propagate).unwrap()
    }

    #[test]
    fn test_builds_once() {
        let mut state = ComputedState::default();
        assert!(state.get().is_none());

        let mut builds = 0;
        for _ in 0..3 {
            state
                .get_or_try_init(|| {
                    builds += 1;
                    Ok::<_, CoreError>(empty_table())
                })
                .unwrap();
        }
        assert_eq!(builds, 1);
        assert!(state.is_ready());
    }

    #[test]
    fn test_failed_build_stays_uncomputed() {
        let mut state = ComputedState::default();
        let result = state.get_or_try_init(|| Err(CoreError::invalid_date("x")));
        assert!(result.is_err());
        assert!(!state.is_ready());
    }

    #[test]
    fn test_invalidate() {
        let mut state = ComputedState::Ready(empty_table());
        assert!(state.invalidate());
        assert!(!state.is_ready());
        assert!(!state.invalidate());
    }
}
