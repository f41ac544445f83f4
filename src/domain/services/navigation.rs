use crate::domain::model::{Lot, LotId};

/// Neighbours of a lot within the active-lot ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation<'a> {
    pub prev: Option<&'a Lot>,
    pub next: Option<&'a Lot>,
}

impl Navigation<'_> {
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Finds `target` in `active` (ordered by id) and returns its siblings.
/// A target outside the list gets no neighbours.
pub fn neighbors(active: &[Lot], target: LotId) -> Navigation<'_> {
    let Some(index) = active.iter().position(|lot| lot.id == target) else {
        return Navigation::default();
    };

    Navigation {
        prev: index.checked_sub(1).map(|i| &active[i]),
        next: active.get(index + 1),
    }
}
