//! Stages of the reading and the transitions allowed between them.

use std::ops::{Index, IndexMut};

/// One screen of the game. Exactly one is current at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Title,
    Outside,
    Intro,
    Spread,
    Loading,
    ReadingIntro,
    ReadingCard1,
    ReadingCard2,
    ReadingCard3,
    ReadingSummary,
}

impl Stage {
    pub const COUNT: usize = 10;

    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::Title,
        Stage::Outside,
        Stage::Intro,
        Stage::Spread,
        Stage::Loading,
        Stage::ReadingIntro,
        Stage::ReadingCard1,
        Stage::ReadingCard2,
        Stage::ReadingCard3,
        Stage::ReadingSummary,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Position of this stage's paragraph in the fortune, for reading stages.
    pub fn reading_index(self) -> Option<usize> {
        match self {
            Stage::ReadingIntro => Some(0),
            Stage::ReadingCard1 => Some(1),
            Stage::ReadingCard2 => Some(2),
            Stage::ReadingCard3 => Some(3),
            Stage::ReadingSummary => Some(4),
            _ => None,
        }
    }

    /// Which drawn card a card stage shows (0-based).
    pub fn card_slot(self) -> Option<usize> {
        match self {
            Stage::ReadingCard1 => Some(0),
            Stage::ReadingCard2 => Some(1),
            Stage::ReadingCard3 => Some(2),
            _ => None,
        }
    }

    pub fn is_reading(self) -> bool {
        self.reading_index().is_some()
    }

    /// Following stage when the player presses "next".
    pub fn next_reading(self) -> Option<Stage> {
        match self {
            Stage::ReadingIntro => Some(Stage::ReadingCard1),
            Stage::ReadingCard1 => Some(Stage::ReadingCard2),
            Stage::ReadingCard2 => Some(Stage::ReadingCard3),
            Stage::ReadingCard3 => Some(Stage::ReadingSummary),
            _ => None,
        }
    }

    /// Preceding stage when the player presses "previous".
    pub fn previous_reading(self) -> Option<Stage> {
        match self {
            Stage::ReadingCard2 => Some(Stage::ReadingCard1),
            Stage::ReadingCard3 => Some(Stage::ReadingCard2),
            Stage::ReadingSummary => Some(Stage::ReadingCard3),
            _ => None,
        }
    }

    /// Whether the edge `self -> to` exists in the stage graph.
    pub fn can_transition_to(self, to: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, to),
            (Title, Outside)
                | (Outside, Intro)
                | (Intro, Spread)
                | (Spread, Spread)
                | (Spread, Loading)
                | (Loading, ReadingIntro)
                | (ReadingSummary, Intro)
                | (ReadingSummary, Outside)
        ) || self.next_reading() == Some(to)
            || self.previous_reading() == Some(to)
    }
}

/// Fixed-size table with one entry per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTable<T>([T; Stage::COUNT]);

impl<T: Copy> StageTable<T> {
    pub fn filled(value: T) -> Self {
        Self([value; Stage::COUNT])
    }

    pub fn fill(&mut self, value: T) {
        self.0 = [value; Stage::COUNT];
    }
}

impl<T> Index<Stage> for StageTable<T> {
    type Output = T;

    fn index(&self, stage: Stage) -> &T {
        &self.0[stage.index()]
    }
}

impl<T> IndexMut<Stage> for StageTable<T> {
    fn index_mut(&mut self, stage: Stage) -> &mut T {
        &mut self.0[stage.index()]
    }
}

/// Which stages have been shown this reading. One-time sounds (the
/// typewriter click) only play on a first visit.
pub type VisitedStages = StageTable<bool>;

impl Default for VisitedStages {
    fn default() -> Self {
        Self::filled(false)
    }
}

impl VisitedStages {
    pub fn mark(&mut self, stage: Stage) {
        self[stage] = true;
    }

    pub fn is_visited(&self, stage: Stage) -> bool {
        self[stage]
    }

    pub fn clear(&mut self) {
        self.fill(false);
    }

    pub fn none_visited(&self) -> bool {
        Stage::ALL.iter().all(|s| !self[*s])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_stages_in_index_order() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn forward_path_never_skips_a_stage() {
        let path = [
            Stage::Title,
            Stage::Outside,
            Stage::Intro,
            Stage::Spread,
            Stage::Loading,
            Stage::ReadingIntro,
            Stage::ReadingCard1,
            Stage::ReadingCard2,
            Stage::ReadingCard3,
            Stage::ReadingSummary,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
        // No forward edge jumps more than one step down the path.
        for (i, from) in path.iter().enumerate() {
            for to in &path[(i + 2).min(path.len())..] {
                assert!(!from.can_transition_to(*to), "{:?} skips to {:?}", from, to);
            }
        }
    }

    #[test]
    fn backward_edges_match_the_graph() {
        assert!(Stage::ReadingCard2.can_transition_to(Stage::ReadingCard1));
        assert!(Stage::ReadingCard3.can_transition_to(Stage::ReadingCard2));
        assert!(Stage::ReadingSummary.can_transition_to(Stage::ReadingCard3));
        assert!(!Stage::ReadingCard1.can_transition_to(Stage::ReadingIntro));
        assert!(!Stage::Loading.can_transition_to(Stage::Spread));
        assert!(!Stage::Outside.can_transition_to(Stage::Title));
    }

    #[test]
    fn summary_can_restart_or_leave() {
        assert!(Stage::ReadingSummary.can_transition_to(Stage::Intro));
        assert!(Stage::ReadingSummary.can_transition_to(Stage::Outside));
        assert!(!Stage::ReadingCard3.can_transition_to(Stage::Intro));
    }

    #[test]
    fn no_stage_is_reachable_from_every_other() {
        for target in Stage::ALL {
            let sources = Stage::ALL
                .iter()
                .filter(|s| **s != target && s.can_transition_to(target))
                .count();
            assert!(sources < Stage::COUNT - 1, "{:?}", target);
        }
    }

    #[test]
    fn reading_indices_cover_the_fortune() {
        let indices: Vec<usize> = Stage::ALL.iter().filter_map(|s| s.reading_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn visited_table_marks_and_clears() {
        let mut visited = VisitedStages::default();
        assert!(visited.none_visited());
        visited.mark(Stage::ReadingCard2);
        assert!(visited.is_visited(Stage::ReadingCard2));
        assert!(!visited.is_visited(Stage::ReadingCard1));
        visited.clear();
        assert!(visited.none_visited());
    }
}
