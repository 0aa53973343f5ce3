//! Classic B3/S23 transition rule

use super::cell::CellState;

/// Outcome of applying the rule to one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Birth,
    Survival,
    Death,
    StaysDead,
}

impl Transition {
    pub fn next_state(self) -> CellState {
        match self {
            Transition::Birth | Transition::Survival => CellState::Alive,
            Transition::Death | Transition::StaysDead => CellState::Dead,
        }
    }

    /// Change this transition makes to the alive count
    pub fn alive_delta(self) -> isize {
        match self {
            Transition::Birth => 1,
            Transition::Death => -1,
            Transition::Survival | Transition::StaysDead => 0,
        }
    }
}

/// Conway's Game of Life rules
pub struct LifeRules;

impl LifeRules {
    /// Decide what happens to a cell given its current state and alive neighbor count
    pub fn transition(current: CellState, neighbor_count: u8) -> Transition {
        match (current, neighbor_count) {
            (CellState::Alive, 2) | (CellState::Alive, 3) => Transition::Survival,
            (CellState::Alive, _) => Transition::Death,
            (CellState::Dead, 3) => Transition::Birth,
            (CellState::Dead, _) => Transition::StaysDead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        use CellState::*;
        assert_eq!(LifeRules::transition(Alive, 0), Transition::Death);
        assert_eq!(LifeRules::transition(Alive, 1), Transition::Death);
        assert_eq!(LifeRules::transition(Alive, 2), Transition::Survival);
        assert_eq!(LifeRules::transition(Alive, 3), Transition::Survival);
        assert_eq!(LifeRules::transition(Alive, 4), Transition::Death);
        assert_eq!(LifeRules::transition(Alive, 8), Transition::Death);
        assert_eq!(LifeRules::transition(Dead, 3), Transition::Birth);
        assert_eq!(LifeRules::transition(Dead, 2), Transition::StaysDead);
        assert_eq!(LifeRules::transition(Dead, 4), Transition::StaysDead);
    }

    #[test]
    fn test_alive_delta() {
        assert_eq!(Transition::Birth.alive_delta(), 1);
        assert_eq!(Transition::Death.alive_delta(), -1);
        assert_eq!(Transition::Survival.alive_delta(), 0);
        assert_eq!(Transition::StaysDead.alive_delta(), 0);
    }
}
