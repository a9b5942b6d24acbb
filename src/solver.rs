//! Twin-race A* search.
//!
//! Two best-first searches advance in lockstep, one node each per round: one
//! from the initial board and one from its [`twin`](Board::twin). Exactly one
//! of the two can reach the goal, so whichever gets there first settles
//! solvability without an explicit parity check. The initial search is
//! stepped first, so it wins ties.

use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use crate::board::{Board, Move};
use crate::error::SolveError;

/// How often (in rounds) frontier sizes are traced.
const TRACE_INTERVAL: u64 = 10_000;

/// Ordering key used for the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    /// `moves + manhattan`, ties broken by insertion order.
    #[default]
    Manhattan,
    /// `moves + manhattan`, exact ties broken by the lower hamming score.
    ///
    /// Only the expansion order changes; solutions stay optimal.
    ManhattanThenHamming,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOptions {
    pub priority: Priority,
    /// Give up after this many rounds. `None` searches until a goal fires.
    pub max_rounds: Option<u64>,
}

/// Which of the two racing searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Initial,
    Twin,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Initial => write!(f, "initial"),
            SearchKind::Twin => write!(f, "twin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    GoalReached,
    /// The other search reached its goal first.
    Abandoned,
}

/// Work counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub rounds: u64,
    pub initial_expanded: u64,
    pub twin_expanded: u64,
    pub nodes_created: u64,
}

struct SearchNode {
    board: Board,
    parent: Option<usize>,
    moves: usize,
}

/// One best-first search. Nodes live in an arena and refer to their parent
/// by index.
struct Search {
    kind: SearchKind,
    priority: Priority,
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<Reverse<(usize, usize, usize)>>,
    state: SearchState,
    expanded: u64,
    created: u64,
}

impl Search {
    fn new(kind: SearchKind, root: Board, priority: Priority) -> Self {
        let mut search = Self {
            kind,
            priority,
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            state: SearchState::Running,
            expanded: 0,
            created: 0,
        };
        search.push(root, None, 0);
        search
    }

    fn push(&mut self, board: Board, parent: Option<usize>, moves: usize) {
        let index = self.nodes.len();
        let tie_break = match self.priority {
            Priority::Manhattan => 0,
            Priority::ManhattanThenHamming => board.hamming(),
        };
        self.frontier
            .push(Reverse((moves + board.manhattan(), tie_break, index)));
        self.nodes.push(SearchNode {
            board,
            parent,
            moves,
        });
        self.created += 1;
    }

    /// Pops the best node. Returns its index if it is the goal, otherwise
    /// expands it and returns `None`.
    fn step(&mut self, rounds: u64) -> Result<Option<usize>, SolveError> {
        let Reverse((_, _, index)) = self.frontier.pop().ok_or(SolveError::FrontierExhausted {
            search: self.kind,
            rounds,
        })?;

        let node = &self.nodes[index];
        if node.board.is_goal() {
            self.state = SearchState::GoalReached;
            return Ok(Some(index));
        }

        // Skip only the board we just came from.
        let previous = node.parent.map(|p| &self.nodes[p].board);
        let moves = node.moves + 1;
        let children: Vec<Board> = node
            .board
            .neighbors()
            .filter(|n| previous != Some(n))
            .collect();

        for child in children {
            self.push(child, Some(index), moves);
        }
        self.expanded += 1;
        Ok(None)
    }

    fn abandon(&mut self) {
        self.state = SearchState::Abandoned;
        self.frontier.clear();
        self.nodes.clear();
    }

    /// Boards from the root to `goal`, inclusive.
    fn path_to(&self, goal: usize) -> Vec<Board> {
        let mut path: Vec<Board> = std::iter::successors(Some(goal), |&i| self.nodes[i].parent)
            .map(|i| self.nodes[i].board.clone())
            .collect();
        path.reverse();
        path
    }
}

/// Result of racing a board against its twin.
///
/// The search runs to completion inside the constructor; every accessor is a
/// cheap read of the stored outcome.
#[derive(Debug, Clone)]
pub struct Solver {
    solution: Option<Vec<Board>>,
    stats: SearchStats,
}

impl Solver {
    pub fn new(initial: Board) -> Result<Self, SolveError> {
        Self::with_options(initial, SolverOptions::default())
    }

    pub fn with_options(initial: Board, options: SolverOptions) -> Result<Self, SolveError> {
        debug!(
            "solving {}x{} board (manhattan {}, hamming {}) with {:?}",
            initial.dimension(),
            initial.dimension(),
            initial.manhattan(),
            initial.hamming(),
            options
        );

        let twin_root = initial.twin();
        let mut real = Search::new(SearchKind::Initial, initial, options.priority);
        let mut twin = Search::new(SearchKind::Twin, twin_root, options.priority);
        let mut rounds = 0u64;

        let solution = loop {
            if let Some(limit) = options.max_rounds {
                if rounds >= limit {
                    debug!("round limit {} reached", limit);
                    return Err(SolveError::RoundLimitExceeded { limit });
                }
            }
            rounds += 1;

            if let Some(goal) = real.step(rounds)? {
                twin.abandon();
                break Some(real.path_to(goal));
            }
            if twin.step(rounds)?.is_some() {
                real.abandon();
                break None;
            }

            if rounds % TRACE_INTERVAL == 0 {
                trace!(
                    "round {}: frontier sizes {} / {}, nodes {} / {}",
                    rounds,
                    real.frontier.len(),
                    twin.frontier.len(),
                    real.nodes.len(),
                    twin.nodes.len()
                );
            }
        };

        let stats = SearchStats {
            rounds,
            initial_expanded: real.expanded,
            twin_expanded: twin.expanded,
            nodes_created: real.created + twin.created,
        };
        debug!(
            "finished after {} rounds: initial {:?}, twin {:?}, {} moves",
            rounds,
            real.state,
            twin.state,
            solution.as_ref().map_or(-1, |p: &Vec<Board>| p.len() as i64 - 1)
        );

        Ok(Self { solution, stats })
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of moves, or `None` if the board is unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// Boards from the initial one to the goal, inclusive.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// The solution as blank movements.
    pub fn moves_taken(&self) -> Option<Vec<Move>> {
        let path = self.solution.as_ref()?;
        path.windows(2)
            .map(|pair| pair[0].move_to(&pair[1]))
            .collect()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}
