//! Transition tables.
//!
//! A [`Dfa`] is four parallel tables indexed by state:
//!
//! - `row_map[state]` is the offset of the state's row in `transitions`.
//!   States with identical rows share one copy, so the flat table holds
//!   only distinct rows.
//! - `transitions[row + class]` is the successor state, or
//!   [`NO_TRANSITION`].
//! - `attributes[state]` carries [`Attributes`].
//! - `actions[state]` is the [`Action`] of an accepting state.
//!
//! Tables are produced by [`DfaBuilder`] and never mutated afterwards.
//! Rule declarations live in [`crate::dialect`].

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::action::Action;
use crate::char_class::CharClass;
use crate::lex_state::LexState;

/// Row entry for "no successor".
const NO_TRANSITION: u16 = u16::MAX;

type Row = [u16; CharClass::COUNT];

bitflags! {
    /// Per-state flags consulted by the scan loop.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Attributes: u8 {
        /// Reaching this state completes a match.
        const ACCEPTING = 1 << 0;
        /// Accepting with no outgoing edges: the match can be taken without
        /// reading another character. Derived by [`DfaBuilder::build`].
        const NO_LOOKAHEAD = 1 << 1;
    }
}

/// Index of a DFA state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u16);

impl StateId {
    /// The state with no edges that every builder starts with.
    pub const DEAD: StateId = StateId(0);

    /// Number of states a table can hold. The last `u16` is reserved for
    /// "no successor".
    pub const LIMIT: usize = NO_TRANSITION as usize;

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A [`DfaBuilder`] ran out of state ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StateOverflow;

impl std::fmt::Display for StateOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DFA state space exhausted: max is {} states", StateId::LIMIT)
    }
}

impl std::error::Error for StateOverflow {}

/// Frozen transition tables.
#[derive(Clone, Debug)]
pub struct Dfa {
    row_map: Vec<u32>,
    transitions: Vec<u16>,
    attributes: Vec<Attributes>,
    actions: Vec<Option<Action>>,
    starts: [StateId; LexState::COUNT],
}

impl Dfa {
    /// Entry state for a lexical state.
    #[inline]
    pub fn start(&self, state: LexState) -> StateId {
        self.starts[state.index()]
    }

    /// Successor of `state` on `class`.
    #[inline]
    pub fn next(&self, state: StateId, class: CharClass) -> Option<StateId> {
        let row = self.row_map[state.index()] as usize;
        match self.transitions[row + class.index()] {
            NO_TRANSITION => None,
            target => Some(StateId(target)),
        }
    }

    #[inline]
    pub fn attributes(&self, state: StateId) -> Attributes {
        self.attributes[state.index()]
    }

    /// Action of an accepting state.
    #[inline]
    pub fn action(&self, state: StateId) -> Option<Action> {
        self.actions[state.index()]
    }

    pub fn state_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of distinct rows after sharing.
    pub fn row_count(&self) -> usize {
        self.transitions.len() / CharClass::COUNT
    }
}

/// Incremental DFA construction.
///
/// States are created explicitly and wired with class edges. Declaring an
/// edge that already exists replaces it, so a broad edge can be declared
/// first and narrowed afterwards:
///
/// ```
/// use dmsql_lexer_core::{Action, CharClass, DfaBuilder, LexState};
///
/// let mut b = DfaBuilder::new();
/// let start = b.state();
/// let other = b.accepting(Action::Operator);
/// let quote = b.accepting(Action::BeginString);
/// b.edge_except(start, &[], other).edge(start, &[CharClass::Quote], quote);
/// b.start(LexState::Initial, start);
///
/// let dfa = b.build();
/// assert_eq!(dfa.next(dfa.start(LexState::Initial), CharClass::Quote), Some(quote));
/// ```
#[derive(Clone, Debug)]
pub struct DfaBuilder {
    rows: Vec<Row>,
    accepting: Vec<Option<Action>>,
    starts: [StateId; LexState::COUNT],
}

impl Default for DfaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DfaBuilder {
    /// Builder holding only [`StateId::DEAD`]. Lexical states without a
    /// declared start enter the dead state, where every character fails to
    /// match.
    pub fn new() -> Self {
        DfaBuilder {
            rows: vec![[NO_TRANSITION; CharClass::COUNT]],
            accepting: vec![None],
            starts: [StateId::DEAD; LexState::COUNT],
        }
    }

    /// New non-accepting state.
    ///
    /// # Panics
    /// Panics if the builder already holds [`StateId::LIMIT`] states.
    /// Use `try_state` for fallible allocation.
    pub fn state(&mut self) -> StateId {
        self.try_state().unwrap_or_else(|e| panic!("{e}"))
    }

    /// New accepting state that completes a match with `action`.
    ///
    /// # Panics
    /// Panics if the builder already holds [`StateId::LIMIT`] states.
    /// Use `try_accepting` for fallible allocation.
    pub fn accepting(&mut self, action: Action) -> StateId {
        self.try_accepting(action).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_state(&mut self) -> Result<StateId, StateOverflow> {
        self.push(None)
    }

    pub fn try_accepting(&mut self, action: Action) -> Result<StateId, StateOverflow> {
        self.push(Some(action))
    }

    fn push(&mut self, action: Option<Action>) -> Result<StateId, StateOverflow> {
        let id = u16::try_from(self.rows.len())
            .ok()
            .filter(|&id| usize::from(id) < StateId::LIMIT)
            .ok_or(StateOverflow)?;
        self.rows.push([NO_TRANSITION; CharClass::COUNT]);
        self.accepting.push(action);
        Ok(StateId(id))
    }

    /// Edges from `from` to `to` on each of `classes`.
    pub fn edge(&mut self, from: StateId, classes: &[CharClass], to: StateId) -> &mut Self {
        let row = &mut self.rows[from.index()];
        for class in classes {
            row[class.index()] = to.0;
        }
        self
    }

    /// Edges from `from` to `to` on every class not in `excluded`.
    pub fn edge_except(
        &mut self,
        from: StateId,
        excluded: &[CharClass],
        to: StateId,
    ) -> &mut Self {
        let row = &mut self.rows[from.index()];
        for class in CharClass::ALL {
            if !excluded.contains(&class) {
                row[class.index()] = to.0;
            }
        }
        self
    }

    /// Entry state of `lex_state`.
    pub fn start(&mut self, lex_state: LexState, state: StateId) -> &mut Self {
        self.starts[lex_state.index()] = state;
        self
    }

    /// Freeze into a [`Dfa`], sharing identical rows.
    pub fn build(self) -> Dfa {
        let mut shared: FxHashMap<Row, u32> = FxHashMap::default();
        let mut transitions = Vec::new();
        let mut row_map = Vec::with_capacity(self.rows.len());
        let mut attributes = Vec::with_capacity(self.rows.len());

        for (row, action) in self.rows.iter().zip(&self.accepting) {
            let offset = *shared.entry(*row).or_insert_with(|| {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "at most StateId::LIMIT rows of CharClass::COUNT entries"
                )]
                let offset = transitions.len() as u32;
                transitions.extend_from_slice(row);
                offset
            });
            row_map.push(offset);

            let mut attrs = Attributes::empty();
            if action.is_some() {
                attrs |= Attributes::ACCEPTING;
                if row.iter().all(|&t| t == NO_TRANSITION) {
                    attrs |= Attributes::NO_LOOKAHEAD;
                }
            }
            attributes.push(attrs);
        }

        Dfa {
            row_map,
            transitions,
            attributes,
            actions: self.accepting,
            starts: self.starts,
        }
    }
}
