//! Table layer of the DM SQL scanner.
//!
//! This crate owns everything that is fixed at build time: the character
//! class map, the lexical states, the actions attached to accepting DFA
//! states, and the transition tables themselves. It performs no I/O and
//! keeps no per-scan state, so the tables can be shared by any number of
//! scanners.
//!
//! The streaming driver lives in `dmsql_lexer`.
//!
//! # Layers
//!
//! - [`classify`] maps a character to one of [`CharClass::COUNT`] classes.
//! - [`DfaBuilder`] wires states and class edges; [`Dfa`] is the frozen,
//!   row-shared table the scan loop walks.
//! - [`dialect`] declares the DM SQL rule set on top of the builder.
//! - [`Action`] tells the driver what a completed match means.

mod action;
mod char_class;
mod dfa;
mod dialect;
mod lex_state;
mod token;

pub use action::{Action, ActionClass};
pub use char_class::{classify, closer_for, is_quote_delimiter, CharClass};
pub use dfa::{Attributes, Dfa, DfaBuilder, StateId, StateOverflow};
pub use dialect::dialect;
pub use lex_state::{ConstructKind, LexState};
pub use token::{Token, TokenKind};
