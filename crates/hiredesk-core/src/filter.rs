//! Client-side narrowing of the candidate list: state chips and text search.

use crate::candidate::{Candidate, CandidateState};

/// The state chip currently selected above the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
  #[default]
  All,
  Only(CandidateState),
}

impl StateFilter {
  pub fn accepts(self, state: CandidateState) -> bool {
    match self {
      Self::All => true,
      Self::Only(s) => s == state,
    }
  }

  /// The chips in display order: `All`, then every state.
  pub fn chips() -> Vec<Self> {
    std::iter::once(Self::All)
      .chain(CandidateState::all().map(Self::Only))
      .collect()
  }

  /// The chip to the right, wrapping back to `All`.
  pub fn next(self) -> Self {
    let chips = Self::chips();
    let i = chips.iter().position(|c| *c == self).unwrap_or(0);
    chips[(i + 1) % chips.len()]
  }

  /// The chip to the left, wrapping to the last state.
  pub fn prev(self) -> Self {
    let chips = Self::chips();
    let i = chips.iter().position(|c| *c == self).unwrap_or(0);
    chips[(i + chips.len() - 1) % chips.len()]
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::All => "All",
      Self::Only(s) => s.label(),
    }
  }
}

/// Search text plus state chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateQuery {
  pub search: String,
  pub state:  StateFilter,
}

impl CandidateQuery {
  /// Case-insensitive substring match on first name, last name or email,
  /// combined with the state chip.
  pub fn matches(&self, candidate: &Candidate) -> bool {
    let needle = self.search.to_lowercase();
    let matches_search = [
      &candidate.first_name,
      &candidate.last_name,
      &candidate.email,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle));

    matches_search && self.state.accepts(candidate.state)
  }

  pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    candidates.iter().filter(|c| self.matches(c)).collect()
  }

  pub fn is_active(&self) -> bool {
    !self.search.is_empty() || self.state != StateFilter::All
  }

  pub fn clear(&mut self) {
    self.search.clear();
    self.state = StateFilter::All;
  }
}
