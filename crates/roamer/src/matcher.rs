//! Suggestion Matching
//!
//! Resolves free text typed into an auto-suggest box to exactly one live
//! suggestion and clicks it.
//!
//! ## Matching rule
//!
//! Target and labels are trimmed and lower-cased. Scanning in display order:
//!
//! - a label equal to the target wins at once and ends the scan;
//! - otherwise every label that starts with or contains the target is a
//!   fuzzy match, and the shortest one wins (first seen on ties).
//!
//! The suggestion list may re-render while it is being read. Reads that hit
//! a stale view are re-issued, and a candidate that goes stale between the
//! pick and the click sends the matcher back to re-query, all under one
//! deadline.

use crate::clock::{SharedClock, SystemClock};
use crate::result::{RoamerError, RoamerResult};
use crate::stale::retry_on_stale;
use crate::wait::{wait_for, Deadline, WaitOptions};
use crate::widget::{Candidate, SuggestionSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How candidates are compared with the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Exact match, else the shortest starts-with/contains match
    #[default]
    ExactOrShortestFuzzy,
    /// Case-insensitive equality only
    ExactOnly,
}

/// What to do when no candidate matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchPolicy {
    /// Raise `NoMatchFound`
    #[default]
    Fail,
    /// Select the first candidate in the list, if any
    FirstAvailable,
}

/// Why a candidate was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized label equals the target
    Exact,
    /// Label starts with or contains the target
    Fuzzy,
    /// Nothing matched; chosen by [`NoMatchPolicy::FirstAvailable`]
    Fallback,
}

/// The chosen candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchChoice {
    /// Position in the candidate list
    pub index: usize,
    /// Label as displayed (trimmed)
    pub label: String,
    /// Why it was chosen
    pub kind: MatchKind,
}

/// Normalized target text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    normalized: String,
}

impl MatchQuery {
    /// Normalize `target` for comparison
    #[must_use]
    pub fn new(target: &str) -> Self {
        Self {
            normalized: normalize(target),
        }
    }

    /// Normalized text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Whether nothing is left after trimming
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Trim and lower-case a label
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Pick the best label for `query` without side effects.
///
/// Returns `None` when nothing matches; no fallback policy is applied here.
pub fn best_match<'a, I>(query: &MatchQuery, labels: I, strategy: MatchStrategy) -> Option<MatchChoice>
where
    I: IntoIterator<Item = &'a str>,
{
    let target = query.as_str();
    let mut best: Option<(usize, usize, &'a str)> = None;

    for (index, raw) in labels.into_iter().enumerate() {
        let label = normalize(raw);
        if label == target {
            return Some(MatchChoice {
                index,
                label: raw.trim().to_string(),
                kind: MatchKind::Exact,
            });
        }

        if strategy == MatchStrategy::ExactOnly {
            continue;
        }

        // covers starts-with as well
        if label.contains(target) {
            let len = label.chars().count();
            if best.map_or(true, |(_, best_len, _)| len < best_len) {
                best = Some((index, len, raw));
            }
        }
    }

    best.map(|(index, _, raw)| MatchChoice {
        index,
        label: raw.trim().to_string(),
        kind: MatchKind::Fuzzy,
    })
}

/// Matcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Overall deadline and poll interval for one match
    #[serde(default)]
    pub wait: WaitOptions,
    /// Comparison rule
    #[serde(default)]
    pub strategy: MatchStrategy,
    /// Behaviour when nothing matches
    #[serde(default)]
    pub no_match: NoMatchPolicy,
}

impl MatcherConfig {
    /// Create default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.wait.timeout_ms = timeout_ms;
        self
    }

    /// Set the comparison rule
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the no-match policy
    #[must_use]
    pub const fn with_no_match(mut self, policy: NoMatchPolicy) -> Self {
        self.no_match = policy;
        self
    }
}

/// Outcome of a committed match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The candidate that was selected
    pub choice: MatchChoice,
    /// Candidate queries issued (more than one after a stale commit)
    pub attempts: usize,
}

/// Picks and clicks the best suggestion for a target text
#[derive(Debug, Clone)]
pub struct SuggestionMatcher {
    config: MatcherConfig,
    clock: SharedClock,
}

impl Default for SuggestionMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl SuggestionMatcher {
    /// Create a matcher on the system clock
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        Self::with_clock(config, SystemClock::shared())
    }

    /// Create a matcher on an explicit clock
    #[must_use]
    pub fn with_clock(config: MatcherConfig, clock: SharedClock) -> Self {
        Self { config, clock }
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Resolve `target` against `source` and select the winner.
    ///
    /// Fails with `NoMatchFound` (nothing selected) when no candidate
    /// matches and the policy is [`NoMatchPolicy::Fail`], and with `Timeout`
    /// when no stable, clickable candidate is reached before the deadline.
    pub fn match_and_select<S>(&self, target: &str, source: &mut S) -> RoamerResult<MatchOutcome>
    where
        S: SuggestionSource,
    {
        let query = MatchQuery::new(target);
        if query.is_empty() {
            return Err(RoamerError::NoMatchFound {
                target: String::new(),
            });
        }

        let deadline = Deadline::new(self.clock.as_ref(), self.config.wait.timeout());
        let mut attempts = 0;

        loop {
            attempts += 1;
            let candidates = retry_on_stale(&deadline, "suggestions", || source.candidates())?;
            debug!(
                query = query.as_str(),
                count = candidates.len(),
                attempts,
                "scanning suggestions"
            );

            let Some(choice) = self.choose(&query, &candidates) else {
                return Err(RoamerError::NoMatchFound {
                    target: query.as_str().to_string(),
                });
            };
            if choice.kind == MatchKind::Fallback {
                warn!(
                    query = query.as_str(),
                    label = %choice.label,
                    "no suggestion matched, taking the first one"
                );
            }

            let handle = candidates[choice.index].handle.clone();
            match self.commit(&deadline, source, &handle) {
                Ok(()) => {
                    info!(
                        query = query.as_str(),
                        label = %choice.label,
                        kind = ?choice.kind,
                        "suggestion selected"
                    );
                    return Ok(MatchOutcome { choice, attempts });
                }
                Err(err) if err.is_stale() => {
                    if deadline.expired() {
                        return Err(deadline.timeout_error());
                    }
                    warn!(label = %choice.label, "suggestion went stale before click, re-querying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn choose<H>(&self, query: &MatchQuery, candidates: &[Candidate<H>]) -> Option<MatchChoice> {
        best_match(
            query,
            candidates.iter().map(|c| c.label.as_str()),
            self.config.strategy,
        )
        .or_else(|| match self.config.no_match {
            NoMatchPolicy::Fail => None,
            NoMatchPolicy::FirstAvailable => candidates.first().map(|c| MatchChoice {
                index: 0,
                label: c.label.trim().to_string(),
                kind: MatchKind::Fallback,
            }),
        })
    }

    fn commit<S>(&self, deadline: &Deadline<'_>, source: &mut S, handle: &S::Handle) -> RoamerResult<()>
    where
        S: SuggestionSource,
    {
        source.scroll_into_view(handle)?;
        wait_for(deadline, self.config.wait.poll_interval(), || {
            source.is_interactable(handle)
        })?;
        source.select(handle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Scripted suggestion list. Handles are indexes into the served labels,
    /// tagged with the render generation that produced them.
    #[derive(Debug)]
    struct ScriptedList {
        renders: VecDeque<Vec<&'static str>>,
        current: Vec<&'static str>,
        generation: usize,
        stale_reads: usize,
        stale_selects: usize,
        busy_checks: usize,
        clock: Option<Arc<FakeClock>>,
        selected: Vec<String>,
        scrolled: usize,
    }

    impl ScriptedList {
        fn new(labels: Vec<&'static str>) -> Self {
            Self {
                renders: VecDeque::new(),
                current: labels,
                generation: 0,
                stale_reads: 0,
                stale_selects: 0,
                busy_checks: 0,
                clock: None,
                selected: Vec::new(),
                scrolled: 0,
            }
        }

        fn then_render(mut self, labels: Vec<&'static str>) -> Self {
            self.renders.push_back(labels);
            self
        }
    }

    impl SuggestionSource for ScriptedList {
        type Handle = (usize, usize);

        fn candidates(&mut self) -> RoamerResult<Vec<Candidate<(usize, usize)>>> {
            if let Some(clock) = &self.clock {
                clock.advance_ms(100);
            }
            if self.stale_reads > 0 {
                self.stale_reads -= 1;
                return Err(RoamerError::stale("suggestion list re-rendered"));
            }
            Ok(self
                .current
                .iter()
                .enumerate()
                .map(|(i, l)| Candidate::new(*l, (self.generation, i)))
                .collect())
        }

        fn scroll_into_view(&mut self, _handle: &(usize, usize)) -> RoamerResult<()> {
            self.scrolled += 1;
            Ok(())
        }

        fn is_interactable(&mut self, _handle: &(usize, usize)) -> RoamerResult<bool> {
            if self.busy_checks > 0 {
                self.busy_checks -= 1;
                return Ok(false);
            }
            Ok(true)
        }

        fn select(&mut self, handle: &(usize, usize)) -> RoamerResult<()> {
            if self.stale_selects > 0 {
                self.stale_selects -= 1;
                if let Some(next) = self.renders.pop_front() {
                    self.current = next;
                    self.generation += 1;
                }
                return Err(RoamerError::stale("suggestion detached"));
            }
            assert_eq!(handle.0, self.generation, "clicked a handle from an old render");
            self.selected.push(self.current[handle.1].to_string());
            Ok(())
        }
    }

    fn matcher(config: MatcherConfig) -> (SuggestionMatcher, Arc<FakeClock>) {
        let clock = FakeClock::shared();
        (SuggestionMatcher::with_clock(config, clock.clone()), clock)
    }

    mod best_match_tests {
        use super::*;

        fn pick(target: &str, labels: &[&str]) -> Option<MatchChoice> {
            best_match(
                &MatchQuery::new(target),
                labels.iter().copied(),
                MatchStrategy::ExactOrShortestFuzzy,
            )
        }

        #[test]
        fn test_exact_match_wins_over_shorter_fuzzy() {
            let choice = pick("Goa", &["Goa Airport", "goa", "Goa"]).unwrap();
            assert_eq!(choice.index, 1);
            assert_eq!(choice.kind, MatchKind::Exact);
        }

        #[test]
        fn test_exact_match_is_trimmed_and_case_folded() {
            let choice = pick("  MUMBAI ", &["Navi Mumbai", " mumbai  "]).unwrap();
            assert_eq!(choice.index, 1);
            assert_eq!(choice.label, "mumbai");
        }

        #[test]
        fn test_shortest_fuzzy_match() {
            let choice = pick(
                "delhi",
                &["New Delhi Railway Station", "Delhi Airport T3", "New Delhi"],
            )
            .unwrap();
            assert_eq!(choice.index, 2);
            assert_eq!(choice.kind, MatchKind::Fuzzy);
        }

        #[test]
        fn test_fuzzy_tie_goes_to_first_seen() {
            let choice = pick("pun", &["Pune City", "Punjab", "Pune"]).unwrap();
            assert_eq!(choice.index, 2);

            let choice = pick("ne", &["Pune", "Nepa"]).unwrap();
            assert_eq!(choice.index, 0);
        }

        #[test]
        fn test_contains_counts_as_fuzzy() {
            let choice = pick("bai", &["Mumbai"]).unwrap();
            assert_eq!(choice.kind, MatchKind::Fuzzy);
        }

        #[test]
        fn test_no_match() {
            assert!(pick("Shimla", &["Goa", "Pune"]).is_none());
            assert!(pick("Goa", &[]).is_none());
        }

        #[test]
        fn test_exact_only_ignores_fuzzy() {
            let query = MatchQuery::new("Bangalore");
            let labels = ["Bangalore Airport", "BANGALORE"];
            let choice = best_match(&query, labels, MatchStrategy::ExactOnly).unwrap();
            assert_eq!(choice.index, 1);

            let labels = ["Bangalore Airport"];
            assert!(best_match(&query, labels, MatchStrategy::ExactOnly).is_none());
        }
    }

    mod match_and_select_tests {
        use super::*;

        #[test]
        fn test_selects_exact_match() {
            let (m, _) = matcher(MatcherConfig::new());
            let mut list = ScriptedList::new(vec!["Chennai Airport", "Chennai", "Chennai Central"]);
            let outcome = m.match_and_select("chennai", &mut list).unwrap();
            assert_eq!(outcome.choice.kind, MatchKind::Exact);
            assert_eq!(outcome.attempts, 1);
            assert_eq!(list.selected, vec!["Chennai"]);
            assert_eq!(list.scrolled, 1);
        }

        #[test]
        fn test_no_match_selects_nothing() {
            let (m, _) = matcher(MatcherConfig::new());
            let mut list = ScriptedList::new(vec!["Goa", "Pune"]);
            let err = m.match_and_select("Shimla", &mut list).unwrap_err();
            assert!(matches!(err, RoamerError::NoMatchFound { ref target } if target == "shimla"));
            assert!(list.selected.is_empty());
            assert_eq!(list.scrolled, 0);
        }

        #[test]
        fn test_empty_target_is_no_match() {
            let (m, _) = matcher(MatcherConfig::new());
            let mut list = ScriptedList::new(vec!["Goa"]);
            let err = m.match_and_select("   ", &mut list).unwrap_err();
            assert!(matches!(err, RoamerError::NoMatchFound { .. }));
            assert!(list.selected.is_empty());
        }

        #[test]
        fn test_first_available_policy() {
            let (m, _) = matcher(MatcherConfig::new().with_no_match(NoMatchPolicy::FirstAvailable));
            let mut list = ScriptedList::new(vec!["Goa", "Pune"]);
            let outcome = m.match_and_select("Shimla", &mut list).unwrap();
            assert_eq!(outcome.choice.kind, MatchKind::Fallback);
            assert_eq!(list.selected, vec!["Goa"]);
        }

        #[test]
        fn test_first_available_on_empty_list_still_fails() {
            let (m, _) = matcher(MatcherConfig::new().with_no_match(NoMatchPolicy::FirstAvailable));
            let mut list = ScriptedList::new(vec![]);
            assert!(m.match_and_select("Goa", &mut list).is_err());
        }

        #[test]
        fn test_retries_stale_reads() {
            let (m, _) = matcher(MatcherConfig::new());
            let mut list = ScriptedList::new(vec!["Hyderabad"]);
            list.stale_reads = 3;
            let outcome = m.match_and_select("hyderabad", &mut list).unwrap();
            assert_eq!(outcome.attempts, 1);
            assert_eq!(list.selected, vec!["Hyderabad"]);
        }

        #[test]
        fn test_stale_reads_bounded_by_deadline() {
            let (m, clock) = matcher(MatcherConfig::new().with_timeout(1_000));
            let mut list = ScriptedList::new(vec!["Hyderabad"]);
            list.stale_reads = usize::MAX;
            list.clock = Some(clock.clone());
            let err = m.match_and_select("hyderabad", &mut list).unwrap_err();
            assert!(matches!(err, RoamerError::Timeout { ms: 1_000 }));
            assert!(list.selected.is_empty());
            assert_eq!(clock.now_ms(), 1_000);
        }

        #[test]
        fn test_requery_after_stale_select() {
            let (m, _) = matcher(MatcherConfig::new());
            let mut list = ScriptedList::new(vec!["Kochi Airport", "Kochi"])
                .then_render(vec!["Kochi", "Kochi Airport"]);
            list.stale_selects = 1;
            let outcome = m.match_and_select("Kochi", &mut list).unwrap();
            assert_eq!(outcome.attempts, 2);
            assert_eq!(outcome.choice.index, 0);
            assert_eq!(list.selected, vec!["Kochi"]);
        }

        #[test]
        fn test_waits_until_interactable() {
            let (m, clock) = matcher(MatcherConfig::new());
            let mut list = ScriptedList::new(vec!["Jaipur"]);
            list.busy_checks = 4;
            m.match_and_select("jaipur", &mut list).unwrap();
            assert_eq!(clock.now_ms(), 4 * crate::wait::DEFAULT_POLL_INTERVAL_MS);
            assert_eq!(list.selected, vec!["Jaipur"]);
        }

        #[test]
        fn test_never_interactable_times_out() {
            let (m, _) = matcher(MatcherConfig::new().with_timeout(200));
            let mut list = ScriptedList::new(vec!["Jaipur"]);
            list.busy_checks = usize::MAX;
            let err = m.match_and_select("jaipur", &mut list).unwrap_err();
            assert!(matches!(err, RoamerError::Timeout { ms: 200 }));
            assert!(list.selected.is_empty());
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn label() -> impl Strategy<Value = String> {
            "[a-zA-Z ]{1,14}"
        }

        proptest! {
            #[test]
            fn prop_exact_match_always_wins(
                labels in prop::collection::vec(label(), 0..12),
                target in "[a-z]{1,6}",
                pos in 0usize..12,
            ) {
                let mut labels = labels;
                let pos = pos.min(labels.len());
                labels.insert(pos, format!("  {}  ", target.to_uppercase()));

                let query = MatchQuery::new(&target);
                let choice = best_match(
                    &query,
                    labels.iter().map(String::as_str),
                    MatchStrategy::ExactOrShortestFuzzy,
                ).unwrap();

                let first_exact = labels.iter().position(|l| normalize(l) == target).unwrap();
                prop_assert_eq!(choice.kind, MatchKind::Exact);
                prop_assert_eq!(choice.index, first_exact);
            }

            #[test]
            fn prop_shortest_fuzzy_wins_first_seen_on_ties(
                labels in prop::collection::vec(label(), 0..12),
                target in "[a-z]{1,3}",
            ) {
                let labels: Vec<String> = labels
                    .into_iter()
                    .filter(|l| normalize(l) != target)
                    .collect();
                let query = MatchQuery::new(&target);
                let choice = best_match(
                    &query,
                    labels.iter().map(String::as_str),
                    MatchStrategy::ExactOrShortestFuzzy,
                );

                let mut expected: Option<(usize, usize)> = None;
                for (i, l) in labels.iter().enumerate() {
                    let n = normalize(l);
                    if n.contains(target.as_str()) {
                        let len = n.chars().count();
                        if expected.map_or(true, |(_, best)| len < best) {
                            expected = Some((i, len));
                        }
                    }
                }

                prop_assert_eq!(choice.as_ref().map(|c| c.index), expected.map(|(i, _)| i));
                if let Some(choice) = choice {
                    prop_assert_eq!(choice.kind, MatchKind::Fuzzy);
                }
            }

            #[test]
            fn prop_no_match_selects_nothing(
                labels in prop::collection::vec("[a-m]{1,8}", 0..8),
                target in "[n-z]{1,4}",
            ) {
                let (m, _) = matcher(MatcherConfig::new());
                let mut selected = 0;
                let mut source = crate::widget::FnSuggestions::new(
                    || Ok(labels.iter().enumerate().map(|(i, l)| Candidate::new(l.clone(), i)).collect()),
                    |_: &usize| {
                        selected += 1;
                        Ok(())
                    },
                );
                let result = m.match_and_select(&target, &mut source);
                prop_assert!(
                    matches!(result, Err(RoamerError::NoMatchFound { .. })),
                    "expected NoMatchFound, got {:?}",
                    result
                );
                drop(source);
                prop_assert_eq!(selected, 0);
            }
        }
    }
}
