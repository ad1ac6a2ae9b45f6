use std::fmt::Debug;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::alphabet::CharRange;
use crate::error::MachineError;

/// Index of a state. Ids are dense, start at zero and double as the position of the
/// state's row in both the state table and the transition table. Once assigned, an id is
/// never reused or renumbered.
pub type StateId = usize;

/// The universal failure sink. All of its outgoing transitions point back to itself and
/// it never becomes accepting; a traversal that enters it is guaranteed to fail.
pub const DROP_STATE: StateId = 0;
/// The root from which every traversal starts. It is not accepting, as the empty string
/// is not a legal key.
pub const INIT_STATE: StateId = 1;

/// A single row of the state table. The payload is present precisely when the state is
/// accepting, i.e. when some inserted key terminates here.
#[derive(Clone, Debug, PartialEq, Eq)]
struct State<V> {
    accept: bool,
    value: Option<V>,
}

impl<V> State<V> {
    fn rejecting() -> Self {
        Self {
            accept: false,
            value: None,
        }
    }
}

/// A deterministic finite automaton used as an associative container from strings over a
/// fixed [`CharRange`] to values of type `V`.
///
/// Unlike a pointer-based trie, states and transitions live in two flat, parallel tables:
/// a state table holding the accept flag and payload of each state, and a transition
/// table holding, for every state, one successor id per symbol of the range. Keys that
/// share a prefix share the states along that prefix, and looking up a key costs one
/// table access per character, without any hashing.
///
/// The structure only ever grows. Insertion appends states and rewires transitions but
/// never removes or renumbers anything; the only way to shrink is [`StateMachine::clear`],
/// which resets to the two reserved states.
///
/// # Example
/// ```
/// use automaton_map::prelude::*;
///
/// let mut machine = StateMachine::with_range(CharRange::new('a', 'z')?);
/// machine.insert("go", 1)?;
/// machine.insert("gone", 2)?;
/// assert_eq!(machine.get("go"), Some(&1));
/// assert_eq!(machine.get("gon"), None);
/// # Ok::<(), MachineError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct StateMachine<V> {
    range: CharRange,
    states: Vec<State<V>>,
    /// Flattened two-dimensional successor table; the entry for `(state, offset)` lives
    /// at `state * range.size() + offset`. Every state owns a full row.
    transitions: Vec<StateId>,
}

impl<V> Default for StateMachine<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StateMachine<V> {
    /// Creates a machine over the default full 7-bit range.
    pub fn new() -> Self {
        Self::with_range(CharRange::default())
    }

    /// Creates a machine over the given character range. The state table starts out with
    /// exactly the drop and init states, each owning a row of transitions that all point
    /// to the drop state.
    pub fn with_range(range: CharRange) -> Self {
        let mut machine = Self {
            range,
            states: Vec::new(),
            transitions: Vec::new(),
        };
        machine.init();
        machine
    }

    fn init(&mut self) {
        self.states.clear();
        self.transitions.clear();
        self.states.push(State::rejecting()); // drop state
        self.states.push(State::rejecting()); // init state
        self.transitions.extend(std::iter::repeat(DROP_STATE).take(2 * self.range.size()));
    }

    /// The character range this machine transitions on.
    pub fn range(&self) -> &CharRange {
        &self.range
    }

    /// Number of states in the state table, including the reserved drop and init states.
    /// Grows by one for every novel character position beyond the longest existing prefix
    /// of an inserted key.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    fn successor(&self, state: StateId, offset: usize) -> StateId {
        self.transitions[state * self.range.size() + offset]
    }

    /// Appends a fresh, non-accepting state whose transitions all point to the drop
    /// state and returns its id.
    fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::rejecting());
        self.transitions
            .extend(std::iter::repeat(DROP_STATE).take(self.range.size()));
        trace!("sprouted state {id}");
        id
    }

    /// Inserts `value` under `key`, returning the payload the key was previously mapped
    /// to, if any.
    ///
    /// The insertion walks from the init state along existing transitions for as long as
    /// possible, finding the longest prefix of `key` that is already present. If the
    /// whole key is consumed this way, the reached state is marked accepting and its
    /// payload replaced in place. Otherwise one fresh state is appended per remaining
    /// character and the last of them becomes accepting.
    ///
    /// Every character is validated against the range before anything is mutated, so a
    /// failing insert leaves the machine exactly as it was. The empty string is rejected
    /// with [`MachineError::EmptyKey`].
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, MachineError> {
        if key.is_empty() {
            return Err(MachineError::EmptyKey);
        }
        let offsets: Vec<usize> = key
            .chars()
            .map(|symbol| self.range.offset(symbol))
            .collect::<Result<_, _>>()?;

        // longest existing prefix walk
        let mut current = INIT_STATE;
        let mut consumed = 0;
        while consumed < offsets.len() {
            let next = self.successor(current, offsets[consumed]);
            if next == DROP_STATE {
                break;
            }
            current = next;
            consumed += 1;
        }
        trace!(
            "insertion walk for {key:?} consumed {consumed} of {} symbols, ending in state {current}",
            offsets.len()
        );

        if consumed == offsets.len() {
            let state = &mut self.states[current];
            let previous = state.value.take();
            state.accept = true;
            state.value = Some(value);
            return Ok(previous);
        }

        debug!(
            "extending branch of {} states below state {current}",
            offsets.len() - consumed
        );
        for &offset in &offsets[consumed..] {
            let next = self.add_state();
            self.transitions[current * self.range.size() + offset] = next;
            current = next;
        }
        let state = &mut self.states[current];
        state.accept = true;
        state.value = Some(value);
        Ok(None)
    }

    /// Runs the machine on `key` and returns the reached state, or `None` if the drop
    /// state is entered or a character lies outside the range. A symbol outside the
    /// range can never be part of a stored key, so treating it as a failed run is exact.
    fn run(&self, key: &str) -> Option<StateId> {
        let mut current = INIT_STATE;
        for symbol in key.chars() {
            let offset = self.range.offset(symbol).ok()?;
            current = self.successor(current, offset);
            if current == DROP_STATE {
                return None;
            }
        }
        Some(current)
    }

    /// Returns a reference to the payload stored under `key`, or `None` if the key is
    /// absent. Costs one transition-table access per character of `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let state = &self.states[self.run(key)?];
        if state.accept {
            state.value.as_ref()
        } else {
            None
        }
    }

    /// Returns true if `key` has been inserted. This tests whether the run for `key`
    /// ends in an accepting state and is independent of the stored payload.
    pub fn contains_key(&self, key: &str) -> bool {
        self.run(key)
            .is_some_and(|state| self.states[state].accept)
    }

    /// Returns true if some key is mapped to a payload equal to `target`. This is a
    /// heavy operation: it scans the entire state table.
    pub fn contains_value(&self, target: &V) -> bool
    where
        V: PartialEq,
    {
        self.states
            .iter()
            .any(|state| state.accept && state.value.as_ref() == Some(target))
    }

    /// Number of keys stored in the machine, i.e. the number of accepting states. This
    /// is a heavy operation: the count is not cached and requires a scan of the state
    /// table.
    pub fn len(&self) -> usize {
        self.states.iter().filter(|state| state.accept).count()
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        !self.states.iter().any(|state| state.accept)
    }

    /// Collects the payload of every accepting state, in state-id order (which is the
    /// order in which the terminal states of the keys were created, not lexicographic
    /// key order). Returns a fresh snapshot on every call; heavy, like [`StateMachine::len`].
    pub fn values(&self) -> Vec<&V> {
        self.states
            .iter()
            .filter(|state| state.accept)
            .filter_map(|state| state.value.as_ref())
            .collect()
    }

    /// Discards all states and transitions except the reserved drop and init states,
    /// equivalent to reconstructing the machine with the same range.
    pub fn clear(&mut self) {
        debug!("clearing machine of {} states", self.states.len());
        self.init();
    }

    /// Enumerating the stored keys is not backed by the tables and fails with
    /// [`MachineError::Unsupported`].
    pub fn keys(&self) -> Result<Vec<String>, MachineError> {
        Err(MachineError::Unsupported("enumerating keys"))
    }

    /// Enumerating (key, value) pairs is not backed by the tables and fails with
    /// [`MachineError::Unsupported`].
    pub fn entries(&self) -> Result<Vec<(String, &V)>, MachineError> {
        Err(MachineError::Unsupported("enumerating entries"))
    }

    /// Bulk insertion from another machine is not backed by the tables and fails with
    /// [`MachineError::Unsupported`]. The machine is left untouched.
    pub fn extend_from(&mut self, _other: &StateMachine<V>) -> Result<(), MachineError> {
        Err(MachineError::Unsupported("bulk insertion"))
    }

    /// Removal of keys is not backed by the tables, as states are never deleted, and
    /// fails with [`MachineError::Unsupported`]. The machine is left untouched.
    pub fn remove(&mut self, _key: &str) -> Result<Option<V>, MachineError> {
        Err(MachineError::Unsupported("removing keys"))
    }
}

impl<V: Debug> StateMachine<V> {
    /// Renders the full state and transition tables as a human-readable table: one row
    /// per state with its accept flag and payload, one column per symbol of the range
    /// giving the successor id. Intended for diagnostics; the table has
    /// `range.size() + 3` columns.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            ["state".to_string(), "accept".to_string(), "value".to_string()]
                .into_iter()
                .chain(self.range.universe().map(|symbol| format!("{symbol:?}"))),
        );
        for (id, state) in self.states.iter().enumerate() {
            let label = match id {
                DROP_STATE => format!("{id} (drop)"),
                INIT_STATE => format!("{id} (init)"),
                _ => id.to_string(),
            };
            let value = match &state.value {
                Some(value) => format!("{value:?}"),
                None => "-".to_string(),
            };
            builder.push_record(
                [label, if state.accept { "+" } else { "-" }.to_string(), value]
                    .into_iter()
                    .chain(
                        (0..self.range.size()).map(|offset| self.successor(id, offset).to_string()),
                    ),
            );
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<V: Debug> Debug for StateMachine<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "StateMachine over [{:?}, {:?}] with {} states, accepting {}",
            CharRange::min(&self.range),
            CharRange::max(&self.range),
            self.state_count(),
            self.values().iter().map(|value| format!("{value:?}")).join(", ")
        )?;
        write!(f, "{}", self.build_transition_table())
    }
}
