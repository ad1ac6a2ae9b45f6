use thiserror::Error;

/// The ways in which an operation on a [`StateMachine`](crate::machine::StateMachine)
/// can fail. All failures are synchronous and local to the call that produced them; a
/// failed operation never leaves the state or transition tables partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The requested character range has `max < min`.
    #[error("invalid alphabet bounds, `{max:?}` is smaller than `{min:?}`")]
    InvalidBounds {
        /// requested lower bound
        min: char,
        /// requested upper bound
        max: char,
    },
    /// A key contains a character that lies outside the configured range. The machine
    /// can neither store nor transition on such a symbol.
    #[error("symbol `{symbol:?}` lies outside the alphabet range [{min:?}, {max:?}]")]
    SymbolOutOfRange {
        /// the offending character
        symbol: char,
        /// lower bound of the configured range
        min: char,
        /// upper bound of the configured range
        max: char,
    },
    /// The empty string cannot be used as a key, since insertion always consumes at
    /// least one character before it can mark a state as accepting.
    #[error("the empty string cannot be used as a key")]
    EmptyKey,
    /// The called map operation is declared for interface compatibility but not backed
    /// by the state and transition tables.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
