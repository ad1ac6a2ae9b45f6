use std::ops::RangeInclusive;

use crate::error::MachineError;

/// A contiguous, inclusive range `[min, max]` of characters over which a
/// [`StateMachine`](crate::machine::StateMachine) transitions. The bounds are fixed at
/// construction; every key that is inserted must consist solely of characters from this
/// range.
///
/// Internally a symbol is addressed by its *offset* `c - min`, which indexes a column of
/// the transition table. The number of columns is [`CharRange::size`], i.e.
/// `max - min + 1`.
///
/// # Example
/// A range over the lowercase letters is constructed with `CharRange::new('a', 'z')`. The
/// symbol 'c' then has offset 2, while '0' lies outside the range and is rejected.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct CharRange {
    min: char,
    max: char,
}

impl CharRange {
    /// Creates a new range with the given inclusive bounds. Fails with
    /// [`MachineError::InvalidBounds`] if `max < min`.
    pub fn new(min: char, max: char) -> Result<Self, MachineError> {
        if max < min {
            return Err(MachineError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// The smallest character of the range.
    pub fn min(&self) -> char {
        self.min
    }

    /// The largest character of the range.
    pub fn max(&self) -> char {
        self.max
    }

    /// Returns the number of symbols in the range, which equals the width of one row of
    /// the transition table.
    pub fn size(&self) -> usize {
        self.max as usize - self.min as usize + 1
    }

    /// Returns true if the given symbol lies within the bounds.
    pub fn contains(&self, symbol: char) -> bool {
        self.min <= symbol && symbol <= self.max
    }

    /// Converts a symbol into the column it addresses in the transition table. Returns
    /// [`MachineError::SymbolOutOfRange`] for symbols outside the bounds, rather than
    /// computing a bogus index.
    pub fn offset(&self, symbol: char) -> Result<usize, MachineError> {
        if !self.contains(symbol) {
            return Err(MachineError::SymbolOutOfRange {
                symbol,
                min: self.min,
                max: self.max,
            });
        }
        Ok(symbol as usize - self.min as usize)
    }

    /// Returns an iterator over all symbols in the range, in offset order. Columns of the
    /// transition table correspond one-to-one to the yielded symbols.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        RangeInclusive::new(self.min as u32, self.max as u32).filter_map(char::from_u32)
    }
}

/// The default range covers the full 7-bit character set `['\0', 127]`, mirroring the
/// zero-argument construction of the machine.
impl Default for CharRange {
    fn default() -> Self {
        Self {
            min: '\0',
            max: 127 as char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CharRange;
    use crate::error::MachineError;

    #[test]
    fn lowercase_range() {
        let range = CharRange::new('a', 'z').unwrap();
        assert_eq!(range.size(), 26);
        assert!(range.contains('a'));
        assert!(range.contains('z'));
        assert!(!range.contains('0'));
        assert_eq!(range.offset('c').unwrap(), 2);
        assert_eq!(range.universe().count(), 26);
    }

    #[test]
    fn default_covers_seven_bits() {
        let range = CharRange::default();
        assert_eq!(range.size(), 128);
        assert_eq!(range.offset('\0').unwrap(), 0);
        assert_eq!(range.offset(127 as char).unwrap(), 127);
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(matches!(
            CharRange::new('z', 'a'),
            Err(MachineError::InvalidBounds { min: 'z', max: 'a' })
        ));
    }

    #[test]
    fn rejects_symbol_outside_bounds() {
        let range = CharRange::new('a', 'z').unwrap();
        assert!(matches!(
            range.offset('A'),
            Err(MachineError::SymbolOutOfRange { symbol: 'A', .. })
        ));
    }
}
