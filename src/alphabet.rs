//! Alphabet: the ordered symbol set defining a machine's index space.
//!
//! Every component works on contact indices in `[0, N)`. The alphabet is
//! the only place where symbols and indices are translated.

use crate::error::MachineError;
use crate::utils::circular;

/// The 26-letter Latin alphabet used by every Enigma model in the catalog.
pub const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered sequence of unique symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from the symbols of `symbols`, in order.
    ///
    /// # Errors
    /// Returns [`MachineError::EmptyAlphabet`] for an empty string and
    /// [`MachineError::DuplicateAlphabetSymbol`] if a symbol repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotormachine::Alphabet;
    ///
    /// let digits = Alphabet::new("0123456789").unwrap();
    /// assert_eq!(digits.len(), 10);
    /// assert!(Alphabet::new("ABA").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self, MachineError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(MachineError::EmptyAlphabet);
        }
        for (i, &symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(&symbol) {
                return Err(MachineError::DuplicateAlphabetSymbol { symbol });
            }
        }
        Ok(Alphabet { symbols })
    }

    /// Returns the A–Z alphabet.
    pub fn latin() -> Self {
        Alphabet {
            symbols: LATIN.chars().collect(),
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Exact index of `symbol`, if present.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// Whether `symbol` resolves to an index (exactly or upper-cased).
    pub fn contains(&self, symbol: char) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Maps a symbol to its index, substituting `fallback` for unknown symbols.
    ///
    /// Lookup tries the symbol as given, then its upper-case form. When the
    /// fallback is not in the alphabet either, index 0 is used.
    pub fn symbol_to_index(&self, symbol: char, fallback: char) -> usize {
        self.lookup(symbol)
            .or_else(|| self.lookup(fallback))
            .unwrap_or(0)
    }

    /// Maps an index back to its symbol, wrapping out-of-range indices.
    pub fn index_to_symbol(&self, index: usize) -> char {
        let wrapped = circular::offset(index, 0, self.symbols.len());
        self.symbols[wrapped]
    }

    /// Parses a wiring string written in this alphabet's symbols.
    ///
    /// # Errors
    /// Returns [`MachineError::UnknownWiringSymbol`] for a symbol outside
    /// the alphabet. Lower-case symbols are accepted for upper-case
    /// alphabets.
    pub fn parse_wiring(&self, wiring: &str) -> Result<Vec<usize>, MachineError> {
        wiring
            .chars()
            .map(|symbol| {
                self.lookup(symbol)
                    .ok_or(MachineError::UnknownWiringSymbol { symbol })
            })
            .collect()
    }

    /// Renders indices as a string of symbols.
    pub fn render(&self, indices: &[usize]) -> String {
        indices.iter().map(|&i| self.index_to_symbol(i)).collect()
    }

    /// Iterates the symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    fn lookup(&self, symbol: char) -> Option<usize> {
        self.index_of(symbol).or_else(|| {
            let mut upper = symbol.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) if u != symbol => self.index_of(u),
                _ => None,
            }
        })
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
