use crate::{FrError, Seq};

/// A fixed symbol set plus one designated padding symbol.
///
/// Every symbol maps to a unique index in `0..size()`; the padding symbol maps
/// to index `size()`. Indices are what the core tables are addressed by.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    padding: u8,
    index: [u8; 256],
}

const UNMAPPED: u8 = u8::MAX;

impl Alphabet {
    pub fn new(symbols: &[u8], padding: u8) -> Result<Self, FrError> {
        if symbols.is_empty() {
            return Err(FrError::EmptyAlphabet);
        }
        if symbols.contains(&padding) {
            return Err(FrError::PaddingInAlphabet { padding });
        }
        let mut index = [UNMAPPED; 256];
        for (i, &s) in symbols.iter().enumerate() {
            if index[s as usize] != UNMAPPED {
                return Err(FrError::DuplicateSymbol { symbol: s });
            }
            index[s as usize] = i as u8;
        }
        index[padding as usize] = symbols.len() as u8;
        Ok(Alphabet {
            symbols: symbols.to_vec(),
            padding,
            index,
        })
    }

    /// The default nucleotide alphabet with `-` as padding.
    pub fn dna() -> Self {
        Self::new(b"ATGC", b'-').unwrap()
    }

    /// Number of real symbols, excluding padding.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// The radix used for symbol digits in mixed-radix offsets: `size() + 1`.
    pub fn base(&self) -> usize {
        self.symbols.len() + 1
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn padding_index(&self) -> u8 {
        self.symbols.len() as u8
    }

    pub fn index_of(&self, symbol: u8) -> Result<u8, FrError> {
        match self.index[symbol as usize] {
            UNMAPPED => Err(FrError::InvalidSymbol { symbol }),
            i => Ok(i),
        }
    }

    /// Inverse of `index_of`.
    pub fn symbol_at(&self, index: u8) -> u8 {
        if index == self.padding_index() {
            self.padding
        } else {
            self.symbols[index as usize]
        }
    }

    /// Map a whole sequence to symbol indices.
    pub fn encode(&self, seq: Seq) -> Result<Vec<u8>, FrError> {
        seq.iter().map(|&s| self.index_of(s)).collect()
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Alphabet({:?}, padding {:?})",
            String::from_utf8_lossy(&self.symbols),
            self.padding as char
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dna_mapping_roundtrips() {
        let alph = Alphabet::dna();
        assert_eq!(alph.size(), 4);
        assert_eq!(alph.index_of(b'A'), Ok(0));
        assert_eq!(alph.index_of(b'-'), Ok(4));
        for i in 0..=alph.padding_index() {
            assert_eq!(alph.index_of(alph.symbol_at(i)), Ok(i));
        }
        assert_eq!(
            alph.index_of(b'N'),
            Err(FrError::InvalidSymbol { symbol: b'N' })
        );
    }

    #[test]
    fn rejects_bad_configurations() {
        assert_eq!(Alphabet::new(b"", b'-'), Err(FrError::EmptyAlphabet));
        assert_eq!(
            Alphabet::new(b"AT-", b'-'),
            Err(FrError::PaddingInAlphabet { padding: b'-' })
        );
        assert_eq!(
            Alphabet::new(b"ATA", b'-'),
            Err(FrError::DuplicateSymbol { symbol: b'A' })
        );
    }
}
