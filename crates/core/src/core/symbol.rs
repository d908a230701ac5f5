//! Symbols, prepared words and corpus preparation.

use compact_str::CompactString;

/// Reserved end-of-word marker appended to every prepared word.
///
/// It is four characters long, so it can never equal a single-character symbol.
pub const END_OF_WORD: &str = "</w>";

/// A unit of text: a character, the end-of-word marker, or a merge of both.
pub type Symbol = CompactString;

/// A prepared word: symbols terminated by [`END_OF_WORD`].
pub type Word = Vec<Symbol>;

/// An ordered sequence of prepared words. Duplicates are kept.
pub type Corpus = Vec<Word>;

/// Split a word into one symbol per `char`, followed by the end-of-word marker.
///
/// The empty string yields a word holding only the marker.
pub fn prepare_word(word: &str) -> Word {
    let mut symbols = Word::with_capacity(word.chars().count() + 1);
    let mut buf = [0u8; 4];
    for ch in word.chars() {
        symbols.push(Symbol::new(ch.encode_utf8(&mut buf)));
    }
    symbols.push(Symbol::new(END_OF_WORD));
    symbols
}

/// Prepare every word of a corpus, preserving length and order.
pub fn prepare_corpus<I, S>(words: I) -> Corpus
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| prepare_word(word.as_ref()))
        .collect()
}
