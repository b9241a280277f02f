// Text Module - Normalization, Sentence Segmentation, Tokenization
//
// Raw sentence → clean() → whitespace tokens → stopword removal → lemmatization

pub mod lemmatizer;
pub mod normalizer;
pub mod segmenter;
pub mod stopwords;

pub use lemmatizer::Lemmatizer;
pub use normalizer::clean;
pub use segmenter::{Segmenter, SegmentedSentence};
pub use stopwords::StopwordSet;

/// Punctuation or symbol (anything that is not a letter, digit or whitespace)
pub(crate) fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || !(c.is_alphanumeric() || c.is_whitespace() || c.is_control())
}
