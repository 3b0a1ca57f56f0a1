mod lexicon;

pub use lexicon::LexiconError;
