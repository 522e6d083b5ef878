//! Rule-based lexicon classifier for Spanish and English review text.

use placerev_core::Sentiment;

use crate::classifier::{Classification, SentimentClassifier};
use crate::error::ClassificationError;

/// Word weights for review text.
///
/// Keys are lowercase single words (accented and unaccented spellings both
/// listed). Values in `(0.0, 1.0]` are positive, in `[-1.0, 0.0)` negative.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive (es)
    ("bien", 0.4),
    ("bueno", 0.4),
    ("buena", 0.4),
    ("buenos", 0.4),
    ("buenas", 0.4),
    ("excelente", 0.6),
    ("excelentes", 0.6),
    ("genial", 0.5),
    ("recomiendo", 0.5),
    ("recomendable", 0.5),
    ("encanta", 0.5),
    ("encantó", 0.5),
    ("encanto", 0.5),
    ("mejor", 0.4),
    ("fantástico", 0.6),
    ("fantastico", 0.6),
    ("perfecto", 0.5),
    ("perfecta", 0.5),
    ("increíble", 0.5),
    ("increible", 0.5),
    ("amable", 0.4),
    ("amables", 0.4),
    ("profesional", 0.3),
    ("profesionales", 0.3),
    ("satisfecho", 0.4),
    ("satisfecha", 0.4),
    ("contento", 0.4),
    ("contenta", 0.4),
    ("útil", 0.3),
    ("util", 0.3),
    ("gracias", 0.2),
    ("agradable", 0.4),
    ("cercano", 0.3),
    ("cercanos", 0.3),
    // Positive (en)
    ("good", 0.4),
    ("great", 0.5),
    ("excellent", 0.6),
    ("love", 0.5),
    ("best", 0.5),
    ("recommend", 0.5),
    ("friendly", 0.4),
    ("helpful", 0.4),
    // Negative (es)
    ("mal", -0.4),
    ("malo", -0.4),
    ("mala", -0.4),
    ("malos", -0.4),
    ("malas", -0.4),
    ("pésimo", -0.7),
    ("pesimo", -0.7),
    ("pésima", -0.7),
    ("pesima", -0.7),
    ("horrible", -0.7),
    ("terrible", -0.6),
    ("peor", -0.5),
    ("desastre", -0.7),
    ("fatal", -0.6),
    ("lamentable", -0.6),
    ("decepcionante", -0.6),
    ("decepción", -0.5),
    ("decepcion", -0.5),
    ("vergüenza", -0.6),
    ("verguenza", -0.6),
    ("desorganizado", -0.5),
    ("desorganización", -0.5),
    ("desorganizacion", -0.5),
    ("caos", -0.5),
    ("sucio", -0.4),
    ("sucia", -0.4),
    ("lento", -0.3),
    ("queja", -0.3),
    ("quejas", -0.3),
    ("problema", -0.3),
    ("problemas", -0.3),
    ("evitar", -0.4),
    ("maleducado", -0.5),
    ("maleducados", -0.5),
    // Negative (en)
    ("bad", -0.4),
    ("awful", -0.6),
    ("worst", -0.6),
    ("rude", -0.5),
    ("dirty", -0.4),
    ("avoid", -0.4),
];

/// Words that flip the polarity of the next lexicon word.
const NEGATORS: &[&str] = &["no", "nunca", "ni", "tampoco", "not", "never"];

/// Scores at or below this magnitude are labelled neutral.
const NEUTRAL_BAND: f32 = 0.1;

/// Score a text string using the review lexicon.
///
/// Splits text into lowercase words, sums matching weights (flipping the
/// sign of a word directly preceded by a negator), and clamps the result
/// to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    let mut negate_next = false;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if w.is_empty() {
            continue;
        }
        if NEGATORS.contains(&w.as_str()) {
            negate_next = true;
            continue;
        }
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += if negate_next { -weight } else { weight };
        }
        negate_next = false;
    }
    score.clamp(-1.0, 1.0)
}

/// [`SentimentClassifier`] backed by [`lexicon_score`].
///
/// Scores inside `±0.1` are neutral. Confidence grows with distance from
/// the neutral band edge for polar labels, and with closeness to zero for
/// neutral ones. Never fails: empty text is neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        let score = lexicon_score(text);
        let (label, confidence) = if score > NEUTRAL_BAND {
            (Sentiment::Positive, 0.5 + score / 2.0)
        } else if score < -NEUTRAL_BAND {
            (Sentiment::Negative, 0.5 - score / 2.0)
        } else {
            (Sentiment::Neutral, 1.0 - score.abs() / NEUTRAL_BAND * 0.5)
        };
        Ok(Classification {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        })
    }
}
