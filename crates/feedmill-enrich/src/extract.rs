//! Named entities and action lemmas from one chunk's annotation.

use crate::capabilities::Annotation;

/// Entity and action strings pulled from one chunk.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Entity span texts, verbatim (case preserved).
    pub entities: Vec<String>,
    /// Lemmas of verb-tagged tokens; empty when action extraction is off.
    pub actions: Vec<String>,
}

/// Collect entity spans and, when enabled, verb lemmas.
#[must_use]
pub fn extract_entities_and_actions(annotation: &Annotation, include_actions: bool) -> Extraction {
    let entities = annotation
        .entities
        .iter()
        .map(|e| e.text.clone())
        .collect();

    let actions = if include_actions {
        annotation
            .tokens
            .iter()
            .filter(|t| t.pos == "VERB")
            .map(|t| t.lemma.clone())
            .collect()
    } else {
        Vec::new()
    };

    Extraction { entities, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{AnnotatedToken, EntitySpan};

    fn annotation() -> Annotation {
        Annotation {
            entities: vec![
                EntitySpan {
                    text: "RBI".to_string(),
                    label: "ORG".to_string(),
                },
                EntitySpan {
                    text: "Mumbai".to_string(),
                    label: "GPE".to_string(),
                },
            ],
            tokens: vec![
                AnnotatedToken {
                    lemma: "cut".to_string(),
                    pos: "VERB".to_string(),
                    is_stop: false,
                },
                AnnotatedToken {
                    lemma: "rate".to_string(),
                    pos: "NOUN".to_string(),
                    is_stop: false,
                },
                AnnotatedToken {
                    lemma: "announce".to_string(),
                    pos: "VERB".to_string(),
                    is_stop: false,
                },
            ],
        }
    }

    #[test]
    fn entities_keep_original_case() {
        let extraction = extract_entities_and_actions(&annotation(), false);
        assert_eq!(extraction.entities, vec!["RBI", "Mumbai"]);
    }

    #[test]
    fn actions_are_verb_lemmas_only() {
        let extraction = extract_entities_and_actions(&annotation(), true);
        assert_eq!(extraction.actions, vec!["cut", "announce"]);
    }

    #[test]
    fn actions_empty_when_disabled() {
        let extraction = extract_entities_and_actions(&annotation(), false);
        assert!(extraction.actions.is_empty());
    }
}
