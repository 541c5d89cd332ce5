//! Property-based tests for the selection reducer
//!
//! Tests invariants:
//! - Question count always lands in the allowed range
//! - A chosen chapter is always one of the current options
//! - Chapter-scoped modes never hold the sentinel once a subject is set

use proptest::prelude::*;

use crate::core::catalog::{is_concrete_chapter, Subject, ALL_CHAPTERS};
use crate::core::generation::types::{Difficulty, GenerationMode, Language};
use crate::core::selection::{
    SelectionAction, SelectionState, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT,
};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_chapter() -> impl Strategy<Value = String> {
    let mut names: Vec<String> = Subject::ALL
        .iter()
        .flat_map(|s| s.chapters().iter().map(|c| c.to_string()))
        .collect();
    names.push(ALL_CHAPTERS.to_string());
    names.push("Not A Chapter".to_string());
    prop::sample::select(names)
}

fn arb_action() -> impl Strategy<Value = SelectionAction> {
    prop_oneof![
        prop::sample::select(Subject::ALL.to_vec()).prop_map(SelectionAction::SetSubject),
        prop::sample::select(GenerationMode::ALL.to_vec()).prop_map(SelectionAction::SetMode),
        arb_chapter().prop_map(SelectionAction::SetChapter),
        prop::sample::select(vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Hybrid,
        ])
        .prop_map(SelectionAction::SetDifficulty),
        prop::sample::select(vec![Language::English, Language::Odia])
            .prop_map(SelectionAction::SetLanguage),
        any::<u8>().prop_map(SelectionAction::SetQuestionCount),
        Just(SelectionAction::Reset),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_count_clamped(count in any::<u8>()) {
        let state = SelectionState::default().apply(SelectionAction::SetQuestionCount(count));
        prop_assert!((MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&state.question_count));
        if (MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count) {
            prop_assert_eq!(state.question_count, count);
        }
    }

    #[test]
    fn prop_reducer_invariants(actions in prop::collection::vec(arb_action(), 0..30)) {
        let mut state = SelectionState::default();
        for action in actions {
            state = state.apply(action);

            prop_assert!((MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&state.question_count));
            match (&state.subject, &state.chapter) {
                (None, chapter) => prop_assert!(chapter.is_none()),
                (Some(_), Some(chapter)) => {
                    prop_assert!(state.chapter_options().contains(&chapter.as_str()));
                }
                (Some(_), None) => prop_assert!(false, "subject without chapter"),
            }
            if state.subject.is_some() && state.mode.is_chapter_scoped() {
                prop_assert!(is_concrete_chapter(state.chapter.as_deref()));
            }
        }
    }

    #[test]
    fn prop_can_generate_implies_valid(actions in prop::collection::vec(arb_action(), 0..30)) {
        let state = SelectionState::default().apply_all(actions);
        if state.can_generate() {
            prop_assert!(state.validate().is_ok());
        }
    }
}
