use super::*;
use proptest::prelude::*;

#[test]
fn test_starts_on_first_card() {
    let state = WelcomeState::new();
    assert_eq!(state.selected(), 0);
    assert_eq!(state.selected_category(), Category::Dating);
}

#[test]
fn test_last_row_is_start_chatting() {
    let mut state = WelcomeState::new();
    for _ in 0..4 {
        state.select_next();
    }
    assert_eq!(state.selected_category(), Category::None);
}

#[test]
fn test_selection_wraps_both_ways() {
    let mut state = WelcomeState::new();
    state.select_prev();
    assert_eq!(state.selected_category(), Category::None);
    state.select_next();
    assert_eq!(state.selected_category(), Category::Dating);
}

#[test]
fn test_select_by_category() {
    let mut state = WelcomeState::new();
    state.select(Category::Communication);
    assert_eq!(state.selected(), 3);
}

#[test]
fn test_cards_precede_start_chatting() {
    assert_eq!(&WELCOME_OPTIONS[..4], &Category::CARDS);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_selection_stays_in_range(moves in prop::collection::vec(prop::bool::ANY, 0..50)) {
        let mut state = WelcomeState::new();
        for down in moves {
            if down { state.select_next() } else { state.select_prev() }
            prop_assert!(state.selected() < WELCOME_OPTIONS.len());
        }
    }
}
