// ═══════════════════════════════════════════════════════════════════════
// Test suite for the imposter game engine
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use crate::error::GuardViolation;
    use crate::random::{RandSource, Randomness};
    use crate::types::*;
    use crate::visibility::*;
    use crate::words::{default_words, WordBank};

    // ── Helpers ──────────────────────────────────────────────────────────

    /// Deals a fixed seat order and word index.
    struct Scripted {
        order: Vec<usize>,
        word: usize,
    }

    impl Randomness for Scripted {
        fn shuffle(&mut self, order: &mut [usize]) {
            order.copy_from_slice(&self.order);
        }

        fn index(&mut self, len: usize) -> usize {
            self.word % len
        }
    }

    /// Imposters are the first `k` of `order`.
    fn scripted(order: &[usize]) -> Scripted {
        Scripted { order: order.to_vec(), word: 0 }
    }

    fn table(names: &[&str]) -> GameState {
        let mut state = GameState::new();
        for name in names {
            add_player(&mut state, name).unwrap();
        }
        state
    }

    fn reveal_everyone(state: &mut GameState) {
        while state.phase_kind() == PhaseKind::Reveal {
            advance_reveal(state).unwrap();
        }
    }

    /// ABCD, one imposter (seat `imposter`), voting open.
    fn voting_table(imposter: usize) -> GameState {
        let mut state = table(&["A", "B", "C", "D"]);
        let mut order: Vec<usize> = (0..4).filter(|&i| i != imposter).collect();
        order.insert(0, imposter);
        start_game(&mut state, &mut scripted(&order)).unwrap();
        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        state
    }

    fn revealed(state: &GameState) -> Vec<usize> {
        state.phase.votes().map(|v| v.revealed.iter().copied().collect()).unwrap_or_default()
    }

    // ═════════════════════════════════════════════════════════════════════
    // SETUP
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_fresh_session() {
        let state = GameState::new();
        assert_eq!(state.phase, Phase::Setup);
        assert!(state.roster.is_empty());
        assert_eq!(state.config.category, Category::Object);
        assert_eq!(state.config.imposter_count, 1);
        assert!(state.round().is_none());
    }

    #[test]
    fn test_add_player_trims_name() {
        let mut state = GameState::new();
        assert_eq!(add_player(&mut state, "  Ada  "), Ok(0));
        assert_eq!(state.player_name(0), Some("Ada"));
    }

    #[test]
    fn test_add_player_rejects_blank_name() {
        let mut state = GameState::new();
        assert_eq!(add_player(&mut state, "   "), Err(GuardViolation::EmptyName));
        assert!(state.roster.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_separate_seats() {
        let state = table(&["Sam", "Sam", "Sam"]);
        assert_eq!(state.roster.len(), 3);
    }

    #[test]
    fn test_roster_capped_at_twelve() {
        let names: Vec<String> = (0..MAX_PLAYERS).map(|i| format!("P{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = table(&refs);
        assert!(matches!(
            add_player(&mut state, "Thirteen"),
            Err(GuardViolation::RosterBoundsViolation { len: 13, .. })
        ));
        assert_eq!(state.roster.len(), MAX_PLAYERS);
    }

    #[test]
    fn test_remove_player_clamps_imposters() {
        let mut state = table(&["A", "B", "C", "D", "E", "F"]);
        assert_eq!(set_imposter_count(&mut state, 3), Ok(3));

        let removed = remove_player(&mut state, 0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(state.config.imposter_count, 2);
        assert_eq!(state.player_name(0), Some("B"));

        remove_player(&mut state, 0).unwrap();
        assert_eq!(state.config.imposter_count, 2);
        remove_player(&mut state, 0).unwrap();
        assert_eq!(state.config.imposter_count, 1);
    }

    #[test]
    fn test_remove_missing_player() {
        let mut state = table(&["A", "B"]);
        assert_eq!(
            remove_player(&mut state, 5),
            Err(GuardViolation::NoSuchPlayer { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_set_imposter_count_clamps() {
        let mut state = table(&["A", "B", "C", "D", "E"]);
        assert_eq!(set_imposter_count(&mut state, 0), Ok(1));
        assert_eq!(set_imposter_count(&mut state, 9), Ok(2));
        assert_eq!(state.config.imposter_count, 2);
    }

    #[test]
    fn test_set_imposter_count_needs_two_players() {
        let mut state = table(&["A"]);
        assert!(matches!(
            set_imposter_count(&mut state, 1),
            Err(GuardViolation::ImposterCountViolation { roster_len: 1, .. })
        ));
    }

    #[test]
    fn test_set_category() {
        let mut state = GameState::new();
        set_category(&mut state, Category::Movie).unwrap();
        assert_eq!(state.config.category, Category::Movie);
        assert_eq!(category_label(&state), "Movie");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("videogame".parse::<Category>(), Ok(Category::Videogame));
        assert_eq!(" Animal ".parse::<Category>(), Ok(Category::Animal));
        assert!("planet".parse::<Category>().is_err());
        assert_eq!(Category::Person.label(), "Famous Person");
    }

    // ═════════════════════════════════════════════════════════════════════
    // START GAME
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_start_needs_three_players() {
        let mut state = table(&["A", "B"]);
        assert!(matches!(
            start_game(&mut state, &mut RandSource::seeded(1)),
            Err(GuardViolation::RosterBoundsViolation { len: 2, min: 3, .. })
        ));
        assert_eq!(state.phase, Phase::Setup);
    }

    #[test]
    fn test_three_players_two_imposters_is_refused() {
        let mut state = table(&["A", "B", "C"]);
        state.config.imposter_count = 2;
        assert_eq!(
            start_game(&mut state, &mut RandSource::seeded(1)),
            Err(GuardViolation::ImposterCountViolation { count: 2, roster_len: 3 })
        );
        assert_eq!(state.phase, Phase::Setup);
    }

    #[test]
    fn test_zero_imposters_is_refused() {
        // Shrinking to one player drops the count to zero; regrowing keeps it there.
        let mut state = table(&["A", "B"]);
        remove_player(&mut state, 1).unwrap();
        assert_eq!(state.config.imposter_count, 0);
        add_player(&mut state, "B").unwrap();
        add_player(&mut state, "C").unwrap();
        assert!(matches!(
            start_game(&mut state, &mut RandSource::seeded(1)),
            Err(GuardViolation::ImposterCountViolation { count: 0, .. })
        ));
    }

    #[test]
    fn test_start_deals_scripted_round() {
        let mut state = table(&["A", "B", "C", "D", "E", "F"]);
        set_imposter_count(&mut state, 2).unwrap();
        set_category(&mut state, Category::Food).unwrap();
        let mut rng = Scripted { order: vec![4, 1, 0, 2, 3, 5], word: 3 };

        start_game(&mut state, &mut rng).unwrap();

        let round = state.round().unwrap();
        assert_eq!(round.imposters, vec![4, 1]);
        assert_eq!(round.secret_word, "Chocolate");
        assert_eq!(round.category, Category::Food);
        match &state.phase {
            Phase::Reveal { progress, .. } => assert_eq!(*progress, RevealProgress::default()),
            other => panic!("expected reveal, got {:?}", other),
        }
    }

    #[test]
    fn test_start_uses_custom_words() {
        let mut words = WordBank::default();
        words.set_words(Category::Animal, ["Axolotl"]).unwrap();
        let mut state = GameState::with_words(words);
        for name in ["A", "B", "C"] {
            add_player(&mut state, name).unwrap();
        }
        set_category(&mut state, Category::Animal).unwrap();
        start_game(&mut state, &mut RandSource::seeded(9)).unwrap();
        assert_eq!(state.round().unwrap().secret_word, "Axolotl");
    }

    #[test]
    fn test_setup_intents_locked_after_start() {
        let mut state = table(&["A", "B", "C"]);
        start_game(&mut state, &mut RandSource::seeded(3)).unwrap();
        let locked = GuardViolation::InvalidPhase { intent: "add player", phase: PhaseKind::Reveal };
        assert_eq!(add_player(&mut state, "D"), Err(locked));
        assert!(remove_player(&mut state, 0).is_err());
        assert!(set_imposter_count(&mut state, 1).is_err());
        assert!(set_category(&mut state, Category::Food).is_err());
        assert!(start_game(&mut state, &mut RandSource::seeded(3)).is_err());
    }

    // ═════════════════════════════════════════════════════════════════════
    // REVEAL
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_reveal_walks_every_player() {
        let mut state = table(&["A", "B", "C"]);
        start_game(&mut state, &mut scripted(&[2, 0, 1])).unwrap();

        assert_eq!(toggle_role_visibility(&mut state), Ok(true));
        assert_eq!(advance_reveal(&mut state), Ok(Some(1)));
        match &state.phase {
            Phase::Reveal { progress, .. } => assert!(!progress.role_visible),
            other => panic!("expected reveal, got {:?}", other),
        }
        assert_eq!(advance_reveal(&mut state), Ok(Some(2)));
        assert_eq!(current_viewer_is_imposter(&state), Some(true));
        assert_eq!(advance_reveal(&mut state), Ok(None));
        assert_eq!(state.phase_kind(), PhaseKind::Discussion);
        assert_eq!(state.round().unwrap().imposters, vec![2]);
    }

    #[test]
    fn test_toggle_only_during_reveal() {
        let mut state = table(&["A", "B", "C"]);
        assert!(matches!(
            toggle_role_visibility(&mut state),
            Err(GuardViolation::InvalidPhase { phase: PhaseKind::Setup, .. })
        ));
        assert!(advance_reveal(&mut state).is_err());
    }

    #[test]
    fn test_reveal_view_hides_role_until_shown() {
        let mut state = table(&["A", "B", "C"]);
        set_category(&mut state, Category::Animal).unwrap();
        start_game(&mut state, &mut scripted(&[0, 1, 2])).unwrap();

        let Screen::Reveal(view) = table_view(&state).screen else { panic!("not reveal") };
        assert_eq!(view.viewer_name, "A");
        assert_eq!(view.role, None);

        toggle_role_visibility(&mut state).unwrap();
        let Screen::Reveal(view) = table_view(&state).screen else { panic!("not reveal") };
        assert_eq!(view.role, Some(Role::Imposter));

        advance_reveal(&mut state).unwrap();
        toggle_role_visibility(&mut state).unwrap();
        let Screen::Reveal(view) = table_view(&state).screen else { panic!("not reveal") };
        assert_eq!(view.role, Some(Role::Crew { secret_word: "Elephant".into() }));
        assert!(!view.is_last);
    }

    // ═════════════════════════════════════════════════════════════════════
    // VOTING
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_start_voting_only_from_discussion() {
        let mut state = table(&["A", "B", "C"]);
        start_game(&mut state, &mut RandSource::seeded(5)).unwrap();
        assert!(start_voting(&mut state).is_err());
        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        assert_eq!(state.phase_kind(), PhaseKind::Voting);
        assert!(revealed(&state).is_empty());
    }

    #[test]
    fn test_animal_scenario_correct_vote_ends_round() {
        let mut state = table(&["A", "B", "C", "D"]);
        set_category(&mut state, Category::Animal).unwrap();
        start_game(&mut state, &mut RandSource::seeded(2024)).unwrap();

        let round = state.round().unwrap().clone();
        assert_eq!(round.imposters.len(), 1);
        assert!(round.imposters[0] < 4);
        assert!(default_words(Category::Animal).contains(&round.secret_word.as_str()));

        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        let outcome = vote_player(&mut state, round.imposters[0]).unwrap();
        assert!(outcome.correct);
        assert!(outcome.round_over);
        assert_eq!(state.phase_kind(), PhaseKind::Result);
    }

    #[test]
    fn test_wrong_vote_keeps_voting() {
        let mut state = voting_table(2);
        let outcome = vote_player(&mut state, 0).unwrap();
        assert_eq!(outcome, VoteOutcome { accused: 0, correct: false, round_over: false });
        assert_eq!(pending_vote_correct(&state), Some(false));

        next_vote(&mut state).unwrap();
        assert_eq!(state.phase_kind(), PhaseKind::Voting);
        assert_eq!(state.phase.votes().unwrap().accused, None);
        assert!(revealed(&state).is_empty());
    }

    #[test]
    fn test_pending_vote_only_while_voting() {
        let mut state = table(&["A", "B", "C", "D", "E"]);
        set_imposter_count(&mut state, 2).unwrap();
        start_game(&mut state, &mut scripted(&[3, 1, 0, 2, 4])).unwrap();
        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        assert_eq!(pending_vote_correct(&state), None);

        vote_player(&mut state, 3).unwrap();
        assert_eq!(pending_vote_correct(&state), Some(true));
        next_vote(&mut state).unwrap();
        assert_eq!(pending_vote_correct(&state), None);

        vote_player(&mut state, 1).unwrap();
        assert_eq!(state.phase_kind(), PhaseKind::Result);
        assert_eq!(state.phase.votes().unwrap().accused, Some(1));
        assert_eq!(pending_vote_correct(&state), None);
    }

    #[test]
    fn test_vote_pending_blocks_next_vote() {
        let mut state = voting_table(2);
        vote_player(&mut state, 0).unwrap();
        assert_eq!(vote_player(&mut state, 2), Err(GuardViolation::DuplicateVotePending));
        assert_eq!(state.phase_kind(), PhaseKind::Voting);
    }

    #[test]
    fn test_next_vote_needs_pending_vote() {
        let mut state = voting_table(1);
        assert_eq!(next_vote(&mut state), Err(GuardViolation::NoVotePending));
    }

    #[test]
    fn test_vote_unknown_player() {
        let mut state = voting_table(1);
        assert_eq!(
            vote_player(&mut state, 4),
            Err(GuardViolation::NoSuchPlayer { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_two_imposters_found_one_at_a_time() {
        let mut state = table(&["A", "B", "C", "D", "E"]);
        set_imposter_count(&mut state, 2).unwrap();
        start_game(&mut state, &mut scripted(&[3, 1, 0, 2, 4])).unwrap();
        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();

        let first = vote_player(&mut state, 1).unwrap();
        assert!(first.correct && !first.round_over);
        assert_eq!(revealed(&state), vec![1]);
        next_vote(&mut state).unwrap();

        assert_eq!(
            vote_player(&mut state, 1),
            Err(GuardViolation::AlreadyIdentified { name: "B".into() })
        );

        vote_player(&mut state, 4).unwrap();
        next_vote(&mut state).unwrap();
        assert_eq!(state.phase_kind(), PhaseKind::Voting);

        let last = vote_player(&mut state, 3).unwrap();
        assert!(last.round_over);
        assert_eq!(state.phase_kind(), PhaseKind::Result);
        assert_eq!(revealed(&state), vec![1, 3]);
        assert_eq!(state.phase.votes().unwrap().votes_cast, 3);
        assert!(next_vote(&mut state).is_err());
    }

    #[test]
    fn test_voting_view_statuses() {
        let mut state = table(&["A", "B", "C", "D", "E"]);
        set_imposter_count(&mut state, 2).unwrap();
        start_game(&mut state, &mut scripted(&[0, 1, 2, 3, 4])).unwrap();
        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        vote_player(&mut state, 0).unwrap();
        next_vote(&mut state).unwrap();
        vote_player(&mut state, 4).unwrap();

        let view = voting_view(&state).unwrap();
        assert_eq!(view.candidates[0].status, CandidateStatus::Confirmed);
        assert_eq!(view.candidates[4].status, CandidateStatus::Cleared);
        assert_eq!(view.candidates[1].status, CandidateStatus::Open);
        assert!(view.candidates.iter().all(|c| !c.can_vote));
        let verdict = view.pending.unwrap();
        assert_eq!((verdict.accused, verdict.correct), (4, false));
        assert_eq!((view.found, view.total), (1, 2));

        next_vote(&mut state).unwrap();
        let view = voting_view(&state).unwrap();
        assert!(!view.candidates[0].can_vote);
        assert!(view.candidates[1].can_vote);
        assert!(view.candidates[4].can_vote);
    }

    // ═════════════════════════════════════════════════════════════════════
    // RESULT / RESET
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_result_view_lists_imposters() {
        let mut state = voting_table(3);
        vote_player(&mut state, 3).unwrap();
        let view = table_view(&state);
        let Screen::Result(result) = view.screen else { panic!("not result") };
        assert_eq!(result.imposters, vec!["D".to_string()]);
        assert_eq!(result.secret_word, "Telescope");
        assert_eq!(result.votes_cast, 1);
        assert_eq!(view.category_label, "Object");
    }

    #[test]
    fn test_reset_keeps_roster_and_config() {
        let mut state = table(&["A", "B", "C", "D", "E", "F"]);
        set_imposter_count(&mut state, 2).unwrap();
        set_category(&mut state, Category::Movie).unwrap();
        start_game(&mut state, &mut RandSource::seeded(11)).unwrap();
        assert!(reset_to_setup(&mut state).is_err());

        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        let imposters = state.round().unwrap().imposters.clone();
        for target in imposters {
            vote_player(&mut state, target).unwrap();
            if state.phase_kind() == PhaseKind::Voting {
                next_vote(&mut state).unwrap();
            }
        }
        reset_to_setup(&mut state).unwrap();

        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.roster.len(), 6);
        assert_eq!(state.config, GameConfig { category: Category::Movie, imposter_count: 2 });

        start_game(&mut state, &mut RandSource::seeded(12)).unwrap();
        assert_eq!(state.round().unwrap().imposters.len(), 2);
        assert!(state.phase.votes().is_none());
    }

    // ═════════════════════════════════════════════════════════════════════
    // DISPATCH / VIEWS
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_apply_intent_dispatch() {
        let mut state = GameState::new();
        let mut rng = scripted(&[1, 0, 2]);
        for name in ["A", "B", "C"] {
            apply_intent(&mut state, Intent::AddPlayer(name.into()), &mut rng).unwrap();
        }
        assert_eq!(
            apply_intent(&mut state, Intent::SetImposterCount(4), &mut rng),
            Ok(Outcome::ImposterCountSet(1))
        );
        assert_eq!(apply_intent(&mut state, Intent::StartGame, &mut rng), Ok(Outcome::RoundStarted));
        assert_eq!(apply_intent(&mut state, Intent::ToggleRoleVisibility, &mut rng), Ok(Outcome::RoleVisible(true)));
        assert_eq!(apply_intent(&mut state, Intent::AdvanceReveal, &mut rng), Ok(Outcome::NextViewer(1)));
        apply_intent(&mut state, Intent::AdvanceReveal, &mut rng).unwrap();
        assert_eq!(apply_intent(&mut state, Intent::AdvanceReveal, &mut rng), Ok(Outcome::DiscussionOpened));
        assert_eq!(apply_intent(&mut state, Intent::StartVoting, &mut rng), Ok(Outcome::VotingOpened));
        assert_eq!(
            apply_intent(&mut state, Intent::Vote(1), &mut rng),
            Ok(Outcome::Voted(VoteOutcome { accused: 1, correct: true, round_over: true }))
        );
        assert_eq!(apply_intent(&mut state, Intent::ResetToSetup, &mut rng), Ok(Outcome::BackToSetup));
        assert_eq!(
            apply_intent(&mut state, Intent::RemovePlayer(0), &mut rng),
            Ok(Outcome::PlayerRemoved { name: "A".into(), imposter_count: 1 })
        );
    }

    #[test]
    fn test_check_never_mutates() {
        let state = table(&["A", "B"]);
        let before = state.clone();
        assert!(check(&state, &Intent::StartGame).is_err());
        assert!(check(&state, &Intent::AddPlayer("C".into())).is_ok());
        assert!(check(&state, &Intent::Vote(0)).is_err());
        assert_eq!(state.roster, before.roster);
        assert_eq!(state.phase, before.phase);
    }

    #[test]
    fn test_setup_view_explains_blocker() {
        let mut state = table(&["A", "B"]);
        let Screen::Setup(view) = table_view(&state).screen else { panic!("not setup") };
        assert_eq!(view.max_imposters, 1);
        assert!(view.start_blocker.unwrap().contains("2 players"));

        add_player(&mut state, "C").unwrap();
        let Screen::Setup(view) = table_view(&state).screen else { panic!("not setup") };
        assert!(view.start_blocker.is_none());
        assert!(view.can_add_player);
    }

    #[test]
    fn test_view_serializes_without_hidden_roles() {
        let mut state = table(&["A", "B", "C"]);
        start_game(&mut state, &mut scripted(&[1, 0, 2])).unwrap();
        reveal_everyone(&mut state);
        start_voting(&mut state).unwrap();
        let json = serde_json::to_string(&table_view(&state)).unwrap();
        assert!(json.contains("\"screen\":\"voting\""));
        assert!(!json.contains("Telescope"));
    }
}
