#[cfg(test)]
mod tests {
    use crate::battle::ai::{matchup_score, Behavior, RandomAI, ScoringAI};
    use crate::battle::state::{Side, TurnRng};
    use crate::battle::tests::common::{
        assert_ok, create_test_session, test_engine, TestCombatantBuilder,
    };
    use crate::combatant::Combatant;
    use crate::errors::{ActionError, BattleEngineError};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::StatusKind;

    #[rstest]
    #[case("Super effective STAB beats neutral", "charizard", &["ember", "slash"], "venusaur", "ember")]
    #[case("Resisted STAB loses to neutral", "charizard", &["ember", "slash"], "blastoise", "slash")]
    #[case("Immune move is avoided", "pikachu", &["quick attack", "tail whip"], "gengar", "tail whip")]
    #[case("Equal scores keep the earliest slot", "charizard", &["tackle", "quick attack"], "blastoise", "tackle")]
    #[case("Equal scores keep the earliest slot, reversed", "charizard", &["quick attack", "tackle"], "blastoise", "quick attack")]
    #[case("Escape is never chosen", "alakazam", &["teleport", "tail whip"], "charizard", "tail whip")]
    #[case("Heal is useless at full health", "alakazam", &["recover", "tackle"], "blastoise", "tackle")]
    fn test_scoring_ai_choice(
        #[case] desc: &str,
        #[case] attacker: &str,
        #[case] moves: &[&str],
        #[case] defender: &str,
        #[case] expected: &str,
    ) {
        let engine = test_engine();
        let opponent = TestCombatantBuilder::new(attacker).with_moves(moves).build();
        let player = TestCombatantBuilder::new(defender).build();
        let session = create_test_session(player, opponent);
        let mut rng = TurnRng::new_for_test(vec![]);

        let choice = assert_ok(ScoringAI::new().choose_move(Side::Opponent, &session, &engine, &mut rng));

        assert_eq!(choice, expected, "{}", desc);
    }

    #[test]
    fn test_scoring_ai_heals_when_low() {
        let engine = test_engine();
        let player = TestCombatantBuilder::new("alakazam")
            .with_moves(&["tackle", "recover"])
            .with_hp(20)
            .build();
        let opponent = TestCombatantBuilder::new("blastoise").build();
        let session = create_test_session(player, opponent);
        let mut rng = TurnRng::new_for_test(vec![]);

        let choice = assert_ok(ScoringAI::new().choose_move(Side::Player, &session, &engine, &mut rng));

        assert_eq!(choice, "recover");
    }

    #[test]
    fn test_scoring_ai_skips_status_the_target_already_has() {
        let engine = test_engine();
        let venusaur = || {
            TestCombatantBuilder::new("venusaur")
                .with_moves(&["poison powder", "sleep powder"])
                .build()
        };
        let ai = ScoringAI::new();
        let mut rng = TurnRng::new_for_test(vec![]);

        let healthy = create_test_session(venusaur(), TestCombatantBuilder::new("pikachu").build());
        assert_eq!(
            assert_ok(ai.choose_move(Side::Player, &healthy, &engine, &mut rng)),
            "poison powder"
        );

        let poisoned = create_test_session(
            venusaur(),
            TestCombatantBuilder::new("pikachu")
                .with_status(StatusKind::Poison, 3)
                .build(),
        );
        assert_eq!(
            assert_ok(ai.choose_move(Side::Player, &poisoned, &engine, &mut rng)),
            "sleep powder"
        );
    }

    #[test]
    fn test_score_move_values() {
        let engine = test_engine();
        let ai = ScoringAI::new();
        let charizard = TestCombatantBuilder::new("charizard").build();
        let venusaur = TestCombatantBuilder::new("venusaur").build();
        let gengar = TestCombatantBuilder::new("gengar").build();
        let score = |key: &str, attacker: &Combatant, defender: &Combatant| {
            let move_data = engine.catalog().get_move(key).unwrap();
            ai.score_move(move_data, attacker, defender, &engine)
        };

        assert_eq!(score("ember", &charizard, &venusaur), 120.0);
        assert_eq!(score("slash", &charizard, &venusaur), 73.5);
        assert_eq!(score("slash", &charizard, &gengar), -1.0);
        assert_eq!(score("poison powder", &venusaur, &charizard), 33.75);
    }

    #[rstest]
    #[case(3, "tail whip")]
    #[case(1, "thunder shock")]
    #[case(5, "thunder shock")]
    #[case(100, "thunderbolt")]
    fn test_random_ai_uses_the_rng(#[case] roll: u8, #[case] expected: &str) {
        let engine = test_engine();
        let player = TestCombatantBuilder::new("charizard").build();
        let opponent = TestCombatantBuilder::new("pikachu").build();
        let session = create_test_session(player, opponent);
        let mut rng = TurnRng::new_for_test(vec![roll]);

        let choice = assert_ok(RandomAI::new().choose_move(Side::Opponent, &session, &engine, &mut rng));

        assert_eq!(choice, expected);
    }

    #[test]
    fn test_ai_without_moves_fails() {
        let engine = test_engine();
        let player = TestCombatantBuilder::new("charizard").build();
        let opponent = TestCombatantBuilder::new("pikachu").with_moves(&[]).build();
        let session = create_test_session(player, opponent);
        let mut rng = TurnRng::new_for_test(vec![1]);
        let expected = BattleEngineError::Action(ActionError::NoMovesAvailable("Pikachu".to_string()));

        assert_eq!(
            RandomAI::new()
                .choose_move(Side::Opponent, &session, &engine, &mut rng)
                .unwrap_err(),
            expected
        );
        assert_eq!(
            ScoringAI::new()
                .choose_move(Side::Opponent, &session, &engine, &mut rng)
                .unwrap_err(),
            expected
        );
    }

    #[rstest]
    #[case("blastoise", "charizard", 4.0)]
    #[case("pikachu", "charizard", 4.0)]
    #[case("venusaur", "charizard", 0.0625)]
    #[case("charizard", "venusaur", 16.0)]
    #[case("gengar", "venusaur", 8.0)]
    #[case("alakazam", "alakazam", 1.0)]
    fn test_matchup_score(#[case] candidate: &str, #[case] opponent: &str, #[case] expected: f64) {
        let engine = test_engine();
        let candidate = engine.catalog().get_species(candidate).unwrap();
        let opponent = engine.catalog().get_species(opponent).unwrap();

        let score = matchup_score(engine.chart(), &candidate.types, &opponent.types);

        assert_eq!(score, expected);
    }
}
