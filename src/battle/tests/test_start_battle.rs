#[cfg(test)]
mod tests {
    use crate::battle::engine::BattleEngine;
    use crate::battle::state::{GameState, TurnRng};
    use crate::battle::tests::common::{assert_ok, test_engine};
    use crate::catalog::Catalog;
    use crate::errors::{ActionError, BattleEngineError, CatalogError};
    use crate::rules::BattleRules;
    use crate::type_chart::TypeChart;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn single_species_engine() -> BattleEngine {
        let builtin = Catalog::builtin().unwrap();
        let pikachu = builtin.get_species("pikachu").unwrap().clone();
        let moves: Vec<_> = pikachu
            .moves
            .iter()
            .map(|key| (key.clone(), builtin.get_move(key).unwrap().clone()))
            .collect();
        let catalog = Catalog::new(vec![("pikachu".to_string(), pikachu)], moves).unwrap();
        BattleEngine::new(
            catalog,
            TypeChart::builtin().unwrap().clone(),
            BattleRules::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_start_battle_creates_fresh_combatants() {
        let engine = test_engine();
        let mut rng = TurnRng::new_for_test(vec![]);

        let session = assert_ok(engine.start_battle(" PIKACHU ", "Blastoise", &mut rng));

        assert_eq!(session.player.species, "pikachu");
        assert_eq!(session.player.name, "Pikachu");
        assert_eq!(session.opponent.species, "blastoise");
        assert_eq!(session.opponent.current_health(), 79);
        assert_eq!(session.turn_number, 0);
        assert_eq!(session.game_state, GameState::WaitingForPlayerAction);
        assert!(session.is_player_turn());
    }

    #[rstest]
    #[case("First roll picks the first other species", 1, "alakazam")]
    #[case("Second candidate", 2, "blastoise")]
    #[case("Rolls wrap around the candidates", 7, "blastoise")]
    #[case("Last candidate", 5, "venusaur")]
    fn test_matching_species_is_reselected(
        #[case] desc: &str,
        #[case] roll: u8,
        #[case] expected: &str,
    ) {
        let engine = test_engine();
        let mut rng = TurnRng::new_for_test(vec![roll]);

        let session = assert_ok(engine.start_battle("charizard", "charizard", &mut rng));

        assert_eq!(session.player.species, "charizard", "{}", desc);
        assert_eq!(session.opponent.species, expected, "{}", desc);
    }

    #[test]
    fn test_pick_opponent_never_returns_the_player() {
        let engine = test_engine();
        for seed in 0..50 {
            let mut rng = TurnRng::seeded(seed);
            let picked = assert_ok(engine.pick_opponent("Gengar", &mut rng));
            assert!(engine.catalog().get_species(&picked).is_ok());
            assert_ne!(picked, "gengar");
        }
    }

    #[rstest]
    #[case("missingno", "pikachu", "missingno")]
    #[case("pikachu", "Missing-No", "missing no")]
    fn test_unknown_species_is_rejected(
        #[case] player: &str,
        #[case] opponent: &str,
        #[case] missing: &str,
    ) {
        let engine = test_engine();
        let mut rng = TurnRng::new_for_test(vec![]);

        let result = engine.start_battle(player, opponent, &mut rng);

        assert_eq!(
            result.unwrap_err(),
            BattleEngineError::Catalog(CatalogError::SpeciesNotFound(missing.to_string()))
        );
    }

    #[test]
    fn test_battle_ids_are_unique_per_engine() {
        let engine = test_engine();
        let mut rng = TurnRng::new_for_test(vec![]);

        let first = assert_ok(engine.start_battle("pikachu", "gengar", &mut rng));
        let second = assert_ok(engine.start_battle("pikachu", "gengar", &mut rng));

        assert_eq!(first.battle_id, "battle-1");
        assert_eq!(second.battle_id, "battle-2");
    }

    #[rstest]
    #[case("Water and electric tie; key order favors blastoise", "charizard", "blastoise")]
    #[case("Fire and flying both hit grass", "venusaur", "charizard")]
    fn test_choose_best_opponent(#[case] desc: &str, #[case] player: &str, #[case] expected: &str) {
        let engine = test_engine();

        let best = assert_ok(engine.choose_best_opponent(player));

        assert_eq!(best, expected, "{}", desc);
    }

    #[test]
    fn test_no_distinct_opponent_in_single_species_catalog() {
        let engine = single_species_engine();
        let mut rng = TurnRng::new_for_test(vec![1]);

        let expected = BattleEngineError::Action(ActionError::NoDistinctOpponent(
            "pikachu".to_string(),
        ));
        assert_eq!(
            engine.start_battle("pikachu", "pikachu", &mut rng).unwrap_err(),
            expected
        );
        assert_eq!(engine.choose_best_opponent("pikachu").unwrap_err(), expected);
    }
}
