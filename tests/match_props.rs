use naval_battle::{
    AttackOutcome, Command, Coord, Match, MatchConfig, MatchId, Phase, Player, RandomPlayer, Side,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

const SIZE: usize = 6;

fn apply_fleet(game: &mut Match, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::PlaceShip { side, kind, cells } => {
                game.place_ship(side, &kind, &cells).unwrap();
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}

fn total_remaining(game: &Match, side: Side) -> usize {
    game.config()
        .catalog()
        .classes()
        .iter()
        .map(|c| game.remaining_of(side, &c.name).unwrap())
        .sum()
}

/// Both fleets confined to rows 3..6 so rows 0..3 are open water on both boards.
fn lower_half_match(seed: u64) -> Match {
    let mut game = Match::new(MatchId(seed), "one", "two", MatchConfig::default());
    let fleet = [
        ("carrier", vec![(3, 0), (3, 1), (3, 2)]),
        ("torpedo", vec![(4, 0), (5, 0)]),
        ("torpedo", vec![(4, 4), (4, 5)]),
        ("submarine", vec![(5, 2)]),
        ("submarine", vec![(5, 4)]),
        ("submarine", vec![(3, 5)]),
    ];
    for side in Side::BOTH {
        for (kind, cells) in &fleet {
            let cells: Vec<Coord> = cells.iter().map(|&(r, c)| Coord::new(r, c)).collect();
            game.place_ship(side, kind, &cells).unwrap();
        }
    }
    game.start_combat().unwrap();
    game
}

fn open_water() -> Vec<Coord> {
    (0..3)
        .flat_map(|r| (0..SIZE).map(move |c| Coord::new(r, c)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_decrements_one_count(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Match::new(MatchId(1), "one", "two", MatchConfig::default());
        let fleet = RandomPlayer::new().plan_fleet(&mut rng, Side::Two, game.config()).unwrap();
        let total = game.config().catalog().total_ships();
        prop_assert_eq!(fleet.len(), total);

        for (placed, command) in fleet.into_iter().enumerate() {
            prop_assert!(!game.is_ready_for_combat(Side::Two));
            prop_assert_eq!(total_remaining(&game, Side::Two), total - placed);
            if let Command::PlaceShip { side, kind, cells } = command {
                let before = game.remaining_of(side, &kind).unwrap();
                let ack = game.place_ship(side, &kind, &cells).unwrap();
                prop_assert_eq!(ack.remaining, before - 1);
                prop_assert_eq!(game.remaining_of(side, &kind), Some(before - 1));
                // a spent kind cannot be placed again
                if ack.remaining == 0 {
                    prop_assert!(game.place_ship(side, &kind, &cells).is_err());
                }
            }
        }
        prop_assert_eq!(total_remaining(&game, Side::Two), 0);
        prop_assert!(game.is_ready_for_combat(Side::Two));
        prop_assert!(!game.is_ready_for_combat(Side::One));
        prop_assert_eq!(game.ships_afloat(Side::Two), total);
    }

    #[test]
    fn misses_always_flip_turn(seed in any::<u64>(), order in Just(open_water()).prop_shuffle(), n in 1..18usize) {
        let mut game = lower_half_match(seed);
        let mut attacker = Side::One;
        for &target in order.iter().take(n) {
            let record = game.attack(attacker, target).unwrap();
            prop_assert_eq!(record.outcome, AttackOutcome::Miss);
            attacker = attacker.opponent();
            prop_assert_eq!(game.active_side(), Some(attacker));
        }
        prop_assert_eq!(game.history().len(), n);
    }

    #[test]
    fn hits_keep_turn_until_victory(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game = Match::new(MatchId(2), "one", "two", MatchConfig::default());
        for side in Side::BOTH {
            let fleet = RandomPlayer::new().plan_fleet(&mut rng, side, game.config()).unwrap();
            apply_fleet(&mut game, fleet);
        }
        game.start_combat().unwrap();

        let board = game.own_board(Side::Two);
        let mut targets: Vec<Coord> = board
            .iter()
            .filter(|(_, cell)| cell.ship().is_some())
            .map(|(c, _)| c)
            .collect();
        // deterministic shuffle from the seed
        let len = targets.len();
        for i in (1..len).rev() {
            let j = (seed as usize).wrapping_mul(i + 7) % (i + 1);
            targets.swap(i, j);
        }

        let mut sunk = 0;
        for (i, &target) in targets.iter().enumerate() {
            let afloat_before = game.ships_afloat(Side::Two);
            let record = game.attack(Side::One, target).unwrap();
            prop_assert!(record.outcome.is_hit());

            // sunk iff every cell of that ship is now attacked
            let (id, _) = board.get(target).unwrap().ship().unwrap();
            let now = game.own_board(Side::Two);
            let all_hit = now
                .iter()
                .filter(|(_, cell)| cell.ship().map(|(s, _)| s) == Some(id))
                .all(|(_, cell)| cell.is_attacked());
            prop_assert_eq!(record.outcome == AttackOutcome::Sunk, all_hit);
            if record.outcome == AttackOutcome::Sunk {
                sunk += 1;
                prop_assert_eq!(game.ships_afloat(Side::Two), afloat_before - 1);
            }

            if i + 1 < len {
                prop_assert_eq!(game.phase(), Phase::Combat);
                prop_assert_eq!(game.active_side(), Some(Side::One));
                prop_assert_eq!(record.winner, None);
            } else {
                prop_assert_eq!(afloat_before, 1);
                prop_assert_eq!(game.phase(), Phase::Finished);
                prop_assert_eq!(record.winner, Some(Side::One));
                prop_assert_eq!(game.winner(), Some(Side::One));
            }
        }
        prop_assert_eq!(sunk, game.config().catalog().total_ships());
    }
}
