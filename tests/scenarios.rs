use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use terra_blast::Settings;
use terra_blast::consts::*;
use terra_blast::input::{self, KeyState};
use terra_blast::sim::{
    ActionState, Bomb, GameEvent, GameState, GridCoord, Material, Player, TerrainGrid, TickInput,
    overlaps_grid, tick,
};

/// Three rows of stone under columns -10..10, top surface at y = 200
fn flat_platform() -> TerrainGrid {
    TerrainGrid::from_cells(
        (-10..10).flat_map(|gx| (4..7).map(move |gy| (GridCoord::new(gx, gy), Material::Stone))),
    )
}

fn hold(actions: ActionState) -> impl Fn(&mut Player) {
    move |player| {
        player.handle_input(&actions);
    }
}

#[test]
fn jump_returns_to_resting_height() {
    let grid = flat_platform();
    let rest_y = 200.0 - PLAYER_HEIGHT - PLAYER_PADDING_Y;
    let mut player = Player::new(0, Vec2::new(0.0, rest_y));

    player.step(&grid);
    assert!(player.body.on_ground);

    let jump = hold(ActionState {
        jump: true,
        ..Default::default()
    });
    let idle = hold(ActionState::default());

    jump(&mut player);
    player.step(&grid);
    assert!(!player.body.on_ground);
    assert!(player.body.pos.y < rest_y);

    let mut airborne_ticks = 1;
    for _ in 0..120 {
        idle(&mut player);
        player.step(&grid);
        assert!(!overlaps_grid(&player.body.hitbox(), &grid));
        if !player.body.on_ground {
            airborne_ticks += 1;
        }
    }

    assert!(player.body.on_ground);
    assert!(!player.is_jumping);
    assert_eq!(player.body.vel.y, 0.0);
    assert_eq!(player.body.pos.y, rest_y);
    // 12 / 0.5 ticks up and the same down
    assert!((44..=50).contains(&airborne_ticks), "airborne for {}", airborne_ticks);
}

#[test]
fn preview_matches_real_flight() {
    for (facing_left, held_ticks) in [(false, 45), (true, 90), (false, 1)] {
        let mut player = Player::new(0, Vec2::new(300.0, 100.0));
        if facing_left {
            player.handle_input(&ActionState {
                move_left: true,
                ..Default::default()
            });
            player.body.vel = Vec2::ZERO;
        }

        let charge = ActionState {
            throw_bomb: true,
            ..Default::default()
        };
        for _ in 0..=held_ticks {
            player.handle_input(&charge);
        }
        let preview = player.trajectory.clone();
        assert!(preview.len() > 1);

        let throw = player
            .handle_input(&ActionState::default())
            .expect("release throws");
        assert_eq!(preview[0], throw.origin);

        let grid = TerrainGrid::new();
        let mut bomb = Bomb::new(1, 0, throw.origin, throw.velocity);
        for (k, point) in preview.iter().enumerate().skip(1) {
            for _ in 0..PREVIEW_SAMPLE_EVERY {
                bomb.update(&grid);
            }
            let err = (bomb.center() - *point).length();
            assert!(err < 1e-3, "sample {} off by {}", k, err);
        }
    }
}

fn scripted_input(t: u32) -> TickInput {
    let mut keys = KeyState::new();
    let script: [(u32, u32, &str); 5] = [
        (10, 40, "d"),
        (50, 95, "e"),
        (60, 60, "ArrowUp"),
        (100, 130, "ArrowLeft"),
        (140, 170, "Control"),
    ];
    for (start, end, key) in script {
        if (start..=end).contains(&t) {
            keys.press(key);
        }
    }
    input::tick_input(&Settings::default().bindings, &keys)
}

#[test]
fn match_replays_identically() {
    let settings = Settings::default();
    let mut a = GameState::new(&settings).unwrap();
    let mut b = GameState::new(&settings).unwrap();

    let mut events_a = Vec::new();
    let mut events_b = Vec::new();
    for t in 0..400 {
        let input = scripted_input(t);
        tick(&mut a, &input);
        tick(&mut b, &input);
        events_a.extend(a.drain_events());
        events_b.extend(b.drain_events());
    }

    assert_eq!(events_a, events_b);
    assert_eq!(a.snapshot(), b.snapshot());

    let explosions = events_a
        .iter()
        .filter(|e| matches!(e, GameEvent::Explosion { .. }))
        .count();
    assert_eq!(explosions, 2);
    assert_eq!(a.rng_state.stream, 2);
}

#[test]
fn explosion_carves_crater_and_hurts_opponent() {
    let mut state = GameState::new(&Settings::default()).unwrap();
    for _ in 0..120 {
        tick(&mut state, &TickInput::default());
    }
    state.drain_events();
    let blocks_before = state.grid.len();

    // Player 0's bomb goes off inside the block under player 1
    let victim = &state.players[1];
    let below = Vec2::new(victim.center().x, victim.body.hitbox().max.y + 1.0);
    let target = GridCoord::containing(below).center();
    assert!(state.grid.is_solid(GridCoord::containing(below)));
    let id = state.next_entity_id();
    let mut bomb = Bomb::new(id, 0, target, Vec2::ZERO);
    bomb.ttl = 1;
    state.players[0].bombs.push(bomb);

    tick(&mut state, &TickInput::default());
    let events = state.drain_events();

    let destroyed: usize = events
        .iter()
        .map(|e| match e {
            GameEvent::BlocksDestroyed { cells, .. } => cells.len(),
            _ => 0,
        })
        .sum();
    assert!(destroyed > 0);
    assert_eq!(state.grid.len(), blocks_before - destroyed);

    let damaged = events.iter().any(|e| {
        matches!(e, GameEvent::PlayerDamaged { player: 1, amount, health }
            if *amount > 0 && *health == PLAYER_MAX_HEALTH - *amount)
    });
    assert!(damaged);
    // Owner is exempt by default
    assert_eq!(state.players[0].health, PLAYER_MAX_HEALTH);
}

#[test]
fn random_play_never_leaves_players_inside_terrain() {
    for seed in [1u64, 7, 12345, 90210] {
        let settings = Settings {
            seed,
            ..Settings::default()
        };
        let mut state = GameState::new(&settings).unwrap();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut held = vec![ActionState::default(); state.players.len()];

        for t in 0..2000 {
            // Re-roll each player's held keys every few ticks
            if t % 8 == 0 {
                for actions in &mut held {
                    *actions = ActionState {
                        move_left: rng.random_bool(0.4),
                        move_right: rng.random_bool(0.4),
                        jump: rng.random_bool(0.3),
                        throw_bomb: rng.random_bool(0.2),
                    };
                }
            }
            tick(&mut state, &TickInput::new(held.clone()));

            for player in &state.players {
                assert!(
                    !overlaps_grid(&player.body.hitbox(), &state.grid),
                    "seed {} tick {}: player {} inside terrain at {:?}",
                    seed,
                    t,
                    player.id,
                    player.body.pos
                );
            }
        }
    }
}
