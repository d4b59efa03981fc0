//! Per-frame simulation step
//!
//! One call to [`tick`] runs the whole frame protocol: input, player, world,
//! then the collision resolution passes in a fixed order, then the terminal
//! check. Same state + same input + same elapsed time gives the same result.

use super::collision::{drain_where, first_overlap_mut, overlapping_mut};
use super::monster::Hostile;
use super::player::{Player, PlayerAction};
use super::projectile::Projectile;
use super::state::{GameEvent, GameState, Scene};
use super::timer::Cooldown;
use super::world::Environment;
use crate::platform::{Key, KeyEvent};
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key transitions since the previous frame, in arrival order
    pub events: Vec<KeyEvent>,
}

impl TickInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_events(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Advance the game by one frame that took `dt_ms` of wall-clock time
pub fn tick(state: &mut GameState, tuning: &Tuning, input: &TickInput, dt_ms: u64) {
    if state.scene != Scene::Playing {
        return;
    }

    state.time_ms += dt_ms;
    state.frame += 1;

    // 1. Input
    for &event in &input.events {
        if event.pressed {
            match event.key {
                Key::Escape => {
                    state.set_scene(Scene::Menu);
                    return;
                }
                Key::Save => {
                    state.events.push(GameEvent::SaveRequested);
                    continue;
                }
                _ => {}
            }
        }
        match state.player.handle_input(event) {
            Some(PlayerAction::Swing) => state.events.push(GameEvent::SwordSwing),
            Some(PlayerAction::Jump) => state.events.push(GameEvent::Jump),
            None => {}
        }
    }

    let now_ms = state.time_ms;
    let GameState {
        rng,
        player,
        environment,
        contact_cooldown,
        events,
        ..
    } = &mut *state;

    // 2. Player movement and sword animation
    player.update(&tuning.world, &environment.platforms);

    // 3. Hostiles, coins, removals
    environment.update(tuning, player.center(), now_ms, rng, events);

    // 4. Sword hits, only while swinging
    if player.sword.is_swinging() {
        resolve_sword(player, environment, events);
    }

    // 5. Touching hostiles
    resolve_contact(player, environment, contact_cooldown, now_ms, events);

    // 6. Fireballs hitting the player
    resolve_fireballs(player, environment, events);

    // 7. Reflected fireballs hitting hostiles
    resolve_reflections(player, environment, events);

    // 8. Coin pickup
    collect_coins(player, environment, events);

    // 9. Terminal check
    if !state.player.is_alive() {
        log::info!("Player defeated after {} frames", state.frame);
        state.set_scene(Scene::GameOver);
        state.events.push(GameEvent::GameOver);
    }
}

/// Credit coins and announce growth
fn credit(player: &mut Player, coins: u32, events: &mut Vec<GameEvent>) {
    if coins == 0 {
        return;
    }
    if player.collect_coin(coins) {
        events.push(GameEvent::SwordGrew {
            level: player.sword.level(),
        });
    }
}

fn resolve_sword(player: &mut Player, env: &mut Environment, events: &mut Vec<GameEvent>) {
    let blade = *player.sword.aabb();
    let damage = player.sword.damage();

    let mut earned = 0;
    for tree in overlapping_mut(&mut env.trees, blade, |t| &t.aabb) {
        if tree.cut {
            continue;
        }
        let coins = tree.take_hit(damage);
        events.push(GameEvent::TreeHit);
        if coins > 0 {
            events.push(GameEvent::TreeCut { coins });
            earned += coins;
        }
    }

    for hostile in overlapping_mut(&mut env.hostiles, blade, |h| h.aabb()) {
        if !hostile.is_alive() {
            continue;
        }
        let kind = hostile.kind();
        let coins = hostile.take_damage(damage);
        log::debug!("Sword hit {:?} for {}", kind, damage);
        events.push(GameEvent::HostileHit { kind });
        if coins > 0 {
            events.push(GameEvent::HostileDefeated { kind, coins });
            earned += coins;
        }
    }
    credit(player, earned, events);

    let sword = &player.sword;
    let sources = env
        .hostiles
        .iter_mut()
        .filter_map(Hostile::projectiles_mut)
        .chain(std::iter::once(&mut env.stray_projectiles));
    for projectiles in sources {
        for projectile in overlapping_mut(projectiles, blade, |p| &p.aabb) {
            if projectile.reflected {
                continue;
            }
            sword.reflect(projectile);
            events.push(GameEvent::FireballReflected);
        }
    }
}

/// At most one hit per cooldown, from the first overlapping hostile
fn resolve_contact(
    player: &mut Player,
    env: &mut Environment,
    cooldown: &mut Cooldown,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    if !cooldown.is_ready(now_ms) {
        return;
    }
    let body = *player.aabb();
    let attacker = first_overlap_mut(&mut env.hostiles, &body, |h| h.aabb(), Hostile::is_alive);
    if let Some(hostile) = attacker {
        let amount = hostile.contact_damage();
        player.take_damage(amount);
        cooldown.fire(now_ms);
        events.push(GameEvent::PlayerHurt {
            amount,
            health: player.health,
        });
    }
}

/// Unreflected fireballs touching the player are consumed; reflected ones pass through
fn resolve_fireballs(player: &mut Player, env: &mut Environment, events: &mut Vec<GameEvent>) {
    let body = *player.aabb();
    let sources = env
        .hostiles
        .iter_mut()
        .filter_map(Hostile::projectiles_mut)
        .chain(std::iter::once(&mut env.stray_projectiles));
    for projectiles in sources {
        let hits = drain_where(projectiles, |p| !p.reflected && p.aabb.intersects(&body));
        for fireball in hits {
            player.take_damage(fireball.damage);
            events.push(GameEvent::PlayerHurt {
                amount: fireball.damage,
                health: player.health,
            });
        }
    }
}

fn resolve_reflections(player: &mut Player, env: &mut Environment, events: &mut Vec<GameEvent>) {
    for index in 0..env.hostiles.len() {
        let Some(slot) = env.hostiles[index].projectiles_mut() else {
            continue;
        };
        let mut projectiles = std::mem::take(slot);
        strike_hostiles(&mut projectiles, &mut env.hostiles, player, events);
        if let Some(slot) = env.hostiles[index].projectiles_mut() {
            *slot = projectiles;
        }
    }

    let mut strays = std::mem::take(&mut env.stray_projectiles);
    strike_hostiles(&mut strays, &mut env.hostiles, player, events);
    env.stray_projectiles = strays;
}

/// Each reflected projectile is spent on the first living hostile it touches
fn strike_hostiles(
    projectiles: &mut Vec<Projectile>,
    hostiles: &mut [Hostile],
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) {
    projectiles.retain(|projectile| {
        if !projectile.reflected {
            return true;
        }
        let target = first_overlap_mut(hostiles, &projectile.aabb, |h| h.aabb(), Hostile::is_alive);
        let Some(target) = target else {
            return true;
        };
        let kind = target.kind();
        let coins = target.take_damage(projectile.hit_damage());
        log::debug!("Reflected fireball hit {:?} for {}", kind, projectile.hit_damage());
        events.push(GameEvent::HostileHit { kind });
        if coins > 0 {
            events.push(GameEvent::HostileDefeated { kind, coins });
            credit(player, coins, events);
        }
        false
    });
}

fn collect_coins(player: &mut Player, env: &mut Environment, events: &mut Vec<GameEvent>) {
    let body = *player.aabb();
    let picked = drain_where(&mut env.coins, |c| !c.collected && c.aabb().intersects(&body));
    for coin in picked {
        events.push(GameEvent::CoinCollected { value: coin.value });
        credit(player, coin.value, events);
    }
}
