//! The player character

use glam::Vec2;

use super::aabb::Aabb;
use super::body::Body;
use super::state::Facing;
use super::sword::Sword;
use super::world::Platform;
use crate::platform::{Key, KeyEvent};
use crate::tuning::{PlayerTuning, Tuning, WorldTuning};

/// What an input event made the player do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Swing,
    Jump,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub coins: u32,
    pub facing: Facing,
    pub sword: Sword,
    speed: f32,
    jump_impulse: f32,
    moving_left: bool,
    moving_right: bool,
    /// A movement key already started a swing during this key-hold
    swing_latched: bool,
}

impl Player {
    /// Create with the top-left corner at `pos`
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let params: PlayerTuning = tuning.player;
        let mut player = Self {
            body: Body::new(Aabb::new(pos, params.size), params.gravity),
            health: params.health,
            coins: 0,
            facing: Facing::Right,
            sword: Sword::new(tuning.sword),
            speed: params.speed,
            jump_impulse: params.jump_impulse,
            moving_left: false,
            moving_right: false,
            swing_latched: false,
        };
        player.sword.place(player.center(), player.facing);
        player
    }

    /// Standing on the ground in the middle of the screen
    pub fn spawn(tuning: &Tuning) -> Self {
        let size = tuning.player.size;
        let pos = Vec2::new(
            tuning.world.screen_width / 2.0 - size.x / 2.0,
            tuning.world.ground_y() - size.y,
        );
        Self::new(pos, tuning)
    }

    pub fn aabb(&self) -> &Aabb {
        &self.body.aabb
    }

    pub fn center(&self) -> Vec2 {
        self.body.aabb.center()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn handle_input(&mut self, event: KeyEvent) -> Option<PlayerAction> {
        if !event.pressed {
            match event.key {
                Key::Left => {
                    self.moving_left = false;
                    self.swing_latched = false;
                }
                Key::Right => {
                    self.moving_right = false;
                    self.swing_latched = false;
                }
                _ => {}
            }
            return None;
        }

        match event.key {
            Key::Left => {
                self.moving_left = true;
                self.facing = Facing::Left;
                self.swing_on_move()
            }
            Key::Right => {
                self.moving_right = true;
                self.facing = Facing::Right;
                self.swing_on_move()
            }
            Key::Jump => self.body.jump(self.jump_impulse).then_some(PlayerAction::Jump),
            Key::Attack => self.sword.start_swing(self.facing).then_some(PlayerAction::Swing),
            _ => None,
        }
    }

    fn swing_on_move(&mut self) -> Option<PlayerAction> {
        if self.sword.is_swinging() || self.swing_latched {
            return None;
        }
        self.swing_latched = true;
        self.sword.start_swing(self.facing);
        Some(PlayerAction::Swing)
    }

    /// Movement, gravity/platforms, then the sword follows
    pub fn update(&mut self, world: &WorldTuning, platforms: &[Platform]) {
        if self.moving_left && !self.moving_right {
            self.body.aabb.pos.x -= self.speed;
        } else if self.moving_right && !self.moving_left {
            self.body.aabb.pos.x += self.speed;
        }
        self.body.aabb.clamp_x(world.screen_width);

        self.body.apply_gravity_and_move(world.ground_y(), platforms);

        let center = self.center();
        self.sword.tick(center, self.facing);
    }

    /// Non-positive amounts are ignored
    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.health = (self.health - amount).max(0);
        log::debug!("Player took {} damage, health {}", amount, self.health);
    }

    /// Add coins and let the sword grow; returns true if it grew
    pub fn collect_coin(&mut self, amount: u32) -> bool {
        self.coins = self.coins.saturating_add(amount);
        self.sword.try_grow(self.coins)
    }

    /// Restore persisted fields; the sword level is derived from the coins
    pub fn restore(&mut self, health: i32, coins: u32, facing: Facing) {
        self.health = health.max(0);
        self.coins = coins;
        self.facing = facing;
        self.sword.restore_from_coins(coins);
        let center = self.center();
        self.sword.place(center, facing);
    }
}
