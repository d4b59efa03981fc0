//! Read-only frame snapshot for the draw collaborator
//!
//! Built once per frame from [`GameState`]. The drawing side gets a sprite
//! handle, the collision box and an orientation for each visible entity, and
//! is never asked anything back. When an asset is missing, the placeholder
//! shape is drawn at exactly the same box.

use crate::sim::{Aabb, Facing, GameState, Hostile};

/// Image handle for an entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Sword,
    Tree,
    Monster,
    Dragon,
    Fireball,
    Coin,
    Platform,
}

/// Shape drawn when the sprite's image failed to load
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placeholder {
    Rect([f32; 4]),
    Circle([f32; 4]),
}

const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

impl Sprite {
    pub fn asset_path(&self) -> &'static str {
        match self {
            Sprite::Player => "assets/images/player.png",
            Sprite::Sword => "assets/images/sword.png",
            Sprite::Tree => "assets/images/tree.png",
            Sprite::Monster => "assets/images/monster.png",
            Sprite::Dragon => "assets/images/dragon.png",
            Sprite::Fireball => "assets/images/fireball.png",
            Sprite::Coin => "assets/images/coin.png",
            Sprite::Platform => "assets/images/platform.png",
        }
    }

    pub fn placeholder(&self) -> Placeholder {
        match self {
            Sprite::Player => Placeholder::Rect(rgb(0, 150, 255)),
            Sprite::Sword => Placeholder::Rect(rgb(150, 150, 150)),
            Sprite::Tree => Placeholder::Rect(rgb(0, 100, 0)),
            Sprite::Monster => Placeholder::Rect(rgb(255, 0, 0)),
            Sprite::Dragon => Placeholder::Rect(rgb(128, 0, 128)),
            Sprite::Fireball => Placeholder::Circle(rgb(255, 120, 0)),
            Sprite::Coin => Placeholder::Circle(rgb(255, 255, 0)),
            Sprite::Platform => Placeholder::Rect(rgb(100, 100, 100)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub sprite: Sprite,
    pub aabb: Aabb,
    /// Flip horizontally
    pub mirrored: bool,
    /// Rotation in degrees (sword only, 0 otherwise)
    pub angle: f32,
}

impl RenderItem {
    fn upright(sprite: Sprite, aabb: Aabb, facing: Facing) -> Self {
        Self {
            sprite,
            aabb,
            mirrored: !facing.is_right(),
            angle: 0.0,
        }
    }
}

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub health: i32,
    pub coins: u32,
    pub sword_level: u32,
    pub sword_damage: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Back to front
    pub items: Vec<RenderItem>,
    pub hud: Hud,
}

pub fn snapshot(state: &GameState) -> RenderFrame {
    let env = &state.environment;
    let player = &state.player;
    let mut items = Vec::with_capacity(
        env.platforms.len() + env.trees.len() + env.coins.len() + env.hostiles.len() + 2,
    );

    for platform in &env.platforms {
        items.push(RenderItem::upright(Sprite::Platform, platform.aabb, Facing::Right));
    }
    for tree in env.trees.iter().filter(|t| !t.cut) {
        items.push(RenderItem::upright(Sprite::Tree, tree.aabb, Facing::Right));
    }
    for coin in env.coins.iter().filter(|c| !c.collected) {
        items.push(RenderItem::upright(Sprite::Coin, *coin.aabb(), Facing::Right));
    }
    for hostile in env.living_hostiles() {
        let sprite = match hostile {
            Hostile::Monster(_) => Sprite::Monster,
            Hostile::Dragon(_) => Sprite::Dragon,
        };
        items.push(RenderItem::upright(sprite, *hostile.aabb(), hostile.facing()));
    }

    // Fireballs keep drawing after their dragon is gone
    let fireballs = env
        .hostiles
        .iter()
        .flat_map(|h| h.projectiles())
        .chain(&env.stray_projectiles)
        .filter(|p| p.active);
    for fireball in fireballs {
        let facing = Facing::from_right(fireball.direction.x >= 0.0);
        items.push(RenderItem::upright(Sprite::Fireball, fireball.aabb, facing));
    }

    items.push(RenderItem::upright(Sprite::Player, *player.aabb(), player.facing));
    items.push(RenderItem {
        sprite: Sprite::Sword,
        aabb: *player.sword.aabb(),
        mirrored: false,
        angle: player.sword.angle(),
    });

    RenderFrame {
        items,
        hud: Hud {
            health: player.health,
            coins: player.coins,
            sword_level: player.sword.level(),
            sword_damage: player.sword.damage(),
        },
    }
}
