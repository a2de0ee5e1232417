//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerBullet,
}

/// Player: blocked by walls, touched by enemies.
#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy])
}

/// Enemy: walls, the player, other enemies and player bullets.
#[inline]
pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Player, Layer::Enemy, Layer::PlayerBullet],
    )
}

/// Player bullets only care about things that can be hurt.
#[inline]
pub fn player_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy])
}

/// Keep the membership but clear filters, so the entity stops generating
/// new contacts without a structural change.
#[inline]
pub fn non_interacting(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, [] as [Layer; 0])
}
