// Player movement and animation control

use super::object::GameObject;
use crate::core::math::movement_step;
use crate::engine::animation::AnimationError;
use crate::engine::input::{Action, InputState};

/// Compass facing. Only the four cardinals are reachable through input
/// because diagonal key presses are not composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Facing {
    /// Walk animation name for this facing; diagonals have none
    pub fn walk_animation(&self) -> Option<&'static str> {
        match self {
            Facing::East => Some("walk_east"),
            Facing::North => Some("walk_north"),
            Facing::West => Some("walk_west"),
            Facing::South => Some("walk_south"),
            _ => None,
        }
    }
}

/// Unit displacement and facing for a movement action (y grows down, so
/// north is negative y)
fn movement_direction(action: Action) -> Option<(i32, i32, Facing)> {
    match action {
        Action::MoveEast => Some((1, 0, Facing::East)),
        Action::MoveNorth => Some((0, -1, Facing::North)),
        Action::MoveWest => Some((-1, 0, Facing::West)),
        Action::MoveSouth => Some((0, 1, Facing::South)),
        _ => None,
    }
}

/// The player: a game object plus movement speed and facing.
///
/// Each tick, every held movement key applies its displacement
/// independently; opposite keys cancel out positionally. The last held key
/// in the fixed east, north, west, south order wins the visible facing and
/// walk animation. With no key held the animator idles and the last frame
/// stays on screen.
#[derive(Debug)]
pub struct Player {
    /// The player's drawable entity
    pub object: GameObject,

    /// Movement speed in pixels per second
    speed: u32,

    /// Direction the player faces
    facing: Facing,
}

impl Player {
    /// Create a player over an animated game object.
    ///
    /// Fails if the object's animation set is missing any of the four
    /// cardinal walk animations, so play-time lookups cannot fail later.
    pub fn new(object: GameObject, speed: u32) -> Result<Self, AnimationError> {
        let Some(animator) = object.animator.as_ref() else {
            return Err(AnimationError::UnknownAnimation(
                "player requires an animator".to_string(),
            ));
        };

        for facing in [Facing::East, Facing::North, Facing::West, Facing::South] {
            let name = facing.walk_animation().unwrap_or_default();
            if !animator.animation_set().contains(name) {
                return Err(AnimationError::UnknownAnimation(name.to_string()));
            }
        }

        Ok(Self {
            object,
            speed,
            facing: Facing::South,
        })
    }

    /// Advance animation, then apply held movement keys.
    ///
    /// The base object update runs first so the frame shown this tick comes
    /// from the sequence selected on the previous tick.
    pub fn update(&mut self, delta_ms: u64, input: &InputState) -> Result<(), AnimationError> {
        self.object.update(delta_ms);

        let step = movement_step(self.speed, delta_ms);
        let mut requested = None;

        for action in Action::movement_order() {
            if !input.is_pressed(action) {
                continue;
            }
            let Some((dx, dy, facing)) = movement_direction(action) else {
                continue;
            };
            self.object.rect.translate(dx * step, dy * step);
            self.facing = facing;
            requested = facing.walk_animation();
        }

        if let Some(animator) = self.object.animator.as_mut() {
            animator.play(requested)?;
        }
        Ok(())
    }

    /// Movement speed in pixels per second
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Direction the player faces
    pub fn facing(&self) -> Facing {
        self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::{AnimationSet, Animator, Frame};
    use crate::engine::renderer::TextureHandle;
    use crate::game::object::ObjectKind;
    use std::collections::HashMap;
    use std::sync::Arc;

    const WALKS: [&str; 4] = ["walk_east", "walk_north", "walk_west", "walk_south"];

    fn walk_set() -> Arc<AnimationSet> {
        let mut map = HashMap::new();
        for (row, name) in WALKS.iter().enumerate() {
            let frames = (0..4)
                .map(|i| Frame::new(TextureHandle(row * 4 + i), 64, 64))
                .collect();
            map.insert(name.to_string(), frames);
        }
        Arc::new(AnimationSet::from_sequences(map).unwrap())
    }

    /// Player at the origin with a 13 fps animator (76 ms frame period)
    fn test_player(speed: u32) -> Player {
        let animator = Animator::new(walk_set(), 13).unwrap();
        let base = Frame::new(TextureHandle(0), 64, 64);
        let object = GameObject::new(ObjectKind::Player, base, (0, 0)).with_animator(animator);
        Player::new(object, speed).unwrap()
    }

    fn input_with(actions: &[Action]) -> InputState {
        let mut input = InputState::new();
        for action in actions {
            input.press(*action);
        }
        input
    }

    #[test]
    fn test_requires_all_walk_animations() {
        let mut map = HashMap::new();
        map.insert(
            "walk_east".to_string(),
            vec![Frame::new(TextureHandle(0), 64, 64)],
        );
        let set = Arc::new(AnimationSet::from_sequences(map).unwrap());
        let animator = Animator::new(set, 13).unwrap();
        let base = Frame::new(TextureHandle(0), 64, 64);
        let object = GameObject::new(ObjectKind::Player, base, (0, 0)).with_animator(animator);

        let err = Player::new(object, 100).unwrap_err();
        assert!(matches!(err, AnimationError::UnknownAnimation(name) if name == "walk_north"));
    }

    #[test]
    fn test_requires_an_animator() {
        let base = Frame::new(TextureHandle(0), 64, 64);
        let object = GameObject::new(ObjectKind::Player, base, (0, 0));
        assert!(Player::new(object, 100).is_err());
    }

    #[test]
    fn test_west_walk_one_frame_period() {
        let mut player = test_player(100);
        let input = input_with(&[Action::MoveWest]);

        // First tick selects walk_west without moving (zero delta)
        player.update(0, &input).unwrap();
        assert_eq!(player.facing(), Facing::West);
        assert_eq!(
            player.object.animator.as_ref().unwrap().current_animation(),
            Some("walk_west")
        );

        // One 76 ms frame period: round(100 * 76 / 1000) = 8 px west,
        // and the walk advances to frame index 1
        player.update(76, &input).unwrap();
        assert_eq!(player.object.rect.x, -8);
        assert_eq!(player.object.rect.y, 0);
        assert_eq!(player.object.animator.as_ref().unwrap().frame_index(), 1);
        assert_eq!(
            player.object.current_frame(),
            Frame::new(TextureHandle(2 * 4 + 1), 64, 64)
        );
    }

    #[test]
    fn test_last_key_in_order_wins_facing() {
        let mut player = test_player(100);

        // East and south held together: both displacements apply, but south
        // is later in the evaluation order and takes the facing
        let input = input_with(&[Action::MoveEast, Action::MoveSouth]);
        player.update(100, &input).unwrap();

        assert_eq!(player.object.rect.x, 10);
        assert_eq!(player.object.rect.y, 10);
        assert_eq!(player.facing(), Facing::South);
        assert_eq!(
            player.object.animator.as_ref().unwrap().current_animation(),
            Some("walk_south")
        );
    }

    #[test]
    fn test_opposite_keys_cancel_movement() {
        let mut player = test_player(100);
        let input = input_with(&[Action::MoveEast, Action::MoveWest]);
        player.update(100, &input).unwrap();

        assert_eq!(player.object.rect.x, 0);
        // West is evaluated after east and wins the facing
        assert_eq!(player.facing(), Facing::West);
    }

    #[test]
    fn test_no_keys_idles_animator_and_freezes_frame() {
        let mut player = test_player(100);
        let input = input_with(&[Action::MoveEast]);
        player.update(0, &input).unwrap();
        player.update(76, &input).unwrap();
        assert_eq!(player.object.rect.x, 8);

        // The release tick still advances the walk once (base update runs
        // before the idle request), then the animator goes idle
        let idle = InputState::new();
        player.update(500, &idle).unwrap();
        let shown = player.object.current_frame();
        assert_eq!(
            player.object.animator.as_ref().unwrap().current_animation(),
            None
        );

        // From here on the last displayed frame persists and nothing moves
        player.update(500, &idle).unwrap();
        assert_eq!(player.object.current_frame(), shown);
        assert_eq!(player.object.rect.x, 8);
    }

    #[test]
    fn test_held_key_does_not_restart_walk_cycle() {
        let mut player = test_player(100);
        let input = input_with(&[Action::MoveNorth]);
        player.update(0, &input).unwrap();

        player.update(76, &input).unwrap();
        player.update(76, &input).unwrap();
        // Two frame periods while held: index advanced twice, not reset
        assert_eq!(player.object.animator.as_ref().unwrap().frame_index(), 2);
    }
}
