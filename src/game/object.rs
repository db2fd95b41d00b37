// Game object model

use crate::core::math::Rect;
use crate::engine::animation::{Animator, Frame};
use crate::engine::renderer::DrawCommand;

/// What kind of entity a game object is.
///
/// New kinds are added here and given a constructor; there is no subclassing
/// and no shared default image between instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// The player character
    Player,
    /// Static decoration
    Prop,
}

/// A positioned, drawable entity.
///
/// Owns a screen-space rectangle sized from its base frame, an optional
/// animator, and the frame currently selected for drawing.
#[derive(Debug)]
pub struct GameObject {
    /// Entity kind tag
    pub kind: ObjectKind,

    /// Position and size on screen
    pub rect: Rect,

    /// Frame timer, when the object is animated
    pub animator: Option<Animator>,

    /// The frame currently on screen
    frame: Frame,
}

impl GameObject {
    /// Create an object at a location, sized from its base frame
    pub fn new(kind: ObjectKind, frame: Frame, location: (i32, i32)) -> Self {
        Self {
            kind,
            rect: Rect::new(location.0, location.1, frame.width, frame.height),
            animator: None,
            frame,
        }
    }

    /// Attach an animator
    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Advance the animator, if any, by `delta_ms`.
    ///
    /// The displayed frame is replaced only when the animator yields one; an
    /// idle animator leaves the last frame on screen.
    pub fn update(&mut self, delta_ms: u64) {
        if let Some(animator) = self.animator.as_mut() {
            if let Some(frame) = animator.update(delta_ms) {
                self.frame = frame;
            }
        }
    }

    /// The frame currently selected for drawing
    pub fn current_frame(&self) -> Frame {
        self.frame
    }

    /// The draw command for this tick
    pub fn draw_command(&self) -> DrawCommand {
        DrawCommand::new(self.frame, self.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::AnimationSet;
    use crate::engine::renderer::TextureHandle;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn frame(index: usize) -> Frame {
        Frame::new(TextureHandle(index), 64, 64)
    }

    fn walk_animator() -> Animator {
        let mut map = HashMap::new();
        map.insert("walk".to_string(), vec![frame(0), frame(1), frame(2)]);
        let set = Arc::new(AnimationSet::from_sequences(map).unwrap());
        Animator::new(set, 10).unwrap()
    }

    #[test]
    fn test_rect_sized_from_base_frame() {
        let object = GameObject::new(ObjectKind::Prop, frame(7), (10, 20));
        assert_eq!(object.rect, Rect::new(10, 20, 64, 64));
        assert_eq!(object.current_frame(), frame(7));
    }

    #[test]
    fn test_static_object_keeps_its_frame() {
        let mut object = GameObject::new(ObjectKind::Prop, frame(7), (0, 0));
        object.update(1000);
        assert_eq!(object.current_frame(), frame(7));
    }

    #[test]
    fn test_playing_animator_replaces_frame() {
        let mut animator = walk_animator();
        animator.play(Some("walk")).unwrap();

        let mut object =
            GameObject::new(ObjectKind::Player, frame(9), (0, 0)).with_animator(animator);
        object.update(100);
        assert_eq!(object.current_frame(), frame(1));
    }

    #[test]
    fn test_idle_animator_leaves_frame_in_place() {
        // Animator attached but idle: the base frame persists
        let mut object =
            GameObject::new(ObjectKind::Player, frame(9), (0, 0)).with_animator(walk_animator());
        object.update(500);
        assert_eq!(object.current_frame(), frame(9));
    }

    #[test]
    fn test_draw_command_carries_rect_and_frame() {
        let object = GameObject::new(ObjectKind::Prop, frame(3), (5, 6));
        let command = object.draw_command();
        assert_eq!(command.rect, Rect::new(5, 6, 64, 64));
        assert_eq!(command.frame, frame(3));
    }
}
