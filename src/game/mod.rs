// Game orchestration
//
// The `Game` owns the background, the player, and any static props. Each
// tick it updates every object before anything is drawn, then produces the
// draw list: background first, props next, player on top of everything.

pub mod object;
pub mod player;

pub use object::{GameObject, ObjectKind};
pub use player::{Facing, Player};

use crate::core::math::Rect;
use crate::engine::animation::{AnimationSet, Animator, Frame};
use crate::engine::assets::{name_frames, slice, AssetKind, AssetLoader, SheetSpec};
use crate::engine::config::GameConfig;
use crate::engine::input::{Action, InputState};
use crate::engine::renderer::{DrawCommand, Renderer};
use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

/// Background image file under the image root
const BACKGROUND_IMAGE: &str = "background.png";

/// Sprite animation playback rate. 13 fps truncates to a 76 ms frame period.
const ANIMATION_FRAME_RATE: u32 = 13;

/// Player walking speed in pixels per second
const PLAYER_SPEED: u32 = 150;

/// Layout of the player spritesheet: four walk animations, one per row,
/// four frames each, authored on a 32 px grid and scaled up to tile size
pub fn player_sheet_spec(resolution: u32) -> SheetSpec {
    SheetSpec::new("player.png", (32, 32))
        .with_resize_to((resolution, resolution))
        .with_frames_per_row(4)
        .with_animation("walk_east")
        .with_animation("walk_north")
        .with_animation("walk_west")
        .with_animation("walk_south")
        .with_frame_counts(vec![4, 4, 4, 4])
}

/// Load a spritesheet and assemble it into a shared animation set:
/// decode, slice into cells, upload each cell, then name the rows.
pub fn build_animation_set(
    renderer: &mut Renderer,
    loader: &AssetLoader,
    spec: &SheetSpec,
) -> Result<Arc<AnimationSet>> {
    let sheet = loader
        .load_image(AssetKind::Spritesheet, &spec.file)
        .with_context(|| format!("loading spritesheet {}", spec.file))?;

    let images = slice(&sheet, &spec.slice_options());

    let mut frames = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        frames.push(renderer.upload_frame(image, &format!("{}#{}", spec.file, i))?);
    }

    let named = name_frames(
        &frames,
        &spec.names,
        spec.frames_per_row,
        spec.frames_per_animation.as_deref(),
    )
    .with_context(|| format!("naming animations of {}", spec.file))?;

    let set = AnimationSet::from_sequences(named)
        .with_context(|| format!("building animation set from {}", spec.file))?;

    info!("Loaded {} animations from {}", set.len(), spec.file);
    Ok(Arc::new(set))
}

/// An instance of the game: object collection, background, quit flag
pub struct Game {
    /// Background frame covering the whole screen
    background: Frame,

    /// Screen rectangle the background is drawn at
    screen_rect: Rect,

    /// The player character
    player: Player,

    /// Static objects, drawn in insertion order
    props: Vec<GameObject>,

    /// Set once a quit action is observed; checked by the host loop
    quit_requested: bool,
}

impl Game {
    /// Load assets and spawn the player in the middle of the screen
    pub fn new(config: &GameConfig, renderer: &mut Renderer, loader: &AssetLoader) -> Result<Self> {
        let (screen_w, screen_h) = config.screen_size();

        let background_image = loader
            .load_image(AssetKind::Image, BACKGROUND_IMAGE)
            .context("loading background")?
            .to_rgba8();
        let background = renderer.upload_frame(&background_image, BACKGROUND_IMAGE)?;

        let spec = player_sheet_spec(config.resolution);
        let animations = build_animation_set(renderer, loader, &spec)?;

        let animator = Animator::new(animations.clone(), ANIMATION_FRAME_RATE)?;
        let base_frame = animations
            .get("walk_south")
            .and_then(|frames| frames.first().copied())
            .context("player sheet has no walk_south frames")?;

        let spawn = (
            (screen_w / 2) as i32 - (config.resolution / 2) as i32,
            (screen_h / 2) as i32 - (config.resolution / 2) as i32,
        );
        let object =
            GameObject::new(ObjectKind::Player, base_frame, spawn).with_animator(animator);
        let player = Player::new(object, PLAYER_SPEED)?;

        info!("Game ready, player spawned at {:?}", spawn);

        Ok(Self {
            background,
            screen_rect: Rect::new(0, 0, screen_w, screen_h),
            player,
            props: Vec::new(),
            quit_requested: false,
        })
    }

    /// Add a static object to the scene
    pub fn add_prop(&mut self, prop: GameObject) {
        self.props.push(prop);
    }

    /// Advance one tick: observe quit, then update every object
    pub fn update(&mut self, delta_ms: u64, input: &InputState) -> Result<()> {
        if input.is_pressed(Action::Quit) {
            self.quit_requested = true;
        }

        for prop in &mut self.props {
            prop.update(delta_ms);
        }
        self.player.update(delta_ms, input)?;
        Ok(())
    }

    /// Draw commands for this tick, in draw order
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.props.len() + 2);
        commands.push(DrawCommand::new(self.background, self.screen_rect));
        for prop in &self.props {
            commands.push(prop.draw_command());
        }
        commands.push(self.player.object.draw_command());
        commands
    }

    /// Whether a quit action was observed
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// The player character
    pub fn player(&self) -> &Player {
        &self.player
    }
}
