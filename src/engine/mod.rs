// Engine modules: config, clock, animation, assets, input, renderer

pub mod animation;
pub mod assets;
pub mod clock;
pub mod config;
pub mod input;
pub mod renderer;
