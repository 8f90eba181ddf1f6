pub mod anim;
pub mod camera;
pub mod constants;
pub mod ease;
pub mod fit;
pub mod flower;
pub mod math;
pub mod noise;
pub mod params;
pub mod walker;

pub static FLOWER_WGSL: &str = include_str!("../shaders/flower.wgsl");

pub use anim::*;
pub use camera::*;
pub use constants::*;
pub use fit::*;
pub use flower::*;
pub use noise::*;
pub use params::*;
pub use walker::*;
