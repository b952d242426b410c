// Engine modules: renderer, input, frame timing

pub mod game_loop;
pub mod input;
pub mod renderer;
