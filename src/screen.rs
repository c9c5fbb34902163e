use raylib::prelude::*;

/// Views the app shell can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Intro,
    Forge,
}

pub trait Screen {
    /// Advances the screen by one frame. Returning a route asks the shell to
    /// tear this screen down and mount that one instead.
    fn update(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> Option<Route>;

    /// Draws into the fixed-size framebuffer.
    fn draw(&self, d: &mut RaylibDrawHandle);
}
