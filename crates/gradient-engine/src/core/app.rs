use winit::event::WindowEvent;

use super::ctx::AppCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The app owns its gradient and publishes it through [`AppCtx::render`]
/// whenever it changes; the runtime redraws on its own.
pub trait App {
    /// Called once the window and renderer exist.
    fn on_start(&mut self, ctx: &AppCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called for window events, before the runtime handles resize/redraw.
    fn on_window_event(&mut self, ctx: &AppCtx<'_>, event: &WindowEvent) -> AppControl;
}
