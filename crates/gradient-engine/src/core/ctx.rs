use winit::window::{Window, WindowId};

use crate::gradient::Gradient;
use crate::render::{RenderError, Renderer};

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Context passed to `core::App` callbacks.
pub struct AppCtx<'a> {
    pub window: WindowCtx<'a>,
    pub renderer: &'a Renderer,
}

impl<'a> AppCtx<'a> {
    /// Publishes `gradient` for the next refresh.
    pub fn render(&self, gradient: &Gradient) -> Result<(), RenderError> {
        self.renderer.render(gradient)
    }
}
