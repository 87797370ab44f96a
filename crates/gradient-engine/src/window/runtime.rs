use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, AppCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::{GradientView, RefreshOutcome, Renderer, RendererConfig};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gradient".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        renderer_config: RendererConfig,
        app: A,
    ) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            renderer_config,
            app,
            session: None,
            exit_requested: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Everything that lives as long as the window.
struct Session {
    renderer: Renderer,
    view: GradientView,
    entry: WindowEntry,
}

impl Session {
    fn id(&self) -> WindowId {
        self.entry.borrow_window().id()
    }

    /// Requests a redraw only when a refresh would draw something.
    fn request_redraw_if_needed(&self) {
        let drawable = self.entry.with_gpu(|gpu| {
            let size = gpu.size();
            size.width > 0 && size.height > 0
        });
        if drawable && self.view.needs_refresh() {
            self.entry.borrow_window().request_redraw();
        }
    }
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    renderer_config: RendererConfig,
    app: A,

    session: Option<Session>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_session(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let renderer = entry.with_gpu(|gpu| {
            Renderer::new(
                gpu.device(),
                gpu.queue(),
                gpu.surface_format(),
                self.renderer_config.clone(),
            )
        })?;
        let view = GradientView::new(&renderer);

        Ok(Session {
            renderer,
            view,
            entry,
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        let session = match self.create_session(event_loop) {
            Ok(session) => session,
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.request_exit(event_loop);
                return;
            }
        };

        let control = {
            let ctx = AppCtx {
                window: WindowCtx {
                    id: session.id(),
                    window: session.entry.borrow_window(),
                },
                renderer: &session.renderer,
            };
            self.app.on_start(&ctx)
        };

        session.request_redraw_if_needed();
        self.session = Some(session);

        if control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if let Some(session) = self.session.as_ref() {
            session.request_redraw_if_needed();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows so the app and the session can be used together.
        let (app, session_slot) = (&mut self.app, &mut self.session);

        let Some(session) = session_slot.as_mut() else {
            return;
        };
        if session.id() != window_id {
            return;
        }

        let control = {
            let ctx = AppCtx {
                window: WindowCtx {
                    id: window_id,
                    window: session.entry.borrow_window(),
                },
                renderer: &session.renderer,
            };
            app.on_window_event(&ctx, &event)
        };

        if control == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        let Session {
            renderer,
            view,
            entry,
        } = &mut *session;

        match &event {
            WindowEvent::CloseRequested => {
                self.session = None;
                self.request_exit(event_loop);
                return;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                view.invalidate();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.borrow_window().inner_size();
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                view.invalidate();
            }

            WindowEvent::RedrawRequested => {
                match entry.with_gpu_mut(|gpu| view.refresh(renderer, gpu)) {
                    RefreshOutcome::Fatal => {
                        log::error!("surface failure is unrecoverable; exiting");
                        self.request_exit(event_loop);
                        return;
                    }
                    RefreshOutcome::Dropped => log::debug!("refresh dropped; will retry"),
                    RefreshOutcome::Presented { generation } => {
                        log::trace!("refresh presented job #{generation}");
                    }
                    RefreshOutcome::Idle => {}
                }
            }

            _ => {}
        }

        session.request_redraw_if_needed();
    }
}
