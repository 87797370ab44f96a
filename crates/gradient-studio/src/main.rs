mod editor;

use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use gradient_engine::core::{App, AppControl, AppCtx};
use gradient_engine::device::GpuInit;
use gradient_engine::gradient::{Gradient, GradientKind};
use gradient_engine::logging::{init_logging, LoggingConfig};
use gradient_engine::render::RendererConfig;
use gradient_engine::window::{Runtime, RuntimeConfig};

use editor::{Channel, Command, Editor, MOVE_STEP, ROTATION_STEP};

struct StudioApp {
    editor: Editor,
}

impl StudioApp {
    fn publish(&self, ctx: &AppCtx<'_>) {
        ctx.window.set_title(&self.editor.title());
        if let Err(e) = ctx.render(self.editor.gradient()) {
            log::error!("cannot render gradient: {e}");
        }
    }
}

impl App for StudioApp {
    fn on_start(&mut self, ctx: &AppCtx<'_>) -> AppControl {
        log::info!(
            "keys: 1/2/3 kind, ←/→ rotate, N insert, Tab select, Delete remove, \
             [/] move, R/G/B color, Esc quit"
        );
        self.publish(ctx);
        AppControl::Continue
    }

    fn on_window_event(&mut self, ctx: &AppCtx<'_>, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed {
            return AppControl::Continue;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return AppControl::Continue;
        };

        if code == KeyCode::Escape {
            return AppControl::Exit;
        }

        let Some(command) = command_for(code) else {
            return AppControl::Continue;
        };

        log::debug!("{command:?}");
        if self.editor.apply(command) {
            self.publish(ctx);
        } else {
            ctx.window.set_title(&self.editor.title());
        }
        AppControl::Continue
    }
}

fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Digit1 => Command::SetKind(GradientKind::Linear),
        KeyCode::Digit2 => Command::SetKind(GradientKind::Radial),
        KeyCode::Digit3 => Command::SetKind(GradientKind::Angular),
        KeyCode::ArrowLeft => Command::Rotate(-ROTATION_STEP),
        KeyCode::ArrowRight => Command::Rotate(ROTATION_STEP),
        KeyCode::KeyN => Command::InsertStop,
        KeyCode::Tab => Command::SelectNext,
        KeyCode::Delete | KeyCode::Backspace => Command::RemoveSelected,
        KeyCode::BracketLeft => Command::MoveSelected(-MOVE_STEP),
        KeyCode::BracketRight => Command::MoveSelected(MOVE_STEP),
        KeyCode::KeyR => Command::CycleChannel(Channel::Red),
        KeyCode::KeyG => Command::CycleChannel(Channel::Green),
        KeyCode::KeyB => Command::CycleChannel(Channel::Blue),
        _ => return None,
    };
    Some(command)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = StudioApp {
        editor: Editor::new(Gradient::default()),
    };

    Runtime::run(
        RuntimeConfig {
            title: "Gradient".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        RendererConfig::default(),
        app,
    )
}
