//! TerminalCanvas: the session's render target on a real terminal.

use anyhow::Result;

use crate::engine::{Frame, RenderTarget};
use crate::fb::{CellStyle, FrameBuffer};
use crate::game_view::GameView;
use crate::layout::Viewport;
use crate::renderer::TerminalRenderer;

const TOO_SMALL: &str = "Please enlarge the terminal";

/// Renders each frame at the current terminal size.
///
/// When the terminal shrinks below the smallest layout the frame is replaced by a
/// notice and the session keeps running.
pub struct TerminalCanvas {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalCanvas {
    pub fn new(view: GameView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(0, 0),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl RenderTarget for TerminalCanvas {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let (w, h) = crossterm::terminal::size()?;
        let viewport = Viewport::new(w, h);

        if self.view.render_into(frame, viewport, &mut self.fb).is_err() {
            self.fb.resize(w, h);
            self.fb.clear();
            let x = w.saturating_sub(TOO_SMALL.len() as u16) / 2;
            self.fb.put_str(x, h / 2, TOO_SMALL, CellStyle::default());
        }
        self.renderer.draw_swap(&mut self.fb)
    }
}
