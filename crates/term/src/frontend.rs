//! The terminal frontend the game loop draws through.

use std::io::{self, Write};

use anyhow::Result;
use tracing::warn;

use crate::core::GameSnapshot;
use crate::engine::Renderer;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::scores::LeaderboardEntry;

/// Composes the view, the framebuffer and the terminal writer.
///
/// `Renderer::render` cannot fail, so draw errors are parked here until the
/// caller collects them with [`TerminalFrontend::take_error`].
pub struct TerminalFrontend<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    leaderboard: Vec<LeaderboardEntry>,
    /// Fixed size; `None` follows the live terminal size.
    viewport: Option<Viewport>,
    error: Option<anyhow::Error>,
}

impl TerminalFrontend<io::Stdout> {
    pub fn new() -> Self {
        Self::from_renderer(TerminalRenderer::new(), None)
    }
}

impl Default for TerminalFrontend<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalFrontend<W> {
    /// Frontend over an arbitrary writer with a fixed viewport.
    pub fn with_writer(out: W, viewport: Viewport) -> Self {
        Self::from_renderer(TerminalRenderer::with_writer(out), Some(viewport))
    }

    fn from_renderer(renderer: TerminalRenderer<W>, viewport: Option<Viewport>) -> Self {
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            leaderboard: Vec::new(),
            viewport,
            error: None,
        }
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = view;
        self
    }

    /// Entries shown in the side panel, best first.
    pub fn set_leaderboard(&mut self, entries: Vec<LeaderboardEntry>) {
        self.leaderboard = entries;
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// The last frame drawn.
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn writer(&self) -> &W {
        self.renderer.writer()
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }

    /// First draw error since the last call, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            Viewport::new(w, h)
        })
    }
}

impl<W: Write> Renderer for TerminalFrontend<W> {
    fn render(&mut self, snapshot: &GameSnapshot) {
        let viewport = self.viewport();
        self.view
            .render_into(snapshot, &self.leaderboard, viewport, &mut self.fb);
        if let Err(err) = self.renderer.draw(&self.fb) {
            warn!(error = %err, "terminal draw failed");
            self.error.get_or_insert(err);
        }
    }
}
