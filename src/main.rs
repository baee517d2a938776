// What you SEE now:
// • PAINT mode: a picture (or blank page) you paint on.
//   LMB drives the tool: B brush, E eraser, F fill. [ ] brush size.
//   O flips to the untouched picture and back.
// • COLORING mode: the balloon page. Click a shape to color it, E toggles the eraser.
// • 1-9 pick colours, Z undo (paint), C clear/reset, N new blank page,
//   S saves a PNG, ESC quits.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use minifb::Key;
use tracing_subscriber::EnvFilter;

use colorbook::coloring::ColoringBook;
use colorbook::config::Config;
use colorbook::draw::{self, Drawer};
use colorbook::gamma::GammaLut;
use colorbook::session::{ClickEffect, PaintSession};
use colorbook::tool::Tool;
use colorbook::types::{FrameBuffer, PixelBuffer, Point};
use colorbook::{color, Error, FillOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Paint,
    Coloring,
}

#[derive(Parser, Debug)]
#[command(name = "colorbook", about = "Paint, fill and color pictures")]
struct Args {
    /// Path to colorbook.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Picture to paint on (paint mode); blank page when omitted
    #[arg(long)]
    image: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Paint)]
    mode: Mode,

    /// Where S saves the canvas
    #[arg(long, default_value = "my-painting.png")]
    output: PathBuf,
}

enum Game {
    Paint(PaintSession),
    Coloring(ColoringBook),
}

impl Game {
    fn canvas(&self) -> &PixelBuffer {
        match self {
            Game::Paint(s) => s.canvas(),
            Game::Coloring(b) => b.canvas(),
        }
    }

    /// What goes on screen this frame.
    fn view(&self) -> &PixelBuffer {
        match self {
            Game::Paint(s) => s.view(),
            Game::Coloring(b) => b.canvas(),
        }
    }

    fn save(&self, path: &Path) -> Result<(), Error> {
        match self {
            Game::Paint(s) => s.save_png(path),
            Game::Coloring(b) => b
                .canvas()
                .save_with_format(path, image::ImageFormat::Png)
                .map_err(|source| Error::ImageSave { path: path.to_path_buf(), source }),
        }
    }

    fn hud(&self) -> String {
        match self {
            Game::Paint(s) if s.showing_original() => "ORIGINAL | O BACK TO PAINTING".to_string(),
            Game::Paint(s) => {
                let t = s.tool();
                format!(
                    "PAINT | {} {} | {} | UNDO {}",
                    t.tool.label(),
                    t.brush_width as u32,
                    color::to_hex(t.color),
                    s.history_len()
                )
            }
            Game::Coloring(b) => {
                let t = b.tool();
                let label = if t.tool == Tool::Eraser { "ERASER" } else { "COLOR" };
                format!("COLORING | {} | {}", label, color::to_hex(t.color))
            }
        }
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;
    let settings = config.session_settings();
    let tool = config.tool_state()?;

    /* --- Game setup ---
       Visual: the page you'll paint on appears once the window opens. */
    let mut game = match args.mode {
        Mode::Paint => match &args.image {
            Some(path) => Game::Paint(PaintSession::open(path, tool, settings)?),
            None => Game::Paint(PaintSession::blank(config.canvas.width, config.canvas.height, tool, settings)),
        },
        Mode::Coloring => Game::Coloring(ColoringBook::balloon()?),
    };

    let (w, h) = game.canvas().dimensions();
    let mut drawer = Drawer::new("Colorbook", w as usize, h as usize)?;
    let mut screen = FrameBuffer::new(w as usize, h as usize);
    let lut = GammaLut::new();
    let mut mouse_was_down = false;

    tracing::info!(mode = ?args.mode, width = w, height = h, "window open");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let mouse = drawer.mouse_pos().map(|(x, y)| Point::new(x, y));
        let mouse_down = drawer.left_mouse_down();

        /* 1) Keys */
        if let Some(slot) = drawer.digit_pressed_once() {
            let c = color::PALETTE[slot];
            match &mut game {
                Game::Paint(s) => s.set_color(c),
                Game::Coloring(b) => b.set_color(c),
            }
        }
        if drawer.pressed_once(Key::S) {
            match game.save(&args.output) {
                Ok(()) => tracing::info!(path = %args.output.display(), "saved"),
                Err(err) => tracing::warn!(%err, "save failed"),
            }
        }
        match &mut game {
            Game::Paint(s) => {
                if drawer.pressed_once(Key::B) { s.set_tool(Tool::Brush); }
                if drawer.pressed_once(Key::E) { s.set_tool(Tool::Eraser); }
                if drawer.pressed_once(Key::F) { s.set_tool(Tool::Fill); }
                if drawer.pressed_once(Key::Z) && !s.undo() {
                    tracing::debug!("nothing to undo");
                }
                if drawer.pressed_once(Key::C) { s.clear_canvas(); }
                if drawer.pressed_once(Key::O) { s.toggle_original(); }
                if drawer.pressed_once(Key::N) { s.new_image(PixelBuffer::from_pixel(w, h, color::WHITE)); }
                let width = s.tool().brush_width;
                if drawer.pressed_once(Key::LeftBracket) { s.set_brush_width(width - 1.0); }
                if drawer.pressed_once(Key::RightBracket) { s.set_brush_width(width + 1.0); }
            }
            Game::Coloring(b) => {
                if drawer.pressed_once(Key::E) { b.toggle_eraser(); }
                if drawer.pressed_once(Key::C) || drawer.pressed_once(Key::N) {
                    if let Err(err) = b.reset() {
                        tracing::warn!(%err, "reset failed");
                    }
                }
            }
        }

        /* 2) Pointer: press = click, hold = drag, release = end stroke */
        if let Some(p) = mouse {
            match &mut game {
                Game::Paint(s) if s.showing_original() => {}
                Game::Paint(s) => {
                    if mouse_down && !mouse_was_down {
                        match s.click(p) {
                            Ok(ClickEffect::Fill(FillOutcome::Skipped(reason))) => {
                                tracing::debug!(?reason, "fill skipped")
                            }
                            Ok(_) => {}
                            Err(err) => tracing::warn!(%err, "click ignored"),
                        }
                    } else if mouse_down && s.is_stroking() {
                        s.drag_to(p);
                    }
                }
                Game::Coloring(b) => {
                    if mouse_down && !mouse_was_down && b.click(p).is_none() {
                        tracing::debug!(x = p.x, y = p.y, "no region under pointer");
                    }
                }
            }
        }
        if !mouse_down {
            if let Game::Paint(s) = &mut game {
                s.end_stroke();
            }
        }
        mouse_was_down = mouse_down;

        /* 3) Compose: canvas over paper, then cursor + HUD */
        if game.canvas().dimensions() != (screen.width as u32, screen.height as u32) {
            screen.pixels.fill(0x00FFFFFF);
        }
        draw::blit_canvas(game.view(), &mut screen, &lut);

        if let Some(p) = mouse {
            let (cx, cy) = (p.x as i32, p.y as i32);
            draw::draw_crosshair(&mut screen, cx, cy, 12, 0x00_FF_CC_33);
            if let Game::Paint(s) = &game {
                if s.tool().tool != Tool::Fill && !s.showing_original() {
                    draw::draw_ring(&mut screen, cx, cy, (s.tool().brush_width / 2.0) as i32, 0x00_80_80_80);
                }
            }
        }

        let current = match &game {
            Game::Paint(s) => s.tool().color,
            Game::Coloring(b) => b.tool().color,
        };
        let [r, g, b, _] = current.0;
        draw::draw_swatch(&mut screen, 8, 6, 11, ((r as u32) << 16) | ((g as u32) << 8) | b as u32);
        draw::draw_text_5x7(&mut screen, 24, 8, &game.hud(), 0x00_FF_FF_FF);

        /* 4) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}
