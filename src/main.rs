use std::{cell, rc, thread, time};
use type_core::channel::ChannelRequest;
use type_core::{glyphs, render, source, style};

mod term;

/// Typesetter handle shared with the main loop
#[derive(Debug, Clone)]
struct SharedTitle(rc::Rc<cell::RefCell<glyphs::GlyphTitle>>);

impl style::Typesetter for SharedTitle {
    fn typeset(&mut self, key: &style::GlyphKey) {
        self.0.borrow_mut().typeset(key);
    }
}

fn load_glyphs() -> glyphs::GlyphDictionary {
    let path = type_core::CONFIG.get_or("citytype.glyphs", "glyphs.json".to_string());

    match glyphs::GlyphDictionary::from_file(&path) {
        Ok(dict) => {
            log::info!("Loaded {} glyphs from {:?}", dict.len(), path);
            dict
        }
        Err(e) => {
            log::warn!("No glyphs from {:?} ({}), titles stay blank", path, e);
            glyphs::GlyphDictionary::default()
        }
    }
}

fn run() -> type_core::Result<()> {
    // Config {{{
    let fps = type_core::CONFIG.get_or("citytype.fps", 30u64).max(1);
    let frame_time = time::Duration::from_micros(1_000_000 / fps);
    let cols = type_core::CONFIG.get_or("citytype.columns", 120.0f32).max(1.0);
    let rotate = type_core::CONFIG.get_or("citytype.rotate_secs", 0.0f32);
    let max_frames = type_core::CONFIG.get_or("citytype.frames", 0usize);
    let line_width = type_core::CONFIG.get_or("render.line_width", 2.0f32);
    let alpha = type_core::CONFIG.get_or("render.alpha", 0.1f32);
    // }}}

    let title = SharedTitle(rc::Rc::new(cell::RefCell::new(glyphs::GlyphTitle::new(
        load_glyphs(),
    ))));

    let source = source::SourceBuilder::new().build()?;
    let engine = type_core::EngineBuilder::new().build(source, Box::new(title.clone()))?;

    let (width, height) = render::surface_size(cols);
    let mut surface = term::TermSurface::new(width as usize, (height as usize).max(1));
    let mut waveform = render::Waveform::new(render::Stroke {
        width: line_width,
        color: render::Color([1.0, 1.0, 1.0, alpha]),
    });

    let mut frames = type_core::Frames::new(engine)?;
    frames.request(ChannelRequest::Random);

    let mut next_rotation = rotate;

    for frame in frames.iter() {
        if rotate > 0.0 && frame.time >= next_rotation {
            frame.request(ChannelRequest::Random);
            next_rotation += rotate;
        }

        frame.lock_info(|info| {
            waveform.draw(&mut surface, &info.magnitudes);

            let title = title.0.borrow();
            let key = title.key().map(|k| k.to_string()).unwrap_or_default();
            let glyph = if title.text().is_empty() {
                "blank".to_string()
            } else {
                format!("{} bytes", title.text().len())
            };

            print!("\x1b[H\x1b[2J");
            print!("{}", surface.to_string_cropped(cols as usize));
            println!(
                "{:<16} {:<20} glyph: {:<12} frame {:7}@{:.3}",
                info.title, key, glyph, frame.frame, frame.time
            );
        });

        if max_frames != 0 && frame.frame + 1 >= max_frames {
            break;
        }

        thread::sleep(frame_time);
    }

    frames.finish();

    Ok(())
}

fn main() {
    type_core::default_config();
    type_core::default_log();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
