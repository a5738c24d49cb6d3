//! Headless stage player.
//!
//! Drives one scene preset at a fixed 60 Hz step and writes every frame to
//! stdout as a line of JSON, the same payload a browser host would receive.
//!
//! ```text
//! stage_player [ball|canvas|walk|cutscene] [settings.json]
//!
//! STAGE_FRAMES=600      number of frames to play
//! STAGE_PAUSE=120..240  press Stop at frame 120 and Start at frame 240
//! STAGE_REALTIME=1      pace frames at 60 Hz and feed measured deltas
//! RUST_LOG=info         engine logging on stderr
//! ```

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::Context;
use myth_stage::{Engine, FrameState, RedrawTarget, Scene, ScenePreset, StageSettings, Timer};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;

/// Writes each redrawn frame as one JSON line, keeping the first I/O error.
struct JsonLines<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> RedrawTarget for JsonLines<W> {
    fn redraw(&mut self, _scene: &Scene, frame: &FrameState) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, frame)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

fn frame_budget() -> anyhow::Result<u64> {
    match std::env::var("STAGE_FRAMES") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("STAGE_FRAMES={value} is not a frame count")),
        Err(_) => Ok(DEFAULT_FRAMES),
    }
}

fn pause_window() -> anyhow::Result<Option<(u64, u64)>> {
    let Ok(value) = std::env::var("STAGE_PAUSE") else {
        return Ok(None);
    };
    let (from, to) = value
        .split_once("..")
        .with_context(|| format!("STAGE_PAUSE={value}: expected FROM..TO"))?;
    Ok(Some((from.trim().parse()?, to.trim().parse()?)))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let preset: ScenePreset = args.next().as_deref().unwrap_or("walk").parse()?;
    let settings = match args.next() {
        Some(path) => StageSettings::load(&path).with_context(|| format!("loading {path}"))?,
        None => StageSettings::default(),
    };
    let frames = frame_budget()?;
    let pause = pause_window()?;
    let realtime = std::env::var_os("STAGE_REALTIME").is_some();

    let mut engine = Engine::from_preset(preset, &settings)?;
    let mut target = JsonLines {
        out: BufWriter::new(io::stdout().lock()),
        error: None,
    };

    let mut timer = Timer::new();
    for frame in 1..=frames {
        if let Some((from, to)) = pause {
            if frame == from {
                engine.stop();
            }
            if frame == to {
                engine.start();
            }
        }

        let dt = if realtime {
            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
            timer.tick()
        } else {
            FRAME_DT
        };

        engine.frame(dt, &mut target);
        if let Some(err) = target.error.take() {
            return Err(err).context("writing frame to stdout");
        }
    }

    target.out.flush()?;
    log::info!(
        "Played {frames} frames of '{preset}', {:.2}s of animation",
        engine.elapsed()
    );
    Ok(())
}
