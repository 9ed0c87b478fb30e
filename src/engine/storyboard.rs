use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    animation::ease::RateFunc,
    engine::{
        Batch, Engine, EngineHandle, RenderOutput,
        ffmpeg::AnimaticEncoder,
        stage::Stage,
        svg,
    },
    foundation::error::{ReelError, ReelResult},
    scene::{object::VisualObject, script::SceneHeader},
};

/// Options for [`StoryboardEngine`].
#[derive(Clone, Debug)]
pub struct StoryboardOpts {
    /// Panels go to `<out_dir>/<scene>/`.
    pub out_dir: PathBuf,
    /// Also encode an animatic MP4 here (requires `ffmpeg` on PATH).
    pub animatic: Option<PathBuf>,
    /// Keep the SVG source of every panel next to its PNG.
    pub keep_svg: bool,
}

impl StoryboardOpts {
    /// PNG panels under `out_dir`, no animatic.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            animatic: None,
            keep_svg: false,
        }
    }
}

/// The screen at the end of one cue.
#[derive(Clone, Debug)]
struct Panel {
    cue: usize,
    start_secs: f64,
    transition_secs: f64,
    end_secs: f64,
    rate: RateFunc,
    svg: String,
}

/// Draws one poster frame per played cue: the settled screen plus that cue's transient
/// highlights. Holds stretch the previous panel. `compose` rasterizes every panel in parallel
/// and, when asked, dissolves between them into an animatic.
#[derive(Debug)]
pub struct StoryboardEngine {
    opts: StoryboardOpts,
    header: Option<SceneHeader>,
    stage: Stage,
    panels: Vec<Panel>,
    marks: Vec<(usize, f64, String)>,
}

impl StoryboardEngine {
    /// Engine writing according to `opts`.
    pub fn new(opts: StoryboardOpts) -> Self {
        Self {
            opts,
            header: None,
            stage: Stage::default(),
            panels: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Number of panels so far.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// SVG source of panel `i`.
    pub fn panel_svg(&self, i: usize) -> Option<&str> {
        self.panels.get(i).map(|p| p.svg.as_str())
    }

    fn header(&self) -> ReelResult<&SceneHeader> {
        self.header
            .as_ref()
            .ok_or_else(|| ReelError::engine("storyboard not started"))
    }

    fn snapshot(&self) -> ReelResult<String> {
        svg::stage_svg(&self.stage, self.header()?)
    }

    fn write_animatic(&self, path: &Path, rasters: &[Vec<u8>]) -> ReelResult<u64> {
        let header = self.header()?;
        let (w, h) = (header.canvas.width, header.canvas.height);
        let mut enc = AnimaticEncoder::start(path, header)?;

        let blank = rasterize(&blank_svg(header), Arc::new(font_db()), w, h)?;
        let mut frame = vec![0u8; blank.len()];
        let mut prev = &blank;
        for (panel, raster) in self.panels.iter().zip(rasters) {
            let end = header.fps.frame_at(panel.end_secs).0;
            while enc.frames() < end {
                let t = header.fps.frames_to_secs(enc.frames()) - panel.start_secs;
                let p = if panel.transition_secs > 0.0 {
                    panel.rate.apply((t / panel.transition_secs).clamp(0.0, 1.0))
                } else {
                    1.0
                };
                dissolve(&mut frame, prev, raster, p);
                enc.push(&frame)?;
            }
            prev = raster;
        }
        enc.finish()
    }
}

impl Engine for StoryboardEngine {
    fn begin(&mut self, header: &SceneHeader) -> ReelResult<()> {
        self.header = Some(header.clone());
        self.stage = Stage::new(header.camera);
        self.panels.clear();
        self.marks.clear();
        Ok(())
    }

    fn create(&mut self, object: &VisualObject, deps: &[EngineHandle]) -> ReelResult<EngineHandle> {
        self.stage.insert(object, deps)
    }

    fn animate(&mut self, batch: &Batch) -> ReelResult<()> {
        self.stage.apply(batch)?;
        let rate = batch
            .steps
            .iter()
            .map(|s| s.animation.rate_func())
            .find(|r| r.end_value() == 1.0)
            .unwrap_or(RateFunc::Smooth);
        let svg = self.snapshot()?;
        self.panels.push(Panel {
            cue: batch.cue,
            start_secs: batch.start_secs,
            transition_secs: batch.duration,
            end_secs: batch.end_secs(),
            rate,
            svg,
        });
        Ok(())
    }

    fn hold(&mut self, cue: usize, start_secs: f64, secs: f64) -> ReelResult<()> {
        if let Some(last) = self.panels.last_mut() {
            last.end_secs = start_secs + secs;
            return Ok(());
        }
        self.stage.settle();
        let svg = self.snapshot()?;
        self.panels.push(Panel {
            cue,
            start_secs,
            transition_secs: 0.0,
            end_secs: start_secs + secs,
            rate: RateFunc::Linear,
            svg,
        });
        Ok(())
    }

    fn mark(&mut self, cue: usize, at_secs: f64, text: &str) -> ReelResult<()> {
        self.marks.push((cue, at_secs, text.to_owned()));
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(panels = self.panels.len()))]
    fn compose(&mut self) -> ReelResult<RenderOutput> {
        let header = self.header()?;
        let (w, h) = (header.canvas.width, header.canvas.height);
        let dir = self.opts.out_dir.join(&header.name);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create storyboard dir '{}'", dir.display()))?;

        let db = Arc::new(font_db());
        let rasters = self
            .panels
            .par_iter()
            .map(|p| rasterize(&p.svg, Arc::clone(&db), w, h))
            .collect::<ReelResult<Vec<_>>>()?;

        // Each narration line goes with the first panel played after it.
        let last = self.panels.len().saturating_sub(1);
        let narration: Vec<(usize, f64, &str)> = self
            .marks
            .iter()
            .map(|(cue, at, text)| {
                let panel = self.panels.iter().position(|p| p.cue > *cue).unwrap_or(last);
                (panel, *at, text.as_str())
            })
            .collect();

        let mut files = Vec::new();
        let mut index = String::new();
        for (i, (panel, raster)) in self.panels.iter().zip(&rasters).enumerate() {
            let stem = format!("{i:03}_cue{:03}", panel.cue);
            let png = dir.join(format!("{stem}.png"));
            image::save_buffer_with_format(
                &png,
                raster,
                w,
                h,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", png.display()))?;
            if self.opts.keep_svg {
                let path = dir.join(format!("{stem}.svg"));
                std::fs::write(&path, &panel.svg)
                    .with_context(|| format!("write svg '{}'", path.display()))?;
                files.push(path);
            }
            let _ = writeln!(
                index,
                "{stem}.png  {:7.2}s - {:7.2}s",
                panel.start_secs, panel.end_secs
            );
            for (at, text) in narration.iter().filter(|(p, ..)| *p == i).map(|(_, at, t)| (at, t)) {
                let _ = writeln!(index, "    [{at:.2}s] {text}");
            }
            files.push(png);
        }
        let index_path = dir.join("index.txt");
        std::fs::write(&index_path, index)
            .with_context(|| format!("write index '{}'", index_path.display()))?;
        files.push(index_path);

        let end_secs = self.panels.last().map_or(0.0, |p| p.end_secs);
        let mut frame_count = header.fps.frame_at(end_secs).0;
        if let Some(path) = &self.opts.animatic {
            frame_count = self.write_animatic(path, &rasters)?;
            files.push(path.clone());
        }
        tracing::info!(scene = %header.name, panels = rasters.len(), frame_count, "storyboard written");
        Ok(RenderOutput { files, frame_count })
    }
}

fn font_db() -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    db
}

fn blank_svg(header: &SceneHeader) -> String {
    let (w, h) = (header.canvas.width, header.canvas.height);
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><rect width="{w}" height="{h}" fill="{}"/></svg>"#,
        header.background.to_hex_rgb()
    )
}

fn rasterize(
    svg: &str,
    fontdb: Arc<usvg::fontdb::Database>,
    width: u32,
    height: u32,
) -> ReelResult<Vec<u8>> {
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
        .map_err(|e| ReelError::engine(format!("parse panel svg: {e}")))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ReelError::engine("failed to allocate panel pixmap"))?;
    resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

fn dissolve(out: &mut [u8], from: &[u8], to: &[u8], t: f64) {
    let t = t.clamp(0.0, 1.0);
    for ((o, &a), &b) in out.iter_mut().zip(from).zip(to) {
        *o = (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/storyboard.rs"]
mod tests;
