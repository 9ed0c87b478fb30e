use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::{
    foundation::core::{Canvas, Fps, Rgba8},
    foundation::error::{ReelError, ReelResult},
    scene::script::SceneHeader,
};

struct Pipe {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

/// Streams storyboard frames into `ffmpeg` as an H.264 MP4 at the scene's frame rate.
///
/// Frames are premultiplied RGBA8 at the scene canvas size; any remaining alpha is flattened
/// over the scene background before encoding.
pub struct AnimaticEncoder {
    out_path: PathBuf,
    background: Rgba8,
    flat: Vec<u8>,
    pipe: Option<Pipe>,
    frames: u64,
}

impl std::fmt::Debug for AnimaticEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimaticEncoder")
            .field("out_path", &self.out_path)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl AnimaticEncoder {
    /// Spawn `ffmpeg` writing `out_path` (overwritten) for the scene described by `header`.
    #[tracing::instrument(skip(header), fields(scene = %header.name))]
    pub fn start(out_path: &Path, header: &SceneHeader) -> ReelResult<Self> {
        check_canvas(header.canvas)?;
        ensure_parent_dir(out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(ReelError::engine(
                "ffmpeg is required for the animatic, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(ffmpeg_args(header.canvas, header.fps, out_path))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReelError::engine(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReelError::engine("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::engine("failed to open ffmpeg stderr"))?;
        // ffmpeg blocks once its stderr pipe fills up.
        let stderr = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        let len = header.canvas.width as usize * header.canvas.height as usize * 4;
        Ok(Self {
            out_path: out_path.to_path_buf(),
            background: header.background,
            flat: vec![0u8; len],
            pipe: Some(Pipe {
                child,
                stdin,
                stderr,
            }),
            frames: 0,
        })
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Append the next frame.
    pub fn push(&mut self, premul_rgba: &[u8]) -> ReelResult<()> {
        if premul_rgba.len() != self.flat.len() {
            return Err(ReelError::validation(format!(
                "animatic frame has {} bytes, expected {}",
                premul_rgba.len(),
                self.flat.len()
            )));
        }
        let Some(pipe) = self.pipe.as_mut() else {
            return Err(ReelError::engine("animatic encoder already finished"));
        };
        flatten_over(&mut self.flat, premul_rgba, self.background);
        pipe.stdin
            .write_all(&self.flat)
            .map_err(|e| ReelError::engine(format!("failed to write frame to ffmpeg: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    /// Close the stream, wait for `ffmpeg` and return the number of frames encoded.
    pub fn finish(mut self) -> ReelResult<u64> {
        let Some(Pipe {
            mut child,
            stdin,
            stderr,
        }) = self.pipe.take()
        else {
            return Err(ReelError::engine("animatic encoder already finished"));
        };
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| ReelError::engine(format!("failed to wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| ReelError::engine("ffmpeg stderr reader panicked"))?
            .map_err(|e| ReelError::engine(format!("ffmpeg stderr read failed: {e}")))?;
        if !status.success() {
            return Err(ReelError::engine(format!(
                "ffmpeg exited with {status} while writing '{}': {}",
                self.out_path.display(),
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::debug!(frames = self.frames, path = %self.out_path.display(), "animatic encoded");
        Ok(self.frames)
    }
}

/// yuv420p needs even dimensions.
fn check_canvas(canvas: Canvas) -> ReelResult<()> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(ReelError::validation("animatic canvas must be non-empty"));
    }
    if !canvas.width.is_multiple_of(2) || !canvas.height.is_multiple_of(2) {
        return Err(ReelError::validation(format!(
            "animatic canvas {}x{} must have even sides",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

fn ffmpeg_args(canvas: Canvas, fps: Fps, out_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-y",
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push("-s".into());
    args.push(format!("{}x{}", canvas.width, canvas.height).into());
    // Input rate goes before `-i`.
    args.push("-r".into());
    args.push(format!("{}/{}", fps.num, fps.den).into());
    args.extend(
        [
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(out_path.into());
    args
}

/// Composite premultiplied `src` over an opaque `bg` into `dst`.
fn flatten_over(dst: &mut [u8], src: &[u8], bg: Rgba8) {
    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            let v = u16::from(s[c]) + (bg[c] * inv + 127) / 255;
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// `true` when `ffmpeg -version` runs.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}
