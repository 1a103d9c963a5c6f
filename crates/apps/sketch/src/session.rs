//! Interactive regenerate loop
//!
//! Reads one command per line and answers with one line. Regeneration runs
//! on a background task so frames keep rendering, as a placeholder, while
//! palettes are being fetched.
//!
//! | Input            | Effect                                   |
//! |------------------|------------------------------------------|
//! | empty, `space`   | regenerate the scene                     |
//! | `r`              | regenerate the scene                     |
//! | `c`, `cycle`     | rebuild with the next palette, no fetch  |
//! | `m <x>`          | mouse moved to viewport x (steers orbit) |
//! | `f`              | render one frame and print its summary   |
//! | `s`, `status`    | print generation and counts              |
//! | `q`, `quit`      | leave the loop                           |

use crate::camera::OrbitCamera;
use crate::config::RenderSettings;
use crate::surface::FrameStats;
use anyhow::{anyhow, bail};
use palette::PaletteSource;
use scene::{draw_placeholder, draw_scene, RegenerateOutcome, RenderStyle, SceneController};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Regenerate,
    Reshuffle,
    Mouse(f32),
    Frame,
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::Regenerate);
        };

        let command = match head {
            "space" | "r" => Command::Regenerate,
            "c" | "cycle" => Command::Reshuffle,
            "f" | "frame" => Command::Frame,
            "s" | "status" => Command::Status,
            "q" | "quit" => Command::Quit,
            "m" | "mouse" => {
                let x = words
                    .next()
                    .ok_or_else(|| anyhow!("usage: m <x>"))?
                    .parse::<f32>()
                    .map_err(|e| anyhow!("invalid mouse position: {e}"))?;
                Command::Mouse(x)
            }
            other => bail!("unknown command '{other}'"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument '{extra}'");
        }
        Ok(command)
    }
}

pub struct Session<P> {
    controller: Arc<SceneController<P>>,
    camera: OrbitCamera,
    style: RenderStyle,
    viewport_width: f32,
}

impl<P: PaletteSource + 'static> Session<P> {
    pub fn new(
        controller: Arc<SceneController<P>>,
        style: RenderStyle,
        settings: &RenderSettings,
    ) -> Self {
        Self {
            controller,
            camera: OrbitCamera::new(settings.camera),
            style,
            viewport_width: settings.viewport_width as f32,
        }
    }

    pub fn controller(&self) -> &Arc<SceneController<P>> {
        &self.controller
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Start a regeneration on a background task
    pub fn regenerate(&self) -> JoinHandle<RegenerateOutcome> {
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move { controller.regenerate().await })
    }

    /// Advance the camera and draw one frame
    pub fn frame(&mut self) -> FrameStats {
        self.camera.advance();

        let mut stats = FrameStats::new();
        if self.controller.is_loading() {
            draw_placeholder(&self.style, &mut stats);
        } else {
            self.camera.apply(&mut stats);
            draw_scene(&self.controller.current_scene(), &self.style, &mut stats);
        }
        stats
    }

    /// Apply one command and return the reply line
    pub fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Regenerate => {
                if self.controller.is_loading() {
                    return "regeneration already in progress".to_string();
                }
                self.regenerate();
                "regenerating".to_string()
            }
            Command::Reshuffle => match self.controller.reshuffle() {
                RegenerateOutcome::Completed { generation } => {
                    let scene = self.controller.current_scene();
                    format!(
                        "generation={} palette={}/{}",
                        generation,
                        scene.palette_offset + 1,
                        scene.palettes.len()
                    )
                }
                RegenerateOutcome::AlreadyInProgress => {
                    "regeneration already in progress".to_string()
                }
            },
            Command::Mouse(x) => {
                self.camera.steer(x, self.viewport_width);
                format!("orbit speed {:.4}", self.camera.speed)
            }
            Command::Frame => self.frame().to_string(),
            Command::Status => self.status(),
            Command::Quit => "bye".to_string(),
        }
    }

    pub fn status(&self) -> String {
        let scene = self.controller.current_scene();
        format!(
            "generation={} towers={} shapes={} floor={} loading={}",
            scene.generation,
            scene.towers.len(),
            scene.shape_count(),
            scene.floor.len(),
            self.controller.is_loading()
        )
    }

    /// Kick off the first scene, then serve commands until `q` or end of input
    pub async fn run<I, O>(&mut self, input: I, mut output: O) -> anyhow::Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        self.regenerate();

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let (reply, quit) = match line.parse::<Command>() {
                Ok(command) => {
                    debug!(?command, "command");
                    (self.execute(command), command == Command::Quit)
                }
                Err(e) => (format!("error: {e}"), false),
            };

            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;

            if quit {
                break;
            }
        }
        Ok(())
    }
}
