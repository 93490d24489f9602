//! Line-oriented command session driving a [`DungeonHandle`].
//!
//! One command per line:
//!
//! ```text
//! rect x y w h          add a rectangle to the floor
//! cut x y w h           cut a rectangle out of the floor
//! poly x1 y1 x2 y2 ...  add a freehand polygon (at least 3 points)
//! door x1 y1 x2 y2      add a door
//! cut-doors x y w h     remove every door touching the rectangle
//! theme <key>           apply a theme preset
//! undo | redo | clear | reload | show | quit
//! ```

use std::str::FromStr;

use dungeondraw_core::{Error, Result};
use dungeondraw_designer::{Door, DungeonHandle, DungeonState, Point, Rect, Renderer};
use dungeondraw_settings::theme;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    AddRect(Rect),
    CutRect(Rect),
    AddPolygon(Vec<Point>),
    AddDoor(Door),
    CutDoors(Rect),
    Theme(String),
    Undo,
    Redo,
    Clear,
    Reload,
    Show,
    Quit,
}

fn numbers(args: &[&str]) -> Result<Vec<f64>> {
    args.iter()
        .map(|a| {
            a.parse::<f64>()
                .map_err(|_| Error::other(format!("'{}' is not a number", a)))
        })
        .collect()
}

fn exactly<const N: usize>(name: &str, args: &[&str]) -> Result<[f64; N]> {
    let values = numbers(args)?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| Error::other(format!("{} takes {} numbers, got {}", name, N, v.len())))
}

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(Error::other("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let no_args = |command: SessionCommand| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(Error::other(format!("{} takes no arguments", name)))
            }
        };

        match name {
            "rect" => {
                let [x, y, w, h] = exactly::<4>(name, &args)?;
                Ok(Self::AddRect(Rect::new(x, y, w, h)))
            }
            "cut" => {
                let [x, y, w, h] = exactly::<4>(name, &args)?;
                Ok(Self::CutRect(Rect::new(x, y, w, h)))
            }
            "cut-doors" => {
                let [x, y, w, h] = exactly::<4>(name, &args)?;
                Ok(Self::CutDoors(Rect::new(x, y, w, h)))
            }
            "door" => {
                let [x1, y1, x2, y2] = exactly::<4>(name, &args)?;
                Ok(Self::AddDoor(Door::new(x1, y1, x2, y2)))
            }
            "poly" => {
                let values = numbers(&args)?;
                if values.len() % 2 != 0 {
                    return Err(Error::other("poly takes x y pairs"));
                }
                let points = values
                    .chunks_exact(2)
                    .map(|pair| Point::new(pair[0], pair[1]))
                    .collect();
                Ok(Self::AddPolygon(points))
            }
            "theme" => match args.as_slice() {
                [key] => Ok(Self::Theme(key.to_string())),
                _ => Err(Error::other("theme takes one preset key")),
            },
            "undo" => no_args(Self::Undo),
            "redo" => no_args(Self::Redo),
            "clear" => no_args(Self::Clear),
            "reload" => no_args(Self::Reload),
            "show" => no_args(Self::Show),
            "quit" | "exit" => no_args(Self::Quit),
            other => Err(Error::other(format!("unknown command '{}'", other))),
        }
    }
}

impl SessionCommand {
    /// Run the command and describe the outcome in one line.
    pub async fn apply(&self, handle: &DungeonHandle) -> Result<String> {
        let changed = |committed: bool, what: &str| {
            if committed {
                what.to_string()
            } else {
                format!("{}: nothing changed", what)
            }
        };

        match self {
            Self::AddRect(rect) => Ok(changed(handle.add_rectangle(*rect).await?, "rect")),
            Self::CutRect(rect) => Ok(changed(handle.subtract_rectangle(*rect).await?, "cut")),
            Self::AddPolygon(points) => Ok(changed(handle.add_polygon(points).await?, "poly")),
            Self::AddDoor(door) => {
                handle.add_door(door.x1, door.y1, door.x2, door.y2).await?;
                Ok("door".to_string())
            }
            Self::CutDoors(rect) => Ok(changed(handle.subtract_doors(*rect).await?, "cut-doors")),
            Self::Theme(key) => {
                let preset =
                    theme(key).ok_or_else(|| Error::other(format!("unknown theme '{}'", key)))?;
                handle.set_config(preset.config()).await?;
                Ok(format!("theme {}", preset.name))
            }
            Self::Undo => Ok(changed(handle.undo().await?, "undo")),
            Self::Redo => Ok(changed(handle.redo().await?, "redo")),
            Self::Clear => {
                handle.delete_all().await?;
                Ok("clear".to_string())
            }
            Self::Reload => {
                handle.load_from_journal_entry().await?;
                Ok("reload".to_string())
            }
            Self::Show => {
                let (index, len) = handle.position().await;
                let state = handle.state().await;
                Ok(format!("{} [history {}/{}]", summarize(&state), index + 1, len))
            }
            Self::Quit => Ok("bye".to_string()),
        }
    }
}

/// One-line description of a snapshot.
pub fn summarize(state: &DungeonState) -> String {
    format!(
        "area {:.1}, {} polygon(s), {} door(s), walls {} x{}",
        state.region.area(),
        state.region.polygons().len(),
        state.doors.len(),
        state.config.wall_color,
        state.config.wall_thickness
    )
}

/// Renderer that logs a summary of every state it is asked to draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&self, state: &DungeonState) {
        tracing::info!("Render: {}", summarize(state));
    }
}
