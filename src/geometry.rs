use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-left offset measured in pixels from the container origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Integer size measured in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangle anchored within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, moved to `position`.
    pub fn at(self, position: Position) -> Self {
        Self::from_parts(position, self.size())
    }

    /// Same position, resized to `size`.
    pub fn with_size(self, size: Size) -> Self {
        Self::from_parts(self.position(), size)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }
}

/// Caller-defined widget identifier. Integer ids are stored in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for WidgetId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A placeable rectangle plus an opaque payload owned by the caller.
///
/// The engine never mutates a widget it was handed; relocation produces a new
/// value through [`Widget::moved_to`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl Widget {
    pub fn new(id: impl Into<WidgetId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            config: None,
        }
    }

    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn position(&self) -> Position {
        self.rect.position()
    }

    pub fn size(&self) -> Size {
        self.rect.size()
    }

    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            rect: self.rect.at(position),
            ..self.clone()
        }
    }

    pub fn resized_to(&self, size: Size) -> Self {
        Self {
            rect: self.rect.with_size(size),
            ..self.clone()
        }
    }
}
