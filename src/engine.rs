//! Collaborator-facing facade over the placement engine.
//!
//! A UI layer owns one [`GridEngine`] per container and calls it with the
//! current widget set; the engine answers with new geometry and never keeps the
//! widgets itself.

use serde_json::{Value, json};

use crate::config::EngineConfig;
use crate::error::{LayoutError, Result};
use crate::geometry::{Position, Size, Widget, WidgetId};
use crate::logging::{FileSink, LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{EngineMetrics, MetricSnapshot};
use crate::placement::find_available_position;
use crate::shift::{Resolution, resolve};

#[derive(Debug)]
pub struct GridEngine {
    config: EngineConfig,
    logger: Option<Logger>,
    metrics: EngineMetrics,
}

impl GridEngine {
    /// Build an engine for `config`. A configured `log_file` is opened here and
    /// becomes the default logger.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let logger = match &config.log_file {
            Some(path) => Some(Logger::new(FileSink::new(path, config.log_max_bytes)?)),
            None => None,
        };
        Ok(Self {
            config,
            logger,
            metrics: EngineMetrics::new(),
        })
    }

    /// Replace the logger, including one opened from `log_file`.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.metrics.snapshot()
    }

    /// First free slot for a widget of `size`, or `None` when the container is full.
    pub fn find_slot(&mut self, size: Size, widgets: &[Widget]) -> Result<Option<Position>> {
        let slot = find_available_position(
            self.config.container,
            size,
            self.config.cell_size,
            widgets,
        )?;
        self.metrics.record_search(slot.is_some());
        self.emit(
            LogLevel::Debug,
            "placement.search",
            [
                json_kv("width", size.width),
                json_kv("height", size.height),
                json_kv("found", slot.is_some()),
            ],
        );
        Ok(slot)
    }

    /// Add `widget` at the first free slot, ignoring its incoming position.
    pub fn insert(&mut self, widget: Widget, widgets: &[Widget]) -> Result<Vec<Widget>> {
        if widgets.iter().any(|existing| existing.id == widget.id) {
            return Err(LayoutError::DuplicateWidget(widget.id));
        }
        let position = self
            .find_slot(widget.size(), widgets)?
            .ok_or(LayoutError::NoSlotAvailable)?;

        let mut layout = widgets.to_vec();
        layout.push(widget.moved_to(position));
        Ok(layout)
    }

    /// Drop widget `id` at `to`, shifting whatever it lands on.
    pub fn move_widget(
        &mut self,
        id: &WidgetId,
        to: Position,
        widgets: &[Widget],
    ) -> Result<Resolution> {
        let moving = lookup(id, widgets)?.clone();
        self.resolve(&moving, to, widgets)
    }

    /// Resize widget `id` in place, shifting whatever the new size covers.
    pub fn resize_widget(
        &mut self,
        id: &WidgetId,
        size: Size,
        widgets: &[Widget],
    ) -> Result<Resolution> {
        let current = lookup(id, widgets)?;
        let resized = current.resized_to(size);
        self.resolve(&resized, current.position(), widgets)
    }

    /// Remove widget `id`; the remaining widgets keep their positions.
    pub fn remove_widget(&self, id: &WidgetId, widgets: &[Widget]) -> Result<Vec<Widget>> {
        lookup(id, widgets)?;
        Ok(widgets
            .iter()
            .filter(|widget| &widget.id != id)
            .cloned()
            .collect())
    }

    pub fn emit_metrics(&self) {
        if let Some(logger) = &self.logger {
            let event = self
                .metrics
                .snapshot()
                .to_log_event(&self.config.metrics_target);
            let _ = logger.log_event(event);
        }
    }

    fn resolve(
        &mut self,
        moving: &Widget,
        proposed: Position,
        widgets: &[Widget],
    ) -> Result<Resolution> {
        let resolution = resolve(
            moving,
            proposed,
            widgets,
            self.config.container,
            self.config.cell_size,
        )?;
        self.metrics.record_resolve(
            resolution.collision.is_some(),
            resolution.relocated.len(),
            resolution.unplaced.len(),
        );

        if let Some(collision) = &resolution.collision {
            self.emit(
                LogLevel::Debug,
                "shift.collision",
                [
                    json_str("moving", moving.id.as_str()),
                    json_str("intruder", collision.intruder.as_str()),
                    json_str("occupant", collision.occupant.as_str()),
                    json_kv("relocated", resolution.relocated.len()),
                ],
            );
        }
        if resolution.is_overflow() {
            let unplaced: Vec<&str> = resolution.unplaced.iter().map(|w| w.id.as_str()).collect();
            self.emit(
                LogLevel::Warn,
                "shift.overflow",
                [
                    json_str("moving", moving.id.as_str()),
                    json_kv("unplaced", json!(unplaced)),
                ],
            );
        }
        Ok(resolution)
    }

    fn emit(&self, level: LogLevel, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = &self.logger {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

fn lookup<'a>(id: &WidgetId, widgets: &'a [Widget]) -> Result<&'a Widget> {
    widgets
        .iter()
        .find(|widget| &widget.id == id)
        .ok_or_else(|| LayoutError::WidgetNotFound(id.clone()))
}
