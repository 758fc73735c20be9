//! Replays scripts against a canvas.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::script::{Action, DragPart, PolylineMode, Script};
use kurbo::Size;
use labelmark_core::{AnnotationOptions, Canvas, DragTarget, EntityId, RetainedScene};
use labelmark_render::{RenderContext, Renderer, SvgRenderer};
use std::collections::HashMap;

/// A canvas plus the script-local names of its entities.
pub struct Session {
    config: AppConfig,
    canvas: Canvas<RetainedScene>,
    names: HashMap<String, EntityId>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        let canvas = Canvas::new(RetainedScene::new(), config.canvas_size())
            .with_polyline_style(config.polyline.clone())
            .with_pan_zoom(config.pan_zoom.clone());
        Self {
            config,
            canvas,
            names: HashMap::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas<RetainedScene> {
        &self.canvas
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Entity currently bound to `name`.
    pub fn entity(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    fn lookup(&self, name: &str) -> AppResult<EntityId> {
        self.entity(name)
            .ok_or_else(|| AppError::UnknownName(name.to_string()))
    }

    fn options<'a>(&'a self, options: &'a Option<AnnotationOptions>) -> &'a AnnotationOptions {
        options.as_ref().unwrap_or(&self.config.options)
    }

    /// Apply every action in order, stopping at the first failure.
    pub fn run(&mut self, script: &Script) -> AppResult<()> {
        for (index, action) in script.actions.iter().enumerate() {
            self.apply(action).inspect_err(|e| {
                log::error!("Action {index} failed: {e}");
            })?;
        }
        Ok(())
    }

    pub fn apply(&mut self, action: &Action) -> AppResult<()> {
        log::debug!("Applying {action:?}");
        match action {
            Action::Background { source, width, height } => {
                self.canvas
                    .set_background(source.clone(), Size::new(*width, *height))?;
            }
            Action::Label {
                name,
                position,
                text,
                options,
            } => {
                let options = self.options(options).clone();
                let id = self.canvas.create_label(*position, text.clone(), &options)?;
                self.names.insert(name.clone(), id);
            }
            Action::Connect {
                name,
                label,
                tip,
                options,
            } => {
                let label_id = self.lookup(label)?;
                let options = self.options(options).clone();
                let id = self.canvas.create_connected_arrow(label_id, *tip, &options)?;
                self.names.remove(label);
                self.names.insert(name.clone(), id);
            }
            Action::Arrow {
                name,
                start,
                end,
                options,
            } => {
                let options = self.options(options).clone();
                let id = self.canvas.create_arrow(*start, *end, &options);
                self.names.insert(name.clone(), id);
            }
            Action::UpdateArrow { name, start, end } => {
                let id = self.lookup(name)?;
                self.canvas.update_arrow(id, *start, *end)?;
            }
            Action::Drag { part, name, deltas } => {
                let target = self.drag_target(*part, name.as_deref())?;
                if !self.canvas.begin_drag(target)? {
                    log::warn!("Drag on {target:?} ignored");
                    return Ok(());
                }
                for delta in deltas {
                    self.canvas.drag_move(target, *delta)?;
                }
                self.canvas.end_drag(target)?;
            }
            Action::Click { position } => {
                self.canvas.click(*position)?;
            }
            Action::Polyline { mode } => match mode {
                PolylineMode::Enable => self.canvas.enable_polyline(),
                PolylineMode::Disable => self.canvas.disable_polyline(),
                PolylineMode::Reset => self.canvas.reset_polyline()?,
            },
            Action::ZoomIn => {
                let zoom = self.canvas.zoom_in()?;
                log::info!("Zoom {zoom:.1}");
            }
            Action::ZoomOut => {
                let zoom = self.canvas.zoom_out()?;
                log::info!("Zoom {zoom:.1}");
            }
            Action::Remove { name } => {
                let id = self.lookup(name)?;
                self.canvas.remove(id)?;
                self.names.remove(name);
            }
            Action::Reset => {
                self.canvas.reset()?;
                self.names.clear();
            }
        }
        Ok(())
    }

    fn drag_target(&self, part: DragPart, name: Option<&str>) -> AppResult<DragTarget> {
        let named = || {
            name.ok_or_else(|| AppError::Script(format!("{part:?} drag needs a name")))
                .and_then(|n| self.lookup(n))
        };
        Ok(match part {
            DragPart::Label => DragTarget::Label(named()?),
            DragPart::Head => DragTarget::ArrowHead(named()?),
            DragPart::Background => DragTarget::Background,
        })
    }

    /// Render the current canvas as an SVG document.
    pub fn render_svg(&self) -> AppResult<String> {
        let ctx = RenderContext::new(self.canvas.scene(), self.canvas.size())
            .with_background(self.config.background());
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&ctx)?;
        Ok(renderer.take_output())
    }
}
