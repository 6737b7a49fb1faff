//! Interactive cactus growth viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation
//! ([`GrowthController`]) and implements [`eframe::App`] to render the
//! growing mesh and control the simulation through an egui UI.

use cactus_core::config::Config;
use cactus_core::controller::GrowthController;
use eframe::App;
use glam::Vec3;
use rand::Rng;

use crate::mesh::{self, Camera};

/// Light direction used for flat shading, in view space.
const LIGHT_DIR: Vec3 = Vec3::new(0.35, 0.75, -0.56);

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: a [`GrowthController`] advanced by ticks.
/// - A draft [`Config`] edited in the side panel and applied on reset.
/// - A turntable [`Camera`] and draw toggles.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle key input (Space grows, Q force-spawns every tip, W dumps
///    the tree to the log — the original controller's bindings).
/// 2. If `running` is `true`, call [`GrowthController::tick`] with the
///    frame's time delta.
/// 3. Render the mesh with freshly recomputed face normals.
pub struct Viewer {
    controller: GrowthController,

    /// Config draft edited in the panel; applied on "Apply & reset".
    draft: Config,
    /// Error from the last rejected draft, shown in the config panel.
    last_error: Option<String>,

    running: bool,
    camera: Camera,
    show_vertices: bool,
    wireframe: bool,

    /// Growth value for the scrub slider; written back on drag.
    scrub: f32,
    last_dt: f32,
}

impl Viewer {
    /// Creates a viewer around a simulation built from [`Config::default`].
    pub fn new() -> Self {
        let draft = Config::default();
        let controller = GrowthController::new(draft).expect("default configuration is valid");

        Self {
            controller,
            draft,
            last_error: None,
            running: false,
            camera: Camera::default(),
            show_vertices: false,
            wireframe: false,
            scrub: draft.initial_growth,
            last_dt: 0.0,
        }
    }

    /// Rebuilds the simulation from the current draft config.
    ///
    /// A rejected draft keeps the running simulation and surfaces the
    /// validation error in the config panel instead.
    fn reset(&mut self) {
        match GrowthController::new(self.draft) {
            Ok(controller) => {
                self.controller = controller;
                self.scrub = self.draft.initial_growth;
                self.last_error = None;
                self.running = false;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Grow" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Tick").clicked() {
                    self.controller.tick(1.0 / 60.0);
                }

                if ui.button("Spawn tips (Q)").clicked() {
                    self.controller.force_grow_terminal_nodes();
                }

                if ui.button("Dump tree (W)").clicked() {
                    log::info!("tree:\n{}", self.controller.describe_tree());
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.camera.zoom, 10.0..=500.0).text("Zoom"));
                ui.checkbox(&mut self.wireframe, "Wireframe");
                ui.checkbox(&mut self.show_vertices, "Vertices");
            });
        });
    }

    /// Builds the bottom status bar (time step, tree and mesh sizes).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.3} s", self.last_dt));
                ui.separator();
                ui.label(format!("frames = {}", self.controller.frame_count()));
                ui.label(format!("nodes = {}", self.controller.tree().nodes.len()));
                ui.label(format!(
                    "tips = {}",
                    self.controller.tree().ends(self.controller.root()).len()
                ));
                ui.separator();
                ui.label(format!("vertices = {}", self.controller.vertices().len()));
                ui.label(format!("triangles = {}", self.controller.triangles().len()));
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                ui.label("Applied on reset");

                ui.separator();
                ui.label("Mesh resolution");
                Self::labeled_drag_usize(
                    ui,
                    "split_count:",
                    &mut self.draft.split_count,
                    3..=64,
                    1.0,
                );
                Self::labeled_drag_usize(
                    ui,
                    "initial_frame_count:",
                    &mut self.draft.initial_frame_count,
                    2..=20,
                    1.0,
                );

                ui.separator();
                ui.label("Segment length");
                Self::labeled_drag_f32(ui, "min:", &mut self.draft.length.min, 0.0..=10.0, 0.05);
                Self::labeled_drag_f32(ui, "max:", &mut self.draft.length.max, 0.0..=10.0, 0.05);

                ui.label("Segment radius");
                Self::labeled_drag_f32(ui, "min:", &mut self.draft.radius.min, 0.0..=5.0, 0.02);
                Self::labeled_drag_f32(ui, "max:", &mut self.draft.radius.max, 0.0..=5.0, 0.02);

                ui.separator();
                ui.label("Growth");
                Self::labeled_drag_f32(
                    ui,
                    "initial_growth:",
                    &mut self.draft.initial_growth,
                    0.0..=1.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "growth_velocity:",
                    &mut self.draft.growth_velocity,
                    0.01..=5.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "spawn_threshold:",
                    &mut self.draft.spawn_threshold,
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("seed:");
                    ui.add(egui::DragValue::new(&mut self.draft.seed).speed(1.0));
                    if ui.button("🎲").clicked() {
                        self.draft.seed = rand::rng().random();
                    }
                });

                ui.separator();
                if ui.button("Apply & reset").clicked() {
                    self.reset();
                }
                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }

                ui.separator();
                ui.label("Scrub growth");
                if ui
                    .add(egui::Slider::new(&mut self.scrub, 0.0..=1.0))
                    .changed()
                {
                    self.controller.set_growth(self.scrub);
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.draft = Config::default();
                }
            });
    }

    /// Builds the central panel where the mesh is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Primary drag orbits the turntable, secondary drag pans.
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                self.camera.yaw += delta.x * 0.01;
                self.camera.pitch = (self.camera.pitch + delta.y * 0.01).clamp(-1.5, 1.5);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.camera.pan += response.drag_delta();
            }

            let vertices = self.controller.vertices();
            let triangles = self.controller.triangles();

            // Normals are recomputed here every frame, so the shading is
            // always in sync with the latest tick or topology rebuild.
            let faces = mesh::sorted_faces(vertices, triangles, &self.camera);
            let outline = egui::Stroke::new(1.0, egui::Color32::from_rgb(10, 50, 20));
            for face in &faces {
                let points: Vec<egui::Pos2> = face
                    .corners
                    .iter()
                    .map(|&v| self.camera.to_screen(v, rect))
                    .collect();

                if self.wireframe {
                    painter.add(egui::Shape::closed_line(points, outline));
                } else {
                    let shade = 0.25 + 0.75 * face.normal.dot(LIGHT_DIR).abs();
                    let fill = egui::Color32::from_rgb(
                        (45.0 * shade) as u8,
                        (150.0 * shade) as u8,
                        (70.0 * shade) as u8,
                    );
                    painter.add(egui::Shape::convex_polygon(
                        points,
                        fill,
                        egui::Stroke::NONE,
                    ));
                }
            }

            // Per-vertex markers, the debug-visualization hook.
            if self.show_vertices {
                for &v in vertices {
                    let p = self.camera.to_screen(self.camera.view(v), rect);
                    painter.circle_filled(p, 2.5, egui::Color32::from_rgb(255, 0, 255));
                }
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.last_dt = dt;

        // Key bindings carried over from the original controller:
        // Space (held) grows, Q spawns every tip, W dumps the tree.
        let grow_held = ctx.input(|i| i.key_down(egui::Key::Space));
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            self.controller.force_grow_terminal_nodes();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::W)) {
            log::info!("tree:\n{}", self.controller.describe_tree());
        }

        if self.running || grow_held {
            self.controller.tick(dt);
            ctx.request_repaint();
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
