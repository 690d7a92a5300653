use std::path::{Path, PathBuf};

use eframe::egui;

use spiderview::config::SpiderConfig;
use spiderview::controller::{Activation, NavigationController};
use spiderview::shell;
use spiderview::tree::{NodeId, NodeKind};
use spiderview::tree_view::StyleSlot;

/// Pick-up distance for clicks on web labels, in pixels.
const CLICK_RADIUS: f32 = 40.0;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("spiderview"),
        ..Default::default()
    };

    eframe::run_native(
        "spiderview",
        options,
        Box::new(|cc| {
            configure_style(&cc.egui_ctx);
            Box::new(SpiderApp::default())
        }),
    )
}

fn configure_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(0, 17, 0);
    visuals.window_fill = egui::Color32::from_rgb(0, 17, 0);
    visuals.override_text_color = Some(egui::Color32::from_rgb(0, 255, 0));
    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    ctx.set_style(style);
}

/// The four text style slots of the tree view plus canvas colors.
struct Palette {
    canvas: egui::Color32,
    edge: egui::Color32,
    shadow: egui::Color32,
    folder_text: egui::Color32,
    file_text: egui::Color32,
    folder_symbol: egui::Color32,
    tree_glyph: egui::Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            canvas: egui::Color32::BLACK,
            edge: egui::Color32::from_rgb(0, 255, 0),
            shadow: egui::Color32::from_rgb(0, 34, 0),
            folder_text: egui::Color32::from_rgb(136, 255, 136),
            file_text: egui::Color32::from_rgb(255, 255, 0),
            folder_symbol: egui::Color32::from_rgb(0, 85, 0),
            tree_glyph: egui::Color32::from_rgb(85, 85, 85),
        }
    }
}

impl Palette {
    fn slot_color(&self, slot: StyleSlot) -> egui::Color32 {
        match slot {
            StyleSlot::FolderName => self.folder_text,
            StyleSlot::FolderSymbol => self.folder_symbol,
            StyleSlot::TreeGlyph => self.tree_glyph,
            StyleSlot::FileName => self.file_text,
        }
    }
}

struct SpiderApp {
    controller: NavigationController,
    path_input: String,
    max_depth: u32,
    max_files: usize,
    pan: egui::Vec2,
    /// World position to bring to the viewport center on the next frame.
    focus_target: Option<egui::Pos2>,
    context_node: Option<(NodeId, PathBuf)>,
    palette: Palette,
}

impl Default for SpiderApp {
    fn default() -> Self {
        let config = SpiderConfig::default();
        Self {
            path_input: String::new(),
            max_depth: config.max_depth,
            max_files: config.max_files_per_folder,
            controller: NavigationController::new(config),
            pan: egui::Vec2::ZERO,
            focus_target: None,
            context_node: None,
            palette: Palette::default(),
        }
    }
}

impl SpiderApp {
    fn start_scan(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        self.pan = egui::Vec2::ZERO;
        self.focus_target = None;
        self.controller.open_root(Path::new(&path));
    }

    fn apply_limits(&mut self) {
        let mut config = self.controller.config().clone();
        config.max_depth = self.max_depth;
        config.max_files_per_folder = self.max_files;
        self.controller.set_config(config);
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let back = ui.add_enabled(
                    self.controller.history_len() > 0,
                    egui::Button::new("◄ BACK"),
                );
                if back.clicked() {
                    self.controller.back();
                }

                ui.label("PATH:");
                let path_edit = ui.add(
                    egui::TextEdit::singleline(&mut self.path_input)
                        .desired_width(320.0)
                        .font(egui::FontId::monospace(13.0)),
                );
                let submitted =
                    path_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.label("DEPTH:");
                let depth_changed = ui
                    .add(egui::DragValue::new(&mut self.max_depth).clamp_range(1..=10))
                    .changed();
                ui.label("MAX FILES:");
                let files_changed = ui
                    .add(egui::DragValue::new(&mut self.max_files).clamp_range(1..=100))
                    .changed();
                if depth_changed || files_changed {
                    self.apply_limits();
                }

                if ui.button("SCAN").clicked() || submitted {
                    self.start_scan();
                }

                if self.controller.is_scanning() {
                    ui.spinner();
                }
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(
                egui::RichText::new(self.controller.status())
                    .font(egui::FontId::monospace(12.0)),
            );
        });
    }

    fn tree_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("tree_panel")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing.y = 2.0;
                        let mut clicked_line = None;

                        if let Some(view) = self.controller.tree_view() {
                            for (line_no, line) in view.lines.iter().enumerate() {
                                let mut job = egui::text::LayoutJob::default();
                                for (text, slot) in line.segments() {
                                    job.append(
                                        &text,
                                        0.0,
                                        egui::TextFormat {
                                            font_id: egui::FontId::monospace(13.0),
                                            color: self.palette.slot_color(slot),
                                            ..Default::default()
                                        },
                                    );
                                }
                                let response = ui.add(
                                    egui::Label::new(job)
                                        .wrap(false)
                                        .sense(egui::Sense::click()),
                                );
                                if response.clicked() {
                                    clicked_line = Some(line_no);
                                }
                            }
                        }

                        if let Some(line_no) = clicked_line {
                            let node = self
                                .controller
                                .tree_view()
                                .and_then(|v| v.node_at_line(line_no));
                            if let Some(id) = node {
                                if let Activation::Focus(pos) = self.controller.activate(id) {
                                    self.focus_target = Some(egui::pos2(pos.x, pos.y));
                                }
                            }
                        }
                    });
            });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.palette.canvas))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;

                if response.dragged() {
                    self.pan += response.drag_delta();
                }
                if let Some(target) = self.focus_target.take() {
                    self.pan += rect.center() - target;
                }

                let center =
                    glam::Vec2::new(rect.center().x + self.pan.x, rect.center().y + self.pan.y);
                self.controller.relayout(center);

                if response.clicked() {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let hit = self.controller.web_view().and_then(|web| {
                            web.hit_test(glam::Vec2::new(pointer.x, pointer.y), CLICK_RADIUS)
                                .map(|node| node.id)
                        });
                        if let Some(id) = hit {
                            if let Activation::Focus(pos) = self.controller.activate(id) {
                                self.focus_target = Some(egui::pos2(pos.x, pos.y));
                            }
                        }
                    }
                }

                if response.secondary_clicked() {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        self.context_node = self
                            .controller
                            .web_view()
                            .and_then(|web| {
                                web.hit_test(glam::Vec2::new(pointer.x, pointer.y), CLICK_RADIUS)
                                    .map(|node| node.id)
                            })
                            .and_then(|id| {
                                self.controller.node_path(id).map(|path| (id, path))
                            });
                    }
                }

                response.context_menu(|ui| match self.context_node.clone() {
                    Some((id, path)) => {
                        if ui.button("OPEN IN FILE MANAGER").clicked() {
                            shell::reveal(&path);
                            ui.close_menu();
                        }
                        if ui.button("COPY PATH").clicked() {
                            ui.output_mut(|o| o.copied_text = path.display().to_string());
                            ui.close_menu();
                        }
                        if ui.button("SET AS ROOT").clicked() {
                            self.controller.activate(id);
                            ui.close_menu();
                        }
                    }
                    None => {
                        ui.close_menu();
                    }
                });

                if let Some(web) = self.controller.web_view() {
                    for edge in &web.edges {
                        let points = [
                            egui::pos2(edge.from.x, edge.from.y),
                            egui::pos2(edge.to.x, edge.to.y),
                        ];
                        painter.extend(egui::Shape::dashed_line(
                            &points,
                            egui::Stroke::new(1.0, self.palette.edge),
                            4.0,
                            3.0,
                        ));
                    }

                    for node in &web.nodes {
                        let pos = egui::pos2(node.pos.x, node.pos.y);
                        let (color, font) = match node.kind {
                            NodeKind::Folder => {
                                let color = if node.inaccessible {
                                    self.palette.folder_symbol
                                } else {
                                    self.palette.folder_text
                                };
                                (color, egui::FontId::monospace(13.0))
                            }
                            NodeKind::File => {
                                (self.palette.file_text, egui::FontId::monospace(12.0))
                            }
                        };
                        painter.text(
                            pos + egui::vec2(1.5, 1.5),
                            egui::Align2::CENTER_CENTER,
                            &node.label,
                            font.clone(),
                            self.palette.shadow,
                        );
                        painter.text(pos, egui::Align2::CENTER_CENTER, &node.label, font, color);
                    }
                }
            });
    }
}

impl eframe::App for SpiderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        self.top_bar(ctx);
        self.status_bar(ctx);
        self.tree_panel(ctx);
        self.canvas(ctx);

        if self.controller.is_scanning() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
