use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context as _;
use eframe::egui;
use rfd::FileDialog;
use tokio::runtime::Runtime;

use crate::config::{
    Config, ConfigManager, MAX_EXPORT_HEIGHT, MAX_EXPORT_WIDTH, MIN_EXPORT_HEIGHT,
    MIN_EXPORT_WIDTH,
};
use crate::core::renderer::Viewport;
use crate::core::{composer, exporter, renderer};
use crate::ui::theme::Theme;
use crate::utils::{encoding, file_helper};

/// Main application state.
pub struct HtmlPngConverterApp {
    // Services
    config_manager: ConfigManager,
    tokio_runtime: Runtime,

    // State
    config: Config,
    html_source: String,
    css_source: String,

    // Preview / export progress
    preview_texture: Option<egui::TextureHandle>,
    rendering: bool,
    exporting: bool,

    // Communication
    preview_sender: mpsc::Sender<anyhow::Result<Vec<u8>>>,
    preview_receiver: mpsc::Receiver<anyhow::Result<Vec<u8>>>,

    export_sender: mpsc::Sender<anyhow::Result<PathBuf>>,
    export_receiver: mpsc::Receiver<anyhow::Result<PathBuf>>,

    status: String,
}

impl HtmlPngConverterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config_manager = ConfigManager::new();
        let config = config_manager.load();

        config.theme.apply(&cc.egui_ctx);

        let (preview_sender, preview_receiver) = mpsc::channel();
        let (export_sender, export_receiver) = mpsc::channel();

        Self {
            config_manager,
            tokio_runtime: Runtime::new().expect("Failed to create tokio runtime"),

            config,
            html_source: String::new(),
            css_source: String::new(),

            preview_texture: None,
            rendering: false,
            exporting: false,

            preview_sender,
            preview_receiver,
            export_sender,
            export_receiver,

            status: "Ready".to_string(),
        }
    }

    /// Open an HTML file, pulling in the sibling CSS file when one
    /// exists next to it, then refresh the preview.
    fn open_file(&mut self, ctx: &egui::Context) {
        let Some(path) = FileDialog::new()
            .add_filter("HTML Files", &["html", "htm"])
            .set_directory(file_helper::documents_dir())
            .pick_file()
        else {
            return;
        };

        match encoding::read_file_lossy(&path) {
            Ok(content) => {
                self.html_source = content;

                let css_path = file_helper::sibling_css_path(&path);
                if file_helper::file_exists(&css_path) {
                    match encoding::read_file_lossy(&css_path) {
                        Ok(css) => self.css_source = css,
                        Err(e) => {
                            log::warn!("failed to read {}: {}", css_path.display(), e);
                            self.status = format!("Failed to read {}: {}", css_path.display(), e);
                        }
                    }
                }

                self.config.html_file_path = path.to_string_lossy().into_owned();
                let _ = self.config_manager.save(&self.config);

                self.render_preview(ctx);
            }
            Err(e) => {
                log::warn!("failed to open {}: {}", path.display(), e);
                self.status = format!("Failed to open {}: {}", path.display(), e);
            }
        }
    }

    /// Compose the buffers into one document and render it off-thread.
    fn render_preview(&mut self, ctx: &egui::Context) {
        if self.rendering {
            return;
        }
        self.rendering = true;
        self.status = "Rendering preview...".to_string();

        let document = composer::compose_document(&self.html_source, &self.css_source);
        let viewport = Viewport {
            width: self.config.export_width,
            height: self.config.export_height,
        };
        let delay = self.config.render_delay_ms;
        let sender = self.preview_sender.clone();
        let ctx = ctx.clone();

        self.tokio_runtime.spawn(async move {
            let result = match tokio::task::spawn_blocking(move || {
                renderer::render_to_png(&document, viewport, delay).map_err(anyhow::Error::from)
            })
            .await
            {
                Ok(result) => result,
                Err(e) => Err(anyhow::anyhow!("render task failed: {}", e)),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Save the HTML buffer, and the CSS buffer to the sibling path when
    /// it is non-empty.
    fn save_html(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("HTML Files", &["html"])
            .set_directory(file_helper::documents_dir())
            .set_file_name("index.html")
            .save_file()
        else {
            return;
        };

        if let Err(e) = std::fs::write(&path, &self.html_source) {
            log::error!("failed to save {}: {}", path.display(), e);
            self.status = format!("Failed to save {}: {}", path.display(), e);
            return;
        }

        if !self.css_source.is_empty() {
            let css_path = file_helper::sibling_css_path(&path);
            if let Err(e) = std::fs::write(&css_path, &self.css_source) {
                log::error!("failed to save {}: {}", css_path.display(), e);
                self.status = format!("Failed to save {}: {}", css_path.display(), e);
                return;
            }
            self.status = format!("Saved {} and {}", path.display(), css_path.display());
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Info)
                .set_title("Success")
                .set_description("HTML and CSS files have been saved!")
                .show();
        } else {
            self.status = format!("Saved {}", path.display());
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Info)
                .set_title("Success")
                .set_description("HTML file has been saved!")
                .show();
        }

        self.config.html_file_path = path.to_string_lossy().into_owned();
        let _ = self.config_manager.save(&self.config);
    }

    /// Render the composed document at the configured dimensions and
    /// write it as a PNG to a user-chosen path.
    fn export_png(&mut self, ctx: &egui::Context) {
        if self.html_source.is_empty() {
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title("Warning")
                .set_description("No HTML content to convert!")
                .show();
            return;
        }
        if self.exporting {
            return;
        }

        let Some(path) = FileDialog::new()
            .add_filter("PNG Files", &["png"])
            .set_directory(file_helper::pictures_dir())
            .set_file_name("converted.png")
            .save_file()
        else {
            return;
        };

        self.exporting = true;
        self.status = "Exporting PNG...".to_string();

        let document = composer::compose_document(&self.html_source, &self.css_source);
        let width = self.config.export_width;
        let height = self.config.export_height;
        let delay = self.config.render_delay_ms;
        let sender = self.export_sender.clone();
        let ctx = ctx.clone();

        self.tokio_runtime.spawn(async move {
            let result = match tokio::task::spawn_blocking(move || {
                exporter::export_png(&document, &path, width, height, delay)
            })
            .await
            {
                Ok(result) => result,
                Err(e) => Err(anyhow::anyhow!("export task failed: {}", e)),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Drain finished background jobs. Called once per frame.
    fn poll_jobs(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.preview_receiver.try_recv() {
            self.rendering = false;
            match result {
                Ok(png) => match load_preview_texture(ctx, &png) {
                    Ok(texture) => {
                        self.preview_texture = Some(texture);
                        self.status = "Preview updated".to_string();
                    }
                    Err(e) => {
                        log::error!("failed to decode preview: {:#}", e);
                        self.status = format!("Failed to decode preview: {}", e);
                    }
                },
                Err(e) => {
                    log::error!("preview render failed: {:#}", e);
                    self.status = format!("Preview render failed: {}", e);
                }
            }
        }

        while let Ok(result) = self.export_receiver.try_recv() {
            self.exporting = false;
            match result {
                Ok(path) => {
                    self.status = format!("Saved {}", path.display());
                    rfd::MessageDialog::new()
                        .set_level(rfd::MessageLevel::Info)
                        .set_title("Success")
                        .set_description("HTML content has been saved as PNG!")
                        .show();
                }
                Err(e) => {
                    log::error!("export failed: {:#}", e);
                    self.status = format!("Export failed: {}", e);
                }
            }
        }
    }

    fn ui_editors(&mut self, ui: &mut egui::Ui) {
        let editor_height = ((ui.available_height() - 60.0) / 2.0).max(80.0);

        ui.label("HTML");
        egui::ScrollArea::vertical()
            .id_salt("html_editor")
            .max_height(editor_height)
            .show(ui, |ui| {
                ui.add_sized(
                    [ui.available_width(), editor_height],
                    egui::TextEdit::multiline(&mut self.html_source)
                        .font(egui::TextStyle::Monospace)
                        .code_editor()
                        .hint_text("<html>..."),
                );
            });

        ui.separator();

        ui.label("CSS");
        egui::ScrollArea::vertical()
            .id_salt("css_editor")
            .max_height(editor_height)
            .show(ui, |ui| {
                ui.add_sized(
                    [ui.available_width(), editor_height],
                    egui::TextEdit::multiline(&mut self.css_source)
                        .font(egui::TextStyle::Monospace)
                        .code_editor()
                        .hint_text("body { ... }"),
                );
            });
    }

    fn ui_preview(&mut self, ui: &mut egui::Ui) {
        ui.label("Preview");
        egui::ScrollArea::both()
            .id_salt("preview_scroll")
            .show(ui, |ui| {
                if let Some(texture) = &self.preview_texture {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                } else if self.rendering {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label("Rendering...");
                    });
                } else {
                    ui.label("No preview yet. Open an HTML file or press Render Preview.");
                }
            });
    }
}

impl eframe::App for HtmlPngConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs(ctx);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("HTML/CSS to PNG Converter");
                ui.separator();

                if ui.button("📁 Open HTML").clicked() {
                    self.open_file(ctx);
                }
                if ui
                    .add_enabled(!self.rendering, egui::Button::new("🔄 Render Preview"))
                    .clicked()
                {
                    self.render_preview(ctx);
                }
                if ui.button("💾 Save HTML/CSS").clicked() {
                    self.save_html();
                }
                if ui
                    .add_enabled(!self.exporting, egui::Button::new("🖼 Export to PNG"))
                    .clicked()
                {
                    self.export_png(ctx);
                }

                if self.rendering || self.exporting {
                    ui.add(egui::Spinner::new());
                }

                ui.separator();

                ui.label("PNG Width:");
                if ui
                    .add(
                        egui::DragValue::new(&mut self.config.export_width)
                            .range(MIN_EXPORT_WIDTH..=MAX_EXPORT_WIDTH),
                    )
                    .changed()
                {
                    let _ = self.config_manager.save(&self.config);
                }

                ui.label("PNG Height:");
                if ui
                    .add(
                        egui::DragValue::new(&mut self.config.export_height)
                            .range(MIN_EXPORT_HEIGHT..=MAX_EXPORT_HEIGHT),
                    )
                    .changed()
                {
                    let _ = self.config_manager.save(&self.config);
                }

                ui.separator();

                ui.label("Theme:");
                egui::ComboBox::from_id_salt("theme_selector")
                    .selected_text(self.config.theme.label())
                    .show_ui(ui, |ui| {
                        for theme in Theme::ALL {
                            if ui
                                .selectable_value(&mut self.config.theme, theme, theme.label())
                                .changed()
                            {
                                self.config.theme.apply(ctx);
                                let _ = self.config_manager.save(&self.config);
                            }
                        }
                    });
            });
        });

        // Bottom status bar
        egui::TopBottomPanel::bottom("statusbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(concat!("v", env!("CARGO_PKG_VERSION")));
                });
            });
        });

        // Left: editors, right: preview
        egui::SidePanel::left("editors")
            .default_width(520.0)
            .resizable(true)
            .show(ctx, |ui| self.ui_editors(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.ui_preview(ui));
    }
}

/// Decode captured PNG bytes and upload them as an egui texture.
fn load_preview_texture(
    ctx: &egui::Context,
    png: &[u8],
) -> anyhow::Result<egui::TextureHandle> {
    let image = image::load_from_memory(png).context("decoding captured bitmap")?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
    Ok(ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR))
}
