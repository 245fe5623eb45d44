use crate::api::ApiClient;
use crate::catalog::{Catalog, Product};
use crate::event::AppEvent;
use crate::notify::{NotificationKind, Notifications};
use crate::theme::Theme;
use crate::ui::form::ProductForm;
use eframe::egui::{self, Align2, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

struct EditState {
    id: u64,
    form: ProductForm,
    price_invalid: bool,
}

struct DeleteConfirm {
    id: u64,
    title: String,
}

pub struct StorefrontApp {
    rx: Receiver<AppEvent>,
    api: ApiClient,
    theme: Theme,
    catalog: Catalog,
    categories: Vec<String>,
    categories_open: bool,
    loading_products: bool,
    pending_create: bool,
    pending_updates: usize,
    add_form: ProductForm,
    edit: Option<EditState>,
    delete_confirm: Option<DeleteConfirm>,
    startup_alerts: Vec<String>,
    notifications: Notifications,
    diagnostics_log: Vec<String>,
}

impl StorefrontApp {
    pub fn new(rx: Receiver<AppEvent>, api: ApiClient) -> Self {
        Self {
            rx,
            api,
            theme: Theme::default(),
            catalog: Catalog::default(),
            categories: Vec::new(),
            categories_open: false,
            loading_products: true,
            pending_create: false,
            pending_updates: 0,
            add_form: ProductForm::default(),
            edit: None,
            delete_confirm: None,
            startup_alerts: Vec::new(),
            notifications: Notifications::default(),
            diagnostics_log: Vec::new(),
        }
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn drain_events(&mut self, now: Instant) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::ProductsLoaded(products) => {
                self.loading_products = false;
                self.log_diagnostic(format!("loaded {} products", products.len()));
                self.catalog.replace_all(products);
            }
            AppEvent::ProductsFailed(message) => {
                self.loading_products = false;
                self.log_diagnostic(format!("product fetch failed: {message}"));
                self.startup_alerts.push(message);
            }
            AppEvent::CategoriesLoaded(categories) => {
                self.log_diagnostic(format!("loaded {} categories", categories.len()));
                self.categories = categories;
            }
            AppEvent::CategoriesFailed(message) => {
                self.log_diagnostic(format!("category fetch failed: {message}"));
                self.startup_alerts.push(message);
            }
            AppEvent::ProductCreated(product) => {
                self.pending_create = false;
                self.log_diagnostic(format!("created product {}", product.id));
                self.notifications.success(
                    format!("Product \"{}\" added successfully!", product.title),
                    now,
                );
                self.catalog.prepend(product);
                self.add_form.reset();
            }
            AppEvent::CreateFailed(message) => {
                self.pending_create = false;
                self.log_diagnostic(format!("create failed: {message}"));
                self.notifications.error(message, now);
            }
            AppEvent::ProductUpdated { id, title } => {
                self.pending_updates = self.pending_updates.saturating_sub(1);
                self.log_diagnostic(format!("server acknowledged update of product {id}"));
                self.notifications
                    .success(format!("Product \"{title}\" updated successfully!"), now);
            }
            AppEvent::UpdateFailed { id, message } => {
                self.pending_updates = self.pending_updates.saturating_sub(1);
                self.log_diagnostic(format!("update of product {id} failed: {message}"));
                self.notifications.error(message, now);
            }
        }
    }

    fn open_edit(&mut self, id: u64, now: Instant) {
        match self.catalog.get(id) {
            Some(product) => {
                self.edit = Some(EditState {
                    id,
                    form: ProductForm::from_product(product),
                    price_invalid: false,
                });
            }
            None => self.notifications.error("Product not found.", now),
        }
    }

    // Catalog first, server second: the update request never blocks or
    // reverts the local edit.
    fn submit_edit(&mut self, now: Instant) {
        let Some(edit) = self.edit.take() else {
            return;
        };
        if !edit.form.price_is_numeric() {
            self.edit = Some(EditState {
                price_invalid: true,
                ..edit
            });
            return;
        }

        match self.catalog.update(edit.id, edit.form.draft()) {
            Some(updated) => {
                self.log_diagnostic(format!("edited product {} locally", edit.id));
                self.pending_updates += 1;
                self.api.spawn_update(updated);
            }
            None => self.notifications.error("Product not found.", now),
        }
    }

    fn confirm_delete(&mut self, now: Instant) {
        let Some(confirm) = self.delete_confirm.take() else {
            return;
        };
        match self.catalog.remove(confirm.id) {
            Some(_) => {
                self.log_diagnostic(format!("deleted product {} locally", confirm.id));
                self.notifications
                    .success("Product deleted successfully!", now);
            }
            None => self.notifications.error("Product not found.", now),
        }
    }

    fn decline_delete(&mut self, now: Instant) {
        self.delete_confirm = None;
        self.notifications
            .error("Product deletion was cancelled.", now);
    }

    fn submit_add(&mut self) {
        self.pending_create = true;
        self.log_diagnostic("submitted new product draft");
        self.api.spawn_create(self.add_form.draft());
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Vitrine");
                ui.separator();
                if ui.button("Categories").clicked() {
                    self.categories_open = !self.categories_open;
                }
                if let Some(active) = self.catalog.active_category() {
                    ui.label(
                        RichText::new(format!("filter: {active}")).color(self.theme.accent_primary),
                    );
                }
                ui.separator();
                ui.label(
                    RichText::new(format!("{} products", self.catalog.len()))
                        .color(self.theme.text_muted),
                );
            });
        });
    }

    fn render_categories_panel(&mut self, ctx: &egui::Context) {
        if !self.categories_open {
            return;
        }

        egui::SidePanel::left("categories_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Categories");
                    if ui.button("Close").clicked() {
                        self.categories_open = false;
                    }
                });
                ui.separator();

                if self.categories.is_empty() {
                    ui.label(RichText::new("No categories loaded").color(self.theme.text_muted));
                    return;
                }

                let mut clicked: Option<String> = None;
                for category in &self.categories {
                    if ui.button(category).clicked() {
                        clicked = Some(category.clone());
                    }
                }
                if let Some(category) = clicked {
                    self.log_diagnostic(format!("filter set to {category}"));
                    self.catalog.set_active_category(category);
                }
            });
    }

    fn render_add_form(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("add_product_panel").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_8);
            ui.strong("Add product");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_form.title)
                        .hint_text("Title")
                        .desired_width(160.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_form.price)
                        .hint_text("Price")
                        .desired_width(80.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_form.description)
                        .hint_text("Description")
                        .desired_width(220.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_form.category)
                        .hint_text("Category")
                        .desired_width(120.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.add_form.image)
                        .hint_text("Image URL")
                        .desired_width(180.0),
                );

                let submit = ui
                    .add_enabled(!self.pending_create, egui::Button::new("Add Product"))
                    .clicked();
                if self.pending_create {
                    ui.add(egui::Spinner::new());
                }
                if submit {
                    self.submit_add();
                }
            });
            ui.add_space(self.theme.spacing_8);
        });
    }

    fn render_products_panel(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        let visible: Vec<Product> = self.catalog.visible().into_iter().cloned().collect();
        let mut clicked_edit: Option<u64> = None;
        let mut clicked_delete: Option<(u64, String)> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Products");
            ui.separator();

            if self.loading_products {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Loading products...");
                });
                return;
            }

            if visible.is_empty() {
                ui.label(RichText::new("No products to show").color(theme.text_muted));
            }

            let list_height = (ui.available_height() - 140.0).max(120.0);
            ScrollArea::vertical()
                .id_salt("product_list")
                .max_height(list_height)
                .show(ui, |ui| {
                    for product in &visible {
                        theme.card_frame().show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.strong(&product.title);
                                    ui.label(format!("Price: {}", product.price));
                                    ui.label(
                                        RichText::new(&product.category)
                                            .small()
                                            .color(theme.text_muted),
                                    );
                                    ui.label(&product.description);
                                    ui.label(
                                        RichText::new(&product.image)
                                            .small()
                                            .color(theme.text_muted),
                                    );
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Min),
                                    |ui| {
                                        if ui.button("Delete").clicked() {
                                            clicked_delete =
                                                Some((product.id, product.title.clone()));
                                        }
                                        if ui.button("Edit").clicked() {
                                            clicked_edit = Some(product.id);
                                        }
                                    },
                                );
                            });
                        });
                    }
                });

            ui.separator();
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(entry);
                            }
                        });
                });
        });

        let now = Instant::now();
        if let Some(id) = clicked_edit {
            self.open_edit(id, now);
        }
        if let Some((id, title)) = clicked_delete {
            self.delete_confirm = Some(DeleteConfirm { id, title });
        }
    }

    fn render_edit_window(&mut self, ctx: &egui::Context) {
        let theme = self.theme.clone();
        let mut submit = false;
        let mut cancel = false;

        let Some(edit) = self.edit.as_mut() else {
            return;
        };

        egui::Window::new("Edit product")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Title");
                ui.text_edit_singleline(&mut edit.form.title);
                ui.label("Price");
                ui.text_edit_singleline(&mut edit.form.price);
                if edit.price_invalid {
                    ui.label(RichText::new("Price must be a number").color(theme.danger));
                }
                ui.label("Description");
                ui.text_edit_singleline(&mut edit.form.description);
                ui.label("Category");
                ui.text_edit_singleline(&mut edit.form.category);
                ui.label("Image URL");
                ui.text_edit_singleline(&mut edit.form.image);

                ui.add_space(theme.spacing_8);
                ui.horizontal(|ui| {
                    submit = ui.button("Save").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        let now = Instant::now();
        if submit {
            self.submit_edit(now);
        } else if cancel {
            self.edit = None;
        }
    }

    fn render_delete_confirm(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.delete_confirm.as_ref() else {
            return;
        };
        let title = pending.title.clone();
        let mut confirm = false;
        let mut decline = false;

        let modal = egui::Modal::new(egui::Id::new("delete_confirm")).show(ctx, |ui| {
            ui.heading("Delete product");
            ui.label(format!("Are you sure you want to delete \"{title}\"?"));
            ui.add_space(self.theme.spacing_8);
            ui.horizontal(|ui| {
                confirm = ui.button("Delete").clicked();
                decline = ui.button("Cancel").clicked();
            });
        });

        let now = Instant::now();
        if confirm {
            self.confirm_delete(now);
        } else if decline || modal.should_close() {
            self.decline_delete(now);
        }
    }

    // Tier-one failures block the whole surface until acknowledged.
    fn render_startup_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.startup_alerts.first().cloned() else {
            return;
        };

        let mut dismissed = false;
        let modal = egui::Modal::new(egui::Id::new("load_error")).show(ctx, |ui| {
            ui.heading("Load error");
            ui.label(RichText::new(message).color(self.theme.danger));
            ui.add_space(self.theme.spacing_8);
            dismissed = ui.button("OK").clicked();
        });

        if dismissed || modal.should_close() {
            self.dismiss_startup_alert();
        }
    }

    fn dismiss_startup_alert(&mut self) {
        if !self.startup_alerts.is_empty() {
            self.startup_alerts.remove(0);
        }
    }

    fn render_notifications(&mut self, ctx: &egui::Context) {
        if self.notifications.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .anchor(Align2::RIGHT_TOP, [-12.0, 48.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for notification in self.notifications.iter() {
                    let accent = match notification.kind {
                        NotificationKind::Success => self.theme.success,
                        NotificationKind::Error => self.theme.danger,
                    };
                    self.theme.banner_frame(accent).show(ui, |ui| {
                        ui.label(RichText::new(&notification.message).color(accent));
                    });
                    ui.add_space(self.theme.spacing_8 / 2.0);
                }
            });
    }
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_events(now);
        self.notifications.prune(now);

        self.render_top_bar(ctx);
        self.render_categories_panel(ctx);
        self.render_add_form(ctx);
        self.render_products_panel(ctx);
        self.render_edit_window(ctx);
        self.render_delete_confirm(ctx);
        self.render_startup_alert(ctx);
        self.render_notifications(ctx);

        // Keep repainting while anything is in flight or waiting to expire,
        // so background outcomes and banner expiry show without user input.
        if self.loading_products
            || self.pending_create
            || self.pending_updates > 0
            || !self.notifications.is_empty()
        {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}
