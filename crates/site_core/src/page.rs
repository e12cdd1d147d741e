//! Page shell: owns the view state of one rendered portfolio page and turns
//! it into a complete HTML document.

use std::{fmt::Write as _, sync::Arc};

use shared::domain::SERVICE_OPTIONS;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use crate::{
    assets::{AssetStore, ABOUT_PORTRAIT, HERO_PORTRAIT},
    config::SiteConfig,
    content::{
        ABOUT_GREETING, ABOUT_PARAGRAPHS, CONTACT_INTRO, HERO_FIRST_NAME, HERO_LAST_NAME,
        OWNER_NAME, PROJECTS, SERVICES, SIGNATURE, SKILL_GROUPS, SOCIAL_LINKS, TAGLINE,
        TECHNOLOGIES, TESTIMONIAL,
    },
    dom::{Document, ElementId, IntersectionEntry, PointerDown},
    form::{ContactForm, FormEvent, FormSnapshot, FormStatus, SUCCESS_BANNER},
    html::escape,
    menu::{Menu, MENU_BUTTON_ID, MENU_PANEL_ID},
    reveal::{RevealDirection, RevealOptions, RevealText, SegmentMode},
    scene::SceneSlot,
    script::browser_script,
    theme::{Theme, ThemeContext},
};

pub const HERO_NAME_DELAY_MS: u64 = 100;
pub const TAGLINE_DELAY_MS: u64 = 150;
const ACCENT: &str = "#C3E41D";
const HERO_NAME_CLASS: &str = "font-bold text-[18vw] md:text-[200px] leading-[0.75] tracking-tighter uppercase justify-center whitespace-nowrap";
const CARD_CLASS: &str = "p-6 rounded-2xl border border-neutral-200 dark:border-neutral-800 bg-white/50 dark:bg-black/50 backdrop-blur-sm shadow-sm hover:shadow-md transition-all duration-300";
const INPUT_CLASS: &str = "w-full px-4 py-3 rounded-lg bg-neutral-100 dark:bg-neutral-900 border border-transparent focus:border-[#C3E41D] focus:ring-1 focus:ring-[#C3E41D] outline-none transition-all";

pub struct PageShell {
    config: SiteConfig,
    assets: Arc<dyn AssetStore>,
    document: Document,
    theme: ThemeContext,
    menu: Menu,
    reveals: Vec<RevealText>,
    form: FormSnapshot,
    form_events: Option<broadcast::Receiver<FormEvent>>,
    scene: Option<SceneSlot>,
}

impl PageShell {
    pub fn new(config: SiteConfig, assets: Arc<dyn AssetStore>) -> Self {
        let document = Document::new();
        let name_options = RevealOptions {
            delay_ms: HERO_NAME_DELAY_MS,
            mode: SegmentMode::Letters,
            direction: RevealDirection::Top,
            class: HERO_NAME_CLASS.to_string(),
            style: format!("color: {ACCENT}; font-family: 'Fira Code', monospace"),
        };
        let reveals = vec![
            RevealText::new(
                ElementId::new("hero-first-name"),
                HERO_FIRST_NAME,
                name_options.clone(),
            ),
            RevealText::new(ElementId::new("hero-last-name"), HERO_LAST_NAME, name_options),
            RevealText::new(
                ElementId::new("hero-tagline"),
                TAGLINE,
                RevealOptions {
                    delay_ms: TAGLINE_DELAY_MS,
                    mode: SegmentMode::Words,
                    direction: RevealDirection::Top,
                    class: "text-lg md:text-2xl text-center font-light text-neutral-600 dark:text-neutral-400".to_string(),
                    style: "font-family: 'Antic', sans-serif".to_string(),
                },
            ),
        ];

        Self {
            theme: ThemeContext::new(document.clone(), Theme::Dark),
            menu: Menu::new(document.clone()),
            document,
            config,
            assets,
            reveals,
            form: FormSnapshot::default(),
            form_events: None,
            scene: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn reveals(&self) -> &[RevealText] {
        &self.reveals
    }

    pub fn form(&self) -> &FormSnapshot {
        &self.form
    }

    pub fn mount(&mut self) {
        for reveal in &mut self.reveals {
            reveal.mount(&self.document);
        }
    }

    /// Releases every document registration held by the page.
    pub fn unmount(&mut self) {
        for reveal in &mut self.reveals {
            reveal.unmount();
        }
        self.menu.close();
    }

    pub fn handle_intersection(&mut self, entry: &IntersectionEntry) -> bool {
        self.reveals
            .iter_mut()
            .any(|reveal| reveal.on_intersection(entry))
    }

    pub fn pointer_down(&mut self, event: &PointerDown) -> bool {
        self.menu.handle_pointer_down(event)
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    pub fn select_menu_item(&mut self, index: usize) -> Option<&'static str> {
        self.menu.select(index)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    pub fn set_scene(&mut self, scene: SceneSlot) {
        self.scene = Some(scene);
    }

    pub fn apply_form_snapshot(&mut self, snapshot: FormSnapshot) {
        self.form = snapshot;
    }

    /// Follows `form`: takes its current snapshot and queues every later
    /// event for [`PageShell::drain_form_events`].
    pub async fn attach_form(&mut self, form: &ContactForm) {
        let events = form.subscribe();
        self.form = form.snapshot().await;
        self.form_events = Some(events);
    }

    /// Applies queued form events; returns how many were applied.
    pub fn drain_form_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(events) = self.form_events.as_mut() {
            match events.try_recv() {
                Ok(event) => {
                    self.apply_form_event(&event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "page fell behind the contact form");
                }
                Err(TryRecvError::Closed) => {
                    self.form_events = None;
                }
            }
        }
        applied
    }

    pub fn apply_form_event(&mut self, event: &FormEvent) {
        match event {
            FormEvent::StatusChanged {
                status,
                error_message,
                generation,
            } => {
                self.form.status = *status;
                self.form.error_message = error_message.clone();
                self.form.generation = *generation;
            }
            FormEvent::FieldsCleared => self.form.fields = Default::default(),
        }
    }

    pub fn render(&mut self) -> String {
        let mut out = String::with_capacity(32 * 1024);
        let root_class = self.document.root_class_attr();
        let _ = write!(
            out,
            r#"<!DOCTYPE html><html lang="en" class="{}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{} | Portfolio</title><script src="https://cdn.tailwindcss.com"></script></head>"#,
            escape(&root_class),
            escape(OWNER_NAME),
        );
        let _ = write!(
            out,
            r#"<body class="min-h-screen font-sans" style="{}">"#,
            self.page_style()
        );
        out.push_str(&self.render_header());
        out.push_str(r#"<main class="flex flex-col">"#);
        out.push_str(&self.render_hero());
        out.push_str(&render_technologies());
        out.push_str(&self.render_about());
        out.push_str(&render_portfolio());
        out.push_str(&render_services());
        out.push_str(&render_testimonials());
        out.push_str(&self.render_contact());
        let _ = write!(
            out,
            r#"<footer class="py-8 text-center text-sm text-neutral-500 border-t border-neutral-200 dark:border-neutral-800"><p>&copy; {} {}. All rights reserved.</p></footer>"#,
            self.config.year,
            escape(OWNER_NAME)
        );
        out.push_str("</main>");
        let _ = write!(out, "<script>{}</script></body></html>", browser_script());
        out
    }

    fn page_style(&self) -> String {
        format!(
            "background-color: {}; color: {}",
            self.theme.pick("hsl(0 0% 0%)", "hsl(0 0% 98%)"),
            self.foreground()
        )
    }

    fn foreground(&self) -> &'static str {
        self.theme.pick("hsl(0 0% 100%)", "hsl(0 0% 10%)")
    }

    fn render_header(&self) -> String {
        let open = self.menu.is_open();
        let mut entries = String::new();
        for (index, item) in self.menu.items().iter().enumerate() {
            let color = if index == 0 { ACCENT } else { self.foreground() };
            let _ = write!(
                entries,
                r#"<a id="menu-entry-{index}" href="{}" data-menu-entry class="block text-lg md:text-xl font-bold tracking-tight py-1.5 px-2" style="color: {color}">{}</a>"#,
                escape(item.anchor),
                escape(item.label)
            );
        }
        format!(
            concat!(
                r#"<header class="fixed top-0 left-0 right-0 z-50 px-6 py-6 backdrop-blur-sm"><nav class="flex items-center justify-between max-w-screen-2xl mx-auto">"#,
                r#"<div class="relative"><button id="{button}" type="button" class="p-2 text-neutral-500" aria-label="{label}">&#9776;</button>"#,
                r#"<div id="{panel}" class="absolute top-full left-0 w-[200px] md:w-[240px] shadow-2xl mt-2 ml-4 p-4 rounded-lg z-[100]" style="background-color: {panel_bg}"{hidden}>{entries}</div></div>"#,
                r##"<a href="#home" class="text-4xl" style="color: {fg}; font-family: 'Brush Script MT', 'Lucida Handwriting', cursive">{signature}</a>"##,
                r#"<div class="flex items-center gap-3"><a href="{admin}" target="_blank" rel="noopener noreferrer" class="hidden md:flex items-center gap-2 px-3 py-2 text-xs font-medium text-neutral-500" title="Admin Panel"><span>Admin</span></a>"#,
                r#"<button id="theme-toggle" type="button" class="relative w-16 h-8 rounded-full" aria-label="Toggle theme" aria-pressed="{dark}"></button></div>"#,
                r#"</nav></header>"#
            ),
            button = MENU_BUTTON_ID,
            label = if open { "Close menu" } else { "Open menu" },
            panel = MENU_PANEL_ID,
            panel_bg = self.theme.pick("hsl(0 0% 0%)", "hsl(0 0% 98%)"),
            hidden = if open { "" } else { " hidden" },
            entries = entries,
            fg = self.foreground(),
            signature = escape(SIGNATURE),
            admin = escape(self.config.admin_url.as_str()),
            dark = self.theme.is_dark(),
        )
    }

    fn render_hero(&mut self) -> String {
        let scene = self
            .scene
            .as_ref()
            .map(|slot| {
                format!(
                    r#"<div class="absolute inset-0 -z-10 opacity-40">{}</div>"#,
                    slot.render("w-full h-full")
                )
            })
            .unwrap_or_default();
        let mut names = String::new();
        let mut tagline = String::new();
        for reveal in &mut self.reveals {
            let rendered = reveal.render();
            if reveal.options().mode == SegmentMode::Letters {
                let _ = write!(names, "<div>{rendered}</div>");
            } else {
                tagline.push_str(&rendered);
            }
        }
        let technologies = TECHNOLOGIES
            .iter()
            .map(|name| format!(r#"<span class="text-sm text-neutral-400">{}</span>"#, escape(name)))
            .collect::<String>();
        format!(
            concat!(
                r#"<section id="home" class="relative min-h-screen w-full flex flex-col items-center justify-center overflow-hidden">{scene}"#,
                r#"<div class="relative text-center z-10">{names}"#,
                r#"<div class="absolute top-1/2 left-1/2 -translate-x-1/2 -translate-y-1/2 z-10"><div class="w-[100px] h-[160px] md:w-[130px] md:h-[220px] rounded-full overflow-hidden shadow-2xl border-4 border-neutral-100 dark:border-neutral-900">{portrait}</div></div></div>"#,
                r#"<div class="absolute bottom-24 md:bottom-32 left-0 right-0 px-6"><div class="flex justify-center">{tagline}</div><div class="flex justify-center gap-6 mt-8 flex-wrap">{technologies}</div></div>"#,
                r##"<a href="#about" class="absolute bottom-10 left-1/2 -translate-x-1/2 animate-bounce" aria-label="Scroll to about">&#8964;</a></section>"##
            ),
            scene = scene,
            names = names,
            portrait = HERO_PORTRAIT.render(self.assets.as_ref()),
            tagline = tagline,
            technologies = technologies,
        )
    }

    fn render_about(&self) -> String {
        let skills = SKILL_GROUPS
            .iter()
            .map(|group| {
                format!(
                    r#"<div><h4 class="font-bold text-black dark:text-white mb-2">{}</h4><p class="text-sm">{}</p></div>"#,
                    escape(group.title),
                    escape(group.skills)
                )
            })
            .collect::<String>();
        format!(
            concat!(
                r#"<section id="about" class="py-24 md:py-32 max-w-7xl mx-auto px-6">{title}<div class="grid md:grid-cols-2 gap-12 items-center">"#,
                r#"<div class="relative"><div class="absolute inset-0 bg-[#C3E41D] rounded-2xl rotate-3 opacity-20"></div><div class="relative rounded-2xl w-full max-w-md mx-auto shadow-2xl overflow-hidden">{portrait}</div></div>"#,
                r#"<div class="space-y-6 text-lg leading-relaxed text-neutral-600 dark:text-neutral-400"><p><strong class="text-black dark:text-white">{greeting}</strong> {first}</p><p>{second}</p><div class="grid grid-cols-2 gap-4 mt-8">{skills}</div></div>"#,
                r#"</div></section>"#
            ),
            title = section_title("ABOUT ME"),
            portrait = ABOUT_PORTRAIT.render(self.assets.as_ref()),
            greeting = escape(ABOUT_GREETING),
            first = escape(ABOUT_PARAGRAPHS[0]),
            second = escape(ABOUT_PARAGRAPHS[1]),
            skills = skills,
        )
    }

    fn render_contact(&self) -> String {
        let socials = SOCIAL_LINKS
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}" class="hover:text-[#C3E41D] transition-colors" aria-label="{label}">{label}</a>"#,
                    escape(link.href),
                    label = escape(link.label)
                )
            })
            .collect::<String>();
        let fields = &self.form.fields;
        let mut options = String::from(r#"<option value="">Select a service</option>"#);
        for service in SERVICE_OPTIONS {
            let selected = if fields.service == service { " selected" } else { "" };
            let _ = write!(
                options,
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = escape(service)
            );
        }
        let status = self.form.status;
        let error = self.form.error_message.as_deref().unwrap_or_default();
        format!(
            concat!(
                r#"<section id="contact" class="py-24 max-w-3xl mx-auto px-6">{title}<div class="grid gap-8">"#,
                r#"<div class="text-center space-y-4"><p class="text-lg text-neutral-600 dark:text-neutral-400">{intro}</p><div class="flex justify-center gap-6">{socials}</div></div>"#,
                r#"<form id="contact-form" class="space-y-6 mt-8" data-endpoint="{endpoint}" data-status="{status}">"#,
                r#"<div class="grid md:grid-cols-2 gap-6">"#,
                r#"<div class="space-y-2"><label class="text-sm font-medium" for="contact-name">Name</label><input id="contact-name" type="text" name="name" required class="{input}" placeholder="John Doe" value="{name}"></div>"#,
                r#"<div class="space-y-2"><label class="text-sm font-medium" for="contact-email">Email</label><input id="contact-email" type="email" name="email" required class="{input}" placeholder="john@example.com" value="{email}"></div></div>"#,
                r#"<div class="space-y-2"><label class="text-sm font-medium" for="contact-service">Service</label><select id="contact-service" name="service" required class="{input} text-neutral-500">{options}</select></div>"#,
                r#"<div class="space-y-2"><label class="text-sm font-medium" for="contact-message">Message</label><textarea id="contact-message" rows="4" name="message" required minlength="10" class="{input}" placeholder="Tell me about your project...">{message}</textarea></div>"#,
                r#"<div id="form-status-success" class="bg-green-500/20 border border-green-500/50 rounded-lg p-4"{success_hidden}><p class="text-green-300">{success}</p></div>"#,
                r#"<div id="form-status-error" class="bg-red-500/20 border border-red-500/50 rounded-lg p-4"{error_hidden}><p class="text-red-300" id="form-error-message">{error}</p></div>"#,
                r#"<button id="contact-submit" type="submit" class="w-full py-4 text-lg bg-[#C3E41D] text-black hover:bg-[#b2d11b] disabled:opacity-50 disabled:cursor-not-allowed rounded-lg"{disabled}><span id="contact-submit-label">{label}</span></button>"#,
                r#"</form></div></section>"#
            ),
            title = section_title("GET IN TOUCH"),
            intro = escape(CONTACT_INTRO),
            socials = socials,
            endpoint = escape(self.config.contact_endpoint.as_str()),
            status = status.as_str(),
            input = INPUT_CLASS,
            name = escape(&fields.name),
            email = escape(&fields.email),
            options = options,
            message = escape(&fields.message),
            success_hidden = hidden_unless(status == FormStatus::Success),
            success = escape(SUCCESS_BANNER),
            error_hidden = hidden_unless(status == FormStatus::Error),
            error = escape(error),
            disabled = if self.form.submit_disabled() { " disabled" } else { "" },
            label = self.form.submit_label(),
        )
    }
}

fn hidden_unless(shown: bool) -> &'static str {
    if shown {
        ""
    } else {
        " hidden"
    }
}

fn section_title(title: &str) -> String {
    format!(
        r#"<h2 class="text-4xl md:text-5xl font-bold mb-12 text-center tracking-tight">{}</h2>"#,
        escape(title)
    )
}

fn card(class: &str, body: &str) -> String {
    format!(r#"<div class="{CARD_CLASS} {class}">{body}</div>"#)
}

fn render_technologies() -> String {
    let items = TECHNOLOGIES
        .iter()
        .map(|name| {
            format!(
                r#"<div class="flex flex-col items-center gap-3 p-4"><span class="font-semibold">{}</span></div>"#,
                escape(name)
            )
        })
        .collect::<String>();
    format!(
        r#"<section id="technologies" class="py-20 bg-neutral-100 dark:bg-neutral-900/50"><div class="max-w-7xl mx-auto px-6"><div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-6 gap-8">{items}</div></div></section>"#
    )
}

fn render_portfolio() -> String {
    let projects = PROJECTS
        .iter()
        .map(|project| {
            let tags = project
                .tags
                .iter()
                .map(|tag| {
                    format!(
                        r#"<span class="px-2 py-1 text-xs rounded-full bg-[#C3E41D]/20 text-[#C3E41D]">{}</span>"#,
                        escape(tag)
                    )
                })
                .collect::<String>();
            let body = format!(
                r#"<div class="h-48 mb-6 overflow-hidden rounded-lg bg-neutral-200 dark:bg-neutral-800"></div><h3 class="text-xl font-bold mb-2">{}</h3><p class="text-neutral-500 text-sm mb-4">{}</p><div class="flex gap-2 flex-wrap">{tags}</div>"#,
                escape(project.title),
                escape(project.summary)
            );
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                escape(project.url),
                card("group cursor-pointer hover:scale-105 transition-transform duration-300", &body)
            )
        })
        .collect::<String>();
    format!(
        r#"<section id="portfolio" class="py-24 bg-neutral-100 dark:bg-neutral-900/30"><div class="max-w-7xl mx-auto px-6">{}<div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">{projects}</div></div></section>"#,
        section_title("SELECTED WORKS")
    )
}

fn render_services() -> String {
    let services = SERVICES
        .iter()
        .map(|service| {
            card(
                "text-center hover:-translate-y-2",
                &format!(
                    r#"<h3 class="text-xl font-bold mb-4">{}</h3><p class="text-neutral-500 text-sm">{}</p>"#,
                    escape(service.title),
                    escape(service.summary)
                ),
            )
        })
        .collect::<String>();
    format!(
        r#"<section id="services" class="py-24 max-w-7xl mx-auto px-6">{}<div class="grid md:grid-cols-3 gap-8">{services}</div></section>"#,
        section_title("SERVICES")
    )
}

fn render_testimonials() -> String {
    format!(
        r#"<section id="testimonials" class="py-24 bg-neutral-100 dark:bg-neutral-900/30"><div class="max-w-4xl mx-auto px-6 text-center">{}<div class="relative p-8 md:p-12 rounded-2xl bg-white dark:bg-black border border-neutral-200 dark:border-neutral-800"><p class="text-xl md:text-2xl font-light italic mb-8">&quot;{}&quot;</p><div class="font-bold">{}</div><div class="text-sm text-neutral-500">{}</div></div></div></section>"#,
        section_title("CLIENT FEEDBACK"),
        escape(TESTIMONIAL.quote),
        escape(TESTIMONIAL.author),
        escape(TESTIMONIAL.organisation)
    )
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
