use super::*;
use shared::protocol::ContactPayload;

use crate::{
    assets::NoAssets,
    dom::ElementPath,
    form::{MissingContactTransport, NETWORK_ERROR_MESSAGE},
    scene::{GradientFallback, SceneSlot},
    theme::DARK_CLASS,
};

fn shell() -> PageShell {
    let config = SiteConfig::from_public_url_at("http://localhost:5000/", 2026).expect("config");
    PageShell::new(config, Arc::new(NoAssets))
}

#[test]
fn renders_complete_document() {
    let mut page = shell();
    let html = page.render();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<html lang="en" class="dark">"#));
    for section in ["home", "technologies", "about", "portfolio", "services", "testimonials", "contact"] {
        assert!(html.contains(&format!(r#"<section id="{section}""#)), "missing {section}");
    }
    for label in ["HOME", "ABOUT", "PORTFOLIO", "SERVICES", "TESTIMONIALS", "CONTACT"] {
        assert!(html.contains(&format!(">{label}</a>")), "missing {label}");
    }
    assert!(html.contains("&copy; 2026 Arshad Anwar."));
    assert!(html.contains(r#"data-endpoint="http://localhost:5000/api/submit-contact""#));
    assert!(html.contains(
        r#"href="http://localhost:5000/admin/login" target="_blank" rel="noopener noreferrer""#
    ));
    assert!(html.contains("Delhi High Court Bar Association"));
    assert!(html.contains("mailto:arshad@legalsuccessindia.com"));
    assert!(html.contains("const THRESHOLD = 0.1;"));
}

#[test]
fn hero_reveals_use_letter_and_word_modes() {
    let page = shell();
    let reveals = page.reveals();
    assert_eq!(reveals.len(), 3);
    assert_eq!(reveals[0].text(), "ARSHAD");
    assert_eq!(reveals[0].options().mode, SegmentMode::Letters);
    assert_eq!(reveals[0].options().delay_ms, 100);
    assert_eq!(reveals[1].text(), "ANWAR");
    assert_eq!(reveals[2].text(), TAGLINE);
    assert_eq!(reveals[2].options().mode, SegmentMode::Words);
    assert_eq!(reveals[2].options().delay_ms, 150);
}

#[test]
fn ampersand_in_tagline_is_escaped() {
    let mut page = shell();
    let html = page.render();
    assert!(html.contains(">&amp;\u{00A0}</span>"));
    assert!(html.contains("<option value=\"Maintenance &amp; Updates\">"));
}

#[test]
fn missing_portraits_render_initials() {
    let mut page = shell();
    let html = page.render();
    assert!(html.contains(">AA</div>"));
    assert!(html.contains(">ARSHAD ANWAR</div>"));
    assert!(!html.contains("<img"));
}

#[test]
fn mount_and_intersection_drive_reveals() {
    let mut page = shell();
    page.mount();
    assert_eq!(page.document().observer_count(), 3);

    assert!(page.handle_intersection(&IntersectionEntry::new(
        ElementId::new("hero-tagline"),
        0.5
    )));
    assert_eq!(page.document().observer_count(), 2);
    assert!(page.reveals()[2].is_visible());

    page.unmount();
    assert_eq!(page.document().observer_count(), 0);
}

#[test]
fn menu_and_theme_reflect_in_markup() {
    let mut page = shell();
    assert!(page.render().contains(r#"aria-label="Open menu""#));

    page.toggle_menu();
    let html = page.render();
    assert!(html.contains(r#"aria-label="Close menu""#));
    assert_eq!(page.document().pointer_listener_count(), 1);

    page.pointer_down(&PointerDown {
        path: ElementPath::from_ids(["body", "contact"]),
    });
    assert!(!page.menu().is_open());

    page.toggle_theme();
    assert!(!page.document().has_root_class(DARK_CLASS));
    assert!(page.render().contains(r#"<html lang="en" class="">"#));
    page.toggle_theme();
    assert!(page.document().has_root_class(DARK_CLASS));
}

#[test]
fn form_events_drive_status_markup() {
    let mut page = shell();
    page.apply_form_event(&FormEvent::StatusChanged {
        status: FormStatus::Loading,
        error_message: None,
        generation: 1,
    });
    let html = page.render();
    assert!(html.contains("Sending..."));
    assert!(html.contains(r#"data-status="loading""#));
    assert!(html.contains("disabled><span"));

    page.apply_form_event(&FormEvent::StatusChanged {
        status: FormStatus::Error,
        error_message: Some("<b>bad</b>".into()),
        generation: 1,
    });
    let html = page.render();
    assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
    assert!(html.contains(r#"<div id="form-status-error" class="bg-red-500/20 border border-red-500/50 rounded-lg p-4">"#));
    assert!(html.contains("Send Message"));
}

#[tokio::test]
async fn attached_form_feeds_status_into_markup() {
    let mut page = shell();
    let form = ContactForm::new(Arc::new(MissingContactTransport));
    page.attach_form(&form).await;
    assert_eq!(page.drain_form_events(), 0);

    form.fill(ContactPayload {
        name: "Ravi".into(),
        email: "ravi@example.com".into(),
        service: "Other".into(),
        message: "Need a new practice website".into(),
    })
    .await
    .expect("fill");
    assert_eq!(form.submit().await.expect("submit"), FormStatus::Error);

    assert_eq!(page.drain_form_events(), 2);
    assert_eq!(page.form().status, FormStatus::Error);
    let html = page.render();
    assert!(html.contains(NETWORK_ERROR_MESSAGE));
    assert!(html.contains(r#"data-status="error""#));

    drop(form);
    assert_eq!(page.drain_form_events(), 0);
}

#[test]
fn scene_slot_renders_in_hero() {
    let mut page = shell();
    page.set_scene(SceneSlot::Ready(Arc::new(GradientFallback)));
    assert!(page.render().contains(r#"data-scene="gradient""#));
}
