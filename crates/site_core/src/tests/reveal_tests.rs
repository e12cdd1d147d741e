use super::*;

fn reveal(text: &str, options: RevealOptions) -> RevealText {
    RevealText::new(ElementId::new("reveal"), text, options)
}

fn entry(ratio: f32) -> IntersectionEntry {
    IntersectionEntry::new(ElementId::new("reveal"), ratio)
}

#[test]
fn mount_registers_single_observer() {
    let document = Document::new();
    let mut text = reveal("Hello world", RevealOptions::default());
    text.mount(&document);
    text.mount(&document);
    assert_eq!(document.observer_count(), 1);
    assert!(document.is_observed(&ElementId::new("reveal")));
}

#[test]
fn below_threshold_entries_are_ignored() {
    let document = Document::new();
    let mut text = reveal("Hello world", RevealOptions::default());
    text.mount(&document);

    assert!(!text.on_intersection(&entry(0.05)));
    assert!(!text.is_visible());
    assert_eq!(document.observer_count(), 1);

    assert!(text.on_intersection(&entry(0.1)));
    assert!(text.is_visible());
    assert_eq!(document.observer_count(), 0);
}

#[test]
fn visibility_never_reverts() {
    let document = Document::new();
    let mut text = reveal("Hello world", RevealOptions::default());
    text.mount(&document);
    assert!(text.on_intersection(&entry(0.8)));

    assert!(!text.on_intersection(&entry(0.0)));
    assert!(text.is_visible());

    text.mount(&document);
    assert_eq!(document.observer_count(), 0);
    text.unmount();
    assert!(text.is_visible());
}

#[test]
fn entries_for_other_elements_do_not_reveal() {
    let document = Document::new();
    let mut text = reveal("Hello", RevealOptions::default());
    text.mount(&document);
    let other = IntersectionEntry::new(ElementId::new("elsewhere"), 1.0);
    assert!(!text.on_intersection(&other));
    assert!(!text.is_visible());
}

#[test]
fn unmount_releases_observer_while_hidden() {
    let document = Document::new();
    let mut text = reveal("Hello", RevealOptions::default());
    text.mount(&document);
    text.unmount();
    assert_eq!(document.observer_count(), 0);
    assert!(!text.on_intersection(&entry(1.0)));
}

#[test]
fn segments_are_scheduled_by_index_times_delay() {
    let mut text = reveal(
        "ARSHAD",
        RevealOptions {
            delay_ms: 100,
            mode: SegmentMode::Letters,
            ..RevealOptions::default()
        },
    );
    let schedule = text.transition_schedule();
    assert_eq!(schedule.len(), 6);
    for (n, start) in schedule.iter().enumerate() {
        assert_eq!(*start, Duration::from_millis(100 * n as u64));
    }
}

#[test]
fn hidden_segments_stay_hidden_until_visible() {
    let document = Document::new();
    let mut text = reveal("one two", RevealOptions::default());
    text.mount(&document);

    let hidden = text.segment_style(1);
    assert_eq!(hidden.blur_px, HIDDEN_BLUR_PX);
    assert_eq!(hidden.opacity, 0.0);
    assert_eq!(hidden.translate_y_px, -20);

    text.on_intersection(&entry(1.0));
    let shown = text.segment_style(1);
    assert_eq!(shown.blur_px, 0);
    assert_eq!(shown.opacity, 1.0);
    assert_eq!(shown.translate_y_px, 0);
    assert_eq!(shown.transition_delay, Duration::from_millis(50));
}

#[test]
fn bottom_direction_offsets_downward() {
    let style = SegmentStyle::for_segment(false, 0, 50, RevealDirection::Bottom);
    assert_eq!(style.translate_y_px, 20);
    assert!(style.to_css().contains("translateY(20px)"));
}

#[test]
fn word_mode_keeps_empty_segments_and_nbsp() {
    let mut text = reveal("a  b", RevealOptions::default());
    assert_eq!(&*text.segments(), &["a", "", "b"]);
    assert_eq!(
        text.display_segments(),
        vec!["a\u{00A0}".to_string(), "\u{00A0}".to_string(), "b".to_string()]
    );
}

#[test]
fn letter_mode_has_no_trailing_space() {
    let mut text = reveal(
        "AB",
        RevealOptions {
            mode: SegmentMode::Letters,
            ..RevealOptions::default()
        },
    );
    assert_eq!(text.display_segments(), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn segmentation_is_memoized_on_text_and_mode() {
    let mut text = reveal("one two three", RevealOptions::default());
    text.segments();
    text.render();
    text.transition_schedule();
    assert_eq!(text.segment_computations(), 1);

    text.set_mode(SegmentMode::Letters);
    assert_eq!(text.segments().len(), 13);
    assert_eq!(text.segment_computations(), 2);

    text.set_text("one two three");
    text.segments();
    assert_eq!(text.segment_computations(), 2);
}

#[test]
fn render_escapes_segment_text() {
    let mut text = reveal("<b> & co", RevealOptions::default());
    let html = text.render();
    assert!(html.contains("&lt;b&gt;"));
    assert!(html.contains("&amp;"));
    assert!(html.contains(r#"data-visible="false""#));
    assert!(html.contains("transition:all 0.5s ease-out 100ms"));
}
