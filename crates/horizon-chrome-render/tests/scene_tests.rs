//! Integration tests for the retained chrome scene.

use horizon_chrome_core::RegionId;
use horizon_chrome_render::{
    BackdropKind, ChromeScene, Color, Glyph, Point, Rect, RenderError, RenderTarget, VisualState,
    select_backdrop,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_chrome=trace")
        .with_test_writer()
        .try_init();
}

/// Drive the scene through a generic target, the way the controller does.
fn hover_then_press(target: &mut impl RenderTarget, id: RegionId) {
    target.region_entered(id);
    target.set_region_visual_state(id, VisualState::Hovered);
    target.set_region_visual_state(id, VisualState::Pressed);
}

#[test]
fn test_scene_follows_button_states() {
    init_tracing();
    let mut scene = ChromeScene::with_default_palettes();

    hover_then_press(&mut scene, RegionId::Minimize);
    assert_eq!(scene.fill_color(RegionId::Minimize), Some(Color::LIGHT_GRAY));

    scene.set_region_visual_state(RegionId::Minimize, VisualState::Hovered);
    assert_eq!(scene.fill_color(RegionId::Minimize), Some(Color::NAVAJO_WHITE));

    scene.set_region_visual_state(RegionId::Minimize, VisualState::Normal);
    assert_eq!(scene.fill_color(RegionId::Minimize), Some(Color::TRANSPARENT));
}

#[test]
fn test_caption_and_system_menu_are_flat() {
    let mut scene = ChromeScene::with_default_palettes();
    for state in [VisualState::Normal, VisualState::Hovered, VisualState::Pressed] {
        scene.set_region_visual_state(RegionId::Caption, state);
        scene.set_region_visual_state(RegionId::SystemMenu, state);
        assert_eq!(scene.fill_color(RegionId::Caption), Some(Color::AQUA));
        assert_eq!(scene.fill_color(RegionId::SystemMenu), Some(Color::BLUE_VIOLET));
    }
}

#[test]
fn test_layout_pass_marks_dirty_once() {
    let mut scene = ChromeScene::with_default_palettes();
    let close = Rect::new(656.0, 0.0, 44.0, 47.0);

    scene.set_region_bounds(RegionId::Close, close);
    scene.set_rasterization_scale(RegionId::Close, 1.0);
    assert!(scene.take_dirty());

    // Same layout again changes nothing
    scene.set_region_bounds(RegionId::Close, close);
    scene.set_rasterization_scale(RegionId::Close, 1.0);
    assert!(!scene.take_dirty());

    scene.set_rasterization_scale(RegionId::Close, 1.5);
    assert!(scene.take_dirty());
    assert_eq!(scene.node(RegionId::Close).map(|n| n.bounds), Some(close));
}

#[test]
fn test_restore_glyph_while_maximized() {
    let mut scene = ChromeScene::with_default_palettes();
    scene.set_window_maximized(true);
    assert_eq!(
        scene.node(RegionId::Maximize).and_then(|n| n.glyph),
        Some(Glyph::Restore)
    );
    assert_eq!(
        scene.node(RegionId::Close).and_then(|n| n.glyph),
        Some(Glyph::Close)
    );
}

#[test]
fn test_pointer_indicator_hide_is_idempotent() {
    let mut scene = ChromeScene::new();
    scene.show_pointer_indicator(Point::new(650.0, 20.0), false);
    assert!(scene.take_dirty());

    scene.hide_pointer_indicator();
    assert!(scene.take_dirty());
    scene.hide_pointer_indicator();
    assert!(!scene.take_dirty());
}

#[test]
fn test_backdrop_probe_order() {
    init_tracing();
    let kind = select_backdrop(|kind: BackdropKind| match kind {
        BackdropKind::Acrylic => Ok(()),
        other => Err(RenderError::BackdropUnavailable(other)),
    });
    assert_eq!(kind, BackdropKind::Acrylic);
}
