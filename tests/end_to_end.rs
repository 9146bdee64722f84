use color_extractor_wasm::{AddOutcome, ClusterConfig, Color, PixelBuffer, Viewport, Workspace};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn quad() -> PixelBuffer {
    #[rustfmt::skip]
    let data = vec![
        255, 0, 0, 255,   255, 0, 0, 255,
        0, 255, 0, 255,   0, 0, 255, 255,
    ];
    PixelBuffer::new(2, 2, data).unwrap()
}

#[test]
fn pick_red_then_reject_duplicate() {
    let buffer = quad();
    assert_eq!(buffer.color_at(0.0, 0.0), Some(Color::new(255, 0, 0, 1.0)));

    let mut ws = Workspace::with_rng(StdRng::seed_from_u64(1));
    let viewport = Viewport::native(&buffer);
    ws.load(buffer);
    ws.set_eyedropper_active(true);

    match ws.commit(0.0, 0.0, viewport) {
        Some(AddOutcome::Added(entry)) => {
            assert_eq!(entry.hex, "#ff0000");
            assert_eq!(entry.rgb, "rgb(255, 0, 0)");
            assert_eq!(entry.hsl_string, "hsl(0, 100%, 50%)");
        }
        other => panic!("expected Added, got {other:?}"),
    }
    assert_eq!(ws.commit(0.0, 0.0, viewport), Some(AddOutcome::Duplicate));
    assert_eq!(ws.colors().len(), 1);
}

#[test]
fn half_red_half_blue_detects_two_colors() {
    let (w, h) = (20u32, 10u32);
    let mut data = Vec::new();
    for _ in 0..h {
        for x in 0..w {
            let px: [u8; 4] = if x < w / 2 { [255, 0, 0, 255] } else { [0, 0, 255, 255] };
            data.extend_from_slice(&px);
        }
    }

    let mut ws = Workspace::with_rng(StdRng::seed_from_u64(2024));
    ws.load(PixelBuffer::new(w, h, data).unwrap());
    let added = ws.auto_detect_with(&ClusterConfig::default());

    assert!((1..=2).contains(&added));
    let hexes: Vec<&str> = ws.colors().iter().map(|e| e.hex.as_str()).collect();
    assert!(hexes.iter().all(|h| *h == "#ff0000" || *h == "#0000ff"), "{hexes:?}");
}

#[test]
fn zoomed_display_maps_back_to_native_pixels() {
    let mut ws = Workspace::with_rng(StdRng::seed_from_u64(5));
    ws.load(quad());
    ws.set_eyedropper_active(true);

    // Image shown at 100x100 CSS pixels.
    let shown = Viewport::new(100.0, 100.0);
    assert_eq!(ws.hover(10.0, 90.0, shown).map(|c| c.to_hex()), Some("#00ff00".into()));
    assert_eq!(ws.hover(100.0, 10.0, shown), None);
}
