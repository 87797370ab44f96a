//! End-to-end checks of ramp → field → present on a headless device.
//!
//! Every test returns early when the machine has no usable adapter.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gradient_engine::device::{GpuInit, HeadlessGpu, OffscreenSurface, PresentSurface};
use gradient_engine::gradient::{Gradient, GradientKind, GradientStop, Rgba};
use gradient_engine::render::{
    field_coordinate, pixel_center, FrameOutcome, GradientView, RefreshOutcome, RenderError,
    Renderer, RendererConfig,
};

const RESOLUTION: u32 = 256;
const TOLERANCE: i32 = 4;

const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);

// Device creation is not reentrant on every backend.
static GPU_LOCK: Mutex<()> = Mutex::new(());

struct Harness {
    _guard: MutexGuard<'static, ()>,
    gpu: HeadlessGpu,
}

impl Harness {
    fn new() -> Option<Self> {
        let guard = GPU_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        match HeadlessGpu::new_blocking(&GpuInit::default()) {
            Ok(gpu) => Some(Self { _guard: guard, gpu }),
            Err(e) => {
                eprintln!("skipping GPU test: {e:#}");
                None
            }
        }
    }

    fn renderer(&self) -> Renderer {
        Renderer::new(
            self.gpu.device(),
            self.gpu.queue(),
            wgpu::TextureFormat::Rgba8Unorm,
            RendererConfig {
                resolution: RESOLUTION,
                ..Default::default()
            },
        )
        .expect("renderer construction")
    }

    fn surface(&self, width: u32, height: u32) -> OffscreenSurface {
        OffscreenSurface::new(self.gpu.device(), width, height, wgpu::TextureFormat::Rgba8Unorm)
    }

    fn read(&self, surface: &OffscreenSurface) -> Vec<[u8; 4]> {
        surface
            .read_pixels(self.gpu.device(), self.gpu.queue())
            .expect("surface readback")
    }
}

fn gradient(kind: GradientKind, angle: f32, stops: &[(f32, Rgba)]) -> Gradient {
    let stops = stops.iter().map(|&(l, c)| GradientStop::new(l, c)).collect();
    Gradient::new(kind, stops, angle)
}

fn assert_near(actual: [u8; 4], expected: [u8; 4], what: &str) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (i32::from(*a) - i32::from(e)).abs() <= TOLERANCE,
            "{what}: got {actual:?}, expected {expected:?}"
        );
    }
}

fn draw(harness: &Harness, renderer: &mut Renderer, g: &Gradient) -> OffscreenSurface {
    let mut surface = harness.surface(RESOLUTION, RESOLUTION);
    let subscription = renderer.subscribe();
    renderer.render(g).expect("render");
    let (_, outcome) = renderer
        .draw_pending(&subscription, &mut surface)
        .expect("a pending job");
    assert_eq!(outcome, FrameOutcome::Presented);
    surface
}

// ── ramp ──────────────────────────────────────────────────────────────────

#[test]
fn ramp_midpoint_is_mid_gray() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    draw(&h, &mut renderer, &Gradient::default());

    assert_eq!(renderer.resolution(), RESOLUTION);
    let ramp = renderer.read_ramp().expect("ramp readback");
    assert_eq!(ramp.len(), RESOLUTION as usize);

    let mid = ramp[RESOLUTION as usize / 2];
    assert_near(mid, [128, 128, 128, 255], "ramp midpoint");
    assert!(ramp[8][0] > ramp[RESOLUTION as usize - 8][0], "ramp runs white to black");
}

// ── field ─────────────────────────────────────────────────────────────────

#[test]
fn linear_field_edges_match_ramp_ends() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    draw(&h, &mut renderer, &Gradient::default());

    let field = renderer.read_field().expect("field readback");
    let row = RESOLUTION / 2;
    let left = field[(row * RESOLUTION) as usize];
    let right = field[(row * RESOLUTION + RESOLUTION - 1) as usize];
    assert_near(left, [255, 255, 255, 255], "left edge");
    assert_near(right, [0, 0, 0, 255], "right edge");
}

#[test]
fn field_agrees_with_cpu_coordinate() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let g = gradient(GradientKind::Angular, 30.0, &[(0.0, Rgba::WHITE), (1.0, Rgba::BLACK)]);
    draw(&h, &mut renderer, &g);

    let field = renderer.read_field().expect("field readback");
    let rotation = g.rotation_matrix();
    for (x, y) in [(40, 200), (128, 20), (220, 128), (70, 70)] {
        let t = field_coordinate(g.kind, rotation, pixel_center(x, y, RESOLUTION));
        let v = ((1.0 - t) * 255.0).round() as u8;
        assert_near(field[(y * RESOLUTION + x) as usize], [v, v, v, 255], "angular pixel");
    }
}

#[test]
fn each_kind_shapes_the_field_differently() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let white_to_black = [(0.0, Rgba::WHITE), (1.0, Rgba::BLACK)];
    let center = ((RESOLUTION / 2) * RESOLUTION + RESOLUTION / 2) as usize;
    let top_left = 0;

    let mut fields = Vec::new();
    for kind in GradientKind::ALL {
        draw(&h, &mut renderer, &gradient(kind, 0.0, &white_to_black));
        fields.push(renderer.read_field().expect("field readback"));
    }
    let [linear, radial, angular] = [&fields[0], &fields[1], &fields[2]];

    assert_near(linear[center], [128, 128, 128, 255], "linear center");
    assert_near(radial[center], [255, 255, 255, 255], "radial center");
    // Corners lie past radius 1 and clamp to the last stop.
    assert_near(radial[top_left], [0, 0, 0, 255], "radial corner");
    // Top-left corner is at 135°, t = 0.375.
    let v = ((1.0 - 0.375) * 255.0f32).round() as u8;
    assert_near(angular[top_left], [v, v, v, 255], "angular corner");
    assert!(linear != radial, "radial field equals linear");
    assert!(linear != angular, "angular field equals linear");
}

#[test]
fn linear_quarter_turn_runs_top_to_bottom() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let g = gradient(GradientKind::Linear, 90.0, &[(0.0, Rgba::WHITE), (1.0, Rgba::BLACK)]);
    draw(&h, &mut renderer, &g);

    let field = renderer.read_field().expect("field readback");
    let mid = RESOLUTION / 2;
    let at = |x: u32, y: u32| field[(y * RESOLUTION + x) as usize];
    assert_near(at(mid, 0), [255, 255, 255, 255], "top edge");
    assert_near(at(mid, RESOLUTION - 1), [0, 0, 0, 255], "bottom edge");
    assert_near(at(0, mid), [128, 128, 128, 255], "left edge");
    assert_near(at(RESOLUTION - 1, mid), [128, 128, 128, 255], "right edge");
}

#[test]
fn radial_center_is_first_color_for_any_rotation() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let center = ((RESOLUTION / 2) * RESOLUTION + RESOLUTION / 2) as usize;

    for angle in [0.0, 45.0, 90.0, 270.0] {
        let g = gradient(GradientKind::Radial, angle, &[(0.0, RED), (1.0, BLUE)]);
        draw(&h, &mut renderer, &g);
        let field = renderer.read_field().expect("field readback");
        assert_near(field[center], [255, 0, 0, 255], "radial center");
    }
}

#[test]
fn sentinel_never_survives_a_frame() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    draw(&h, &mut renderer, &Gradient::default());

    let field = renderer.read_field().expect("field readback");
    assert!(
        field.iter().all(|p| p[0] == p[1] && p[1] == p[2]),
        "gray gradient produced a colored pixel"
    );
}

// ── ramp vertex buffer ────────────────────────────────────────────────────

#[test]
fn ramp_buffer_grows_by_powers_of_two_and_is_reused() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let three = gradient(GradientKind::Linear, 0.0, &[(0.0, RED), (0.5, GREEN), (1.0, BLUE)]);

    draw(&h, &mut renderer, &three);
    assert_eq!(renderer.ramp_vertex_capacity(), 64);

    let many: Vec<(f32, Rgba)> = (0..100)
        .map(|i| {
            let t = i as f32 / 99.0;
            (t, Rgba::new(1.0 - t, 1.0 - t, 1.0 - t, 1.0))
        })
        .collect();
    draw(&h, &mut renderer, &gradient(GradientKind::Linear, 0.0, &many));
    assert_eq!(renderer.ramp_vertex_capacity(), 128);

    let ramp = renderer.read_ramp().expect("ramp readback");
    assert_near(ramp[RESOLUTION as usize / 2], [128, 128, 128, 255], "ramp midpoint");
    assert_near(ramp[RESOLUTION as usize / 4], [191, 191, 191, 255], "ramp quarter");

    draw(&h, &mut renderer, &three);
    assert_eq!(renderer.ramp_vertex_capacity(), 128);
}

// ── present ───────────────────────────────────────────────────────────────

#[test]
fn present_fits_field_into_centered_square() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let mut surface = h.surface(96, 64);
    let subscription = renderer.subscribe();

    renderer.render(&gradient(GradientKind::Linear, 0.0, &[(0.5, GREEN)])).expect("render");
    renderer.draw_pending(&subscription, &mut surface);

    let pixels = h.read(&surface);
    assert_near(pixels[32 * 96 + 4], [0, 0, 0, 255], "pillarbox");
    assert_near(pixels[32 * 96 + 48], [0, 255, 0, 255], "field");
    assert_near(pixels[32 * 96 + 91], [0, 0, 0, 255], "pillarbox");
}

// ── job channel ───────────────────────────────────────────────────────────

#[test]
fn latest_job_wins() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let mut view = GradientView::new(&renderer);
    let mut surface = h.surface(64, 64);

    renderer.render(&gradient(GradientKind::Linear, 0.0, &[(0.0, RED)])).expect("render");
    renderer.render(&gradient(GradientKind::Radial, 0.0, &[(0.0, GREEN)])).expect("render");
    renderer.render(&gradient(GradientKind::Angular, 0.0, &[(0.0, BLUE)])).expect("render");
    assert_eq!(renderer.channel().published(), 3);

    assert_eq!(
        view.refresh(&mut renderer, &mut surface),
        RefreshOutcome::Presented { generation: 3 }
    );
    assert_eq!(view.refresh(&mut renderer, &mut surface), RefreshOutcome::Idle);
    assert_eq!(surface.presented_frames(), 1);
    let current = view.current().expect("last job is kept");
    assert_eq!(current.kind(), GradientKind::Angular);
    assert_eq!(current.generation(), 3);

    let pixels = h.read(&surface);
    assert_near(pixels[32 * 64 + 32], [0, 0, 255, 255], "third gradient");
}

#[test]
fn dropped_frame_is_redrawn_on_next_refresh() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let mut view = GradientView::new(&renderer);
    let mut surface = h.surface(64, 64);

    surface.set_available(false);
    renderer.render(&gradient(GradientKind::Linear, 0.0, &[(0.3, GREEN)])).expect("render");
    assert_eq!(view.refresh(&mut renderer, &mut surface), RefreshOutcome::Dropped);
    assert_eq!(surface.presented_frames(), 0);
    assert!(view.needs_refresh());

    surface.set_available(true);
    assert_eq!(
        view.refresh(&mut renderer, &mut surface),
        RefreshOutcome::Presented { generation: 1 }
    );
    assert!(!view.needs_refresh());

    let pixels = h.read(&surface);
    assert_near(pixels[10 * 64 + 50], [0, 255, 0, 255], "retried frame");
}

#[test]
fn invalidate_redraws_last_job() {
    let Some(h) = Harness::new() else { return };
    let mut renderer = h.renderer();
    let mut view = GradientView::new(&renderer);
    let mut surface = h.surface(32, 32);

    renderer.render(&Gradient::default()).expect("render");
    view.refresh(&mut renderer, &mut surface);
    view.invalidate();
    assert_eq!(
        view.refresh(&mut renderer, &mut surface),
        RefreshOutcome::Presented { generation: 1 }
    );
    assert_eq!(surface.presented_frames(), 2);
}

#[test]
fn unavailable_surface_reports_skip() {
    let Some(h) = Harness::new() else { return };
    let mut surface = h.surface(8, 8);
    surface.set_available(false);
    assert!(surface.acquire().is_err());
}

// ── errors ────────────────────────────────────────────────────────────────

#[test]
fn empty_gradient_publishes_nothing() {
    let Some(h) = Harness::new() else { return };
    let renderer = h.renderer();
    let subscription = renderer.subscribe();

    let err = renderer
        .render(&Gradient::new(GradientKind::Linear, Vec::new(), 0.0))
        .unwrap_err();
    assert!(matches!(err, RenderError::NoStops));
    assert_eq!(renderer.channel().published(), 0);
    assert!(!subscription.has_pending());
}

#[test]
fn non_finite_color_publishes_nothing() {
    let Some(h) = Harness::new() else { return };
    let renderer = h.renderer();
    let bad = Rgba::new(f32::NAN, 0.0, 0.0, 1.0);
    let g = gradient(GradientKind::Linear, 0.0, &[(0.0, RED), (1.0, bad)]);

    let err = renderer.render(&g).unwrap_err();
    assert_eq!(err, RenderError::NonFiniteColor { index: 1 });
    assert_eq!(renderer.channel().published(), 0);
}

#[test]
fn unsupported_resolution_is_rejected() {
    let Some(h) = Harness::new() else { return };
    let max = h.gpu.device().limits().max_texture_dimension_2d;

    for resolution in [1, max + 1] {
        let result = Renderer::new(
            h.gpu.device(),
            h.gpu.queue(),
            wgpu::TextureFormat::Rgba8Unorm,
            RendererConfig {
                resolution,
                ..Default::default()
            },
        );
        assert!(result.is_err(), "resolution {resolution} accepted");
    }
}
