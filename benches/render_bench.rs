use criterion::{black_box, criterion_group, criterion_main, Criterion};

use listing_render::background::{paint_glow, Falloff};
use listing_render::canvas::Canvas;
use listing_render::effects::drop_shadow;
use listing_render::layout::LayoutRect;
use listing_render::scene::{render_with_styles, Preset};
use listing_render::style::{Palette, StyleTable};

fn bench_glow(c: &mut Criterion) {
    let p = Palette::default();
    let mut group = c.benchmark_group("glow");
    group.bench_function("radial_2000x400", |b| {
        let mut canvas = Canvas::new(2000, 400, p.bg_primary);
        b.iter(|| {
            paint_glow(
                black_box(&mut canvas),
                p.accent_blue,
                20,
                400,
                Falloff::Radial { dampening: 0.7 },
            )
        })
    });
    group.bench_function("linear_2000x2000", |b| {
        let mut canvas = Canvas::new(2000, 2000, p.bg_primary);
        b.iter(|| paint_glow(black_box(&mut canvas), p.accent_blue, 25, 2000, Falloff::Linear))
    });
    group.finish();
}

fn bench_shadow(c: &mut Criterion) {
    let p = Palette::default();
    c.bench_function("drop_shadow_blur_40", |b| {
        let mut canvas = Canvas::new(2000, 1400, p.bg_primary);
        b.iter(|| {
            drop_shadow(
                black_box(&mut canvas),
                LayoutRect::new(250, 300, 1501, 891),
                20.0,
                40.0,
                (0, 20),
                100,
            )
        })
    });
}

fn bench_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);
    for preset in Preset::ALL {
        let styles = StyleTable::builtin(Palette::default(), preset.font_specs());
        group.bench_function(preset.name(), |b| {
            b.iter(|| render_with_styles(black_box(preset), 2000, 2000, &styles))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_glow, bench_shadow, bench_full_render);
criterion_main!(benches);
