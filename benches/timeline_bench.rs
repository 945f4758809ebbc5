use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use scrollcam::{
    animation::{ElementStyles, KeyframeStep, ScrubConfig, Targets, Timeline},
    camera::{CameraPose, PoseField},
    options::Options,
    scroll::{ElementRect, PageLayout, Section},
    util::easing::EasingFunction,
    ScrollEngine,
};
use web_time::Duration;

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::DEFAULT;
    c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn scroll_pass_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_scroll");

    for sections in [2, 10, 50, 200] {
        let mut layout = PageLayout::new(1000.0);
        for i in 0..sections {
            layout.insert(format!(".s{i}"), ElementRect::new(i as f32 * 1000.0, 1000.0));
        }
        let mut pose = CameraPose::default();
        let mut styles = ElementStyles::default();
        let mut timeline = Timeline::new();
        for i in 0..sections {
            let section = Section::parse(format!(".s{i}"), "top bottom", "top top")
                .unwrap_or_else(|e| panic!("{e}"));
            for field in [PoseField::Position, PoseField::Target] {
                let step = KeyframeStep::pose(field, Vec3::splat(i as f32), section.clone())
                    .with_scrub(if i % 2 == 0 {
                        ScrubConfig::CONTINUOUS
                    } else {
                        ScrubConfig::smoothed(0.5)
                    });
                let mut targets = Targets::new(&mut pose, &mut styles);
                let _ = timeline
                    .define_step(step, &layout, &mut targets)
                    .unwrap_or_else(|e| panic!("{e}"));
            }
        }

        let max = layout.max_scroll();
        group.bench_function(format!("{}_steps", sections * 2), |b| {
            let mut y = 0.0;
            b.iter(|| {
                y = (y + 37.0) % max.max(1.0);
                let mut targets = Targets::new(&mut pose, &mut styles);
                timeline.scroll(black_box(y), &mut targets);
                black_box(timeline.tick(Duration::from_millis(16), &mut targets))
            });
        });
    }
    group.finish();
}

fn engine_frame_benchmark(c: &mut Criterion) {
    let mut options = Options::default();
    options.viewer.asset = None;
    let mut engine = ScrollEngine::new(&options).unwrap_or_else(|e| panic!("{e}"));
    let max = engine.layout().max_scroll();
    let mut y = 0.0;
    c.bench_function("engine_scroll_and_frame", |b| {
        b.iter(|| {
            y = (y + 23.0) % max;
            engine.handle_scroll(black_box(y));
            black_box(engine.frame(Duration::from_millis(16)))
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    scroll_pass_benchmark,
    engine_frame_benchmark
);
criterion_main!(benches);
