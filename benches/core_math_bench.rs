use chart3d::api::{AnimationConfig, ChartConfig, ChartGenerator, PieOptions, PlotOptions};
use chart3d::core::{
    ChartItem, CsvTable, RotationConfig, ScheduleSpec, StageConfig, WedgeSpec, build_wedge,
    layout_slices, schedule,
};
use chart3d::scene::RecordingAdapter;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn scatter_csv(rows: usize) -> String {
    let mut csv = String::from("x,y,z,size\n");
    for i in 0..rows {
        let t = i as f64;
        csv.push_str(&format!(
            "{},{},{},{}\n",
            t * 0.1,
            (t * 0.37).sin() * 10.0,
            (t * 0.11).cos() * 5.0,
            1.0 + (i % 7) as f64 * 0.25
        ));
    }
    csv
}

fn bench_wedge_build_128(c: &mut Criterion) {
    let items: Vec<ChartItem> = (0..12)
        .map(|i| ChartItem::new(format!("slice-{i}"), 10.0 + i as f64))
        .collect();
    let slices = layout_slices(&items).expect("valid slices");

    c.bench_function("wedge_build_12x128", |b| {
        b.iter(|| {
            for slice in &slices {
                let _ = build_wedge(black_box(WedgeSpec::for_slice(slice, 2.0, 0.5, 128)))
                    .expect("wedge should build");
            }
        })
    });
}

fn bench_schedule_10k(c: &mut Criterion) {
    let spec = ScheduleSpec {
        start_frame: 1,
        creation: StageConfig::enabled(30, 5),
        explode: StageConfig::enabled(10, 2).with_delay(5),
        rotation: RotationConfig::enabled(2.0, 4.0),
        explode_applicable: true,
    };

    c.bench_function("schedule_10k", |b| {
        b.iter(|| {
            let _ = schedule(black_box(10_000), black_box(&spec)).expect("schedule");
        })
    });
}

fn bench_scatter_plan_2k(c: &mut Criterion) {
    let table = CsvTable::from_reader(scatter_csv(2_000).as_bytes()).expect("valid csv");
    let config = ChartConfig::plot(PlotOptions::scatter_3d(0, 1, 2).with_scale_column(Some(3)))
        .with_animation(AnimationConfig::default().with_creation(StageConfig::enabled(20, 1)));
    let generator = ChartGenerator::new(config).expect("valid config");

    c.bench_function("scatter_plan_2k", |b| {
        b.iter(|| {
            let _ = generator
                .plan_from_table(black_box(&table))
                .expect("plan should succeed");
        })
    });
}

fn bench_pie_generate_64(c: &mut Criterion) {
    let mut csv = String::from("label,value\n");
    for i in 0..64 {
        csv.push_str(&format!("item {i},{}\n", 1 + i % 9));
    }
    let table = CsvTable::from_reader(csv.as_bytes()).expect("valid csv");
    let config = ChartConfig::pie(PieOptions::default().with_explode_factor(0.2));
    let generator = ChartGenerator::new(config).expect("valid config");

    c.bench_function("pie_generate_64", |b| {
        b.iter(|| {
            let mut adapter = RecordingAdapter::new();
            let _ = generator
                .generate_from_table(black_box(&table), &mut adapter)
                .expect("generation should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_wedge_build_128,
    bench_schedule_10k,
    bench_scatter_plan_2k,
    bench_pie_generate_64
);
criterion_main!(benches);
