use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lumen_image::Image;
use lumen_imgproc::wavelet::{dwt2, wavedec2, BoundaryMode};

fn bench_haar(c: &mut Criterion) {
    let mut group = c.benchmark_group("haar");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let data = (0..width * height).map(|i| (i % 251) as f32).collect();
        let image = Image::<f32, 1>::new(image_size, data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("dwt2", &parameter_string),
            &image,
            |b, i| b.iter(|| dwt2(black_box(i), BoundaryMode::Symmetric)),
        );

        group.bench_with_input(
            BenchmarkId::new("wavedec2_l2", &parameter_string),
            &image,
            |b, i| b.iter(|| wavedec2(black_box(i), 2, BoundaryMode::Symmetric)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_haar);
criterion_main!(benches);
