use lumen::image::{Image, ImageSize};
use lumen::imgproc::metrics::{self, MetricRecord, QualityError};

#[test]
fn facade_extract() -> Result<(), QualityError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let size = ImageSize {
        width: 8,
        height: 8,
    };
    let data = (0..size.area())
        .flat_map(|i| {
            let v = if (i / 8 + i % 8) % 2 == 0 { 0.0 } else { 255.0 };
            [v, v, v]
        })
        .collect();
    let image = Image::<f32, 3>::new(size, data)?;

    let record = metrics::extract(&image)?;
    assert_eq!(record.sharpness, 0.0);
    assert_eq!(record.noise_level, 1.0);
    assert!((record.brightness - 0.5).abs() < 1e-6);

    let black = Image::<f32, 3>::from_size_val([4, 4].into(), 0.0)?;
    assert_eq!(metrics::extract(&black)?, MetricRecord::default());

    Ok(())
}
