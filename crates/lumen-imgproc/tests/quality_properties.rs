use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use lumen_image::{Image, ImageSize};
use lumen_imgproc::{
    color::gray_mean_from_rgb,
    metrics::{self, QualityError, QualityOptions},
    wavelet::{band_energy, dwt2, wavedec2, BoundaryMode},
};

fn random_rgb(size: ImageSize, max: f32, seed: u64) -> Result<Image<f32, 3>, QualityError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..size.area() * 3)
        .map(|_| rng.random_range(0.0..=max))
        .collect();
    Ok(Image::new(size, data)?)
}

fn scaled(image: &Image<f32, 3>, k: f32) -> Result<Image<f32, 3>, QualityError> {
    let data = image.as_slice().iter().map(|v| v * k).collect();
    Ok(Image::new(image.size(), data)?)
}

#[test]
fn scores_stay_in_range() -> Result<(), QualityError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let sizes: [[usize; 2]; 4] = [[4, 4], [8, 4], [16, 32], [64, 48]];
    for (seed, size) in sizes.into_iter().enumerate() {
        for max in [0.05, 1.0, 255.0] {
            let image = random_rgb(size.into(), max, seed as u64)?;
            let record = metrics::extract(&image)?;

            assert!((0.0..=1.0).contains(&record.sharpness));
            assert!((0.0..=1.0).contains(&record.noise_level));
            assert!((0.0..=1.0).contains(&record.brightness));
            assert!(record.contrast >= 0.0);
        }
    }

    Ok(())
}

#[test]
fn uniform_image_has_no_detail() -> Result<(), QualityError> {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..8 {
        let value: f32 = rng.random_range(0.0..=255.0);
        let image = Image::<f32, 3>::from_size_val([16, 8].into(), value)?;
        let record = metrics::extract(&image)?;

        assert_eq!(record.sharpness, 0.0);
        assert_eq!(record.noise_level, 0.0);
        assert_eq!(record.contrast, 0.0);
        assert_relative_eq!(record.brightness, value / 255.0, max_relative = 1e-6);
    }

    Ok(())
}

#[test]
fn brightness_scales_linearly() -> Result<(), QualityError> {
    let image = random_rgb([32, 32].into(), 100.0, 9)?;
    let base = metrics::extract(&image)?.brightness;

    for k in [0.25, 0.5, 1.5, 2.5] {
        let brightness = metrics::extract(&scaled(&image, k)?)?.brightness;
        assert_relative_eq!(brightness, k * base, max_relative = 1e-5);
    }

    Ok(())
}

#[test]
fn contrast_scales_linearly() -> Result<(), QualityError> {
    let image = random_rgb([16, 16].into(), 100.0, 13)?;
    let base = metrics::extract(&image)?.contrast;

    let contrast = metrics::extract(&scaled(&image, 2.0)?)?.contrast;
    assert_relative_eq!(contrast, 2.0 * base, max_relative = 1e-5);

    Ok(())
}

#[test]
fn first_level_conserves_energy() -> Result<(), QualityError> {
    let image = random_rgb([40, 24].into(), 255.0, 21)?;

    let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
    gray_mean_from_rgb(&image, &mut gray)?;

    let level = dwt2(&gray, BoundaryMode::default())?;
    let energy = band_energy(&level.ca)
        + band_energy(&level.ch)
        + band_energy(&level.cv)
        + band_energy(&level.cd);

    assert_relative_eq!(energy, band_energy(&gray), max_relative = 1e-5);

    Ok(())
}

#[test]
fn scores_match_decomposition() -> Result<(), QualityError> {
    let image = random_rgb([16, 16].into(), 0.02, 17)?;

    let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
    gray_mean_from_rgb(&image, &mut gray)?;
    let dec = wavedec2(&gray, metrics::DECOMPOSITION_LEVELS, BoundaryMode::default())?;

    let h = band_energy(&dec.details[0].ch) + band_energy(&dec.details[1].ch);
    let v = band_energy(&dec.details[0].cv) + band_energy(&dec.details[1].cv);
    let n = (2 * 64 + 2 * 16) as f64;
    let sharpness = ((h + v) / n).sqrt() * metrics::SHARPNESS_SCALE;
    let noise = (band_energy(&dec.details[0].cd) / 64.0).sqrt() * metrics::NOISE_SCALE;

    let record = metrics::extract(&image)?;
    assert!(sharpness < 1.0);
    assert!(noise < 1.0);
    assert_relative_eq!(record.sharpness as f64, sharpness, max_relative = 1e-6);
    assert_relative_eq!(record.noise_level as f64, noise, max_relative = 1e-6);

    Ok(())
}

#[test]
fn batch_matches_single_calls() -> Result<(), QualityError> {
    let images = (0..6)
        .map(|seed| random_rgb([16, 8].into(), 255.0, seed))
        .collect::<Result<Vec<_>, _>>()?;

    let options = QualityOptions::default();
    let batch = metrics::extract_batch(&images, &options);

    for (image, result) in images.iter().zip(batch) {
        assert_eq!(result?, metrics::extract_with(image, &options)?);
    }

    Ok(())
}

#[test]
fn boundary_mode_is_irrelevant_for_valid_shapes() -> Result<(), QualityError> {
    let image = random_rgb([12, 20].into(), 1.0, 31)?;

    let symmetric = metrics::extract(&image)?;
    let periodic = metrics::extract_with(
        &image,
        &QualityOptions {
            boundary: BoundaryMode::Periodic,
            ..Default::default()
        },
    )?;

    assert_eq!(symmetric, periodic);

    Ok(())
}
