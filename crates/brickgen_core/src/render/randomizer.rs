//! Per-part render loop.

use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;

use super::backend::{RenderBackend, RenderResult};
use super::scene::SceneSampler;

/// Extensions accepted for background images.
const BACKGROUND_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Render `count` images of one part, each under independently sampled
/// scene parameters.
///
/// Output files are `<output_dir>/<part_number>_<i>.jpg` for `i` in
/// `[0, count)`, where the part number is the input filename without
/// extension. The first backend failure aborts the remaining images.
pub fn render_part<B: RenderBackend, R: Rng + ?Sized>(
    backend: &B,
    sampler: &SceneSampler,
    rng: &mut R,
    input: &Path,
    count: u32,
    output_dir: &Path,
) -> RenderResult<Vec<PathBuf>> {
    let part_number = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut outputs = Vec::with_capacity(count as usize);
    for i in 0..count {
        let scene = sampler.sample(rng);
        let output = output_dir.join(format!("{}_{}.jpg", part_number, i));
        backend.render(input, &scene, &output)?;
        outputs.push(output);
    }

    tracing::info!(
        "Rendered {} images for part {} into {}",
        outputs.len(),
        part_number,
        output_dir.display()
    );
    Ok(outputs)
}

/// List background image candidates in `dir`, filtered by extension
/// (case-insensitive) and sorted by filename.
pub fn list_background_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| BACKGROUND_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
            .unwrap_or(false);
        if matches {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneSettings;
    use crate::render::backend::RenderError;
    use crate::render::scene::SceneParams;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Backend that writes a stub file and records each scene it saw.
    struct RecordingBackend {
        scenes: RefCell<Vec<SceneParams>>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                scenes: RefCell::new(Vec::new()),
            }
        }
    }

    impl RenderBackend for RecordingBackend {
        fn render(&self, _part: &Path, scene: &SceneParams, output: &Path) -> RenderResult<()> {
            fs::write(output, b"").unwrap();
            self.scenes.borrow_mut().push(scene.clone());
            Ok(())
        }
    }

    /// Backend that fails after a fixed number of successes.
    struct FailingBackend {
        remaining: RefCell<u32>,
    }

    impl RenderBackend for FailingBackend {
        fn render(&self, _part: &Path, _scene: &SceneParams, output: &Path) -> RenderResult<()> {
            let mut remaining = self.remaining.borrow_mut();
            if *remaining == 0 {
                return Err(RenderError::Backend {
                    program: "stub".to_string(),
                    output: output.to_path_buf(),
                    message: "boom".to_string(),
                });
            }
            *remaining -= 1;
            fs::write(output, b"").unwrap();
            Ok(())
        }
    }

    fn sampler() -> SceneSampler {
        SceneSampler::new(&SceneSettings::default(), vec![]).unwrap()
    }

    #[test]
    fn output_names_are_dense_and_indexed() {
        let dir = tempdir().unwrap();
        let backend = RecordingBackend::new();
        let mut rng = SmallRng::seed_from_u64(1);

        let outputs = render_part(
            &backend,
            &sampler(),
            &mut rng,
            Path::new("/parts/3001.dat"),
            4,
            dir.path(),
        )
        .unwrap();

        let names: Vec<String> = outputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["3001_0.jpg", "3001_1.jpg", "3001_2.jpg", "3001_3.jpg"]
        );
        for output in &outputs {
            assert!(output.exists());
        }
    }

    #[test]
    fn each_image_gets_an_independent_scene() {
        let dir = tempdir().unwrap();
        let backend = RecordingBackend::new();
        let mut rng = SmallRng::seed_from_u64(2);

        render_part(
            &backend,
            &sampler(),
            &mut rng,
            Path::new("/parts/3001.dat"),
            8,
            dir.path(),
        )
        .unwrap();

        let scenes = backend.scenes.borrow();
        assert_eq!(scenes.len(), 8);
        // With continuous sampling, identical consecutive scenes would
        // mean state is being reused.
        for pair in scenes.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn backend_failure_aborts_remaining_images() {
        let dir = tempdir().unwrap();
        let backend = FailingBackend {
            remaining: RefCell::new(2),
        };
        let mut rng = SmallRng::seed_from_u64(3);

        let err = render_part(
            &backend,
            &sampler(),
            &mut rng,
            Path::new("/parts/3001.dat"),
            5,
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Backend { .. }));

        // The two images rendered before the failure are the only ones.
        let written = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(written, 2);
    }

    #[test]
    fn zero_count_renders_nothing() {
        let dir = tempdir().unwrap();
        let backend = RecordingBackend::new();
        let mut rng = SmallRng::seed_from_u64(4);

        let outputs = render_part(
            &backend,
            &sampler(),
            &mut rng,
            Path::new("/parts/3001.dat"),
            0,
            dir.path(),
        )
        .unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn background_listing_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.JPG"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(dir.path().join("c.jpeg"), b"").unwrap();

        let images = list_background_images(dir.path()).unwrap();
        let names: Vec<String> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
    }
}
