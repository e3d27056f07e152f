use image::{Rgb, RgbImage};
use softrender::io::config::Config;
use softrender::io::error::LoadError;
use softrender::io::image::{frame_path, save_buffer_to_image};
use softrender::pipeline::renderer::Renderer;
use softrender::pipeline::settings::RenderSettings;
use softrender::scene::loader::{build_camera, build_scene};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("softrender_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const CUBE_FACE: &str = "\
v -5 5 0
v 5 5 0
v -5 -5 0
v 5 -5 0
vt 0 1
vt 1 1
vt 0 0
vt 1 0
vn 0 0 -1
f 1/1/1 2/2/1 3/3/1
f 2/2/1 4/4/1 3/3/1
";

#[test]
fn config_file_drives_a_full_render() {
    let dir = scratch_dir("render");
    let obj = dir.join("face.obj");
    fs::write(&obj, CUBE_FACE).unwrap();

    let diffuse = dir.join("diffuse.png");
    RgbImage::from_pixel(2, 2, Rgb([200, 120, 40])).save(&diffuse).unwrap();

    let output = dir.join("frame.png");
    let config_path = dir.join("scene.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [render]
            width = 32
            height = 24
            output = "{output}"
            frames = 2
            rotation_speed = 10.0

            [camera]
            origin = [0.0, 0.0, -20.0]

            [light]
            direction = [0.0, 0.0, 1.0]
            intensity = 3.0

            [mesh]
            path = "{obj}"
            diffuse = "{diffuse}"
            normal = "{missing}"
            "#,
            output = output.display().to_string().replace('\\', "/"),
            obj = obj.display().to_string().replace('\\', "/"),
            diffuse = diffuse.display().to_string().replace('\\', "/"),
            missing = dir.join("missing.png").display().to_string().replace('\\', "/"),
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let settings = RenderSettings::from_config(&config.render);
    let camera = build_camera(&config.camera, config.render.width, config.render.height);
    let mut scene = build_scene(&config).unwrap();
    let mut renderer = Renderer::new(config.render.width, config.render.height);

    for frame in 0..config.render.frames {
        let stats = renderer.render_frame(&mut scene, &camera, &settings);
        assert_eq!(stats.triangles_submitted, 2);
        let path = frame_path(&output, frame, config.render.frames);
        save_buffer_to_image(&renderer.pixels(), 32, 24, &path).unwrap();
        scene.rotate_all_y(config.render.rotation_speed);
    }

    let first = image::open(dir.join("frame_0.png")).unwrap().to_rgb8();
    assert!(dir.join("frame_1.png").exists());
    assert_eq!(first.dimensions(), (32, 24));

    // The face covers the centre and is lit head-on.
    let centre = first.get_pixel(16, 12);
    assert_ne!(centre, &Rgb([100, 100, 100]));
    assert!(centre[0] > centre[2]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn broken_config_is_a_parse_error() {
    let dir = scratch_dir("broken");
    let path = dir.join("bad.toml");
    fs::write(&path, "[render]\nwidth = \"wide\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Config { .. }));
    assert!(err.to_string().contains("bad.toml"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_mesh_file_fails_scene_build() {
    let mut config = Config::default();
    config.mesh.path = Some("no/such/model.obj".to_string());
    assert!(matches!(build_scene(&config), Err(LoadError::Obj { .. })));
}
