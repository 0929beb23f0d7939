//! Subcommand handlers.

use std::time::Duration;

use facecheck::backend::RecognitionClient;
use facecheck::camera::{
    self, CaptureSessionManager, MediaDevices, StillImageDevices, TestPatternDevices,
};
use facecheck::config::{default_path as get_config_path, Config, DEFAULT_CONFIG_TEMPLATE};
use facecheck::ui::{ConsoleNotifier, Notifier};
use facecheck::views::{App, ViewKind};

use super::args::{Args, Command, ConfigAction};

/// List available cameras and print them to stdout.
pub fn list_cameras() {
    match camera::list_devices() {
        Ok(devices) => {
            if devices.is_empty() {
                println!("No cameras found.");
                println!();
                println!("Make sure your camera is connected and permissions are granted.");
            } else {
                println!("Available cameras:");
                for device in devices {
                    println!("  {}", device);
                }
                println!();
                println!("Use --camera <index> to select a camera.");
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: &ConfigAction, args: &Args) {
    let config_path = args.config.clone().unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let config = match load_config(args) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let settings = config.camera.settings();
            println!("Current configuration:");
            println!("  Backend: {}", config.backend.url);
            match config.backend.timeout() {
                Some(timeout) => println!("  Timeout: {}s", timeout.as_secs()),
                None => println!("  Timeout: none"),
            }
            println!("  Camera: {}", settings.device_index);
            println!("  Resolution: {}", settings.resolution);
            println!("  FPS: {}", settings.fps);
            println!("  Mirror: {}", if settings.mirror { "yes" } else { "no" });
            println!("  JPEG quality: {}", settings.jpeg_quality);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'facecheck config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

/// Load the config file and layer environment and command-line overrides on top.
fn load_config(args: &Args) -> Result<Config, String> {
    let mut config = Config::load(args.config.as_deref()).map_err(|e| e.to_string())?;
    config.apply_env();
    if let Some(url) = &args.backend {
        config.backend.url = url.clone();
    }
    if let Some(index) = args.camera {
        config.camera.device = index;
    }
    if args.mirror {
        config.camera.mirror = true;
    }
    Ok(config)
}

fn select_devices(args: &Args) -> Box<dyn MediaDevices> {
    if let Some(path) = &args.image {
        return Box::new(StillImageDevices::new(path));
    }
    if args.test_pattern {
        return Box::new(TestPatternDevices::new());
    }
    native_devices()
}

#[cfg(feature = "native-camera")]
fn native_devices() -> Box<dyn MediaDevices> {
    Box::new(camera::NativeDevices)
}

#[cfg(not(feature = "native-camera"))]
fn native_devices() -> Box<dyn MediaDevices> {
    log::warn!("Built without the native-camera feature; use --image or --test-pattern");
    Box::new(camera::NoCameraDevices)
}

fn build_app(args: &Args) -> Result<App<ConsoleNotifier>, String> {
    let config = load_config(args)?;
    let client = RecognitionClient::with_timeout(&config.backend.url, config.backend.timeout())
        .map_err(|e| e.to_string())?;
    let sessions = CaptureSessionManager::new(select_devices(args), config.camera.settings());
    log::debug!("Using backend {}", client.base_url());
    Ok(App::new(sessions, client, ConsoleNotifier))
}

/// Run one of the view-driven subcommands.
///
/// Returns `Ok(false)` when the action failed after the user was already
/// told why, and `Err` for setup failures that still need reporting.
pub fn run_view_command(command: &Command, args: &Args) -> Result<bool, String> {
    let mut app = build_app(args)?;
    let warmup = Duration::from_secs(args.warmup);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;

    rt.block_on(async {
        match command {
            Command::Register { id, name } => {
                register(&mut app, id.as_deref(), name.as_deref(), warmup).await
            }
            Command::Recognize => recognize(&mut app, warmup).await,
            Command::List => list(&mut app).await,
            Command::Persons => persons(&mut app).await,
            Command::Delete { id } => delete(&mut app, id.as_deref()).await,
            Command::ListCameras | Command::Config { .. } => {
                Err(format!("'{:?}' is not a view command", command))
            }
        }
    })
}

/// Open a capture view and wait for the camera's first frame.
async fn open_camera_view(
    app: &mut App<ConsoleNotifier>,
    kind: ViewKind,
    warmup: Duration,
) -> bool {
    if app.open(kind).await.is_err() {
        return false;
    }
    let view = match kind {
        ViewKind::Register => app.register_view().capture_view(),
        ViewKind::Recognize => app.recognize_view().capture_view(),
        ViewKind::Delete | ViewKind::List => {
            unreachable!("{} view has no camera", kind)
        }
    };
    if view.wait_for_frame(warmup).await {
        return true;
    }
    app.notifier_mut().alert(&format!(
        "Camera did not produce a frame within {}s",
        warmup.as_secs()
    ));
    app.close(kind);
    false
}

async fn register(
    app: &mut App<ConsoleNotifier>,
    id: Option<&str>,
    name: Option<&str>,
    warmup: Duration,
) -> Result<bool, String> {
    if !open_camera_view(app, ViewKind::Register, warmup).await {
        return Ok(false);
    }
    let view = app.register_view_mut();
    view.id_input.set_value(id.unwrap_or_default());
    view.name_input.set_value(name.unwrap_or_default());

    let ok = app.submit_registration().await.is_ok();
    app.close(ViewKind::Register);
    Ok(ok)
}

async fn recognize(app: &mut App<ConsoleNotifier>, warmup: Duration) -> Result<bool, String> {
    if !open_camera_view(app, ViewKind::Recognize, warmup).await {
        return Ok(false);
    }
    let ok = app.submit_recognition().await.is_ok();
    app.close(ViewKind::Recognize);

    let results = app.recognize_view().results.text();
    if !results.is_empty() {
        println!("{}", results);
    }
    Ok(ok)
}

async fn list(app: &mut App<ConsoleNotifier>) -> Result<bool, String> {
    if app.open(ViewKind::Delete).await.is_err() {
        return Ok(false);
    }
    let persons = app.delete_view().chooser.persons();
    if persons.is_empty() {
        println!("No persons registered.");
    }
    for option in persons {
        println!("{}\t{}", option.value, option.label);
    }
    app.close(ViewKind::Delete);
    Ok(true)
}

async fn persons(app: &mut App<ConsoleNotifier>) -> Result<bool, String> {
    if app.open(ViewKind::List).await.is_err() {
        return Ok(false);
    }
    print!("{}", app.list_view().table);
    app.close(ViewKind::List);
    Ok(true)
}

async fn delete(app: &mut App<ConsoleNotifier>, id: Option<&str>) -> Result<bool, String> {
    if app.open(ViewKind::Delete).await.is_err() {
        return Ok(false);
    }
    if let Some(id) = id {
        if !app.delete_view_mut().chooser.select(id) {
            app.notifier_mut()
                .alert(&format!("No registered person has ID '{}'", id));
            return Ok(false);
        }
    }
    Ok(app.delete_selected().await.is_ok())
}
